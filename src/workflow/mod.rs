//! Card generation workflow: state machine and orchestration.

mod generator;
mod state;

pub use generator::{image_prompt, CardGenerator, Generation, Rejection, CANCELLED_MESSAGE};
pub use state::{CardRecord, WorkflowState};
