//! Presentation of workflow states: HTML pages and terminal text.

pub mod html;
pub mod text;
