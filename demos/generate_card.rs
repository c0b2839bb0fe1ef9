//! Basic card generation example.
//!
//! Run with: `cargo run --example generate_card`
//!
//! Requires `API_KEY` (or `GOOGLE_API_KEY`) environment variable.

use cardgen::render::{html, text};
use cardgen::{CardGenerator, CardRequest, DesignStyle, WorkflowState};

#[tokio::main]
async fn main() -> cardgen::Result<()> {
    let generator = CardGenerator::from_env()?;

    let request = CardRequest::new("Alex Doe", "Quantum Computing", DesignStyle::Futuristic);
    let state = match generator.submit(request).await {
        Ok(state) => state,
        Err(rejected) => {
            eprintln!("Not submitted: {rejected}");
            return Ok(());
        }
    };

    println!("{}", text::render_state(&state));
    if let WorkflowState::Success(record) = &state {
        std::fs::write("card.html", html::render_card(record))?;
        record.image.save("background.jpg")?;
        println!("Saved card.html and background.jpg ({} bytes)", record.image.size());
    }

    Ok(())
}
