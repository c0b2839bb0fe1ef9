//! Standalone HTML rendering of a card.
//!
//! The output is a single self-contained page: the background image is
//! embedded as a data URI and the stylesheet is inlined, so the file can be
//! opened directly in a browser.

use crate::content::TextContent;
use crate::design::Layout;
use crate::workflow::CardRecord;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLESHEET: &str = r#"
body { margin: 0; min-height: 100vh; display: flex; align-items: center; justify-content: center; background: #111827; font-family: ui-sans-serif, system-ui, sans-serif; }
.card { position: relative; width: min(42rem, 95vw); aspect-ratio: 16 / 9; border-radius: 1rem; overflow: hidden; box-shadow: 0 25px 50px -12px rgba(0,0,0,.6); color: #fff; }
.card .background { position: absolute; inset: 0; width: 100%; height: 100%; object-fit: cover; }
.card h2 { margin: 0; font-size: 2rem; font-weight: 700; text-shadow: 1px 1px 4px rgba(0,0,0,.8); }
.card h3 { margin: 0; font-size: 1.2rem; font-weight: 300; }
.card .tagline { font-style: italic; font-size: .875rem; opacity: .85; }
.card hr { border: 0; border-top: 1px solid rgba(255,255,255,.2); margin: .75rem 0; }
.card .contacts { list-style: none; margin: 0; padding: 0; font-size: .875rem; }
.card .contacts li { margin: .25rem 0; }
.card-split .panel { position: relative; width: 60%; height: 100%; box-sizing: border-box; padding: 1.5rem; display: flex; flex-direction: column; justify-content: center; background: rgba(255,255,255,.8); backdrop-filter: blur(12px); color: #1f2937; }
.card-split h2 { color: #111827; text-shadow: none; }
.card-split h3 { color: #4f46e5; }
.card-split hr { border-top-color: #d1d5db; }
.card-centered { display: flex; align-items: center; justify-content: center; text-align: center; }
.card-centered .shade { position: absolute; inset: 0; background: rgba(0,0,0,.5); }
.card-centered .panel { position: relative; padding: 1.5rem; border-radius: .5rem; background: rgba(0,0,0,.2); border: 1px solid rgba(255,255,255,.1); backdrop-filter: blur(4px); }
.card-overlay { display: flex; flex-direction: column; justify-content: flex-end; }
.card-overlay .shade { position: absolute; inset: 0; background: linear-gradient(to top, rgba(0,0,0,.8), rgba(0,0,0,.4), transparent); }
.card-overlay .panel { position: relative; padding: 1.5rem; }
.card-overlay .tagline { text-align: right; }
.card-overlay .contacts { display: flex; justify-content: space-between; flex-wrap: wrap; }
"#;

/// Renders a full HTML page for the card, using the layout its design maps to.
pub fn render_card(record: &CardRecord) -> String {
    let layout = record.design.layout();
    let class = format!("card card-{layout}");

    let body = match layout {
        Layout::Split => split(record),
        Layout::Centered => centered(record),
        Layout::Overlay => overlay(record),
    };

    page(
        &format!("{} | {}", record.name, record.content.title),
        html! {
            div class=(class) data-design=(record.design.as_str()) {
                img.background src=(record.image_url) alt="AI generated background";
                (body)
            }
        },
    )
}

/// Renders the failure panel as an HTML page.
pub fn render_failure(message: &str) -> String {
    page(
        "Generation Failed",
        html! {
            div.failure {
                p { strong { "Generation Failed" } }
                p { (message) }
            }
        },
    )
}

fn page(title: &str, content: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(STYLESHEET)) }
            }
            body { (content) }
        }
    }
    .into_string()
}

fn split(record: &CardRecord) -> Markup {
    html! {
        div.panel {
            h2 { (record.name) }
            h3 { (record.content.title) }
            p.tagline { "\u{201C}" (record.content.tagline) "\u{201D}" }
            hr;
            (contacts(&record.content))
        }
    }
}

fn centered(record: &CardRecord) -> Markup {
    html! {
        div.shade {}
        div.panel {
            h2 { (record.name) }
            h3 { (record.content.title) }
            p.tagline { "\u{201C}" (record.content.tagline) "\u{201D}" }
            hr;
            (contacts(&record.content))
        }
    }
}

fn overlay(record: &CardRecord) -> Markup {
    html! {
        div.shade {}
        div.panel {
            p.tagline { "\u{201C}" (record.content.tagline) "\u{201D}" }
            h2 { (record.name) }
            h3 { (record.content.title) }
            hr;
            (contacts(&record.content))
        }
    }
}

fn contacts(content: &TextContent) -> Markup {
    html! {
        ul.contacts {
            li.email { "\u{2709} " (content.email) }
            li.phone { "\u{260E} " (content.phone) }
            li.website { "\u{1F310} " (content.website) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::CardRequest;
    use crate::design::DesignStyle;
    use crate::image::{GeneratedImage, GenerationMetadata, ImageFormat};

    fn record(design: DesignStyle) -> CardRecord {
        CardRecord::new(
            &CardRequest::new("Alex <Doe>", "Quantum Computing", design),
            TextContent {
                title: "Quantum Architect".into(),
                tagline: "Engineering tomorrow's realities".into(),
                email: "alex@quantumforge.io".into(),
                phone: "(555) 123-4567".into(),
                website: "quantumforge.io".into(),
            },
            GeneratedImage::new(
                vec![0xFF, 0xD8, 0xFF, 0xE0],
                ImageFormat::Jpeg,
                GenerationMetadata::default(),
            ),
        )
    }

    #[test]
    fn test_layout_class_follows_design() {
        assert!(render_card(&record(DesignStyle::Corporate)).contains("card card-split"));
        assert!(render_card(&record(DesignStyle::Watercolor)).contains("card card-centered"));
        assert!(render_card(&record(DesignStyle::Cyberpunk)).contains("card card-overlay"));
    }

    #[test]
    fn test_card_embeds_image_and_fields() {
        let html = render_card(&record(DesignStyle::Futuristic));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"src="data:image/jpeg;base64,/9j/4A==""#));
        assert!(html.contains("Quantum Architect"));
        assert!(html.contains("alex@quantumforge.io"));
        assert!(html.contains("(555) 123-4567"));
        assert!(html.contains("quantumforge.io"));
        assert!(html.contains(r#"data-design="Futuristic""#));
    }

    #[test]
    fn test_card_escapes_user_text() {
        let html = render_card(&record(DesignStyle::Modern));
        assert!(html.contains("Alex &lt;Doe&gt;"));
        assert!(!html.contains("Alex <Doe>"));
    }

    #[test]
    fn test_failure_page() {
        let html = render_failure("quota <exceeded>");
        assert!(html.contains("Generation Failed"));
        assert!(html.contains("quota &lt;exceeded&gt;"));
    }
}
