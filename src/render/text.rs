//! Plain-text rendering for terminals.

use crate::design::Layout;
use crate::workflow::{CardRecord, WorkflowState};
use unicode_width::UnicodeWidthStr;

/// Heading of the failure panel.
pub const FAILURE_HEADING: &str = "Generation Failed";

/// Shown before anything has been submitted.
pub const IDLE_MESSAGE: &str =
    "No card yet. Run `cardgen generate --name <NAME> --industry <INDUSTRY>` to create one.";

/// Shown while a generation is in flight.
pub const LOADING_MESSAGE: &str = "Generating Your Masterpiece...\nThe AI is hard at work crafting your unique visual identity. This may take a moment.";

/// Renders whatever the workflow currently shows.
pub fn render_state(state: &WorkflowState) -> String {
    match state {
        WorkflowState::Idle => IDLE_MESSAGE.to_string(),
        WorkflowState::Loading => LOADING_MESSAGE.to_string(),
        WorkflowState::Success(record) => render_card(record),
        WorkflowState::Error(message) => render_failure(message),
    }
}

/// Renders the labeled failure panel.
pub fn render_failure(message: &str) -> String {
    let lines = [FAILURE_HEADING, "", message].map(|l| (l.to_string(), Align::Left));
    framed(&lines)
}

/// Renders the card as a boxed block, arranged after its layout archetype.
pub fn render_card(record: &CardRecord) -> String {
    let content = &record.content;
    let layout = record.design.layout();
    let tagline = format!("\u{201C}{}\u{201D}", content.tagline);

    let align = match layout {
        Layout::Centered => Align::Center,
        Layout::Split | Layout::Overlay => Align::Left,
    };
    let heading = [record.name.clone(), content.title.clone()];

    let mut lines = Vec::new();
    if layout == Layout::Overlay {
        lines.push((tagline, Align::Right));
        lines.extend(heading.map(|l| (l, align)));
    } else {
        lines.extend(heading.map(|l| (l, align)));
        lines.push((tagline, align));
    }
    lines.push((RULE.to_string(), align));
    lines.extend(
        [
            format!("\u{2709}  {}", content.email),
            format!("\u{260E}  {}", content.phone),
            format!("@  {}", content.website),
        ]
        .map(|l| (l, align)),
    );

    let mut out = framed(&lines);
    out.push_str(&format!(
        "\n[{} \u{2022} {} layout \u{2022} {} background, {} bytes]",
        record.design,
        layout,
        record.image.format.mime_type(),
        record.image.size()
    ));
    out
}

const RULE: &str = "\u{2500}\u{2500}\u{2500}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}

fn framed(lines: &[(String, Align)]) -> String {
    // Multi-line text becomes one row per line so the border stays intact.
    let rows: Vec<(&str, Align)> = lines
        .iter()
        .flat_map(|(text, align)| {
            let mut split: Vec<&str> = text.lines().map(str::trim_end).collect();
            if split.is_empty() {
                split.push("");
            }
            split.into_iter().map(move |line| (line, *align))
        })
        .collect();

    let width = rows.iter().map(|(text, _)| text.width()).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("\u{250C}{}\u{2510}\n", "\u{2500}".repeat(width + 2)));
    for (text, align) in rows {
        let pad = width - text.width();
        let (left_pad, right_pad) = match align {
            Align::Left => (0, pad),
            Align::Center => (pad / 2, pad - pad / 2),
            Align::Right => (pad, 0),
        };
        out.push_str(&format!(
            "\u{2502} {}{}{} \u{2502}\n",
            " ".repeat(left_pad),
            text,
            " ".repeat(right_pad)
        ));
    }
    out.push_str(&format!("\u{2514}{}\u{2518}", "\u{2500}".repeat(width + 2)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{CardRequest, TextContent};
    use crate::design::DesignStyle;
    use crate::image::{GeneratedImage, GenerationMetadata, ImageFormat};
    use std::sync::Arc;

    fn record(design: DesignStyle) -> CardRecord {
        CardRecord::new(
            &CardRequest::new("Alex Doe", "Quantum Computing", design),
            TextContent {
                title: "Quantum Architect".into(),
                tagline: "Engineering tomorrow's realities".into(),
                email: "alex@quantumforge.io".into(),
                phone: "(555) 123-4567".into(),
                website: "quantumforge.io".into(),
            },
            GeneratedImage::new(vec![1, 2, 3], ImageFormat::Jpeg, GenerationMetadata::default()),
        )
    }

    #[test]
    fn test_failure_panel() {
        let panel = render_failure("rate limited");
        let lines: Vec<&str> = panel.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].contains(FAILURE_HEADING));
        assert!(lines[3].contains("rate limited"));
    }

    #[test]
    fn test_frame_lines_have_equal_width() {
        let card = render_card(&record(DesignStyle::Watercolor));
        let framed: Vec<usize> = card
            .lines()
            .take_while(|l| !l.starts_with('['))
            .map(|l| l.width())
            .collect();
        assert!(framed.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_failure_panel_splits_multiline_message() {
        let panel = render_failure("line one\nline two is longer\r\n");
        let lines: Vec<&str> = panel.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines.iter().all(|l| l.width() == lines[0].width()));
        assert!(lines[3].starts_with("\u{2502} line one "));
        assert!(lines[4].starts_with("\u{2502} line two is longer"));
    }

    #[test]
    fn test_wide_characters_keep_border_aligned() {
        let mut card = record(DesignStyle::Corporate);
        card.content.title = "量子アーキテクト".into();
        card.content.tagline = "未来を設計する \u{1F680}".into();
        let rendered = render_card(&card);
        let widths: Vec<usize> = rendered
            .lines()
            .take_while(|l| !l.starts_with('['))
            .map(|l| l.width())
            .collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{widths:?}");
    }

    #[test]
    fn test_overlay_puts_tagline_first_right_aligned() {
        let card = render_card(&record(DesignStyle::Cyberpunk));
        let first_body_line = card.lines().nth(1).unwrap();
        assert!(first_body_line.contains("Engineering tomorrow's realities"));
        assert!(first_body_line.ends_with("\u{201D} \u{2502}"));
        assert!(card.contains("overlay layout"));
    }

    #[test]
    fn test_split_starts_with_name() {
        let card = render_card(&record(DesignStyle::Corporate));
        assert!(card.lines().nth(1).unwrap().starts_with("\u{2502} Alex Doe"));
        assert!(card.contains("split layout"));
        assert!(card.contains("3 bytes"));
    }

    #[test]
    fn test_render_state() {
        assert_eq!(render_state(&WorkflowState::Idle), IDLE_MESSAGE);
        assert_eq!(render_state(&WorkflowState::Loading), LOADING_MESSAGE);
        assert!(render_state(&WorkflowState::Error("boom".into())).contains(FAILURE_HEADING));
        let success = WorkflowState::Success(Arc::new(record(DesignStyle::Modern)));
        assert!(render_state(&success).contains("Quantum Architect"));
    }
}
