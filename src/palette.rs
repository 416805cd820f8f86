//! Color palette and styling for CLI output.
//!
//! This module defines a consistent visual style for all CLI output.
//! Colors are designed for modern terminals with full color support.

use owo_colors::{OwoColorize, Style};

/// Style for item names - the primary identifier, visually prominent.
pub fn item_name() -> Style {
    Style::new().cyan().bold()
}

/// Style for section headings like "Skills:" or "Global (~/.claude/skills):".
pub fn heading() -> Style {
    Style::new().white().bold()
}

/// Style for labels like "Name:" or "Path:".
pub fn label() -> Style {
    Style::new().blue()
}

/// Style for description text and footers - readable but subdued.
pub fn description() -> Style {
    Style::new().dimmed()
}

/// Style for config keys in `config list`.
pub fn config_key() -> Style {
    Style::new().green()
}

/// Apply `style` when color output is enabled.
fn paint(text: &str, style: Style, use_color: bool) -> String {
    if use_color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Format an item name with styling.
pub fn fmt_item_name(name: &str, use_color: bool) -> String {
    paint(name, item_name(), use_color)
}

/// Format a section heading with styling.
pub fn fmt_heading(text: &str, use_color: bool) -> String {
    paint(text, heading(), use_color)
}

/// Format a label with styling.
pub fn fmt_label(text: &str, use_color: bool) -> String {
    paint(text, label(), use_color)
}

/// Format description text with styling.
pub fn fmt_description(text: &str, use_color: bool) -> String {
    paint(text, description(), use_color)
}

/// Format a config key with styling.
pub fn fmt_config_key(text: &str, use_color: bool) -> String {
    paint(text, config_key(), use_color)
}

#[cfg(test)]
mod tests {
    use super::{fmt_heading, fmt_item_name};

    #[test]
    fn plain_output_without_color() {
        assert_eq!(fmt_heading("Skills:", false), "Skills:");
        assert_eq!(fmt_item_name("web-fetch", false), "web-fetch");
    }

    #[test]
    fn colored_output_adds_escapes() {
        assert_ne!(fmt_item_name("web-fetch", true), "web-fetch");
    }
}
