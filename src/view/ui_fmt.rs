use ratatui::style::Color;

use crate::model::SIZE_UNAVAILABLE;
use crate::util::format_size;

/// Calculate percentage of a value relative to a total
pub fn percent(value: usize, total: usize) -> f64 {
    if total > 0 {
        value as f64 / total as f64 * 100.0
    } else {
        100.0
    }
}

/// Keep the tail of a path that does not fit, prefixed with "..."
pub fn truncate_left(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width <= 3 {
        return ".".repeat(width);
    }
    let tail: String = text.chars().skip(len - (width - 3)).collect();
    format!("...{}", tail)
}

/// Measured size, or "n/a" when the tree could not be read
pub fn measured_size(bytes: i64) -> String {
    if bytes == SIZE_UNAVAILABLE {
        "n/a".to_string()
    } else {
        format_size(bytes)
    }
}

/// Color for a reclaimed-bytes figure
pub fn delta_color(delta: Option<i64>) -> Color {
    match delta {
        Some(d) if d > 0 => Color::Green,
        Some(0) => Color::Yellow,
        Some(_) => Color::Red,
        None => Color::DarkGray,
    }
}
