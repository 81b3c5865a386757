//! Color formatting, inline-CSS parsing and font mapping helpers for slide
//! conversion.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::constants::{DEFAULT_FONT_FAMILY, DEFAULT_TEXT_COLOR};

// --- Color Formatting ---

/// Converts a 24-bit packed integer color (0xRRGGBB) to an uppercase `#RRGGBB`
/// string. Negative or absent values mean "unset" and convert to `None`.
pub fn packed_color_to_hex(color: Option<i64>) -> Option<String> {
    let color = color?;
    if color < 0 {
        return None;
    }
    let red = (color >> 16) & 0xFF;
    let green = (color >> 8) & 0xFF;
    let blue = color & 0xFF;
    Some(format!("#{red:02X}{green:02X}{blue:02X}"))
}

fn rgb_pattern() -> &'static Regex {
    static RGB: OnceLock<Regex> = OnceLock::new();
    RGB.get_or_init(|| {
        Regex::new(r"rgb\((\d+),\s*(\d+),\s*(\d+)\)").expect("valid rgb() pattern")
    })
}

/// Converts an inline `rgb(r,g,b)` CSS color to `#RRGGBB`. Unparseable strings
/// resolve to black.
pub fn rgb_string_to_hex(rgb: &str) -> String {
    let Some(caps) = rgb_pattern().captures(rgb) else {
        return DEFAULT_TEXT_COLOR.to_string();
    };
    let component = |i: usize| caps[i].parse::<u8>().ok();
    match (component(1), component(2), component(3)) {
        (Some(red), Some(green), Some(blue)) => format!("#{red:02X}{green:02X}{blue:02X}"),
        _ => DEFAULT_TEXT_COLOR.to_string(),
    }
}

/// Normalizes an inline CSS color value: `rgb(...)` strings convert to hex,
/// anything else passes through as written.
pub fn css_color_to_hex(value: &str) -> String {
    if value.starts_with("rgb") {
        rgb_string_to_hex(value)
    } else {
        value.to_string()
    }
}

// --- Inline CSS ---

/// Splits an inline `style` attribute into lowercase property names and trimmed
/// values. Malformed items are skipped.
pub fn parse_inline_style(style: &str) -> HashMap<String, String> {
    let mut properties = HashMap::new();
    for item in style.split(';') {
        if let Some((name, value)) = item.split_once(':') {
            properties.insert(name.trim().to_lowercase(), value.trim().to_string());
        }
    }
    properties
}

// --- Font Mapping ---

/// Maps board font names to authoring-surface-compatible names, defaulting to a
/// generic sans-serif when unmapped.
pub fn map_font_family(family: &str) -> &'static str {
    match family {
        "OpenSans" => "Open Sans",
        "NotoSans" => "Noto Sans",
        "Roobert" => "Arial",
        "Arial" => "Arial",
        "Helvetica" => "Arial",
        "Times" => "Times New Roman",
        "Courier" => "Courier New",
        _ => DEFAULT_FONT_FAMILY,
    }
}
