//! Rich-text extraction: parses a widget's embedded markup into an ordered list
//! of formatted text runs with inherited styling.
//!
//! The traversal threads a formatting-state value through an explicit stack, so
//! state changes stay local to a subtree and sibling subtrees never observe each
//! other's formatting.

use log::warn;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;

use super::constants::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_TEXT_COLOR};
use super::utils::{css_color_to_hex, packed_color_to_hex, parse_inline_style};
use crate::models::{Alignment, Style, TextWidget};

/// A contiguous span of text sharing one formatting state.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    /// Per-run color override; falls back to the content's resolved text color.
    pub color: Option<String>,
    pub font_size: Option<u32>,
    pub font_family: Option<String>,
}

/// The formatting state accumulated while descending the markup tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatState {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub color: Option<String>,
}

impl From<&Style> for FormatState {
    fn from(style: &Style) -> Self {
        FormatState {
            bold: style.bold,
            italic: style.italic,
            underline: style.underline,
            strikethrough: style.strike,
            color: None,
        }
    }
}

/// The resolved-content result for one text widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedContent {
    pub element_id: String,
    /// Ordered formatted runs; guaranteed non-empty when the raw text has
    /// non-whitespace content.
    pub runs: Vec<TextRun>,
    /// Plain-text concatenation of the runs.
    pub plain_text: String,
    pub text_align: Alignment,
    pub font_family: String,
    pub font_size: u32,
    /// Resolved text color, defaulted to black when the style leaves it unset.
    pub text_color: String,
    pub background_color: Option<String>,
}

/// Extracts formatted runs from a markup string under an inherited base state.
///
/// Emits a run for every text node with non-whitespace content, carrying the
/// formatting state accumulated from enclosing tags and inline styles. Returns
/// no runs for empty or whitespace-only markup. If the reader rejects the
/// markup outright, returns no runs and leaves the fallback to the caller.
pub fn extract_runs(markup: &str, base: &FormatState) -> Vec<TextRun> {
    if markup.is_empty() {
        return Vec::new();
    }

    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    // states[0] is the inherited base; names runs parallel to states[1..].
    let mut states: Vec<FormatState> = vec![base.clone()];
    let mut names: Vec<String> = Vec::new();
    let mut runs: Vec<TextRun> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) => {
                let name = tag_name(&element);
                let mut state = states.last().cloned().unwrap_or_default();
                merge_tag(&mut state, &name);
                merge_inline_style(&mut state, &element);
                names.push(name);
                states.push(state);
            }
            Ok(Event::End(element)) => {
                let name =
                    String::from_utf8_lossy(element.local_name().as_ref()).to_lowercase();
                // Pop back to the matching open tag; stray end tags are ignored.
                if let Some(open) = names.iter().rposition(|n| *n == name) {
                    names.truncate(open);
                    states.truncate(open + 1);
                }
            }
            Ok(Event::Empty(_)) => {
                // Self-closing elements (e.g. <br/>) cannot wrap text.
            }
            Ok(Event::Text(text)) => {
                let text = match text.unescape() {
                    Ok(unescaped) => unescaped.into_owned(),
                    // One entity the XML reader does not know (e.g. &nbsp;)
                    // fails the whole node; decode the export's named set by
                    // hand instead of leaking raw entities into the run.
                    Err(_) => decode_entities(&String::from_utf8_lossy(&text)),
                };
                if !text.trim().is_empty() {
                    let state = states.last().cloned().unwrap_or_default();
                    runs.push(make_run(text, &state));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("Failed to parse text markup, falling back to plain text: {e}");
                return Vec::new();
            }
        }
    }

    runs
}

/// Strips tags from a markup string, decoding the handful of entities the export
/// uses. Deliberately tolerant of markup the XML reader rejects.
pub fn plain_text(markup: &str) -> String {
    let mut stripped = String::with_capacity(markup.len());
    let mut in_tag = false;
    for ch in markup.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => stripped.push(c),
            _ => {}
        }
    }
    decode_entities(&stripped)
}

/// Decodes the named entities the export emits. `&amp;` goes last so it cannot
/// manufacture new entities.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", "\u{a0}")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Extracts the complete resolved content for one text widget: formatted runs
/// plus the style attributes the authoring surface needs, with documented
/// defaults applied here and nowhere earlier.
pub fn extract_content(widget_id: &str, text_widget: &TextWidget) -> ExtractedContent {
    let mut font_family = DEFAULT_FONT_FAMILY.to_string();
    let mut font_size = DEFAULT_FONT_SIZE;
    let mut text_color = DEFAULT_TEXT_COLOR.to_string();
    let mut background_color = None;
    let mut text_align = Alignment::Left;
    let mut base = FormatState::default();

    if let Some(style) = &text_widget.style {
        if let Some(family) = &style.font_family {
            font_family = family.clone();
        }
        if let Some(size) = style.font_size {
            font_size = size;
        }
        if let Some(color) = packed_color_to_hex(style.text_color) {
            text_color = color;
        }
        background_color = packed_color_to_hex(style.background_color);
        text_align = style.text_align.unwrap_or(Alignment::Left);
        base = FormatState::from(style);
    }

    let mut runs = extract_runs(&text_widget.text, &base);

    // Guarantee: every widget with non-empty text produces at least one run.
    if runs.is_empty() && !text_widget.text.is_empty() {
        let fallback = plain_text(&text_widget.text);
        if !fallback.trim().is_empty() {
            runs.push(make_run(fallback, &base));
        }
    }

    let plain_text = runs.iter().map(|run| run.text.as_str()).collect();

    ExtractedContent {
        element_id: widget_id.to_string(),
        runs,
        plain_text,
        text_align,
        font_family,
        font_size,
        text_color,
        background_color,
    }
}

fn make_run(text: String, state: &FormatState) -> TextRun {
    TextRun {
        text,
        bold: state.bold,
        italic: state.italic,
        underline: state.underline,
        strikethrough: state.strikethrough,
        color: state.color.clone(),
        font_size: None,
        font_family: None,
    }
}

fn tag_name(element: &BytesStart) -> String {
    String::from_utf8_lossy(element.local_name().as_ref()).to_lowercase()
}

/// Emphasis implied by recognized tag names.
fn merge_tag(state: &mut FormatState, name: &str) {
    match name {
        "strong" | "b" => state.bold = true,
        "em" | "i" => state.italic = true,
        "u" => state.underline = true,
        "strike" | "s" | "del" => state.strikethrough = true,
        _ => {}
    }
}

/// Inline style declarations only add formatting; they never remove a flag an
/// enclosing element already set.
fn merge_inline_style(state: &mut FormatState, element: &BytesStart) {
    let Ok(Some(attr)) = element.try_get_attribute("style") else {
        return;
    };
    let value = attr
        .unescape_value()
        .map(|v| v.into_owned())
        .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());

    let properties = parse_inline_style(&value);

    if let Some(color) = properties.get("color") {
        state.color = Some(css_color_to_hex(color));
    }
    if let Some(weight) = properties.get("font-weight") {
        if weight == "bold" || weight == "700" {
            state.bold = true;
        }
    }
    if let Some(font_style) = properties.get("font-style") {
        if font_style == "italic" {
            state.italic = true;
        }
    }
    if let Some(decoration) = properties.get("text-decoration") {
        if decoration.contains("underline") {
            state.underline = true;
        }
        if decoration.contains("line-through") {
            state.strikethrough = true;
        }
    }
}
