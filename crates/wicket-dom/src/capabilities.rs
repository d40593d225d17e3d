//! Capability table attached to each element.
//!
//! Each [`ElementKind`] gets a fixed set of optional callbacks. Consumers
//! call through the table when present and fall back to default behavior
//! otherwise.

use crate::element::{ElementData, ElementKind};
use crate::{DomTree, NodeId};

/// Called when an element is popped off the parser's stack of open elements.
pub type PoppedCallback = fn(&mut DomTree, NodeId);

/// Computes an element's intrinsic dimensions from its attributes.
pub type IntrinsicSizeFn = fn(&ElementData) -> Option<IntrinsicSize>;

/// Maps legacy presentational attributes to style declarations.
pub type PresentationalHintsFn = fn(&ElementData) -> Vec<PresentationalHint>;

/// Width and height in CSS pixels; either may be unknown.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IntrinsicSize {
    /// Intrinsic width, if known.
    pub width: Option<f32>,
    /// Intrinsic height, if known.
    pub height: Option<f32>,
}

/// [§ 15.1 Rendering: presentational hints](https://html.spec.whatwg.org/multipage/rendering.html#presentational-hints)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationalHint {
    /// CSS property name.
    pub property: &'static str,
    /// CSS value text.
    pub value: String,
}

impl PresentationalHint {
    fn new(property: &'static str, value: impl Into<String>) -> Self {
        Self {
            property,
            value: value.into(),
        }
    }
}

/// Optional per-element callbacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Capabilities {
    /// Intrinsic size used by layout for replaced elements.
    pub intrinsic_size: Option<IntrinsicSizeFn>,
    /// Lifecycle hook run when the parser pops the element.
    pub on_popped_from_stack: Option<PoppedCallback>,
    /// Legacy attribute styling.
    pub presentational_hints: Option<PresentationalHintsFn>,
}

impl Capabilities {
    /// The standard capability table for an element kind.
    #[must_use]
    pub const fn for_kind(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Style => Self {
                on_popped_from_stack: Some(capture_stylesheet_text),
                intrinsic_size: None,
                presentational_hints: None,
            },
            ElementKind::Link => Self {
                on_popped_from_stack: Some(queue_stylesheet_fetch),
                intrinsic_size: None,
                presentational_hints: None,
            },
            ElementKind::Script => Self {
                on_popped_from_stack: Some(mark_script_started),
                intrinsic_size: None,
                presentational_hints: None,
            },
            ElementKind::Image => Self {
                on_popped_from_stack: None,
                intrinsic_size: Some(dimension_attributes),
                presentational_hints: Some(dimension_hints),
            },
            ElementKind::Canvas | ElementKind::Iframe => Self {
                on_popped_from_stack: None,
                intrinsic_size: Some(default_replaced_size),
                presentational_hints: Some(dimension_hints),
            },
            ElementKind::Body => Self {
                on_popped_from_stack: None,
                intrinsic_size: None,
                presentational_hints: Some(body_hints),
            },
            ElementKind::Font => Self {
                on_popped_from_stack: None,
                intrinsic_size: None,
                presentational_hints: Some(font_hints),
            },
            ElementKind::Table => Self {
                on_popped_from_stack: None,
                intrinsic_size: None,
                presentational_hints: Some(table_hints),
            },
            ElementKind::Generic
            | ElementKind::Template
            | ElementKind::Custom
            | ElementKind::Svg
            | ElementKind::MathMl => Self {
                on_popped_from_stack: None,
                intrinsic_size: None,
                presentational_hints: None,
            },
        }
    }
}

/// [§ 4.2.6 The style element](https://html.spec.whatwg.org/multipage/semantics.html#update-a-style-block)
///
/// "The user agent must run the update a style block algorithm whenever ...
/// The element is popped off the stack of open elements of an HTML parser."
fn capture_stylesheet_text(tree: &mut DomTree, id: NodeId) {
    let text = tree.text_content(id);
    if let Some(element) = tree.as_element_mut(id) {
        element.state.stylesheet_text = Some(text);
    }
}

/// [§ 4.2.4 The link element](https://html.spec.whatwg.org/multipage/semantics.html#link-type-stylesheet)
///
/// Records the stylesheet URL for an external fetcher; nothing is fetched here.
fn queue_stylesheet_fetch(tree: &mut DomTree, id: NodeId) {
    let Some(element) = tree.as_element_mut(id) else {
        return;
    };
    let is_stylesheet = element.attr("rel").is_some_and(|rel| {
        rel.split_ascii_whitespace()
            .any(|token| token.eq_ignore_ascii_case("stylesheet"))
    });
    let href = element.attr("href").map(str::to_string);
    if is_stylesheet && href.is_some() {
        element.state.pending_fetch = href;
    }
}

/// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#scriptEndTag)
///
/// Script execution is out of scope; the element is only marked so it
/// never runs twice.
fn mark_script_started(tree: &mut DomTree, id: NodeId) {
    if let Some(element) = tree.as_element_mut(id) {
        element.state.already_started = true;
    }
}

/// [§ 2.3.4.1 Non-negative integers](https://html.spec.whatwg.org/multipage/common-microsyntaxes.html#rules-for-parsing-non-negative-integers)
///
/// Leading whitespace is skipped and parsing stops at the first non-digit.
fn parse_non_negative_integer(value: &str) -> Option<u32> {
    let digits: String = value
        .trim_start_matches(|c: char| c.is_ascii_whitespace())
        .trim_start_matches('+')
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

#[allow(clippy::cast_precision_loss)]
fn dimension(element: &ElementData, name: &str) -> Option<f32> {
    element
        .attr(name)
        .and_then(parse_non_negative_integer)
        .map(|v| v as f32)
}

fn dimension_attributes(element: &ElementData) -> Option<IntrinsicSize> {
    let size = IntrinsicSize {
        width: dimension(element, "width"),
        height: dimension(element, "height"),
    };
    (size.width.is_some() || size.height.is_some()).then_some(size)
}

/// Canvas and iframe default to 300x150 when no dimension attributes are given.
fn default_replaced_size(element: &ElementData) -> Option<IntrinsicSize> {
    Some(IntrinsicSize {
        width: dimension(element, "width").or(Some(300.0)),
        height: dimension(element, "height").or(Some(150.0)),
    })
}

fn dimension_hints(element: &ElementData) -> Vec<PresentationalHint> {
    ["width", "height"]
        .into_iter()
        .filter_map(|name| {
            let value = element.attr(name).and_then(parse_non_negative_integer)?;
            let property = if name == "width" { "width" } else { "height" };
            Some(PresentationalHint::new(property, format!("{value}px")))
        })
        .collect()
}

fn body_hints(element: &ElementData) -> Vec<PresentationalHint> {
    let mut hints = Vec::new();
    if let Some(color) = element.attr("bgcolor") {
        hints.push(PresentationalHint::new("background-color", color));
    }
    if let Some(color) = element.attr("text") {
        hints.push(PresentationalHint::new("color", color));
    }
    hints
}

/// [§ 15.3.4 Phrasing content: font](https://html.spec.whatwg.org/multipage/rendering.html#phrasing-content-3)
fn font_hints(element: &ElementData) -> Vec<PresentationalHint> {
    let mut hints = Vec::new();
    if let Some(color) = element.attr("color") {
        hints.push(PresentationalHint::new("color", color));
    }
    if let Some(face) = element.attr("face") {
        hints.push(PresentationalHint::new("font-family", face));
    }
    if let Some(keyword) = element.attr("size").and_then(legacy_font_size) {
        hints.push(PresentationalHint::new("font-size", keyword));
    }
    hints
}

/// "rules for parsing a legacy font size"
fn legacy_font_size(input: &str) -> Option<&'static str> {
    let input = input.trim_matches(|c: char| c.is_ascii_whitespace());
    let (mode, rest) = match input.as_bytes().first()? {
        b'+' => (1, &input[1..]),
        b'-' => (-1, &input[1..]),
        _ => (0, input),
    };
    let value = i64::from(parse_non_negative_integer(rest)?);
    let value = match mode {
        1 => 3 + value,
        -1 => 3 - value,
        _ => value,
    };
    Some(match value.clamp(1, 7) {
        1 => "x-small",
        2 => "small",
        3 => "medium",
        4 => "large",
        5 => "x-large",
        6 => "xx-large",
        _ => "xxx-large",
    })
}

fn table_hints(element: &ElementData) -> Vec<PresentationalHint> {
    let mut hints = Vec::new();
    if let Some(width) = element.attr("width").and_then(parse_non_negative_integer) {
        hints.push(PresentationalHint::new("width", format!("{width}px")));
    }
    if let Some(color) = element.attr("bgcolor") {
        hints.push(PresentationalHint::new("background-color", color));
    }
    if let Some(border) = element.attr("border") {
        let width = parse_non_negative_integer(border).unwrap_or(1);
        hints.push(PresentationalHint::new("border-width", format!("{width}px")));
    }
    hints
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_font_size() {
        assert_eq!(legacy_font_size("1"), Some("x-small"));
        assert_eq!(legacy_font_size("+1"), Some("large"));
        assert_eq!(legacy_font_size("-2"), Some("x-small"));
        assert_eq!(legacy_font_size("9"), Some("xxx-large"));
        assert_eq!(legacy_font_size("x"), None);
    }

    #[test]
    fn test_parse_non_negative_integer() {
        assert_eq!(parse_non_negative_integer("  42px"), Some(42));
        assert_eq!(parse_non_negative_integer("+7"), Some(7));
        assert_eq!(parse_non_negative_integer("abc"), None);
    }
}
