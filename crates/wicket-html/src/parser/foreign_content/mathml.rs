//! MathML name adjustments and integration points.

use wicket_dom::{Attribute, ElementData, Namespace};

/// [§ 13.2.6.1 Adjust MathML attributes](https://html.spec.whatwg.org/multipage/parsing.html#adjust-mathml-attributes)
///
/// "if the token has an attribute named definitionurl, change its name to
/// definitionURL (note the case difference)."
pub fn adjust_mathml_attributes(attributes: &mut [Attribute]) {
    for attr in attributes.iter_mut() {
        if attr.namespace.is_none() && attr.local_name == "definitionurl" {
            attr.local_name = "definitionURL".to_string();
        }
    }
}

/// [§ 13.2.6.5](https://html.spec.whatwg.org/multipage/parsing.html#mathml-text-integration-point)
///
/// "A node is a MathML text integration point if it is one of the following
/// elements: A MathML mi element, A MathML mo element, A MathML mn element,
/// A MathML ms element, A MathML mtext element"
#[must_use]
pub fn is_mathml_text_integration_point(element: &ElementData) -> bool {
    element.namespace == Namespace::MathMl
        && matches!(
            element.local_name.as_str(),
            "mi" | "mo" | "mn" | "ms" | "mtext"
        )
}

/// The `annotation-xml` half of the HTML integration point test.
///
/// "A MathML annotation-xml element whose start tag token had an attribute
/// with the name "encoding" whose value was an ASCII case-insensitive match
/// for the string "text/html" [or] "application/xhtml+xml""
pub(super) fn is_html_annotation_xml(element: &ElementData) -> bool {
    element.is(Namespace::MathMl, "annotation-xml")
        && element.attr("encoding").is_some_and(|encoding| {
            encoding.eq_ignore_ascii_case("text/html")
                || encoding.eq_ignore_ascii_case("application/xhtml+xml")
        })
}
