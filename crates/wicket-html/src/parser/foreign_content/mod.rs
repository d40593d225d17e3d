//! [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)
//!
//! SVG and MathML subtrees, plus the attribute and tag name adjustments
//! applied to elements created in those namespaces.

mod mathml;
mod svg;

pub use mathml::{adjust_mathml_attributes, is_mathml_text_integration_point};
pub use svg::{adjust_svg_attributes, adjust_svg_tag_name};

use wicket_dom::{Attribute, ElementData, Namespace};

use super::HTMLParser;
use crate::error::{ParseErrorCode, UnsupportedReason};
use crate::tokenizer::{Tag, Token};

/// [§ 13.2.6.1 Adjust foreign attributes](https://html.spec.whatwg.org/multipage/parsing.html#adjust-foreign-attributes)
///
/// (attribute name, prefix, local name, namespace)
const FOREIGN_ATTRIBUTE_ADJUSTMENTS: &[(&str, Option<&str>, &str, Namespace)] = &[
    ("xlink:actuate", Some("xlink"), "actuate", Namespace::XLink),
    ("xlink:arcrole", Some("xlink"), "arcrole", Namespace::XLink),
    ("xlink:href", Some("xlink"), "href", Namespace::XLink),
    ("xlink:role", Some("xlink"), "role", Namespace::XLink),
    ("xlink:show", Some("xlink"), "show", Namespace::XLink),
    ("xlink:title", Some("xlink"), "title", Namespace::XLink),
    ("xlink:type", Some("xlink"), "type", Namespace::XLink),
    ("xml:lang", Some("xml"), "lang", Namespace::Xml),
    ("xml:space", Some("xml"), "space", Namespace::Xml),
    ("xmlns", None, "xmlns", Namespace::Xmlns),
    ("xmlns:xlink", Some("xmlns"), "xlink", Namespace::Xmlns),
];

/// "if any of the attributes on the token match the strings given in the
/// first column of the following table, let the attribute be a namespaced
/// attribute, with the prefix being the string given in the corresponding
/// cell in the second column, the local name being the string given in the
/// corresponding cell in the third column, and the namespace being the
/// namespace given in the corresponding cell in the fourth column."
pub fn adjust_foreign_attributes(attributes: &mut [Attribute]) {
    for attr in attributes.iter_mut().filter(|attr| attr.namespace.is_none()) {
        if let Some(&(_, prefix, local_name, namespace)) = FOREIGN_ATTRIBUTE_ADJUSTMENTS
            .iter()
            .find(|&&(name, ..)| attr.local_name == name)
        {
            attr.prefix = prefix.map(str::to_string);
            attr.local_name = local_name.to_string();
            attr.namespace = Some(namespace);
        }
    }
}

/// [§ 13.2.6.5](https://html.spec.whatwg.org/multipage/parsing.html#html-integration-point)
///
/// "A node is an HTML integration point if it is one of the following
/// elements: A MathML annotation-xml element whose start tag token had an
/// attribute with the name "encoding" whose value was an ASCII
/// case-insensitive match for the string "text/html"; [or]
/// "application/xhtml+xml"; An SVG foreignObject element; An SVG desc
/// element; An SVG title element"
#[must_use]
pub fn is_html_integration_point(element: &ElementData) -> bool {
    mathml::is_html_annotation_xml(element)
        || (element.namespace == Namespace::Svg
            && matches!(element.local_name.as_str(), "foreignObject" | "desc" | "title"))
}

/// Start tags that break out of foreign content back into HTML.
const BREAKOUT_START_TAGS: &[&str] = &[
    "b",
    "big",
    "blockquote",
    "body",
    "br",
    "center",
    "code",
    "dd",
    "div",
    "dl",
    "dt",
    "em",
    "embed",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "head",
    "hr",
    "i",
    "img",
    "li",
    "listing",
    "menu",
    "meta",
    "nobr",
    "ol",
    "p",
    "pre",
    "ruby",
    "s",
    "small",
    "span",
    "strong",
    "strike",
    "sub",
    "sup",
    "table",
    "tt",
    "u",
    "ul",
    "var",
];

fn is_breakout(token: &Token) -> bool {
    match token {
        Token::StartTag(tag) => {
            BREAKOUT_START_TAGS.contains(&tag.name.as_str())
                || (tag.name == "font"
                    && (tag.has_attr("color") || tag.has_attr("face") || tag.has_attr("size")))
        }
        Token::EndTag(tag) => tag.name == "br" || tag.name == "p",
        _ => false,
    }
}

impl HTMLParser<'_> {
    /// [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)
    pub(super) fn process_foreign_content(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL: Parse error. Insert a
            //  U+FFFD REPLACEMENT CHARACTER character."
            Token::Character('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedCharacter, token);
                self.insert_character('\u{FFFD}');
            }
            // "A character token that is one of U+0009 CHARACTER TABULATION,
            //  U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE
            //  RETURN (CR), or U+0020 SPACE: Insert the token's character."
            Token::Character(c @ ('\t' | '\n' | '\x0C' | '\r' | ' ')) => {
                self.insert_character(*c);
            }
            // "Any other character token: Insert the token's character. Set the
            //  frameset-ok flag to "not ok"."
            Token::Character(c) => {
                self.insert_character(*c);
                self.frameset_ok = false;
            }
            Token::Comment(data) => self.insert_comment(data),
            Token::Doctype(_) => self.parse_error(ParseErrorCode::UnexpectedDoctype, token),
            _ if is_breakout(token) => self.break_out_of_foreign_content(token),
            Token::StartTag(tag) => self.insert_foreign_start_tag(tag),
            Token::EndTag(tag) => self.foreign_end_tag(token, tag),
            Token::EndOfFile => {
                self.process_using_rules_for(self.insertion_mode, token);
            }
        }
    }

    /// The breakout start tags, `font` with presentational attributes, and
    /// the `</br>` and `</p>` end tags.
    fn break_out_of_foreign_content(&mut self, token: &Token) {
        // "Parse error."
        self.parse_error(ParseErrorCode::UnexpectedTokenInForeignContent, token);

        // "While the current node is not a MathML text integration point, an
        //  HTML integration point, or an element in the HTML namespace, pop
        //  elements from the stack of open elements."
        while let Some(current) = self.current_node()
            && let Some(element) = self.tree.as_element(current)
            && element.namespace != Namespace::Html
            && !is_mathml_text_integration_point(element)
            && !is_html_integration_point(element)
        {
            let _ = self.pop_current_node();
        }

        // "Reprocess the token according to the rules given in the section
        //  corresponding to the current insertion mode in HTML content."
        self.process_using_rules_for(self.insertion_mode, token);
    }

    /// "Any other start tag"
    fn insert_foreign_start_tag(&mut self, tag: &Tag) {
        let namespace = self
            .adjusted_current_node()
            .and_then(|id| self.tree.namespace(id))
            .unwrap_or(Namespace::Html);

        // "If the adjusted current node is an element in the SVG namespace,
        //  adjust SVG tag name." The attribute adjustments happen when the
        //  element is created.
        let adjusted;
        let tag = if namespace == Namespace::Svg {
            adjusted = Tag {
                name: adjust_svg_tag_name(&tag.name).to_string(),
                ..tag.clone()
            };
            &adjusted
        } else {
            tag
        };

        // "Insert a foreign element for the token, with adjusted current
        //  node's namespace and false."
        let _ = self.insert_foreign_element(tag, namespace, false);

        // "If the token has its self-closing flag set, then run the
        //  appropriate steps from the following list:"
        if tag.self_closing {
            // "If the token's tag name is "script", and the new current node
            //  is in the SVG namespace: Acknowledge the token's self-closing
            //  flag, and then act as described in the steps for a "script"
            //  end tag below."
            // "Otherwise: Pop the current node off the stack of open elements
            //  and acknowledge the token's self-closing flag."
            self.acknowledge_self_closing_flag();
            if namespace == Namespace::Svg && tag.name == "script" {
                self.svg_script_end_tag();
            } else {
                let _ = self.pop_current_node();
            }
        }
    }

    /// "An end tag whose tag name is "script", if the current node is an SVG
    /// script element"
    fn svg_script_end_tag(&mut self) {
        let _ = self.pop_current_node();
        if self.options.scripting {
            self.unsupported(UnsupportedReason::ScriptExecution);
        }
    }

    fn foreign_end_tag(&mut self, token: &Token, tag: &Tag) {
        if tag.name == "script"
            && self
                .current_node()
                .is_some_and(|id| self.tree.is_element(id, Namespace::Svg, "script"))
        {
            self.svg_script_end_tag();
            return;
        }

        // "Any other end tag"
        // STEP 1: "Initialize node to be the current node (the bottommost node
        //          of the stack)."
        let Some(mut index) = self.stack_of_open_elements.len().checked_sub(1) else {
            return;
        };

        // STEP 2: "If node's tag name, converted to ASCII lowercase, is not the
        //          same as the tag name of the token, then this is a parse error."
        let matches_token = |parser: &Self, index: usize| {
            parser
                .tree
                .local_name(parser.stack_of_open_elements[index])
                .is_some_and(|name| name.eq_ignore_ascii_case(&tag.name))
        };
        if !matches_token(self, index) {
            self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
        }

        loop {
            // STEP 3: "Loop: If node is the topmost element in the stack of
            //          open elements, then return. (fragment case)"
            if index == 0 {
                return;
            }

            // STEP 4: "If node's tag name, converted to ASCII lowercase, is the
            //          same as the tag name of the token, pop elements from the
            //          stack of open elements until node has been popped from
            //          the stack, and then return."
            if matches_token(self, index) {
                let node = self.stack_of_open_elements[index];
                self.pop_until_node(node);
                return;
            }

            // STEP 5: "Set node to the previous entry in the stack of open
            //          elements."
            index -= 1;

            // STEP 6: "If node is not an element in the HTML namespace, return
            //          to the step labeled loop."
            // STEP 7: "Otherwise, process the token according to the rules
            //          given in the section corresponding to the current
            //          insertion mode in HTML content."
            if self.tree.namespace(self.stack_of_open_elements[index]) == Some(Namespace::Html) {
                self.process_using_rules_for(self.insertion_mode, token);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xlink_href_becomes_namespaced() {
        let mut attributes = vec![
            Attribute::new("xlink:href", "#a"),
            Attribute::new("xmlns", "http://www.w3.org/2000/svg"),
            Attribute::new("href", "#b"),
        ];
        adjust_foreign_attributes(&mut attributes);

        assert_eq!(attributes[0].namespace, Some(Namespace::XLink));
        assert_eq!(attributes[0].prefix.as_deref(), Some("xlink"));
        assert_eq!(attributes[0].local_name, "href");
        assert_eq!(attributes[1].namespace, Some(Namespace::Xmlns));
        assert_eq!(attributes[1].prefix, None);
        assert_eq!(attributes[2].namespace, None);
    }

    #[test]
    fn annotation_xml_integration_point_needs_html_encoding() {
        let mut element = ElementData::new(Namespace::MathMl, "annotation-xml");
        assert!(!is_html_integration_point(&element));
        element.attrs.push(Attribute::new("encoding", "Text/HTML"));
        assert!(is_html_integration_point(&element));
        assert!(is_html_integration_point(&ElementData::new(
            Namespace::Svg,
            "foreignObject"
        )));
    }
}
