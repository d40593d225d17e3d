//! The modes that run before the body: "initial", "before html", "before
//! head", "in head", "in head noscript", "after head", and "text".

use wicket_dom::{DocumentMode, Namespace, NodeId, NodeType};

use super::is_html_whitespace;
use crate::error::{ParseErrorCode, UnsupportedReason};
use crate::parser::HTMLParser;
use crate::parser::core::InsertionMode;
use crate::parser::quirks::{document_mode_for, is_conforming_doctype};
use crate::tokenizer::{Tag, Token, TokenizerState};

/// Labels that name UTF-8 in the Encoding Standard.
const UTF8_LABELS: &[&str] = &[
    "unicode-1-1-utf-8",
    "unicode11utf8",
    "unicode20utf8",
    "utf-8",
    "utf8",
    "x-unicode20utf8",
];

/// [§ 13.2.3.4](https://html.spec.whatwg.org/multipage/parsing.html#extracting-character-encodings-from-meta-elements)
///
/// The charset named in a `content` attribute such as
/// `text/html; charset=iso-8859-1`.
fn charset_from_content(content: &str) -> Option<&str> {
    let lower = content.to_ascii_lowercase();
    let start = lower.find("charset")? + "charset".len();
    let rest = content[start..].trim_start();
    let rest = rest.strip_prefix('=')?.trim_start();
    let value = match rest.chars().next()? {
        quote @ ('"' | '\'') => {
            let inner = &rest[1..];
            &inner[..inner.find(quote)?]
        }
        _ => rest
            .split(|c: char| c == ';' || is_html_whitespace(c))
            .next()
            .unwrap_or_default(),
    };
    (!value.is_empty()).then_some(value)
}

/// A `<meta>` that asks for a document encoding other than the UTF-8 the
/// input is already decoded as.
fn requests_encoding_change(tag: &Tag) -> bool {
    let label = tag.attr("charset").or_else(|| {
        tag.attr("http-equiv")
            .filter(|value| value.eq_ignore_ascii_case("content-type"))
            .and_then(|_| tag.attr("content"))
            .and_then(charset_from_content)
    });
    label.is_some_and(|label| {
        let label = label.trim().to_ascii_lowercase();
        !UTF8_LABELS.contains(&label.as_str())
    })
}

impl HTMLParser<'_> {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    pub(in crate::parser) fn handle_initial_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION,
            //  U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE
            //  RETURN (CR), or U+0020 SPACE: Ignore the token."
            Token::Character(c) if is_html_whitespace(*c) => {}

            // "A comment token: Insert a comment as the last child of the
            //  Document object."
            Token::Comment(data) => self.insert_comment_in(data, NodeId::ROOT),

            // "A DOCTYPE token"
            Token::Doctype(doctype) => {
                if !is_conforming_doctype(doctype) {
                    self.parse_error(ParseErrorCode::NonConformingDoctype, token);
                }

                // "Append a DocumentType node to the Document node, with its
                //  name set to the name given in the DOCTYPE token, or the
                //  empty string if the name was missing; its public ID set to
                //  the public identifier given in the DOCTYPE token, or the
                //  empty string if the public identifier was missing; and its
                //  system ID set to the system identifier given in the DOCTYPE
                //  token, or the empty string if the system identifier was
                //  missing."
                let node = self.tree.alloc(NodeType::DocumentType {
                    name: doctype.name.clone().unwrap_or_default(),
                    public_id: doctype.public_identifier.clone().unwrap_or_default(),
                    system_id: doctype.system_identifier.clone().unwrap_or_default(),
                });
                self.tree.append_child(NodeId::ROOT, node);

                // "Then, if the document is not an iframe srcdoc document, and
                //  the parser cannot change the mode flag is false" set the
                //  quirks or limited-quirks mode.
                if !self.options.iframe_srcdoc {
                    self.tree.set_mode(document_mode_for(doctype));
                }

                // "Then, switch the insertion mode to "before html"."
                self.insertion_mode = InsertionMode::BeforeHtml;
            }

            // "Anything else: If the document is not an iframe srcdoc
            //  document, then this is a parse error; if the parser cannot
            //  change the mode flag is false, set the Document to quirks mode.
            //  In any case, switch the insertion mode to "before html", then
            //  reprocess the token."
            _ => {
                if !self.options.iframe_srcdoc {
                    self.parse_error(ParseErrorCode::MissingDoctype, token);
                    self.tree.set_mode(DocumentMode::Quirks);
                }
                self.insertion_mode = InsertionMode::BeforeHtml;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    pub(in crate::parser) fn handle_before_html_mode(&mut self, token: &Token) {
        match token {
            Token::Doctype(_) => self.parse_error(ParseErrorCode::UnexpectedDoctype, token),
            Token::Comment(data) => self.insert_comment_in(data, NodeId::ROOT),
            Token::Character(c) if is_html_whitespace(*c) => {}

            // "A start tag whose tag name is "html": Create an element for the
            //  token in the HTML namespace, with the Document as the intended
            //  parent. Append it to the Document object. Put this element in
            //  the stack of open elements. Switch the insertion mode to
            //  "before head"."
            Token::StartTag(tag) if tag.name == "html" => {
                self.insert_html_root(tag);
                self.insertion_mode = InsertionMode::BeforeHead;
            }

            // "Any other end tag: Parse error. Ignore the token."
            Token::EndTag(tag) if !matches!(tag.name.as_str(), "head" | "body" | "html" | "br") => {
                self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
            }

            // "Anything else: Create an html element whose node document is
            //  the Document object. Append it to the Document object. Put this
            //  element in the stack of open elements. Switch the insertion
            //  mode to "before head", then reprocess the token."
            _ => {
                self.insert_html_root(&Tag::named("html"));
                self.insertion_mode = InsertionMode::BeforeHead;
                self.reprocess_token(token);
            }
        }
    }

    fn insert_html_root(&mut self, tag: &Tag) {
        let html = self.create_element_for_token(tag, Namespace::Html, NodeId::ROOT);
        self.tree.append_child(NodeId::ROOT, html);
        self.push_open_element(html);
    }

    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    pub(in crate::parser) fn handle_before_head_mode(&mut self, token: &Token) {
        match token {
            Token::Character(c) if is_html_whitespace(*c) => {}
            Token::Comment(data) => self.insert_comment(data),
            Token::Doctype(_) => self.parse_error(ParseErrorCode::UnexpectedDoctype, token),

            // "A start tag whose tag name is "html": Process the token using
            //  the rules for the "in body" insertion mode."
            Token::StartTag(tag) if tag.name == "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is "head": Insert an HTML element for
            //  the token. Set the head element pointer to the newly created
            //  head element. Switch the insertion mode to "in head"."
            Token::StartTag(tag) if tag.name == "head" => {
                self.head_element_pointer = Some(self.insert_html_element(tag));
                self.insertion_mode = InsertionMode::InHead;
            }

            Token::EndTag(tag) if !matches!(tag.name.as_str(), "head" | "body" | "html" | "br") => {
                self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
            }

            // "Anything else: Insert an HTML element for a "head" start tag
            //  token with no attributes. Set the head element pointer to the
            //  newly created head element. Switch the insertion mode to "in
            //  head". Reprocess the current token."
            _ => {
                self.head_element_pointer = Some(self.insert_html_element_named("head"));
                self.insertion_mode = InsertionMode::InHead;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    pub(in crate::parser) fn handle_in_head_mode(&mut self, token: &Token) {
        match token {
            Token::Character(c) if is_html_whitespace(*c) => self.insert_character(*c),
            Token::Comment(data) => self.insert_comment(data),
            Token::Doctype(_) => self.parse_error(ParseErrorCode::UnexpectedDoctype, token),
            Token::StartTag(tag) if tag.name == "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is one of: "base", "basefont",
            //  "bgsound", "link": Insert an HTML element for the token.
            //  Immediately pop the current node off the stack of open elements.
            //  Acknowledge the token's self-closing flag, if it is set."
            Token::StartTag(tag)
                if matches!(tag.name.as_str(), "base" | "basefont" | "bgsound" | "link") =>
            {
                let _ = self.insert_html_element(tag);
                let _ = self.pop_current_node();
                self.acknowledge_self_closing_flag();
            }

            // "A start tag whose tag name is "meta"": as above, then the
            // character encoding checks.
            Token::StartTag(tag) if tag.name == "meta" => {
                let _ = self.insert_html_element(tag);
                let _ = self.pop_current_node();
                self.acknowledge_self_closing_flag();
                if requests_encoding_change(tag) {
                    self.unsupported(UnsupportedReason::EncodingChange);
                }
            }

            // "A start tag whose tag name is "title": Follow the generic RCDATA
            //  element parsing algorithm."
            Token::StartTag(tag) if tag.name == "title" => self.parse_generic_rcdata_element(tag),

            // "A start tag whose tag name is "noscript", if the scripting flag
            //  is enabled; A start tag whose tag name is one of: "noframes",
            //  "style": Follow the generic raw text element parsing algorithm."
            Token::StartTag(tag)
                if matches!(tag.name.as_str(), "noframes" | "style")
                    || (tag.name == "noscript" && self.options.scripting) =>
            {
                self.parse_generic_raw_text_element(tag);
            }

            // "A start tag whose tag name is "noscript", if the scripting flag
            //  is disabled: Insert an HTML element for the token. Switch the
            //  insertion mode to "in head noscript"."
            Token::StartTag(tag) if tag.name == "noscript" => {
                let _ = self.insert_html_element(tag);
                self.insertion_mode = InsertionMode::InHeadNoscript;
            }

            // "A start tag whose tag name is "script""
            Token::StartTag(tag) if tag.name == "script" => self.insert_script_element(tag),

            // "An end tag whose tag name is "head": Pop the current node (which
            //  will be the head element) off the stack of open elements. Switch
            //  the insertion mode to "after head"."
            Token::EndTag(tag) if tag.name == "head" => {
                let _ = self.pop_current_node();
                self.insertion_mode = InsertionMode::AfterHead;
            }

            // "A start tag whose tag name is "template""
            Token::StartTag(tag) if tag.name == "template" => self.insert_template_element(tag),

            // "An end tag whose tag name is "template""
            Token::EndTag(tag) if tag.name == "template" => self.close_template_element(token),

            // "A start tag whose tag name is "head"; Any other end tag: Parse
            //  error. Ignore the token."
            Token::StartTag(tag) if tag.name == "head" => {
                self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
            }
            Token::EndTag(tag) if !matches!(tag.name.as_str(), "body" | "html" | "br") => {
                self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
            }

            // "Anything else: Pop the current node (which will be the head
            //  element) off the stack of open elements. Switch the insertion
            //  mode to "after head". Reprocess the token."
            _ => {
                let _ = self.pop_current_node();
                self.insertion_mode = InsertionMode::AfterHead;
                self.reprocess_token(token);
            }
        }
    }

    /// "A start tag whose tag name is "script"" in head.
    fn insert_script_element(&mut self, tag: &Tag) {
        // STEP 1: "Let the adjusted insertion location be the appropriate place
        //          for inserting a node."
        let location = self.appropriate_place_for_inserting(None);

        // STEP 2: "Let the element be the result of creating an element for
        //          the token in the HTML namespace, with the intended parent
        //          being the element in which the adjusted insertion location
        //          finds itself."
        let script = self.create_element_for_token(tag, Namespace::Html, location.0);

        // STEP 4: "If the parser was created as part of the HTML fragment
        //          parsing algorithm, then set the script element's already
        //          started to true. (fragment case)"
        if self.is_fragment_case()
            && let Some(element) = self.tree.as_element_mut(script)
        {
            element.state.already_started = true;
        }

        // STEP 6-7: "Insert the newly created element at the adjusted
        //            insertion location. Push the element onto the stack of
        //            open elements so that it is the new current node."
        self.insert_at(location, script);
        self.push_open_element(script);

        // STEP 8-10: "Switch the tokenizer to the script data state. Set the
        //             original insertion mode to the current insertion mode.
        //             Switch the insertion mode to "text"."
        self.tokenizer.set_state(TokenizerState::ScriptData);
        self.original_insertion_mode = Some(self.insertion_mode);
        self.insertion_mode = InsertionMode::Text;
    }

    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    pub(in crate::parser) fn handle_in_head_noscript_mode(&mut self, token: &Token) {
        match token {
            Token::Doctype(_) => self.parse_error(ParseErrorCode::UnexpectedDoctype, token),
            Token::StartTag(tag) if tag.name == "html" => self.handle_in_body_mode(token),

            // "An end tag whose tag name is "noscript": Pop the current node
            //  (which will be a noscript element) from the stack of open
            //  elements; the new current node will be a head element. Switch
            //  the insertion mode to "in head"."
            Token::EndTag(tag) if tag.name == "noscript" => {
                let _ = self.pop_current_node();
                self.insertion_mode = InsertionMode::InHead;
            }

            // "A character token that is whitespace; A comment token; A start
            //  tag whose tag name is one of: "basefont", "bgsound", "link",
            //  "meta", "noframes", "style": Process the token using the rules
            //  for the "in head" insertion mode."
            Token::Character(c) if is_html_whitespace(*c) => self.handle_in_head_mode(token),
            Token::Comment(_) => self.handle_in_head_mode(token),
            Token::StartTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "basefont" | "bgsound" | "link" | "meta" | "noframes" | "style"
                ) =>
            {
                self.handle_in_head_mode(token);
            }

            // "A start tag whose tag name is one of: "head", "noscript"; Any
            //  other end tag: Parse error. Ignore the token."
            Token::StartTag(tag) if matches!(tag.name.as_str(), "head" | "noscript") => {
                self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
            }
            Token::EndTag(tag) if tag.name != "br" => {
                self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
            }

            // "Anything else: Parse error. Pop the current node (which will be
            //  a noscript element) from the stack of open elements; the new
            //  current node will be a head element. Switch the insertion mode
            //  to "in head". Reprocess the token."
            _ => {
                self.parse_error(ParseErrorCode::UnexpectedCharacter, token);
                let _ = self.pop_current_node();
                self.insertion_mode = InsertionMode::InHead;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    pub(in crate::parser) fn handle_after_head_mode(&mut self, token: &Token) {
        match token {
            Token::Character(c) if is_html_whitespace(*c) => self.insert_character(*c),
            Token::Comment(data) => self.insert_comment(data),
            Token::Doctype(_) => self.parse_error(ParseErrorCode::UnexpectedDoctype, token),
            Token::StartTag(tag) if tag.name == "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is "body": Insert an HTML element for
            //  the token. Set the frameset-ok flag to "not ok". Switch the
            //  insertion mode to "in body"."
            Token::StartTag(tag) if tag.name == "body" => {
                let _ = self.insert_html_element(tag);
                self.frameset_ok = false;
                self.insertion_mode = InsertionMode::InBody;
            }

            // "A start tag whose tag name is "frameset": Insert an HTML element
            //  for the token. Switch the insertion mode to "in frameset"."
            Token::StartTag(tag) if tag.name == "frameset" => {
                let _ = self.insert_html_element(tag);
                self.insertion_mode = InsertionMode::InFrameset;
            }

            // "A start tag whose tag name is one of: "base", "basefont",
            //  "bgsound", "link", "meta", "noframes", "script", "style",
            //  "template", "title": Parse error. Push the node pointed to by
            //  the head element pointer onto the stack of open elements.
            //  Process the token using the rules for the "in head" insertion
            //  mode. Remove the node pointed to by the head element pointer
            //  from the stack of open elements. (It might not be the current
            //  node at this point.)"
            Token::StartTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "base"
                        | "basefont"
                        | "bgsound"
                        | "link"
                        | "meta"
                        | "noframes"
                        | "script"
                        | "style"
                        | "template"
                        | "title"
                ) =>
            {
                self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
                if let Some(head) = self.head_element_pointer {
                    self.push_open_element(head);
                    self.handle_in_head_mode(token);
                    self.remove_from_stack(head);
                } else {
                    self.handle_in_head_mode(token);
                }
            }

            // "An end tag whose tag name is "template": Process the token using
            //  the rules for the "in head" insertion mode."
            Token::EndTag(tag) if tag.name == "template" => self.handle_in_head_mode(token),

            Token::StartTag(tag) if tag.name == "head" => {
                self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
            }
            Token::EndTag(tag) if !matches!(tag.name.as_str(), "body" | "html" | "br") => {
                self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
            }

            // "Anything else: Insert an HTML element for a "body" start tag
            //  token with no attributes. Switch the insertion mode to "in
            //  body". Reprocess the current token."
            _ => {
                let _ = self.insert_html_element_named("body");
                self.insertion_mode = InsertionMode::InBody;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    pub(in crate::parser) fn handle_text_mode(&mut self, token: &Token) {
        let original = self
            .original_insertion_mode
            .take()
            .unwrap_or(InsertionMode::InBody);
        match token {
            // "A character token: Insert the token's character."
            Token::Character(c) => {
                self.insert_character(*c);
                self.original_insertion_mode = Some(original);
            }

            // "An end-of-file token: Parse error. If the current node is a
            //  script element, then set its already started to true. Pop the
            //  current node off the stack of open elements. Switch the
            //  insertion mode to the original insertion mode and reprocess the
            //  token."
            Token::EndOfFile => {
                self.parse_error(ParseErrorCode::UnexpectedEof, token);
                if let Some(current) = self.current_node()
                    && let Some(element) = self.tree.as_element_mut(current)
                    && element.is(Namespace::Html, "script")
                {
                    element.state.already_started = true;
                }
                let _ = self.pop_current_node();
                self.insertion_mode = original;
                self.reprocess_token(token);
            }

            // "An end tag whose tag name is "script"": pop the script and
            // switch back; running it is out of scope for the core.
            Token::EndTag(tag) if tag.name == "script" => {
                let _ = self.pop_current_node();
                self.insertion_mode = original;
                if self.options.scripting {
                    self.unsupported(UnsupportedReason::ScriptExecution);
                }
            }

            // "Any other end tag: Pop the current node off the stack of open
            //  elements. Switch the insertion mode to the original insertion
            //  mode."
            _ => {
                let _ = self.pop_current_node();
                self.insertion_mode = original;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::Attribute;

    fn meta(attributes: &[(&str, &str)]) -> Tag {
        Tag {
            name: "meta".to_string(),
            self_closing: false,
            attributes: attributes
                .iter()
                .map(|&(name, value)| Attribute::new(name, value))
                .collect(),
        }
    }

    #[test]
    fn utf8_charset_is_not_an_encoding_change() {
        assert!(!requests_encoding_change(&meta(&[("charset", "UTF-8")])));
        assert!(!requests_encoding_change(&meta(&[("name", "viewport")])));
    }

    #[test]
    fn legacy_charset_is_an_encoding_change() {
        assert!(requests_encoding_change(&meta(&[("charset", "windows-1252")])));
        assert!(requests_encoding_change(&meta(&[
            ("http-equiv", "Content-Type"),
            ("content", "text/html; charset=\"iso-8859-1\""),
        ])));
    }

    #[test]
    fn charset_is_extracted_from_content() {
        assert_eq!(
            charset_from_content("text/html; charset=utf-8"),
            Some("utf-8")
        );
        assert_eq!(charset_from_content("text/html"), None);
    }
}
