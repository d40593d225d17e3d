//! The closing modes: "after body", "in frameset", "after frameset", "after
//! after body" and "after after frameset".

use wicket_dom::NodeId;

use super::is_html_whitespace;
use crate::error::ParseErrorCode;
use crate::parser::HTMLParser;
use crate::parser::core::InsertionMode;
use crate::tokenizer::Token;

impl HTMLParser<'_> {
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    pub(in crate::parser) fn handle_after_body_mode(&mut self, token: &Token) {
        match token {
            Token::Character(c) if is_html_whitespace(*c) => self.handle_in_body_mode(token),

            // "A comment token: Insert a comment as the last child of the first
            //  element in the stack of open elements (the html element)."
            Token::Comment(data) => {
                let html = self
                    .stack_of_open_elements
                    .first()
                    .copied()
                    .unwrap_or(NodeId::ROOT);
                self.insert_comment_in(data, html);
            }

            Token::Doctype(_) => self.parse_error(ParseErrorCode::UnexpectedDoctype, token),
            Token::StartTag(tag) if tag.name == "html" => self.handle_in_body_mode(token),

            // "An end tag whose tag name is "html": If the parser was created as
            //  part of the HTML fragment parsing algorithm, this is a parse
            //  error; ignore the token. (fragment case) Otherwise, switch the
            //  insertion mode to "after after body"."
            Token::EndTag(tag) if tag.name == "html" => {
                if self.is_fragment_case() {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
                } else {
                    self.insertion_mode = InsertionMode::AfterAfterBody;
                }
            }

            Token::EndOfFile => self.stop_parsing(),

            // "Anything else: Parse error. Switch the insertion mode to "in
            //  body" and reprocess the token."
            _ => {
                self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
                self.insertion_mode = InsertionMode::InBody;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    pub(in crate::parser) fn handle_in_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::Character(c) if is_html_whitespace(*c) => self.insert_character(*c),
            Token::Comment(data) => self.insert_comment(data),
            Token::Doctype(_) => self.parse_error(ParseErrorCode::UnexpectedDoctype, token),
            Token::StartTag(tag) if tag.name == "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is "frameset": Insert an HTML element
            //  for the token."
            Token::StartTag(tag) if tag.name == "frameset" => {
                let _ = self.insert_html_element(tag);
            }

            // "An end tag whose tag name is "frameset": If the current node is
            //  the root html element, then this is a parse error; ignore the
            //  token. (fragment case) Otherwise, pop the current node from the
            //  stack of open elements. If the parser was not created as part of
            //  the HTML fragment parsing algorithm (fragment case), and the
            //  current node is no longer a frameset element, then switch the
            //  insertion mode to "after frameset"."
            Token::EndTag(tag) if tag.name == "frameset" => {
                if self.current_node_is_root_html() {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
                    return;
                }
                let _ = self.pop_current_node();
                if !self.is_fragment_case() && !self.current_node_is("frameset") {
                    self.insertion_mode = InsertionMode::AfterFrameset;
                }
            }

            // "A start tag whose tag name is "frame": Insert an HTML element for
            //  the token. Immediately pop the current node off the stack of
            //  open elements. Acknowledge the token's self-closing flag, if it
            //  is set."
            Token::StartTag(tag) if tag.name == "frame" => {
                let _ = self.insert_html_element(tag);
                let _ = self.pop_current_node();
                self.acknowledge_self_closing_flag();
            }

            Token::StartTag(tag) if tag.name == "noframes" => self.handle_in_head_mode(token),

            // "An end-of-file token: If the current node is not the root html
            //  element, then this is a parse error. Stop parsing."
            Token::EndOfFile => {
                if !self.current_node_is_root_html() {
                    self.parse_error(ParseErrorCode::UnexpectedEof, token);
                }
                self.stop_parsing();
            }

            _ => self.parse_error(ParseErrorCode::UnexpectedStartTag, token),
        }
    }

    fn current_node_is_root_html(&self) -> bool {
        self.stack_of_open_elements.len() == 1 && self.current_node_is("html")
    }

    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    pub(in crate::parser) fn handle_after_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::Character(c) if is_html_whitespace(*c) => self.insert_character(*c),
            Token::Comment(data) => self.insert_comment(data),
            Token::Doctype(_) => self.parse_error(ParseErrorCode::UnexpectedDoctype, token),
            Token::StartTag(tag) if tag.name == "html" => self.handle_in_body_mode(token),
            Token::EndTag(tag) if tag.name == "html" => {
                self.insertion_mode = InsertionMode::AfterAfterFrameset;
            }
            Token::StartTag(tag) if tag.name == "noframes" => self.handle_in_head_mode(token),
            Token::EndOfFile => self.stop_parsing(),
            _ => self.parse_error(ParseErrorCode::UnexpectedStartTag, token),
        }
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    pub(in crate::parser) fn handle_after_after_body_mode(&mut self, token: &Token) {
        match token {
            Token::Comment(data) => self.insert_comment_in(data, NodeId::ROOT),
            Token::Doctype(_) => self.handle_in_body_mode(token),
            Token::Character(c) if is_html_whitespace(*c) => self.handle_in_body_mode(token),
            Token::StartTag(tag) if tag.name == "html" => self.handle_in_body_mode(token),
            Token::EndOfFile => self.stop_parsing(),
            _ => {
                self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
                self.insertion_mode = InsertionMode::InBody;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    pub(in crate::parser) fn handle_after_after_frameset_mode(&mut self, token: &Token) {
        match token {
            Token::Comment(data) => self.insert_comment_in(data, NodeId::ROOT),
            Token::Doctype(_) => self.handle_in_body_mode(token),
            Token::Character(c) if is_html_whitespace(*c) => self.handle_in_body_mode(token),
            Token::StartTag(tag) if tag.name == "html" => self.handle_in_body_mode(token),
            Token::EndOfFile => self.stop_parsing(),
            Token::StartTag(tag) if tag.name == "noframes" => self.handle_in_head_mode(token),
            _ => self.parse_error(ParseErrorCode::UnexpectedStartTag, token),
        }
    }
}
