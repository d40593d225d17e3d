//! "in select" and "in select in table".

use crate::error::ParseErrorCode;
use crate::parser::HTMLParser;
use crate::parser::scope::Scope;
use crate::tokenizer::Token;

/// Table tags that close a `select` opened inside a table.
const TABLE_TAGS: &[&str] = &[
    "caption", "table", "tbody", "tfoot", "thead", "tr", "td", "th",
];

impl HTMLParser<'_> {
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    pub(in crate::parser) fn handle_in_select_mode(&mut self, token: &Token) {
        match token {
            Token::Character('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedCharacter, token);
            }
            Token::Character(c) => self.insert_character(*c),
            Token::Comment(data) => self.insert_comment(data),
            Token::Doctype(_) => self.parse_error(ParseErrorCode::UnexpectedDoctype, token),
            Token::StartTag(tag) if tag.name == "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is "option": If the current node is
            //  an option element, pop that node from the stack of open
            //  elements. Insert an HTML element for the token."
            Token::StartTag(tag) if tag.name == "option" => {
                self.pop_if_current_is("option");
                let _ = self.insert_html_element(tag);
            }

            // "A start tag whose tag name is "optgroup": If the current node is
            //  an option element, pop that node from the stack of open
            //  elements. If the current node is an optgroup element, pop that
            //  node from the stack of open elements. Insert an HTML element for
            //  the token."
            Token::StartTag(tag) if tag.name == "optgroup" => {
                self.pop_if_current_is("option");
                self.pop_if_current_is("optgroup");
                let _ = self.insert_html_element(tag);
            }

            // "A start tag whose tag name is "hr"": as for optgroup, then pop
            // it straight off again and acknowledge the self-closing flag.
            Token::StartTag(tag) if tag.name == "hr" => {
                self.pop_if_current_is("option");
                self.pop_if_current_is("optgroup");
                let _ = self.insert_html_element(tag);
                let _ = self.pop_current_node();
                self.acknowledge_self_closing_flag();
            }

            // "An end tag whose tag name is "optgroup": First, if the current
            //  node is an option element, and the node immediately before it in
            //  the stack of open elements is an optgroup element, then pop the
            //  current node from the stack of open elements. If the current
            //  node is an optgroup element, then pop that node from the stack
            //  of open elements. Otherwise, this is a parse error; ignore the
            //  token."
            Token::EndTag(tag) if tag.name == "optgroup" => {
                let len = self.stack_of_open_elements.len();
                if self.current_node_is("option")
                    && len >= 2
                    && self.tree.is_element(
                        self.stack_of_open_elements[len - 2],
                        wicket_dom::Namespace::Html,
                        "optgroup",
                    )
                {
                    let _ = self.pop_current_node();
                }
                if self.current_node_is("optgroup") {
                    let _ = self.pop_current_node();
                } else {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
                }
            }

            // "An end tag whose tag name is "option": If the current node is an
            //  option element, then pop that node from the stack of open
            //  elements. Otherwise, this is a parse error; ignore the token."
            Token::EndTag(tag) if tag.name == "option" => {
                if self.current_node_is("option") {
                    let _ = self.pop_current_node();
                } else {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
                }
            }

            // "An end tag whose tag name is "select": If the stack of open
            //  elements does not have a select element in select scope, this is
            //  a parse error; ignore the token. Otherwise: Pop elements from the
            //  stack of open elements until a select element has been popped
            //  from the stack. Reset the insertion mode appropriately."
            Token::EndTag(tag) if tag.name == "select" => {
                if !self.close_select() {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
                }
            }

            // "A start tag whose tag name is "select": Parse error. If the stack
            //  of open elements does not have a select element in select scope,
            //  ignore the token. Otherwise: [close the select]. It just gets
            //  treated like an end tag."
            Token::StartTag(tag) if tag.name == "select" => {
                self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
                let _ = self.close_select();
            }

            // "A start tag whose tag name is one of: "input", "keygen",
            //  "textarea": Parse error. If the stack of open elements does not
            //  have a select element in select scope, ignore the token.
            //  Otherwise: [close the select]. Reprocess the token."
            Token::StartTag(tag)
                if matches!(tag.name.as_str(), "input" | "keygen" | "textarea") =>
            {
                self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
                if self.close_select() {
                    self.reprocess_token(token);
                }
            }

            // "A start tag whose tag name is one of: "script", "template"; An
            //  end tag whose tag name is "template": Process the token using
            //  the rules for the "in head" insertion mode."
            Token::StartTag(tag) if matches!(tag.name.as_str(), "script" | "template") => {
                self.handle_in_head_mode(token);
            }
            Token::EndTag(tag) if tag.name == "template" => self.handle_in_head_mode(token),

            Token::EndOfFile => self.handle_in_body_mode(token),

            // "Anything else: Parse error. Ignore the token."
            Token::StartTag(_) => self.parse_error(ParseErrorCode::UnexpectedStartTag, token),
            Token::EndTag(_) => self.parse_error(ParseErrorCode::UnexpectedEndTag, token),
        }
    }

    fn pop_if_current_is(&mut self, local_name: &str) {
        if self.current_node_is(local_name) {
            let _ = self.pop_current_node();
        }
    }

    /// Pop up to and including the open `select` and reset the insertion
    /// mode. Returns `false` if there is no select in select scope.
    fn close_select(&mut self) -> bool {
        if !self.has_element_in("select", Scope::Select) {
            return false;
        }
        self.pop_until_tag("select");
        self.reset_insertion_mode_appropriately();
        true
    }

    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    pub(in crate::parser) fn handle_in_select_in_table_mode(&mut self, token: &Token) {
        match token {
            // "A start tag whose tag name is one of: "caption", "table",
            //  "tbody", "tfoot", "thead", "tr", "td", "th": Parse error. Pop
            //  elements from the stack of open elements until a select element
            //  has been popped from the stack. Reset the insertion mode
            //  appropriately. Reprocess the token."
            Token::StartTag(tag) if TABLE_TAGS.contains(&tag.name.as_str()) => {
                self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
                self.pop_until_tag("select");
                self.reset_insertion_mode_appropriately();
                self.reprocess_token(token);
            }

            // "An end tag whose tag name is one of: [the same]: Parse error. If
            //  the stack of open elements does not have an element in table
            //  scope that is an HTML element with the same tag name as that of
            //  the token, then ignore the token. Otherwise: [as above]."
            Token::EndTag(tag) if TABLE_TAGS.contains(&tag.name.as_str()) => {
                self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
                if self.has_element_in_table_scope(&tag.name) {
                    self.pop_until_tag("select");
                    self.reset_insertion_mode_appropriately();
                    self.reprocess_token(token);
                }
            }

            _ => self.handle_in_select_mode(token),
        }
    }
}
