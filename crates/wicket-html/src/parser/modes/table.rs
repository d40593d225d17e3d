//! The table family: "in table", "in table text", "in caption", "in column
//! group", "in table body", "in row" and "in cell".

use super::is_html_whitespace;
use crate::error::ParseErrorCode;
use crate::parser::HTMLParser;
use crate::parser::core::InsertionMode;
use crate::parser::scope::Scope;
use crate::tokenizer::Token;

const TABLE_SECTIONS: &[&str] = &["tbody", "tfoot", "thead"];

impl HTMLParser<'_> {
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    pub(in crate::parser) fn handle_in_table_mode(&mut self, token: &Token) {
        match token {
            // "A character token, if the current node is table, tbody,
            //  template, tfoot, thead, or tr element: Let the pending table
            //  character tokens be an empty list of tokens. Set the original
            //  insertion mode to the current insertion mode. Switch the
            //  insertion mode to "in table text" and reprocess the token."
            Token::Character(_)
                if self.current_node_is_one_of(&[
                    "table", "tbody", "template", "tfoot", "thead", "tr",
                ]) =>
            {
                self.pending_table_character_tokens.clear();
                self.original_insertion_mode = Some(self.insertion_mode);
                self.insertion_mode = InsertionMode::InTableText;
                self.reprocess_token(token);
            }

            Token::Comment(data) => self.insert_comment(data),
            Token::Doctype(_) => self.parse_error(ParseErrorCode::UnexpectedDoctype, token),

            // "A start tag whose tag name is "caption": Clear the stack back to
            //  a table context. Insert a marker at the end of the list of
            //  active formatting elements. Insert an HTML element for the
            //  token, then switch the insertion mode to "in caption"."
            Token::StartTag(tag) if tag.name == "caption" => {
                self.clear_stack_back_to_table_context();
                self.insert_marker();
                let _ = self.insert_html_element(tag);
                self.insertion_mode = InsertionMode::InCaption;
            }

            // "A start tag whose tag name is "colgroup""
            Token::StartTag(tag) if tag.name == "colgroup" => {
                self.clear_stack_back_to_table_context();
                let _ = self.insert_html_element(tag);
                self.insertion_mode = InsertionMode::InColumnGroup;
            }

            // "A start tag whose tag name is "col": Clear the stack back to a
            //  table context. Insert an HTML element for a "colgroup" start tag
            //  token with no attributes, then switch the insertion mode to "in
            //  column group". Reprocess the current token."
            Token::StartTag(tag) if tag.name == "col" => {
                self.clear_stack_back_to_table_context();
                let _ = self.insert_html_element_named("colgroup");
                self.insertion_mode = InsertionMode::InColumnGroup;
                self.reprocess_token(token);
            }

            // "A start tag whose tag name is one of: "tbody", "tfoot", "thead""
            Token::StartTag(tag) if TABLE_SECTIONS.contains(&tag.name.as_str()) => {
                self.clear_stack_back_to_table_context();
                let _ = self.insert_html_element(tag);
                self.insertion_mode = InsertionMode::InTableBody;
            }

            // "A start tag whose tag name is one of: "td", "th", "tr": Clear
            //  the stack back to a table context. Insert an HTML element for a
            //  "tbody" start tag token with no attributes, then switch the
            //  insertion mode to "in table body". Reprocess the current token."
            Token::StartTag(tag) if matches!(tag.name.as_str(), "td" | "th" | "tr") => {
                self.clear_stack_back_to_table_context();
                let _ = self.insert_html_element_named("tbody");
                self.insertion_mode = InsertionMode::InTableBody;
                self.reprocess_token(token);
            }

            // "A start tag whose tag name is "table": Parse error. If the stack
            //  of open elements does not have a table element in table scope,
            //  ignore the token. Otherwise: Pop elements from this stack until a
            //  table element has been popped from the stack. Reset the insertion
            //  mode appropriately. Reprocess the token."
            Token::StartTag(tag) if tag.name == "table" => {
                self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
                if self.has_element_in_table_scope("table") {
                    self.pop_until_tag("table");
                    self.reset_insertion_mode_appropriately();
                    self.reprocess_token(token);
                }
            }

            // "An end tag whose tag name is "table""
            Token::EndTag(tag) if tag.name == "table" => {
                if self.has_element_in_table_scope("table") {
                    self.pop_until_tag("table");
                    self.reset_insertion_mode_appropriately();
                } else {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
                }
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            //  "colgroup", "html", "tbody", "td", "tfoot", "th", "thead", "tr":
            //  Parse error. Ignore the token."
            Token::EndTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "body"
                        | "caption"
                        | "col"
                        | "colgroup"
                        | "html"
                        | "tbody"
                        | "td"
                        | "tfoot"
                        | "th"
                        | "thead"
                        | "tr"
                ) =>
            {
                self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
            }

            // "A start tag whose tag name is one of: "style", "script",
            //  "template"; An end tag whose tag name is "template": Process the
            //  token using the rules for the "in head" insertion mode."
            Token::StartTag(tag) if matches!(tag.name.as_str(), "style" | "script" | "template") => {
                self.handle_in_head_mode(token);
            }
            Token::EndTag(tag) if tag.name == "template" => self.handle_in_head_mode(token),

            // "A start tag whose tag name is "input": If the token does not
            //  have an attribute with the name "type", or if it does, but that
            //  attribute's value is not an ASCII case-insensitive match for the
            //  string "hidden", then: act as described in the "anything else"
            //  entry below. Otherwise: Parse error. Insert an HTML element for
            //  the token. Pop that input element off the stack of open
            //  elements. Acknowledge the token's self-closing flag, if it is
            //  set."
            Token::StartTag(tag)
                if tag.name == "input"
                    && tag
                        .attr("type")
                        .is_some_and(|kind| kind.eq_ignore_ascii_case("hidden")) =>
            {
                self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
                let _ = self.insert_html_element(tag);
                let _ = self.pop_current_node();
                self.acknowledge_self_closing_flag();
            }

            // "A start tag whose tag name is "form": Parse error. If there is a
            //  template element on the stack of open elements, or if the form
            //  element pointer is not null, ignore the token. Otherwise: Insert
            //  an HTML element for the token, and set the form element pointer
            //  to point to the element created. Pop that form element off the
            //  stack of open elements."
            Token::StartTag(tag) if tag.name == "form" => {
                self.parse_error(ParseErrorCode::NestedForm, token);
                if !self.stack_has_template() && self.form_element_pointer.is_none() {
                    self.form_element_pointer = Some(self.insert_html_element(tag));
                    let _ = self.pop_current_node();
                }
            }

            // "An end-of-file token: Process the token using the rules for the
            //  "in body" insertion mode."
            Token::EndOfFile => self.handle_in_body_mode(token),

            // "Anything else: Parse error. Enable foster parenting, process the
            //  token using the rules for the "in body" insertion mode, and then
            //  disable foster parenting."
            _ => {
                self.parse_error(ParseErrorCode::FosterParentedContent, token);
                self.process_in_body_with_foster_parenting(token);
            }
        }
    }

    fn process_in_body_with_foster_parenting(&mut self, token: &Token) {
        self.foster_parenting = true;
        self.handle_in_body_mode(token);
        self.foster_parenting = false;
    }

    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    pub(in crate::parser) fn handle_in_table_text_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL: Parse error. Ignore the
            //  token."
            Token::Character('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedCharacter, token);
            }

            // "Any other character token: Append the character token to the
            //  pending table character tokens list."
            Token::Character(c) => self.pending_table_character_tokens.push(*c),

            // "Anything else: If any of the tokens in the pending table
            //  character tokens list are character tokens that are not ASCII
            //  whitespace, then this is a parse error: reprocess the character
            //  tokens in the pending table character tokens list using the
            //  rules given in the "anything else" entry in the "in table"
            //  insertion mode. Otherwise, insert the characters given by the
            //  pending table character tokens list. Switch the insertion mode
            //  to the original insertion mode and reprocess the token."
            _ => {
                let pending = std::mem::take(&mut self.pending_table_character_tokens);
                if pending.chars().all(is_html_whitespace) {
                    for c in pending.chars() {
                        self.insert_character(c);
                    }
                } else {
                    self.parse_error_with_detail(
                        ParseErrorCode::UnexpectedCharacterInTable,
                        Some(format!("{pending:?}")),
                    );
                    for c in pending.chars() {
                        self.process_in_body_with_foster_parenting(&Token::Character(c));
                    }
                }
                self.insertion_mode = self
                    .original_insertion_mode
                    .take()
                    .unwrap_or(InsertionMode::InTable);
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    pub(in crate::parser) fn handle_in_caption_mode(&mut self, token: &Token) {
        match token {
            // "An end tag whose tag name is "caption""
            Token::EndTag(tag) if tag.name == "caption" => {
                let _ = self.close_caption(token);
            }

            // "A start tag whose tag name is one of: "caption", "col",
            //  "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr"; An end
            //  tag whose tag name is "table": [close the caption as above];
            //  Reprocess the token."
            Token::StartTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "caption"
                        | "col"
                        | "colgroup"
                        | "tbody"
                        | "td"
                        | "tfoot"
                        | "th"
                        | "thead"
                        | "tr"
                ) =>
            {
                if self.close_caption(token) {
                    self.reprocess_token(token);
                }
            }
            Token::EndTag(tag) if tag.name == "table" => {
                if self.close_caption(token) {
                    self.reprocess_token(token);
                }
            }

            // "An end tag whose tag name is one of: "body", "col", "colgroup",
            //  "html", "tbody", "td", "tfoot", "th", "thead", "tr": Parse
            //  error. Ignore the token."
            Token::EndTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "body"
                        | "col"
                        | "colgroup"
                        | "html"
                        | "tbody"
                        | "td"
                        | "tfoot"
                        | "th"
                        | "thead"
                        | "tr"
                ) =>
            {
                self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
            }

            // "Anything else: Process the token using the rules for the "in
            //  body" insertion mode."
            _ => self.handle_in_body_mode(token),
        }
    }

    /// "If the stack of open elements does not have a caption element in
    /// table scope, this is a parse error; ignore the token. (fragment case)
    /// Otherwise: Generate implied end tags. Now, if the current node is not
    /// a caption element, then this is a parse error. Pop elements from this
    /// stack until a caption element has been popped from the stack. Clear
    /// the list of active formatting elements up to the last marker. Switch
    /// the insertion mode to "in table"."
    ///
    /// Returns whether the caption was closed.
    fn close_caption(&mut self, token: &Token) -> bool {
        if !self.has_element_in_table_scope("caption") {
            self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
            return false;
        }
        self.generate_implied_end_tags();
        if !self.current_node_is("caption") {
            self.parse_error(ParseErrorCode::UnclosedElement, token);
        }
        self.pop_until_tag("caption");
        self.clear_active_formatting_elements_to_last_marker();
        self.insertion_mode = InsertionMode::InTable;
        true
    }

    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolgroup)
    pub(in crate::parser) fn handle_in_column_group_mode(&mut self, token: &Token) {
        match token {
            Token::Character(c) if is_html_whitespace(*c) => self.insert_character(*c),
            Token::Comment(data) => self.insert_comment(data),
            Token::Doctype(_) => self.parse_error(ParseErrorCode::UnexpectedDoctype, token),
            Token::StartTag(tag) if tag.name == "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is "col": Insert an HTML element for
            //  the token. Immediately pop the current node off the stack of
            //  open elements. Acknowledge the token's self-closing flag, if it
            //  is set."
            Token::StartTag(tag) if tag.name == "col" => {
                let _ = self.insert_html_element(tag);
                let _ = self.pop_current_node();
                self.acknowledge_self_closing_flag();
            }

            // "An end tag whose tag name is "colgroup": If the current node is
            //  not a colgroup element, then this is a parse error; ignore the
            //  token. Otherwise, pop the current node from the stack of open
            //  elements. Switch the insertion mode to "in table"."
            Token::EndTag(tag) if tag.name == "colgroup" => {
                if self.current_node_is("colgroup") {
                    let _ = self.pop_current_node();
                    self.insertion_mode = InsertionMode::InTable;
                } else {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
                }
            }

            // "An end tag whose tag name is "col": Parse error. Ignore the
            //  token."
            Token::EndTag(tag) if tag.name == "col" => {
                self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
            }

            Token::StartTag(tag) | Token::EndTag(tag) if tag.name == "template" => {
                self.handle_in_head_mode(token);
            }

            Token::EndOfFile => self.handle_in_body_mode(token),

            // "Anything else: If the current node is not a colgroup element,
            //  then this is a parse error; ignore the token. Otherwise, pop the
            //  current node from the stack of open elements. Switch the
            //  insertion mode to "in table". Reprocess the token."
            _ => {
                if self.current_node_is("colgroup") {
                    let _ = self.pop_current_node();
                    self.insertion_mode = InsertionMode::InTable;
                    self.reprocess_token(token);
                } else {
                    self.parse_error(ParseErrorCode::UnexpectedCharacter, token);
                }
            }
        }
    }

    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intbody)
    pub(in crate::parser) fn handle_in_table_body_mode(&mut self, token: &Token) {
        match token {
            // "A start tag whose tag name is "tr": Clear the stack back to a
            //  table body context. Insert an HTML element for the token, then
            //  switch the insertion mode to "in row"."
            Token::StartTag(tag) if tag.name == "tr" => {
                self.clear_stack_back_to_table_body_context();
                let _ = self.insert_html_element(tag);
                self.insertion_mode = InsertionMode::InRow;
            }

            // "A start tag whose tag name is one of: "th", "td": Parse error.
            //  Clear the stack back to a table body context. Insert an HTML
            //  element for a "tr" start tag token with no attributes, then
            //  switch the insertion mode to "in row". Reprocess the current
            //  token."
            Token::StartTag(tag) if matches!(tag.name.as_str(), "th" | "td") => {
                self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
                self.clear_stack_back_to_table_body_context();
                let _ = self.insert_html_element_named("tr");
                self.insertion_mode = InsertionMode::InRow;
                self.reprocess_token(token);
            }

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead":
            //  If the stack of open elements does not have an element in table
            //  scope that is an HTML element with the same tag name as the
            //  token, this is a parse error; ignore the token. Otherwise: Clear
            //  the stack back to a table body context. Pop the current node
            //  from the stack of open elements. Switch the insertion mode to
            //  "in table"."
            Token::EndTag(tag) if TABLE_SECTIONS.contains(&tag.name.as_str()) => {
                if self.has_element_in_table_scope(&tag.name) {
                    self.clear_stack_back_to_table_body_context();
                    let _ = self.pop_current_node();
                    self.insertion_mode = InsertionMode::InTable;
                } else {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
                }
            }

            // "A start tag whose tag name is one of: "caption", "col",
            //  "colgroup", "tbody", "tfoot", "thead"; An end tag whose tag name
            //  is "table": If the stack of open elements does not have a tbody,
            //  thead, or tfoot element in table scope, this is a parse error;
            //  ignore the token. Otherwise: Clear the stack back to a table
            //  body context. Pop the current node from the stack of open
            //  elements. Switch the insertion mode to "in table". Reprocess the
            //  token."
            Token::StartTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead"
                ) =>
            {
                self.close_table_section_and_reprocess(token);
            }
            Token::EndTag(tag) if tag.name == "table" => {
                self.close_table_section_and_reprocess(token);
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            //  "colgroup", "html", "td", "th", "tr": Parse error. Ignore the
            //  token."
            Token::EndTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th" | "tr"
                ) =>
            {
                self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
            }

            // "Anything else: Process the token using the rules for the "in
            //  table" insertion mode."
            _ => self.handle_in_table_mode(token),
        }
    }

    fn close_table_section_and_reprocess(&mut self, token: &Token) {
        if !self.has_any_element_in(TABLE_SECTIONS, Scope::Table) {
            self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
            return;
        }
        self.clear_stack_back_to_table_body_context();
        let _ = self.pop_current_node();
        self.insertion_mode = InsertionMode::InTable;
        self.reprocess_token(token);
    }

    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intr)
    pub(in crate::parser) fn handle_in_row_mode(&mut self, token: &Token) {
        match token {
            // "A start tag whose tag name is one of: "th", "td": Clear the
            //  stack back to a table row context. Insert an HTML element for
            //  the token, then switch the insertion mode to "in cell". Insert a
            //  marker at the end of the list of active formatting elements."
            Token::StartTag(tag) if matches!(tag.name.as_str(), "th" | "td") => {
                self.clear_stack_back_to_table_row_context();
                let _ = self.insert_html_element(tag);
                self.insertion_mode = InsertionMode::InCell;
                self.insert_marker();
            }

            // "An end tag whose tag name is "tr": If the stack of open elements
            //  does not have a tr element in table scope, this is a parse
            //  error; ignore the token. Otherwise: Clear the stack back to a
            //  table row context. Pop the current node (which will be a tr
            //  element) from the stack of open elements. Switch the insertion
            //  mode to "in table body"."
            Token::EndTag(tag) if tag.name == "tr" => {
                let _ = self.close_table_row(token);
            }

            // "A start tag whose tag name is one of: "caption", "col",
            //  "colgroup", "tbody", "tfoot", "thead", "tr"; An end tag whose
            //  tag name is "table": [close the row as above]; Reprocess the
            //  token."
            Token::StartTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead" | "tr"
                ) =>
            {
                if self.close_table_row(token) {
                    self.reprocess_token(token);
                }
            }
            Token::EndTag(tag) if tag.name == "table" => {
                if self.close_table_row(token) {
                    self.reprocess_token(token);
                }
            }

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead":
            //  If the stack of open elements does not have an element in table
            //  scope that is an HTML element with the same tag name as the
            //  token, this is a parse error; ignore the token. If the stack of
            //  open elements does not have a tr element in table scope, ignore
            //  the token. Otherwise: [close the row]; Reprocess the token."
            Token::EndTag(tag) if TABLE_SECTIONS.contains(&tag.name.as_str()) => {
                if !self.has_element_in_table_scope(&tag.name) {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
                } else if self.has_element_in_table_scope("tr") && self.close_table_row(token) {
                    self.reprocess_token(token);
                }
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            //  "colgroup", "html", "td", "th": Parse error. Ignore the token."
            Token::EndTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th"
                ) =>
            {
                self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
            }

            _ => self.handle_in_table_mode(token),
        }
    }

    fn close_table_row(&mut self, token: &Token) -> bool {
        if !self.has_element_in_table_scope("tr") {
            self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
            return false;
        }
        self.clear_stack_back_to_table_row_context();
        let _ = self.pop_current_node();
        self.insertion_mode = InsertionMode::InTableBody;
        true
    }

    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intd)
    pub(in crate::parser) fn handle_in_cell_mode(&mut self, token: &Token) {
        match token {
            // "An end tag whose tag name is one of: "td", "th": If the stack of
            //  open elements does not have an element in table scope that is
            //  an HTML element with the same tag name as that of the token,
            //  then this is a parse error; ignore the token. Otherwise: Generate
            //  implied end tags. Now, if the current node is not an HTML
            //  element with the same tag name as the token, then this is a
            //  parse error. Pop elements from the stack of open elements stack
            //  until an HTML element with the same tag name as the token has
            //  been popped from the stack. Clear the list of active formatting
            //  elements up to the last marker. Switch the insertion mode to "in
            //  row"."
            Token::EndTag(tag) if matches!(tag.name.as_str(), "td" | "th") => {
                if !self.has_element_in_table_scope(&tag.name) {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
                    return;
                }
                self.generate_implied_end_tags();
                if !self.current_node_is(&tag.name) {
                    self.parse_error(ParseErrorCode::UnclosedElement, token);
                }
                self.pop_until_tag(&tag.name);
                self.clear_active_formatting_elements_to_last_marker();
                self.insertion_mode = InsertionMode::InRow;
            }

            // "A start tag whose tag name is one of: "caption", "col",
            //  "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr": Assert:
            //  The stack of open elements has a td or th element in table
            //  scope. Close the cell and reprocess the token."
            Token::StartTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "caption"
                        | "col"
                        | "colgroup"
                        | "tbody"
                        | "td"
                        | "tfoot"
                        | "th"
                        | "thead"
                        | "tr"
                ) =>
            {
                if self.has_any_element_in(&["td", "th"], Scope::Table) {
                    self.close_the_cell();
                    self.reprocess_token(token);
                } else {
                    self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
                }
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            //  "colgroup", "html": Parse error. Ignore the token."
            Token::EndTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html"
                ) =>
            {
                self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
            }

            // "An end tag whose tag name is one of: "table", "tbody", "tfoot",
            //  "thead", "tr": If the stack of open elements does not have an
            //  element in table scope that is an HTML element with the same tag
            //  name as that of the token, then this is a parse error; ignore
            //  the token. Otherwise, close the cell and reprocess the token."
            Token::EndTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "table" | "tbody" | "tfoot" | "thead" | "tr"
                ) =>
            {
                if self.has_element_in_table_scope(&tag.name) {
                    self.close_the_cell();
                    self.reprocess_token(token);
                } else {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
                }
            }

            _ => self.handle_in_body_mode(token),
        }
    }
}
