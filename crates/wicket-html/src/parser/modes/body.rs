//! [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)

use wicket_dom::{DocumentMode, Namespace, NodeId};

use super::is_html_whitespace;
use crate::error::ParseErrorCode;
use crate::parser::HTMLParser;
use crate::parser::core::InsertionMode;
use crate::parser::scope::{Scope, is_formatting_tag, is_special};
use crate::tokenizer::{Tag, Token, TokenizerState};

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Start tags that close an open `p` and then insert themselves.
fn is_block_start(name: &str) -> bool {
    matches!(
        name,
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "center"
            | "details"
            | "dialog"
            | "dir"
            | "div"
            | "dl"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "footer"
            | "header"
            | "hgroup"
            | "main"
            | "menu"
            | "nav"
            | "ol"
            | "p"
            | "search"
            | "section"
            | "summary"
            | "ul"
    )
}

/// End tags that close a block in default scope.
fn is_block_end(name: &str) -> bool {
    matches!(
        name,
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "button"
            | "center"
            | "details"
            | "dialog"
            | "dir"
            | "div"
            | "dl"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "footer"
            | "header"
            | "hgroup"
            | "listing"
            | "main"
            | "menu"
            | "nav"
            | "ol"
            | "pre"
            | "search"
            | "section"
            | "summary"
            | "ul"
    )
}

impl HTMLParser<'_> {
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    pub(in crate::parser) fn handle_in_body_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL: Parse error. Ignore the
            //  token."
            Token::Character('\0') => {
                self.parse_error(ParseErrorCode::UnexpectedCharacter, token);
            }

            // "A character token that is whitespace: Reconstruct the active
            //  formatting elements, if any. Insert the token's character."
            Token::Character(c) if is_html_whitespace(*c) => {
                self.reconstruct_active_formatting_elements();
                self.insert_character(*c);
            }

            // "Any other character token: Reconstruct the active formatting
            //  elements, if any. Insert the token's character. Set the
            //  frameset-ok flag to "not ok"."
            Token::Character(c) => {
                self.reconstruct_active_formatting_elements();
                self.insert_character(*c);
                self.frameset_ok = false;
            }

            Token::Comment(data) => self.insert_comment(data),
            Token::Doctype(_) => self.parse_error(ParseErrorCode::UnexpectedDoctype, token),
            Token::StartTag(tag) => self.in_body_start_tag(token, tag),
            Token::EndTag(tag) => self.in_body_end_tag(token, tag),

            // "An end-of-file token: If the stack of template insertion modes
            //  is not empty, then process the token using the rules for the
            //  "in template" insertion mode. Otherwise, follow these steps: If
            //  there is a node in the stack of open elements that is not
            //  [allowed to remain open], then this is a parse error. Stop
            //  parsing."
            Token::EndOfFile => {
                if self.template_insertion_modes.is_empty() {
                    self.check_unclosed_at_body_end();
                    self.stop_parsing();
                } else {
                    self.handle_in_template_mode(token);
                }
            }
        }
    }

    fn in_body_start_tag(&mut self, token: &Token, tag: &Tag) {
        match tag.name.as_str() {
            // "A start tag whose tag name is "html": Parse error. If there is a
            //  template element on the stack of open elements, then ignore the
            //  token. Otherwise, for each attribute on the token, check to see
            //  if the attribute is already present on the top element of the
            //  stack of open elements. If it is not, add the attribute and its
            //  corresponding value to that element."
            "html" => {
                self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
                if !self.stack_has_template()
                    && let Some(&html) = self.stack_of_open_elements.first()
                {
                    self.add_missing_attributes(tag, html);
                }
            }

            // "A start tag whose tag name is one of: "base", "basefont",
            //  "bgsound", "link", "meta", "noframes", "script", "style",
            //  "template", "title": Process the token using the rules for the
            //  "in head" insertion mode."
            "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script" | "style"
            | "template" | "title" => self.handle_in_head_mode(token),

            // "A start tag whose tag name is "body": Parse error. If the stack
            //  of open elements has only one node on it, or if the second
            //  element on the stack of open elements is not a body element, or
            //  if there is a template element on the stack of open elements,
            //  then ignore the token. Otherwise, set the frameset-ok flag to
            //  "not ok"; then, for each attribute on the token, check to see if
            //  the attribute is already present on the body element (the second
            //  element) on the stack of open elements, and if it is not, add the
            //  attribute and its corresponding value to that element."
            "body" => {
                self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
                if let Some(body) = self.second_element_if_body()
                    && !self.stack_has_template()
                {
                    self.frameset_ok = false;
                    self.add_missing_attributes(tag, body);
                }
            }

            // "A start tag whose tag name is "frameset""
            "frameset" => {
                self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
                let Some(body) = self.second_element_if_body() else {
                    return;
                };
                if !self.frameset_ok {
                    return;
                }
                // "Remove the second element on the stack of open elements from
                //  its parent node, if it has one."
                self.tree.detach(body);
                // "Pop all the nodes from the bottom of the stack of open
                //  elements, from the current node up to, but not including,
                //  the root html element."
                while self.stack_of_open_elements.len() > 1 {
                    let _ = self.pop_current_node();
                }
                // "Insert an HTML element for the token. Switch the insertion
                //  mode to "in frameset"."
                let _ = self.insert_html_element(tag);
                self.insertion_mode = InsertionMode::InFrameset;
            }

            name if is_block_start(name) => {
                self.close_p_element_if_in_button_scope();
                let _ = self.insert_html_element(tag);
            }

            // "A start tag whose tag name is one of: "h1", "h2", "h3", "h4",
            //  "h5", "h6": If the stack of open elements has a p element in
            //  button scope, then close a p element. If the current node is an
            //  HTML element whose tag name is one of "h1", "h2", "h3", "h4",
            //  "h5", or "h6", then this is a parse error; pop the current node
            //  off the stack of open elements. Insert an HTML element for the
            //  token."
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.close_p_element_if_in_button_scope();
                if self.current_node_is_one_of(HEADINGS) {
                    self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
                    let _ = self.pop_current_node();
                }
                let _ = self.insert_html_element(tag);
            }

            // "A start tag whose tag name is one of: "pre", "listing""
            "pre" | "listing" => {
                self.close_p_element_if_in_button_scope();
                let _ = self.insert_html_element(tag);
                self.skip_next_newline = true;
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "form""
            "form" => {
                let has_template = self.stack_has_template();
                if self.form_element_pointer.is_some() && !has_template {
                    self.parse_error(ParseErrorCode::NestedForm, token);
                    return;
                }
                self.close_p_element_if_in_button_scope();
                let form = self.insert_html_element(tag);
                if !has_template {
                    self.form_element_pointer = Some(form);
                }
            }

            // "A start tag whose tag name is "li""
            "li" => self.start_list_item(token, tag, &["li"]),

            // "A start tag whose tag name is one of: "dd", "dt""
            "dd" | "dt" => self.start_list_item(token, tag, &["dd", "dt"]),

            // "A start tag whose tag name is "plaintext""
            "plaintext" => {
                self.close_p_element_if_in_button_scope();
                let _ = self.insert_html_element(tag);
                self.tokenizer.set_state(TokenizerState::Plaintext);
            }

            // "A start tag whose tag name is "button""
            "button" => {
                if self.has_element_in_scope("button") {
                    self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
                    self.generate_implied_end_tags();
                    self.pop_until_tag("button");
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(tag);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "a": If the list of active
            //  formatting elements contains an a element between the end of
            //  the list and the last marker on the list (or the start of the
            //  list if there is no marker on the list), then this is a parse
            //  error; run the adoption agency algorithm for the token, then
            //  remove that element from the list of active formatting elements
            //  and the stack of open elements if the adoption agency algorithm
            //  didn't already remove it."
            "a" => {
                if let Some(anchor) = self.active_formatting_element_named("a") {
                    self.parse_error(ParseErrorCode::MisnestedFormattingElement, token);
                    let _ = self.run_adoption_agency(token);
                    self.remove_active_formatting_element(anchor);
                    self.remove_from_stack(anchor);
                }
                self.insert_formatting_element(tag);
            }

            // "A start tag whose tag name is "nobr": Reconstruct the active
            //  formatting elements, if any. If the stack of open elements has a
            //  nobr element in scope, then this is a parse error; run the
            //  adoption agency algorithm for the token, then once again
            //  reconstruct the active formatting elements, if any."
            "nobr" => {
                self.reconstruct_active_formatting_elements();
                if self.has_element_in_scope("nobr") {
                    self.parse_error(ParseErrorCode::MisnestedFormattingElement, token);
                    let _ = self.run_adoption_agency(token);
                }
                self.insert_formatting_element(tag);
            }

            name if is_formatting_tag(name) => self.insert_formatting_element(tag),

            // "A start tag whose tag name is one of: "applet", "marquee",
            //  "object": Reconstruct the active formatting elements, if any.
            //  Insert an HTML element for the token. Insert a marker at the end
            //  of the list of active formatting elements. Set the frameset-ok
            //  flag to "not ok"."
            "applet" | "marquee" | "object" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(tag);
                self.insert_marker();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "table": If the Document is not
            //  set to quirks mode, and the stack of open elements has a p
            //  element in button scope, then close a p element. Insert an HTML
            //  element for the token. Set the frameset-ok flag to "not ok".
            //  Switch the insertion mode to "in table"."
            "table" => {
                if self.tree.mode() != DocumentMode::Quirks {
                    self.close_p_element_if_in_button_scope();
                }
                let _ = self.insert_html_element(tag);
                self.frameset_ok = false;
                self.insertion_mode = InsertionMode::InTable;
            }

            // "A start tag whose tag name is one of: "area", "br", "embed",
            //  "img", "keygen", "wbr""
            "area" | "br" | "embed" | "img" | "keygen" | "wbr" => {
                self.insert_void_element(tag);
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "input""
            "input" => {
                self.insert_void_element(tag);
                // "If the token does not have an attribute with the name
                //  "type", or if it does, but that attribute's value is not an
                //  ASCII case-insensitive match for the string "hidden", then:
                //  set the frameset-ok flag to "not ok"."
                if !tag
                    .attr("type")
                    .is_some_and(|kind| kind.eq_ignore_ascii_case("hidden"))
                {
                    self.frameset_ok = false;
                }
            }

            // "A start tag whose tag name is one of: "param", "source",
            //  "track": Insert an HTML element for the token. Immediately pop
            //  the current node off the stack of open elements. Acknowledge the
            //  token's self-closing flag, if it is set."
            "param" | "source" | "track" => {
                let _ = self.insert_html_element(tag);
                let _ = self.pop_current_node();
                self.acknowledge_self_closing_flag();
            }

            // "A start tag whose tag name is "hr""
            "hr" => {
                self.close_p_element_if_in_button_scope();
                let _ = self.insert_html_element(tag);
                let _ = self.pop_current_node();
                self.acknowledge_self_closing_flag();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "image": Parse error. Change the
            //  token's tag name to "img" and reprocess it. (Don't ask.)"
            "image" => {
                self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
                let renamed = Token::StartTag(Tag {
                    name: "img".to_string(),
                    ..tag.clone()
                });
                self.reprocess_token(&renamed);
            }

            // "A start tag whose tag name is "textarea""
            "textarea" => {
                let _ = self.insert_html_element(tag);
                self.skip_next_newline = true;
                self.tokenizer.set_state(TokenizerState::Rcdata);
                self.original_insertion_mode = Some(self.insertion_mode);
                self.frameset_ok = false;
                self.insertion_mode = InsertionMode::Text;
            }

            // "A start tag whose tag name is "xmp""
            "xmp" => {
                self.close_p_element_if_in_button_scope();
                self.reconstruct_active_formatting_elements();
                self.frameset_ok = false;
                self.parse_generic_raw_text_element(tag);
            }

            // "A start tag whose tag name is "iframe""
            "iframe" => {
                self.frameset_ok = false;
                self.parse_generic_raw_text_element(tag);
            }

            // "A start tag whose tag name is "noembed"; A start tag whose tag
            //  name is "noscript", if the scripting flag is enabled"
            "noembed" => self.parse_generic_raw_text_element(tag),
            "noscript" if self.options.scripting => self.parse_generic_raw_text_element(tag),

            // "A start tag whose tag name is "select""
            "select" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(tag);
                self.frameset_ok = false;
                self.insertion_mode = match self.insertion_mode {
                    InsertionMode::InTable
                    | InsertionMode::InCaption
                    | InsertionMode::InTableBody
                    | InsertionMode::InRow
                    | InsertionMode::InCell => InsertionMode::InSelectInTable,
                    _ => InsertionMode::InSelect,
                };
            }

            // "A start tag whose tag name is one of: "optgroup", "option": If
            //  the current node is an option element, then pop the current
            //  node off the stack of open elements. Reconstruct the active
            //  formatting elements, if any. Insert an HTML element for the
            //  token."
            "optgroup" | "option" => {
                if self.current_node_is("option") {
                    let _ = self.pop_current_node();
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(tag);
            }

            // "A start tag whose tag name is one of: "rb", "rtc""
            "rb" | "rtc" => {
                if self.has_element_in_scope("ruby") {
                    self.generate_implied_end_tags();
                    if !self.current_node_is("ruby") {
                        self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
                    }
                }
                let _ = self.insert_html_element(tag);
            }

            // "A start tag whose tag name is one of: "rp", "rt""
            "rp" | "rt" => {
                if self.has_element_in_scope("ruby") {
                    self.generate_implied_end_tags_excluding(Some("rtc"));
                    if !self.current_node_is_one_of(&["rtc", "ruby"]) {
                        self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
                    }
                }
                let _ = self.insert_html_element(tag);
            }

            // "A start tag whose tag name is "math"" / "svg": Reconstruct the
            // active formatting elements, if any. Adjust the attributes. Insert
            // a foreign element for the token, with the matching namespace and
            // false. If the token has its self-closing flag set, pop the
            // current node off the stack of open elements and acknowledge the
            // token's self-closing flag."
            "math" | "svg" => {
                self.reconstruct_active_formatting_elements();
                let namespace = if tag.name == "math" {
                    Namespace::MathMl
                } else {
                    Namespace::Svg
                };
                let _ = self.insert_foreign_element(tag, namespace, false);
                if tag.self_closing {
                    let _ = self.pop_current_node();
                    self.acknowledge_self_closing_flag();
                }
            }

            // "A start tag whose tag name is one of: "caption", "col",
            //  "colgroup", "frame", "head", "tbody", "td", "tfoot", "th",
            //  "thead", "tr": Parse error. Ignore the token."
            "caption" | "col" | "colgroup" | "frame" | "head" | "tbody" | "td" | "tfoot" | "th"
            | "thead" | "tr" => {
                self.parse_error(ParseErrorCode::UnexpectedStartTag, token);
            }

            // "Any other start tag: Reconstruct the active formatting elements,
            //  if any. Insert an HTML element for the token."
            _ => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(tag);
            }
        }
    }

    fn in_body_end_tag(&mut self, token: &Token, tag: &Tag) {
        match tag.name.as_str() {
            // "An end tag whose tag name is "template": Process the token using
            //  the rules for the "in head" insertion mode."
            "template" => self.handle_in_head_mode(token),

            // "An end tag whose tag name is "body": If the stack of open
            //  elements does not have a body element in scope, this is a parse
            //  error; ignore the token. Otherwise, if there is a node in the
            //  stack of open elements that is not [allowed to remain open],
            //  then this is a parse error. Switch the insertion mode to "after
            //  body"."
            "body" => {
                if self.has_element_in_scope("body") {
                    self.check_unclosed_at_body_end();
                    self.insertion_mode = InsertionMode::AfterBody;
                } else {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
                }
            }

            // "An end tag whose tag name is "html"": as for `</body>`, then
            // reprocess the token.
            "html" => {
                if self.has_element_in_scope("body") {
                    self.check_unclosed_at_body_end();
                    self.insertion_mode = InsertionMode::AfterBody;
                    self.reprocess_token(token);
                } else {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
                }
            }

            // "An end tag whose tag name is one of: "address", "article", ...
            //  "ul": If the stack of open elements does not have an element in
            //  scope that is an HTML element with the same tag name as that of
            //  the token, then this is a parse error; ignore the token.
            //  Otherwise, run these steps: Generate implied end tags. If the
            //  current node is not an HTML element with the same tag name as
            //  that of the token, then this is a parse error. Pop elements from
            //  the stack of open elements until an HTML element with the same
            //  tag name as the token has been popped from the stack."
            name if is_block_end(name) => self.close_element_in_scope(token, name, Scope::Default),

            // "An end tag whose tag name is "form""
            "form" => self.close_form_element(token),

            // "An end tag whose tag name is "p": If the stack of open elements
            //  does not have a p element in button scope, then this is a parse
            //  error; insert an HTML element for a "p" start tag token with no
            //  attributes. Close a p element."
            "p" => {
                if !self.has_element_in_button_scope("p") {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
                    let _ = self.insert_html_element_named("p");
                }
                self.close_p_element();
            }

            // "An end tag whose tag name is "li": If the stack of open elements
            //  does not have an li element in list item scope, then this is a
            //  parse error; ignore the token. Otherwise: Generate implied end
            //  tags, except for li elements. If the current node is not an li
            //  element, then this is a parse error. Pop elements from the stack
            //  of open elements until an li element has been popped from the
            //  stack."
            "li" => self.close_element_in_scope(token, "li", Scope::ListItem),

            // "An end tag whose tag name is one of: "dd", "dt""
            "dd" | "dt" => self.close_element_in_scope(token, &tag.name, Scope::Default),

            // "An end tag whose tag name is one of: "h1", "h2", "h3", "h4",
            //  "h5", "h6""
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                if !self.has_any_element_in(HEADINGS, Scope::Default) {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
                    return;
                }
                self.generate_implied_end_tags();
                if !self.current_node_is(&tag.name) {
                    self.parse_error(ParseErrorCode::UnclosedElement, token);
                }
                self.pop_until_one_of(HEADINGS);
            }

            // "An end tag whose tag name is one of: "a", "b", "big", "code",
            //  "em", "font", "i", "nobr", "s", "small", "strike", "strong",
            //  "tt", "u": Run the adoption agency algorithm for the token."
            name if is_formatting_tag(name) => {
                if !self.run_adoption_agency(token) {
                    self.any_other_end_tag(token, name);
                }
            }

            // "An end tag token whose tag name is one of: "applet", "marquee",
            //  "object""
            "applet" | "marquee" | "object" => {
                if !self.has_element_in_scope(&tag.name) {
                    self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
                    return;
                }
                self.generate_implied_end_tags();
                if !self.current_node_is(&tag.name) {
                    self.parse_error(ParseErrorCode::UnclosedElement, token);
                }
                self.pop_until_tag(&tag.name);
                self.clear_active_formatting_elements_to_last_marker();
            }

            // "An end tag whose tag name is "br": Parse error. Drop the
            //  attributes from the token, and act as described in the next
            //  entry; i.e. act as if this was a "br" start tag token with no
            //  attributes, rather than the end tag token that it actually is."
            "br" => {
                self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
                self.insert_void_element(&Tag::named("br"));
                self.frameset_ok = false;
            }

            name => self.any_other_end_tag(token, name),
        }
    }

    /// The body element, if it is the second element on the stack.
    fn second_element_if_body(&self) -> Option<NodeId> {
        self.stack_of_open_elements
            .get(1)
            .copied()
            .filter(|&id| self.tree.is_element(id, Namespace::Html, "body"))
    }

    /// The `li`, `dd` and `dt` start tags: close an open item of the same
    /// family first.
    fn start_list_item(&mut self, token: &Token, tag: &Tag, family: &[&str]) {
        // STEP 1: "Set the frameset-ok flag to "not ok"."
        self.frameset_ok = false;

        // STEP 2-5: "Initialize node to be the current node (the bottommost
        //            node of the stack). Loop: If node is [in the family], then
        //            run these substeps: Generate implied end tags, except for
        //            [node's] elements. If the current node is not [such] an
        //            element, then this is a parse error. Pop elements from the
        //            stack of open elements until [such] an element has been
        //            popped from the stack. Jump to the step labeled done below.
        //            If node is in the special category, but is not an address,
        //            div, or p element, then jump to the step labeled done
        //            below. Otherwise, set node to the previous entry in the
        //            stack of open elements and return to the step labeled loop."
        let mut to_close = None;
        for &node in self.stack_of_open_elements.iter().rev() {
            let Some(element) = self.tree.as_element(node) else {
                continue;
            };
            if element.is_html_one_of(family) {
                to_close = Some(element.local_name.clone());
                break;
            }
            if is_special(element) && !element.is_html_one_of(&["address", "div", "p"]) {
                break;
            }
        }
        if let Some(name) = to_close {
            self.generate_implied_end_tags_excluding(Some(&name));
            if !self.current_node_is(&name) {
                self.parse_error(ParseErrorCode::UnclosedElement, token);
            }
            self.pop_until_tag(&name);
        }

        // STEP 6: "Done: If the stack of open elements has a p element in
        //          button scope, then close a p element."
        self.close_p_element_if_in_button_scope();

        // STEP 7: "Finally, insert an HTML element for the token."
        let _ = self.insert_html_element(tag);
    }

    /// Reconstruct, insert, and push onto the list of active formatting
    /// elements.
    fn insert_formatting_element(&mut self, tag: &Tag) {
        self.reconstruct_active_formatting_elements();
        let element = self.insert_html_element(tag);
        self.push_active_formatting_element(element, tag);
    }

    /// "Reconstruct the active formatting elements, if any. Insert an HTML
    /// element for the token. Immediately pop the current node off the stack
    /// of open elements. Acknowledge the token's self-closing flag, if it is
    /// set."
    fn insert_void_element(&mut self, tag: &Tag) {
        self.reconstruct_active_formatting_elements();
        let _ = self.insert_html_element(tag);
        let _ = self.pop_current_node();
        self.acknowledge_self_closing_flag();
    }

    /// The shared "has it in scope? implied end tags, then pop until it"
    /// shape of most end tags.
    fn close_element_in_scope(&mut self, token: &Token, name: &str, scope: Scope) {
        if !self.has_element_in(name, scope) {
            self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
            return;
        }
        if matches!(name, "li" | "dd" | "dt") {
            self.generate_implied_end_tags_excluding(Some(name));
        } else {
            self.generate_implied_end_tags();
        }
        if !self.current_node_is(name) {
            self.parse_error(ParseErrorCode::UnclosedElement, token);
        }
        self.pop_until_tag(name);
    }

    /// "An end tag whose tag name is "form""
    fn close_form_element(&mut self, token: &Token) {
        if self.stack_has_template() {
            // "If there is a template element on the stack of open elements":
            // the plain in-scope form closing.
            self.close_element_in_scope(token, "form", Scope::Default);
            return;
        }

        // STEP 1: "Let node be the element that the form element pointer is
        //          set to, or null if it is not set to an element."
        // STEP 2: "Set the form element pointer to null."
        let node = self.form_element_pointer.take();

        // STEP 3: "If node is null or if the stack of open elements does not
        //          have node in scope, then this is a parse error; return and
        //          ignore the token."
        let Some(node) = node.filter(|&node| self.has_node_in_scope(node)) else {
            self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
            return;
        };

        // STEP 4: "Generate implied end tags."
        self.generate_implied_end_tags();

        // STEP 5: "If the current node is not node, then this is a parse error."
        if self.current_node() != Some(node) {
            self.parse_error(ParseErrorCode::UnclosedElement, token);
        }

        // STEP 6: "Remove node from the stack of open elements."
        self.remove_from_stack(node);
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// "Any other end tag"
    pub(in crate::parser) fn any_other_end_tag(&mut self, token: &Token, name: &str) {
        // STEP 1: "Initialize node to be the current node (the bottommost node
        //          of the stack)."
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let node = self.stack_of_open_elements[index];
            let Some(element) = self.tree.as_element(node) else {
                continue;
            };

            // STEP 2: "Loop: If node is an HTML element with the same tag name
            //          as the token, then: Generate implied end tags, except for
            //          HTML elements with the same tag name as the token. If
            //          node is not the current node, then this is a parse error.
            //          Pop all the nodes from the current node up to node,
            //          including node, then stop these steps."
            if element.is(Namespace::Html, name) {
                self.generate_implied_end_tags_excluding(Some(name));
                if self.current_node() != Some(node) {
                    self.parse_error(ParseErrorCode::UnclosedElement, token);
                }
                self.pop_until_node(node);
                return;
            }

            // STEP 3: "Otherwise, if node is in the special category, then this
            //          is a parse error; ignore the token, and return."
            if is_special(element) {
                self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
                return;
            }
            // STEP 4: "Set node to the previous entry in the stack of open
            //          elements. Return to the step labeled loop."
        }
    }
}
