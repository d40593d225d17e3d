//! [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
//! and the template start and end tags shared with "in head".

use crate::error::{ParseErrorCode, UnsupportedReason};
use crate::parser::HTMLParser;
use crate::parser::core::InsertionMode;
use crate::tokenizer::{Tag, Token};

impl HTMLParser<'_> {
    /// [§ 13.2.6.4.4](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    ///
    /// "A start tag whose tag name is "template""
    pub(in crate::parser) fn insert_template_element(&mut self, tag: &Tag) {
        // A declarative shadow root would attach a shadow root to the
        // template's parent here; the core keeps it an ordinary template.
        if tag
            .attr("shadowrootmode")
            .is_some_and(|mode| mode == "open" || mode == "closed")
        {
            self.unsupported(UnsupportedReason::DeclarativeShadowRoot);
        }

        // "Insert an HTML element for the token. Insert a marker at the end
        //  of the list of active formatting elements. Set the frameset-ok flag
        //  to "not ok". Switch the insertion mode to "in template". Push "in
        //  template" onto the stack of template insertion modes so that it is
        //  the new current template insertion mode."
        let _ = self.insert_html_element(tag);
        self.insert_marker();
        self.frameset_ok = false;
        self.insertion_mode = InsertionMode::InTemplate;
        self.template_insertion_modes.push(InsertionMode::InTemplate);
    }

    /// "An end tag whose tag name is "template""
    pub(in crate::parser) fn close_template_element(&mut self, token: &Token) {
        // "If there is no template element on the stack of open elements, then
        //  this is a parse error; ignore the token."
        if !self.stack_has_template() {
            self.parse_error(ParseErrorCode::UnexpectedEndTag, token);
            return;
        }

        // "Generate all implied end tags thoroughly. If the current node is
        //  not a template element, then this is a parse error. Pop elements
        //  from the stack of open elements until a template element has been
        //  popped from the stack. Clear the list of active formatting elements
        //  up to the last marker. Pop the current template insertion mode off
        //  the stack of template insertion modes. Reset the insertion mode
        //  appropriately."
        self.generate_all_implied_end_tags_thoroughly();
        if !self.current_node_is("template") {
            self.parse_error(ParseErrorCode::UnclosedElement, token);
        }
        self.pop_template_and_reset();
    }

    fn pop_template_and_reset(&mut self) {
        self.pop_until_tag("template");
        self.clear_active_formatting_elements_to_last_marker();
        let _ = self.template_insertion_modes.pop();
        self.reset_insertion_mode_appropriately();
    }

    /// Replace the current template insertion mode with `mode`, switch to
    /// it, and reprocess the token.
    fn switch_template_mode(&mut self, mode: InsertionMode, token: &Token) {
        let _ = self.template_insertion_modes.pop();
        self.template_insertion_modes.push(mode);
        self.insertion_mode = mode;
        self.reprocess_token(token);
    }

    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    pub(in crate::parser) fn handle_in_template_mode(&mut self, token: &Token) {
        match token {
            // "A character token; A comment token; A DOCTYPE token: Process
            //  the token using the rules for the "in body" insertion mode."
            Token::Character(_) | Token::Comment(_) | Token::Doctype(_) => {
                self.handle_in_body_mode(token);
            }

            // "A start tag whose tag name is one of: "base", "basefont",
            //  "bgsound", "link", "meta", "noframes", "script", "style",
            //  "template", "title"; An end tag whose tag name is "template":
            //  Process the token using the rules for the "in head" insertion
            //  mode."
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
                self.handle_in_head_mode(token);
            }
            Token::EndTag(tag) if tag.name == "template" => self.handle_in_head_mode(token),

            // "A start tag whose tag name is one of: "caption", "colgroup",
            //  "tbody", "tfoot", "thead": Pop the current template insertion
            //  mode off the stack of template insertion modes. Push "in table"
            //  onto the stack of template insertion modes so that it is the new
            //  current template insertion mode. Switch the insertion mode to
            //  "in table", and reprocess the token."
            Token::StartTag(tag)
                if matches!(
                    tag.name.as_str(),
                    "caption" | "colgroup" | "tbody" | "tfoot" | "thead"
                ) =>
            {
                self.switch_template_mode(InsertionMode::InTable, token);
            }

            // "A start tag whose tag name is "col"": "in column group".
            Token::StartTag(tag) if tag.name == "col" => {
                self.switch_template_mode(InsertionMode::InColumnGroup, token);
            }

            // "A start tag whose tag name is "tr"": "in table body".
            Token::StartTag(tag) if tag.name == "tr" => {
                self.switch_template_mode(InsertionMode::InTableBody, token);
            }

            // "A start tag whose tag name is one of: "td", "th"": "in row".
            Token::StartTag(tag) if matches!(tag.name.as_str(), "td" | "th") => {
                self.switch_template_mode(InsertionMode::InRow, token);
            }

            // "Any other start tag": "in body".
            Token::StartTag(_) => self.switch_template_mode(InsertionMode::InBody, token),

            // "Any other end tag: Parse error. Ignore the token."
            Token::EndTag(_) => self.parse_error(ParseErrorCode::UnexpectedEndTag, token),

            // "An end-of-file token: If there is no template element on the
            //  stack of open elements, then stop parsing. (fragment case)
            //  Otherwise, this is a parse error. Pop elements from the stack of
            //  open elements until a template element has been popped from the
            //  stack. Clear the list of active formatting elements up to the
            //  last marker. Pop the current template insertion mode off the
            //  stack of template insertion modes. Reset the insertion mode
            //  appropriately. Reprocess the token."
            Token::EndOfFile => {
                if !self.stack_has_template() {
                    self.stop_parsing();
                    return;
                }
                self.parse_error(ParseErrorCode::UnexpectedEof, token);
                self.pop_template_and_reset();
                self.reprocess_token(token);
            }
        }
    }
}
