//! Scope queries, element categories, implied end tags, and the helpers
//! that pop the stack back to a known context.

use wicket_dom::{ElementData, Namespace, NodeId};

use super::HTMLParser;
use super::core::InsertionMode;
use crate::error::ParseErrorCode;

/// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
///
/// The element types that stop a scope scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Scope {
    /// "has an element in scope"
    Default,
    /// "has an element in list item scope": default plus `ol`, `ul`.
    ListItem,
    /// "has an element in button scope": default plus `button`.
    Button,
    /// "has an element in table scope": `html`, `table`, `template`.
    Table,
    /// "has an element in select scope": everything except `optgroup`, `option`.
    Select,
}

impl Scope {
    fn is_boundary(self, element: &ElementData) -> bool {
        match self {
            Self::Default => is_default_scope_boundary(element),
            Self::ListItem => {
                is_default_scope_boundary(element) || element.is_html_one_of(&["ol", "ul"])
            }
            Self::Button => {
                is_default_scope_boundary(element) || element.is(Namespace::Html, "button")
            }
            Self::Table => element.is_html_one_of(&["html", "table", "template"]),
            Self::Select => !element.is_html_one_of(&["optgroup", "option"]),
        }
    }
}

/// The base boundary set shared by the default, list item and button scopes.
fn is_default_scope_boundary(element: &ElementData) -> bool {
    let name = element.local_name.as_str();
    match element.namespace {
        Namespace::Html => matches!(
            name,
            "applet"
                | "caption"
                | "html"
                | "table"
                | "td"
                | "th"
                | "marquee"
                | "object"
                | "select"
                | "template"
        ),
        Namespace::MathMl => matches!(name, "mi" | "mo" | "mn" | "ms" | "mtext" | "annotation-xml"),
        Namespace::Svg => matches!(name, "foreignObject" | "desc" | "title"),
        _ => false,
    }
}

/// [§ 13.2.4.2 Special](https://html.spec.whatwg.org/multipage/parsing.html#special)
pub(super) fn is_special(element: &ElementData) -> bool {
    let name = element.local_name.as_str();
    match element.namespace {
        Namespace::Html => matches!(
            name,
            "address"
                | "applet"
                | "area"
                | "article"
                | "aside"
                | "base"
                | "basefont"
                | "bgsound"
                | "blockquote"
                | "body"
                | "br"
                | "button"
                | "caption"
                | "center"
                | "col"
                | "colgroup"
                | "dd"
                | "details"
                | "dir"
                | "div"
                | "dl"
                | "dt"
                | "embed"
                | "fieldset"
                | "figcaption"
                | "figure"
                | "footer"
                | "form"
                | "frame"
                | "frameset"
                | "h1"
                | "h2"
                | "h3"
                | "h4"
                | "h5"
                | "h6"
                | "head"
                | "header"
                | "hgroup"
                | "hr"
                | "html"
                | "iframe"
                | "img"
                | "input"
                | "keygen"
                | "li"
                | "link"
                | "listing"
                | "main"
                | "marquee"
                | "menu"
                | "meta"
                | "nav"
                | "noembed"
                | "noframes"
                | "noscript"
                | "object"
                | "ol"
                | "p"
                | "param"
                | "plaintext"
                | "pre"
                | "script"
                | "search"
                | "section"
                | "select"
                | "source"
                | "style"
                | "summary"
                | "table"
                | "tbody"
                | "td"
                | "template"
                | "textarea"
                | "tfoot"
                | "th"
                | "thead"
                | "title"
                | "tr"
                | "track"
                | "ul"
                | "wbr"
                | "xmp"
        ),
        Namespace::MathMl => matches!(name, "mi" | "mo" | "mn" | "ms" | "mtext" | "annotation-xml"),
        Namespace::Svg => matches!(name, "foreignObject" | "desc" | "title"),
        _ => false,
    }
}

/// [§ 13.2.4.2 Formatting](https://html.spec.whatwg.org/multipage/parsing.html#formatting)
pub(super) fn is_formatting_tag(name: &str) -> bool {
    matches!(
        name,
        "a" | "b"
            | "big"
            | "code"
            | "em"
            | "font"
            | "i"
            | "nobr"
            | "s"
            | "small"
            | "strike"
            | "strong"
            | "tt"
            | "u"
    )
}

/// Elements popped by "generate implied end tags".
const IMPLIED_END_TAGS: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc",
];

/// Elements popped by "generate all implied end tags thoroughly".
const IMPLIED_END_TAGS_THOROUGH: &[&str] = &[
    "caption", "colgroup", "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc",
    "tbody", "td", "tfoot", "th", "thead", "tr",
];

/// Elements that may stay open at the end of the body without a parse error.
const ALLOWED_OPEN_AT_BODY_END: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc", "tbody", "td", "tfoot",
    "th", "thead", "tr", "body", "html",
];

impl HTMLParser<'_> {
    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
    ///
    /// STEP 1: "Initialize node to be the current node (the bottommost node
    ///          of the stack)."
    /// STEP 2: "If node is the target node, terminate in a match state."
    /// STEP 3: "Otherwise, if node is one of the element types in list,
    ///          terminate in a failure state."
    /// STEP 4: "Otherwise, set node to the previous entry in the stack of
    ///          open elements and return to step 2."
    fn has_in_specific_scope(
        &self,
        is_target: impl Fn(NodeId, &ElementData) -> bool,
        scope: Scope,
    ) -> bool {
        for &id in self.stack_of_open_elements.iter().rev() {
            let Some(element) = self.tree.as_element(id) else {
                continue;
            };
            if is_target(id, element) {
                return true;
            }
            if scope.is_boundary(element) {
                return false;
            }
        }
        false
    }

    /// True if an HTML element named `local_name` is in `scope`.
    pub(super) fn has_element_in(&self, local_name: &str, scope: Scope) -> bool {
        self.has_in_specific_scope(|_, e| e.is(Namespace::Html, local_name), scope)
    }

    /// True if an HTML element with any of `local_names` is in `scope`.
    pub(super) fn has_any_element_in(&self, local_names: &[&str], scope: Scope) -> bool {
        self.has_in_specific_scope(|_, e| e.is_html_one_of(local_names), scope)
    }

    /// "has an element in scope", the default scope.
    pub(super) fn has_element_in_scope(&self, local_name: &str) -> bool {
        self.has_element_in(local_name, Scope::Default)
    }

    /// "has an element in button scope"
    pub(super) fn has_element_in_button_scope(&self, local_name: &str) -> bool {
        self.has_element_in(local_name, Scope::Button)
    }

    /// "has an element in table scope"
    pub(super) fn has_element_in_table_scope(&self, local_name: &str) -> bool {
        self.has_element_in(local_name, Scope::Table)
    }

    /// True if the particular node `target` is in the default scope.
    pub(super) fn has_node_in_scope(&self, target: NodeId) -> bool {
        self.has_in_specific_scope(|id, _| id == target, Scope::Default)
    }

    /// [§ 13.2.6.3 Generate implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    ///
    /// "while the current node is a dd element, a dt element, an li element,
    /// an optgroup element, an option element, a p element, an rb element, an
    /// rp element, an rt element, or an rtc element, the user agent must pop
    /// the current node off the stack of open elements."
    pub(super) fn generate_implied_end_tags(&mut self) {
        self.generate_implied_end_tags_excluding(None);
    }

    /// "If a step requires the user agent to generate implied end tags but
    /// lists an element to exclude from the process, then the user agent must
    /// perform the above steps as if that element was not in the above list."
    pub(super) fn generate_implied_end_tags_excluding(&mut self, exclude: Option<&str>) {
        while let Some(current) = self.current_node()
            && let Some(element) = self.tree.as_element(current)
            && element.is_html_one_of(IMPLIED_END_TAGS)
            && exclude != Some(element.local_name.as_str())
        {
            let _ = self.pop_current_node();
        }
    }

    /// [§ 13.2.6.3](https://html.spec.whatwg.org/multipage/parsing.html#generate-all-implied-end-tags-thoroughly)
    pub(super) fn generate_all_implied_end_tags_thoroughly(&mut self) {
        while self.current_node_is_one_of(IMPLIED_END_TAGS_THOROUGH) {
            let _ = self.pop_current_node();
        }
    }

    /// Parse error if anything but the elements allowed to be left open at
    /// the end of the body is still on the stack.
    pub(super) fn check_unclosed_at_body_end(&mut self) {
        let unclosed = self.stack_of_open_elements.iter().find_map(|&id| {
            let element = self.tree.as_element(id)?;
            (!element.is_html_one_of(ALLOWED_OPEN_AT_BODY_END)).then(|| element.local_name.clone())
        });
        if let Some(name) = unclosed {
            self.parse_error_with_detail(ParseErrorCode::UnclosedElement, Some(format!("<{name}>")));
        }
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#close-a-p-element)
    ///
    /// "Generate implied end tags, except for p elements. If the current node
    /// is not a p element, then this is a parse error. Pop elements from the
    /// stack of open elements until a p element has been popped from the stack."
    pub(super) fn close_p_element(&mut self) {
        self.generate_implied_end_tags_excluding(Some("p"));
        if !self.current_node_is("p") {
            self.parse_error_with_detail(ParseErrorCode::UnclosedElement, Some("<p>".to_string()));
        }
        self.pop_until_tag("p");
    }

    /// "If the stack of open elements has a p element in button scope, then
    /// close a p element."
    pub(super) fn close_p_element_if_in_button_scope(&mut self) {
        if self.has_element_in_button_scope("p") {
            self.close_p_element();
        }
    }

    /// Pop while the current node is not one of `stop_names` (HTML).
    fn clear_stack_back_to(&mut self, stop_names: &[&str]) {
        while self.current_node().is_some() && !self.current_node_is_one_of(stop_names) {
            let _ = self.pop_current_node();
        }
    }

    /// [§ 13.2.6.4.9](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-context)
    ///
    /// "while the current node is not a table, template, or html element, pop
    /// elements from the stack of open elements."
    pub(super) fn clear_stack_back_to_table_context(&mut self) {
        self.clear_stack_back_to(&["table", "template", "html"]);
    }

    /// [§ 13.2.6.4.13](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-body-context)
    ///
    /// "while the current node is not a tbody, tfoot, thead, template, or html
    /// element, pop elements from the stack of open elements."
    pub(super) fn clear_stack_back_to_table_body_context(&mut self) {
        self.clear_stack_back_to(&["tbody", "tfoot", "thead", "template", "html"]);
    }

    /// [§ 13.2.6.4.14](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-row-context)
    ///
    /// "while the current node is not a tr, template, or html element, pop
    /// elements from the stack of open elements."
    pub(super) fn clear_stack_back_to_table_row_context(&mut self) {
        self.clear_stack_back_to(&["tr", "template", "html"]);
    }

    /// [§ 13.2.6.4.15 Close the cell](https://html.spec.whatwg.org/multipage/parsing.html#close-the-cell)
    pub(super) fn close_the_cell(&mut self) {
        // STEP 1: "Generate implied end tags."
        self.generate_implied_end_tags();
        // STEP 2: "If the current node is not now a td element or a th element,
        //          then this is a parse error."
        if !self.current_node_is_one_of(&["td", "th"]) {
            self.parse_error_with_detail(ParseErrorCode::UnclosedElement, Some("cell".to_string()));
        }
        // STEP 3: "Pop elements from the stack of open elements stack until a
        //          td element or a th element has been popped from the stack."
        self.pop_until_one_of(&["td", "th"]);
        // STEP 4: "Clear the list of active formatting elements up to the last marker."
        self.clear_active_formatting_elements_to_last_marker();
        // STEP 5: "Switch the insertion mode to "in row"."
        self.insertion_mode = InsertionMode::InRow;
    }

    /// [§ 13.2.4.1 Reset the insertion mode appropriately](https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately)
    pub(super) fn reset_insertion_mode_appropriately(&mut self) {
        self.insertion_mode = self.appropriate_insertion_mode();
    }

    fn appropriate_insertion_mode(&self) -> InsertionMode {
        // STEP 1: "Let last be false."
        let mut last = false;

        // STEP 2: "Let node be the last node in the stack of open elements."
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let mut node = self.stack_of_open_elements[index];

            // STEP 3: "Loop: If node is the first node in the stack of open
            //          elements, then set last to true, and, if the parser was
            //          created as part of the HTML fragment parsing algorithm
            //          (fragment case), set node to the context element passed
            //          to that algorithm."
            if index == 0 {
                last = true;
                if let Some(context) = self.context_element {
                    node = context;
                }
            }

            let Some(element) = self.tree.as_element(node) else {
                continue;
            };
            if element.namespace == Namespace::Html {
                match element.local_name.as_str() {
                    // STEP 4: "If node is a select element, run these substeps"
                    "select" => return self.select_insertion_mode(index, last),
                    // STEP 5: "If node is a td or th element and last is false,
                    //          then switch the insertion mode to "in cell" and return."
                    "td" | "th" if !last => return InsertionMode::InCell,
                    // STEP 6
                    "tr" => return InsertionMode::InRow,
                    // STEP 7
                    "tbody" | "thead" | "tfoot" => return InsertionMode::InTableBody,
                    // STEP 8
                    "caption" => return InsertionMode::InCaption,
                    // STEP 9
                    "colgroup" => return InsertionMode::InColumnGroup,
                    // STEP 10
                    "table" => return InsertionMode::InTable,
                    // STEP 11: "If node is a template element, then switch the
                    //           insertion mode to the current template insertion
                    //           mode and return."
                    "template" => {
                        return self
                            .template_insertion_modes
                            .last()
                            .copied()
                            .unwrap_or(InsertionMode::InTemplate);
                    }
                    // STEP 12
                    "head" if !last => return InsertionMode::InHead,
                    // STEP 13
                    "body" => return InsertionMode::InBody,
                    // STEP 14
                    "frameset" => return InsertionMode::InFrameset,
                    // STEP 15: "If node is an html element, run these substeps:
                    //           If the head element pointer is null, switch the
                    //           insertion mode to "before head" and return.
                    //           Otherwise, switch to "after head" and return."
                    "html" => {
                        return if self.head_element_pointer.is_none() {
                            InsertionMode::BeforeHead
                        } else {
                            InsertionMode::AfterHead
                        };
                    }
                    _ => {}
                }
            }

            // STEP 16: "If last is true, then switch the insertion mode to
            //           "in body" and return."
            if last {
                return InsertionMode::InBody;
            }
            // STEP 17: "Let node now be the node before node in the stack of
            //           open elements." (next iteration)
        }
        InsertionMode::InBody
    }

    /// STEP 4 of reset the insertion mode, for a select element at `index`.
    fn select_insertion_mode(&self, index: usize, last: bool) -> InsertionMode {
        // STEP 4.1: "If last is true, jump to the step below labeled done."
        if !last {
            // STEP 4.2-4.6: walk up from the select looking for a template
            // (done) or a table ("in select in table").
            for &ancestor in self.stack_of_open_elements[..index].iter().rev() {
                if self.tree.is_element(ancestor, Namespace::Html, "template") {
                    break;
                }
                if self.tree.is_element(ancestor, Namespace::Html, "table") {
                    return InsertionMode::InSelectInTable;
                }
            }
        }
        // STEP 4.7: "Done: Switch the insertion mode to "in select" and return."
        InsertionMode::InSelect
    }
}
