//! [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#creating-and-inserting-nodes)
//! and the stack of open elements bookkeeping built on it.

use wicket_dom::{
    Attribute as DomAttribute, CustomElementState, ElementInit, Namespace, NodeId, NodeType,
};

use super::HTMLParser;
use super::core::InsertionMode;
use super::foreign_content::{
    adjust_foreign_attributes, adjust_mathml_attributes, adjust_svg_attributes,
};
use crate::error::{ParseErrorCode, UnsupportedReason};
use crate::tokenizer::{Tag, TokenizerState};

/// Where a node goes: inside `parent`, before `before` (or at the end).
pub(super) type InsertionLocation = (NodeId, Option<NodeId>);

impl HTMLParser<'_> {
    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
    ///
    /// "The appropriate place for inserting a node, optionally using a
    /// particular override target"
    pub(super) fn appropriate_place_for_inserting(
        &self,
        override_target: Option<NodeId>,
    ) -> InsertionLocation {
        // STEP 1: "If there was an override target specified, then let target
        //          be the override target. Otherwise, let target be the
        //          current node."
        let target = override_target
            .or_else(|| self.current_node())
            .unwrap_or(NodeId::ROOT);

        // STEP 2: "Determine the adjusted insertion location using the first
        //          matching steps from the following list:"
        let (parent, before) = if self.foster_parenting
            && self
                .tree
                .as_element(target)
                .is_some_and(|e| e.is_html_one_of(&["table", "tbody", "tfoot", "thead", "tr"]))
        {
            self.foster_parent_location()
        } else {
            // "Otherwise: Let adjusted insertion location be inside target,
            //  after its last child (if any)."
            (target, None)
        };

        // STEP 3: "If the adjusted insertion location is inside a template
        //          element, let it instead be inside the template element's
        //          template contents, after its last child (if any)."
        if let Some(contents) = self.tree.template_contents(parent) {
            return (contents, None);
        }
        (parent, before)
    }

    /// The foster parenting branch of the appropriate place for inserting.
    fn foster_parent_location(&self) -> InsertionLocation {
        // STEP 2.1: "Let last template be the last template element in the
        //            stack of open elements, if any."
        let last_template = self.last_html_element_in_stack("template");
        // STEP 2.2: "Let last table be the last table element in the stack of
        //            open elements, if any."
        let last_table = self.last_html_element_in_stack("table");

        // STEP 2.3: "If there is a last template and either there is no last
        //            table, or there is one, but last template is lower (more
        //            recently added) than last table in the stack of open
        //            elements, then: let adjusted insertion location be inside
        //            last template's template contents, after its last child."
        if let Some((template_index, template)) = last_template
            && last_table.is_none_or(|(table_index, _)| template_index > table_index)
        {
            return (self.tree.template_contents(template).unwrap_or(template), None);
        }

        // STEP 2.4: "If there is no last table, then let adjusted insertion
        //            location be inside the first element in the stack of open
        //            elements (the html element), after its last child."
        let Some((table_index, table)) = last_table else {
            let html = self
                .stack_of_open_elements
                .first()
                .copied()
                .unwrap_or(NodeId::ROOT);
            return (html, None);
        };

        // STEP 2.5: "If last table has a parent node, then let adjusted
        //            insertion location be inside last table's parent node,
        //            immediately before last table, and abort these steps."
        if let Some(parent) = self.tree.parent(table) {
            return (parent, Some(table));
        }

        // STEP 2.6-2.7: "Let previous element be the element immediately above
        //                last table in the stack of open elements. Let adjusted
        //                insertion location be inside previous element, after
        //                its last child (if any)."
        let previous = table_index
            .checked_sub(1)
            .and_then(|i| self.stack_of_open_elements.get(i).copied())
            .unwrap_or(NodeId::ROOT);
        (previous, None)
    }

    fn last_html_element_in_stack(&self, local_name: &str) -> Option<(usize, NodeId)> {
        self.stack_of_open_elements
            .iter()
            .enumerate()
            .rev()
            .find(|&(_, &id)| self.tree.is_element(id, Namespace::Html, local_name))
            .map(|(index, &id)| (index, id))
    }

    /// Put `node` at `location`.
    pub(super) fn insert_at(&mut self, (parent, before): InsertionLocation, node: NodeId) {
        match before {
            Some(reference) => self.tree.insert_before(parent, node, reference),
            None => self.tree.append_child(parent, node),
        }
    }

    /// Token attributes as DOM attributes, with the MathML, SVG and
    /// foreign attribute adjustments for elements in those namespaces.
    fn element_attributes(tag: &Tag, namespace: Namespace) -> Vec<DomAttribute> {
        let mut attributes: Vec<DomAttribute> = tag
            .attributes
            .iter()
            .map(|attr| DomAttribute::new(attr.name.as_str(), attr.value.as_str()))
            .collect();
        match namespace {
            Namespace::MathMl => {
                adjust_mathml_attributes(&mut attributes);
                adjust_foreign_attributes(&mut attributes);
            }
            Namespace::Svg => {
                adjust_svg_attributes(&mut attributes);
                adjust_foreign_attributes(&mut attributes);
            }
            _ => {}
        }
        attributes
    }

    /// [§ 13.2.6.1 Create an element for the token](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    ///
    /// The element factory is asked for a constructor exactly once per call.
    pub(super) fn create_element_for_token(
        &mut self,
        tag: &Tag,
        namespace: Namespace,
        intended_parent: NodeId,
    ) -> NodeId {
        // STEP 3: "Let document be intended parent's node document."
        let document = self.tree.node_document(intended_parent);

        // STEP 4-5: "Let local name be the tag name of the token. Let is be
        //            the value of the "is" attribute in the given token, if
        //            such an attribute exists; otherwise null."
        let is_value = tag.attr("is").map(str::to_string);

        // STEP 6: "Let definition be the result of looking up a custom element
        //          definition given document, given namespace, local name,
        //          and is."
        let has_definition = self
            .factory()
            .custom_element_definition(namespace, &tag.name, is_value.as_deref())
            .is_some();

        // STEP 7: "Let willExecuteScript be true if definition is non-null and
        //          the parser was not created as part of the HTML fragment
        //          parsing algorithm"
        if has_definition && !self.is_fragment_case() {
            self.unsupported(UnsupportedReason::CustomElementConstruction);
        }

        // STEP 9: "Let element be the result of creating an element given
        //          document, local name, given namespace, null, is, and
        //          willExecuteScript."
        let constructor = self.factory().constructor_for(namespace, &tag.name);
        let mut element = constructor(ElementInit {
            namespace,
            prefix: None,
            local_name: tag.name.clone(),
            attributes: Self::element_attributes(tag, namespace),
            is_value,
        });
        element.state.parser_inserted = true;
        if has_definition {
            element.state.custom_element_state = CustomElementState::Undefined;
        }

        // STEP 10-11: "If element has an xmlns attribute in the XMLNS namespace
        //              whose value is not exactly the same as the element's
        //              namespace, that is a parse error. Similarly, if element
        //              has an xmlns:xlink attribute in the XMLNS namespace whose
        //              value is not the XLink namespace, that is a parse error."
        let bad_xmlns = element.attrs.iter().any(|attr| {
            attr.namespace == Some(Namespace::Xmlns)
                && match attr.local_name.as_str() {
                    "xmlns" => attr.value != namespace.url(),
                    "xlink" => attr.value != Namespace::XLink.url(),
                    _ => false,
                }
        });
        if bad_xmlns {
            self.parse_error_with_detail(
                ParseErrorCode::UnexpectedTokenInForeignContent,
                Some(format!("xmlns mismatch on <{}>", tag.name)),
            );
        }

        // [§ 4.12.3](https://html.spec.whatwg.org/multipage/scripting.html#template-contents)
        // "When a template element is created, the user agent must run the
        //  following steps to establish the template contents"
        if namespace == Namespace::Html && tag.name == "template" {
            let owner = self.tree.template_contents_owner();
            element.template_contents = Some(self.tree.alloc_in(owner, NodeType::DocumentFragment));
        }

        self.tree.alloc_in(document, NodeType::Element(element))
    }

    /// [§ 13.2.6.1 Insert a foreign element](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-foreign-element)
    ///
    /// "When the steps below require the user agent to insert a foreign
    /// element for a token in a given namespace and with a boolean
    /// onlyAddToElementStack"
    pub(super) fn insert_foreign_element(
        &mut self,
        tag: &Tag,
        namespace: Namespace,
        only_add_to_element_stack: bool,
    ) -> NodeId {
        // STEP 1: "Let the adjusted insertion location be the appropriate
        //          place for inserting a node."
        let location = self.appropriate_place_for_inserting(None);

        // STEP 2: "Let element be the result of creating an element for the
        //          token in the given namespace, with the intended parent being
        //          the element in which the adjusted insertion location finds
        //          itself."
        let element = self.create_element_for_token(tag, namespace, location.0);

        // STEP 3: "If onlyAddToElementStack is false, then run insert an
        //          element at the adjusted insertion location with element."
        if !only_add_to_element_stack {
            self.insert_at(location, element);
        }

        // STEP 4: "Push element onto the stack of open elements so that it is
        //          the new current node."
        self.push_open_element(element);
        element
    }

    /// [§ 13.2.6.1 Insert an HTML element](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    ///
    /// "When the steps below require the user agent to insert an HTML element
    /// for a token, the user agent must insert a foreign element for the
    /// token, with the HTML namespace and false."
    pub(super) fn insert_html_element(&mut self, tag: &Tag) -> NodeId {
        self.insert_foreign_element(tag, Namespace::Html, false)
    }

    /// Insert an HTML element for a start tag the parser makes up, such as
    /// the implied `head`, `body` or `tbody`.
    pub(super) fn insert_html_element_named(&mut self, name: &str) -> NodeId {
        self.insert_html_element(&Tag::named(name))
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    pub(super) fn insert_character(&mut self, c: char) {
        // STEP 2: "Let the adjusted insertion location be the appropriate place
        //          for inserting a node."
        let (parent, before) = self.appropriate_place_for_inserting(None);

        // STEP 3: "If the adjusted insertion location is inside a Document
        //          node, then return."
        if matches!(
            self.tree.get(parent).map(|n| &n.node_type),
            Some(NodeType::Document { .. })
        ) {
            return;
        }

        // STEP 4: "If there is a Text node immediately before the adjusted
        //          insertion location, then append data to that Text node's
        //          data."
        let previous = match before {
            Some(reference) => self.tree.prev_sibling(reference),
            None => self.tree.last_child(parent),
        };
        if let Some(previous) = previous
            && let Some(node) = self.tree.get_mut(previous)
            && let NodeType::Text(data) = &mut node.node_type
        {
            data.push(c);
            return;
        }

        // STEP 5: "Otherwise, create a new Text node whose data is data and
        //          whose node document is the same as that of the element in
        //          which the adjusted insertion location finds itself, and
        //          insert the newly created node at the adjusted insertion
        //          location."
        let document = self.tree.node_document(parent);
        let text = self.tree.alloc_in(document, NodeType::Text(c.to_string()));
        self.insert_at((parent, before), text);
    }

    /// [§ 13.2.6.1 Insert a comment](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    pub(super) fn insert_comment(&mut self, data: &str) {
        let location = self.appropriate_place_for_inserting(None);
        let document = self.tree.node_document(location.0);
        let comment = self
            .tree
            .alloc_in(document, NodeType::Comment(data.to_string()));
        self.insert_at(location, comment);
    }

    /// Insert a comment as the last child of `parent`, the "explicit
    /// insertion position" form used for the Document and the html element.
    pub(super) fn insert_comment_in(&mut self, data: &str, parent: NodeId) {
        let document = self.tree.node_document(parent);
        let comment = self
            .tree
            .alloc_in(document, NodeType::Comment(data.to_string()));
        self.tree.append_child(parent, comment);
    }

    /// [§ 13.2.6.2 Generic RCDATA element parsing algorithm](https://html.spec.whatwg.org/multipage/parsing.html#generic-rcdata-element-parsing-algorithm)
    pub(super) fn parse_generic_rcdata_element(&mut self, tag: &Tag) {
        self.parse_generic_text_element(tag, TokenizerState::Rcdata);
    }

    /// [§ 13.2.6.2 Generic raw text element parsing algorithm](https://html.spec.whatwg.org/multipage/parsing.html#generic-raw-text-element-parsing-algorithm)
    pub(super) fn parse_generic_raw_text_element(&mut self, tag: &Tag) {
        self.parse_generic_text_element(tag, TokenizerState::Rawtext);
    }

    fn parse_generic_text_element(&mut self, tag: &Tag, state: TokenizerState) {
        // STEP 1: "Insert an HTML element for the token."
        let _ = self.insert_html_element(tag);
        // STEP 2: "If the algorithm that was invoked is the generic raw text
        //          element parsing algorithm, switch the tokenizer to the
        //          RAWTEXT state; otherwise ... switch the tokenizer to the
        //          RCDATA state."
        self.tokenizer.set_state(state);
        // STEP 3: "Set the original insertion mode to the current insertion mode."
        self.original_insertion_mode = Some(self.insertion_mode);
        // STEP 4: "Then, switch the insertion mode to "text"."
        self.insertion_mode = InsertionMode::Text;
    }

    /// "For each attribute on the token, check to see if the attribute is
    /// already present on the [target] element. If it is not, add the
    /// attribute and its corresponding value to that element."
    pub(super) fn add_missing_attributes(&mut self, tag: &Tag, target: NodeId) {
        let Some(element) = self.tree.as_element_mut(target) else {
            return;
        };
        for attr in &tag.attributes {
            if element.attr(&attr.name).is_none() {
                element
                    .attrs
                    .push(DomAttribute::new(attr.name.as_str(), attr.value.as_str()));
            }
        }
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#push-onto-the-stack-of-open-elements)
    pub(super) fn push_open_element(&mut self, id: NodeId) {
        self.stack_of_open_elements.push(id);
        self.record_push();
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#popped)
    ///
    /// Pop the current node and run its "popped off the stack of open
    /// elements" hook.
    pub(super) fn pop_current_node(&mut self) -> Option<NodeId> {
        let popped = self.stack_of_open_elements.pop();
        debug_assert!(popped.is_some(), "popped an empty stack of open elements");
        if let Some(id) = popped {
            self.element_left_stack(id);
        }
        popped
    }

    /// Remove `id` from wherever it is in the stack of open elements.
    pub(super) fn remove_from_stack(&mut self, id: NodeId) {
        if let Some(index) = self.stack_of_open_elements.iter().position(|&e| e == id) {
            let _ = self.stack_of_open_elements.remove(index);
            self.element_left_stack(id);
        }
    }

    fn element_left_stack(&mut self, id: NodeId) {
        self.record_pop();
        let hook = self
            .tree
            .as_element(id)
            .and_then(|e| e.capabilities.on_popped_from_stack);
        if let Some(hook) = hook {
            hook(&mut self.tree, id);
        }
    }

    /// Pop elements until `id` has been popped.
    pub(super) fn pop_until_node(&mut self, id: NodeId) {
        while !self.stack_of_open_elements.is_empty() {
            if self.pop_current_node() == Some(id) {
                break;
            }
        }
    }

    /// Pop elements until an HTML element named `local_name` has been popped.
    pub(super) fn pop_until_tag(&mut self, local_name: &str) {
        self.pop_until_one_of(&[local_name]);
    }

    /// Pop elements until an HTML element with one of `local_names` has been
    /// popped.
    pub(super) fn pop_until_one_of(&mut self, local_names: &[&str]) {
        while !self.stack_of_open_elements.is_empty() {
            let popped = self.pop_current_node();
            if popped
                .and_then(|id| self.tree.as_element(id))
                .is_some_and(|e| e.is_html_one_of(local_names))
            {
                break;
            }
        }
    }

    /// True if the current node is an HTML element named `local_name`.
    pub(super) fn current_node_is(&self, local_name: &str) -> bool {
        self.current_node()
            .is_some_and(|id| self.tree.is_element(id, Namespace::Html, local_name))
    }

    /// True if the current node is an HTML element with one of `local_names`.
    pub(super) fn current_node_is_one_of(&self, local_names: &[&str]) -> bool {
        self.current_node()
            .and_then(|id| self.tree.as_element(id))
            .is_some_and(|e| e.is_html_one_of(local_names))
    }

    /// True if there is a template element on the stack of open elements.
    pub(super) fn stack_has_template(&self) -> bool {
        self.last_html_element_in_stack("template").is_some()
    }
}
