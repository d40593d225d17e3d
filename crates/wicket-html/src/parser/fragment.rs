//! [§ 13.4 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)

use wicket_dom::{Attribute, ElementData, Namespace, NodeId, NodeType};

use super::core::InsertionMode;
use super::{FragmentContext, HTMLParser};
use crate::tokenizer::{Tag, TokenizerState};

impl FragmentContext {
    /// A context element in the HTML namespace, such as `body` or `td`.
    #[must_use]
    pub fn html(local_name: &str) -> Self {
        Self::new(Namespace::Html, local_name)
    }

    /// A context element in any namespace.
    #[must_use]
    pub fn new(namespace: Namespace, local_name: &str) -> Self {
        Self {
            namespace,
            local_name: local_name.to_string(),
            attributes: Vec::new(),
        }
    }

    /// Add an attribute to the context element.
    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// The tokenizer state the fragment starts in.
    fn initial_tokenizer_state(&self, scripting: bool) -> TokenizerState {
        if self.namespace != Namespace::Html {
            return TokenizerState::Data;
        }
        match self.local_name.as_str() {
            "title" | "textarea" => TokenizerState::Rcdata,
            "style" | "xmp" | "iframe" | "noembed" | "noframes" => TokenizerState::Rawtext,
            "script" => TokenizerState::ScriptData,
            "noscript" if scripting => TokenizerState::Rawtext,
            "plaintext" => TokenizerState::Plaintext,
            _ => TokenizerState::Data,
        }
    }
}

impl HTMLParser<'_> {
    /// Set up the parser state for the fragment case before the first token.
    pub(super) fn prepare_fragment(&mut self, context: &FragmentContext) {
        // STEP 4: "Set the state of the HTML parser's tokenization stage as
        //          follows, switching on the context element"
        self.tokenizer
            .set_state(context.initial_tokenizer_state(self.options.scripting));
        self.tokenizer.set_last_start_tag(Some(&context.local_name));
        self.tokenizer
            .set_cdata_allowed(context.namespace != Namespace::Html);

        // The context element lives in the arena but is never attached.
        let mut element = ElementData::new(context.namespace, &context.local_name);
        element.attrs.clone_from(&context.attributes);
        let context_element = self.tree.alloc(NodeType::Element(element));
        self.context_element = Some(context_element);

        // STEP 5-7: "Let root be the result of creating an element given
        //            document, "html", the HTML namespace. Append the element
        //            root to the Document node created above. Set up the HTML
        //            parser's stack of open elements so that it contains just
        //            the single element root."
        let root = self.create_element_for_token(&Tag::named("html"), Namespace::Html, NodeId::ROOT);
        self.tree.append_child(NodeId::ROOT, root);
        self.push_open_element(root);
        self.set_fragment_root(root);

        // STEP 8: "If context is a template element, then push "in template"
        //          onto the stack of template insertion modes so that it is
        //          the new current template insertion mode."
        if context.namespace == Namespace::Html && context.local_name == "template" {
            self.template_insertion_modes.push(InsertionMode::InTemplate);
        }

        // STEP 10: "Reset the parser's insertion mode appropriately."
        self.reset_insertion_mode_appropriately();

        // STEP 11: "Set the HTML parser's form element pointer to the nearest
        //           node to context that is a form element (going straight up
        //           the ancestor chain, and including the element itself, if it
        //           is a form element), if any." The context has no ancestors.
        if context.namespace == Namespace::Html && context.local_name == "form" {
            self.form_element_pointer = Some(context_element);
        }
    }
}
