//! Element data, element kinds, and per-element extension state.
//!
//! [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
//! "Elements have an associated namespace, namespace prefix, local name,
//! custom element state, custom element definition, is value."

use std::collections::HashSet;

use strum_macros::Display;

use crate::Namespace;
use crate::capabilities::Capabilities;

/// [§ 4.9.2 Interface Attr](https://dom.spec.whatwg.org/#interface-attr)
///
/// "Attr nodes are simply known as attributes. ... Attributes have a
/// namespace (null or a non-empty string), namespace prefix (null or a
/// non-empty string), local name (a non-empty string), value (a string)."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// "namespace (null or a non-empty string)"
    pub namespace: Option<Namespace>,
    /// "namespace prefix (null or a non-empty string)"
    pub prefix: Option<String>,
    /// "local name (a non-empty string)"
    pub local_name: String,
    /// "value (a string)"
    pub value: String,
}

impl Attribute {
    /// Create an attribute with no namespace.
    #[must_use]
    pub fn new(local_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            namespace: None,
            prefix: None,
            local_name: local_name.into(),
            value: value.into(),
        }
    }

    /// "An attribute's qualified name is its local name if its namespace
    /// prefix is null, and its namespace prefix, followed by ":", followed
    /// by its local name, otherwise."
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local_name),
            None => self.local_name.clone(),
        }
    }
}

/// [§ 4.13.3 Custom element state](https://dom.spec.whatwg.org/#concept-element-custom-element-state)
///
/// "An element's custom element state is one of "undefined", "failed",
/// "uncustomized", "precustomized", or "custom"."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum CustomElementState {
    /// Waiting for a definition (or an upgrade reaction).
    Undefined,
    /// The custom element constructor threw.
    Failed,
    /// A plain element with no custom element definition.
    #[default]
    Uncustomized,
    /// Created, constructor not yet run.
    Precustomized,
    /// A fully constructed custom element.
    Custom,
}

/// What kind of element this is, chosen from `(namespace, local name)`.
///
/// Behavior that differs between element types dispatches on this tag
/// (or on the attached [`Capabilities`]) instead of a type hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ElementKind {
    /// Any element without specialized behavior.
    Generic,
    /// `<body>`
    Body,
    /// `<canvas>`
    Canvas,
    /// `<font>`
    Font,
    /// `<iframe>`
    Iframe,
    /// `<img>`
    Image,
    /// `<link>`
    Link,
    /// `<script>` (HTML or SVG)
    Script,
    /// `<style>` (HTML or SVG)
    Style,
    /// `<table>`
    Table,
    /// `<template>`
    Template,
    /// An HTML element whose name is a valid custom element name.
    Custom,
    /// Any other element in the SVG namespace.
    Svg,
    /// Any other element in the MathML namespace.
    MathMl,
}

impl ElementKind {
    /// Pick the kind for an element with the given namespace and local name.
    #[must_use]
    pub fn from_name(namespace: Namespace, local_name: &str) -> Self {
        match namespace {
            Namespace::Html => match local_name {
                "body" => Self::Body,
                "canvas" => Self::Canvas,
                "font" => Self::Font,
                "iframe" => Self::Iframe,
                "img" => Self::Image,
                "link" => Self::Link,
                "script" => Self::Script,
                "style" => Self::Style,
                "table" => Self::Table,
                "template" => Self::Template,
                name if crate::registry::is_valid_custom_element_name(name) => Self::Custom,
                _ => Self::Generic,
            },
            Namespace::Svg => match local_name {
                "script" => Self::Script,
                "style" => Self::Style,
                _ => Self::Svg,
            },
            Namespace::MathMl => Self::MathMl,
            _ => Self::Generic,
        }
    }
}

/// Per-element state the parser and downstream consumers read and write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementState {
    /// "custom element state"
    pub custom_element_state: CustomElementState,
    /// "is value"
    pub is_value: Option<String>,
    /// Set for elements created by the HTML parser.
    pub parser_inserted: bool,
    /// Script elements: "already started".
    pub already_started: bool,
    /// Style elements: the stylesheet text captured when the element was
    /// popped off the stack of open elements.
    pub stylesheet_text: Option<String>,
    /// Link elements: a resource the stylesheet loader should fetch.
    pub pending_fetch: Option<String>,
}

/// Element-specific data.
///
/// Per [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element):
/// - "Elements have an associated namespace, namespace prefix, local name, custom element state,
///   custom element definition, is value."
/// - "When an element is created, its local name is always given."
#[derive(Debug, Clone)]
pub struct ElementData {
    /// "An element's namespace"
    pub namespace: Namespace,
    /// "An element's namespace prefix"
    pub prefix: Option<String>,
    /// "An element's local name"
    pub local_name: String,
    /// "An element has an associated attribute list"
    pub attrs: Vec<Attribute>,
    /// The specialized element type.
    pub kind: ElementKind,
    /// Optional per-kind callbacks.
    pub capabilities: Capabilities,
    /// Parser-visible extension state.
    pub state: ElementState,
    /// [§ 4.12.3 The template element](https://html.spec.whatwg.org/multipage/scripting.html#template-contents)
    ///
    /// "Each template element has an associated DocumentFragment object that
    /// is its template contents."
    pub template_contents: Option<crate::NodeId>,
}

impl ElementData {
    /// Create an HTML element with no attributes and the standard kind.
    #[must_use]
    pub fn new(namespace: Namespace, local_name: &str) -> Self {
        create_standard_element(ElementInit {
            namespace,
            prefix: None,
            local_name: local_name.to_string(),
            attributes: Vec::new(),
            is_value: None,
        })
    }

    /// True if this element has the given namespace and local name.
    #[must_use]
    pub fn is(&self, namespace: Namespace, local_name: &str) -> bool {
        self.namespace == namespace && self.local_name == local_name
    }

    /// True if this is an HTML element with one of the given local names.
    #[must_use]
    pub fn is_html_one_of(&self, names: &[&str]) -> bool {
        self.namespace == Namespace::Html && names.contains(&self.local_name.as_str())
    }

    /// Returns the value of the un-namespaced attribute `name`, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.namespace.is_none() && attr.local_name == name)
            .map(|attr| attr.value.as_str())
    }

    /// True if the element has an attribute with this qualified name.
    #[must_use]
    pub fn has_attr(&self, qualified_name: &str) -> bool {
        self.attrs
            .iter()
            .any(|attr| attr.qualified_name() == qualified_name)
    }

    /// Returns the element's id attribute value if present.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The id attribute specifies its element's unique identifier (ID)."
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Returns the set of class names from the class attribute.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The class attribute, if specified, must have a value that is a set of
    /// space-separated tokens representing the various classes that the element belongs to."
    #[must_use]
    pub fn classes(&self) -> HashSet<&str> {
        self.attr("class")
            .map(|list| list.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    /// The element's intrinsic size, when its kind defines one.
    #[must_use]
    pub fn intrinsic_size(&self) -> Option<crate::IntrinsicSize> {
        self.capabilities.intrinsic_size.and_then(|f| f(self))
    }

    /// Presentational hints contributed by legacy attributes.
    #[must_use]
    pub fn presentational_hints(&self) -> Vec<crate::PresentationalHint> {
        self.capabilities
            .presentational_hints
            .map(|f| f(self))
            .unwrap_or_default()
    }
}

/// Everything an element constructor needs to build an element.
#[derive(Debug, Clone)]
pub struct ElementInit {
    /// The element's namespace.
    pub namespace: Namespace,
    /// The element's namespace prefix.
    pub prefix: Option<String>,
    /// The element's local name.
    pub local_name: String,
    /// Attributes in source order.
    pub attributes: Vec<Attribute>,
    /// The `is` attribute value, if any.
    pub is_value: Option<String>,
}

/// The default element constructor: picks the [`ElementKind`] from the
/// name and attaches that kind's standard capability table.
#[must_use]
pub fn create_standard_element(init: ElementInit) -> ElementData {
    let kind = ElementKind::from_name(init.namespace, &init.local_name);
    ElementData {
        namespace: init.namespace,
        prefix: init.prefix,
        local_name: init.local_name,
        attrs: init.attributes,
        kind,
        capabilities: Capabilities::for_kind(kind),
        state: ElementState {
            is_value: init.is_value,
            ..ElementState::default()
        },
        template_contents: None,
    }
}
