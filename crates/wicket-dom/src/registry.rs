//! Element factory hook and the element registry.
//!
//! The parser asks an [`ElementFactory`] for a constructor once per element
//! it creates. [`ElementRegistry`] is the stock factory: it falls back to
//! [`create_standard_element`] and lets embedders override constructors or
//! define custom elements. The registry is passed to the parser explicitly;
//! there is no global default instance.

use std::collections::HashMap;

use crate::Namespace;
use crate::element::{ElementData, ElementInit, create_standard_element};

/// Builds an [`ElementData`] for a freshly created element.
pub type ElementConstructor = fn(ElementInit) -> ElementData;

/// [§ 4.13.4 Custom element definitions](https://html.spec.whatwg.org/multipage/custom-elements.html#custom-element-definition)
#[derive(Debug, Clone)]
pub struct CustomElementDefinition {
    /// "name": a valid custom element name.
    pub name: String,
    /// "local name": equal to `name` for autonomous custom elements, or the
    /// extended element's local name for customized built-ins.
    pub local_name: String,
}

/// Source of element constructors, consulted once per element creation.
pub trait ElementFactory {
    /// Return the constructor for `(namespace, local_name)`.
    fn constructor_for(&self, namespace: Namespace, local_name: &str) -> ElementConstructor;

    /// [§ 4.13.4 Look up a custom element definition](https://html.spec.whatwg.org/multipage/custom-elements.html#look-up-a-custom-element-definition)
    ///
    /// The default has no definitions.
    fn custom_element_definition(
        &self,
        _namespace: Namespace,
        _local_name: &str,
        _is: Option<&str>,
    ) -> Option<&CustomElementDefinition> {
        None
    }
}

/// The stock element factory.
///
/// `ElementRegistry::default()` has no overrides and no custom element
/// definitions, so every element gets the standard constructor.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    constructors: HashMap<(Namespace, String), ElementConstructor>,
    definitions: HashMap<String, CustomElementDefinition>,
}

impl ElementRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the constructor used for `(namespace, local_name)`.
    pub fn register(
        &mut self,
        namespace: Namespace,
        local_name: &str,
        constructor: ElementConstructor,
    ) {
        let _ = self
            .constructors
            .insert((namespace, local_name.to_string()), constructor);
    }

    /// [§ 4.13.4 Element definition](https://html.spec.whatwg.org/multipage/custom-elements.html#element-definition)
    ///
    /// Returns false (and defines nothing) when `name` is not a valid custom
    /// element name or is already defined.
    pub fn define(&mut self, name: &str, extends: Option<&str>) -> bool {
        if !is_valid_custom_element_name(name) || self.definitions.contains_key(name) {
            return false;
        }
        let definition = CustomElementDefinition {
            name: name.to_string(),
            local_name: extends.unwrap_or(name).to_string(),
        };
        let _ = self.definitions.insert(name.to_string(), definition);
        true
    }
}

impl ElementFactory for ElementRegistry {
    fn constructor_for(&self, namespace: Namespace, local_name: &str) -> ElementConstructor {
        self.constructors
            .get(&(namespace, local_name.to_string()))
            .copied()
            .unwrap_or(create_standard_element)
    }

    fn custom_element_definition(
        &self,
        namespace: Namespace,
        local_name: &str,
        is: Option<&str>,
    ) -> Option<&CustomElementDefinition> {
        // STEP 1: "If namespace is not the HTML namespace, then return null."
        if namespace != Namespace::Html {
            return None;
        }
        // STEP 3: "If registry's custom element definition set contains an
        //          item with name and local name both equal to localName,
        //          then return that item."
        if let Some(definition) = self.definitions.get(local_name)
            && definition.local_name == local_name
        {
            return Some(definition);
        }
        // STEP 4: "If registry's custom element definition set contains an
        //          item with name equal to is and local name equal to
        //          localName, then return that item."
        is.and_then(|is| self.definitions.get(is))
            .filter(|definition| definition.local_name == local_name)
    }
}

/// [§ 4.13.2 Valid custom element name](https://html.spec.whatwg.org/multipage/custom-elements.html#valid-custom-element-name)
///
/// Simplified to ASCII: starts with a lowercase letter, contains a hyphen,
/// has no uppercase letters, and is not one of the reserved names.
#[must_use]
pub fn is_valid_custom_element_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "annotation-xml",
        "color-profile",
        "font-face",
        "font-face-src",
        "font-face-uri",
        "font-face-format",
        "font-face-name",
        "missing-glyph",
    ];
    name.starts_with(|c: char| c.is_ascii_lowercase())
        && name.contains('-')
        && !name.chars().any(|c| c.is_ascii_uppercase())
        && !RESERVED.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_custom_element_names() {
        assert!(is_valid_custom_element_name("my-widget"));
        assert!(!is_valid_custom_element_name("widget"));
        assert!(!is_valid_custom_element_name("My-widget"));
        assert!(!is_valid_custom_element_name("font-face"));
    }

    #[test]
    fn test_definition_lookup() {
        let mut registry = ElementRegistry::new();
        assert!(registry.define("fancy-button", Some("button")));
        assert!(!registry.define("fancy-button", None));
        assert!(
            registry
                .custom_element_definition(Namespace::Html, "button", Some("fancy-button"))
                .is_some()
        );
        assert!(
            registry
                .custom_element_definition(Namespace::Html, "fancy-button", None)
                .is_none()
        );
        assert!(
            registry
                .custom_element_definition(Namespace::Svg, "button", Some("fancy-button"))
                .is_none()
        );
    }
}
