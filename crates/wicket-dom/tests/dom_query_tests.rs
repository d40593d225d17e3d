//! Tests for tree queries, document mode, element kinds and capabilities.

use wicket_dom::{
    Attribute, DocumentMode, DomTree, ElementData, ElementFactory, ElementInit, ElementKind,
    ElementRegistry, IntrinsicSize, Namespace, NodeId, NodeType, create_standard_element,
};

fn element_with_attrs(tree: &mut DomTree, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let init = ElementInit {
        namespace: Namespace::Html,
        prefix: None,
        local_name: tag.to_string(),
        attributes: attrs.iter().map(|(k, v)| Attribute::new(*k, *v)).collect(),
        is_value: None,
    };
    tree.alloc(NodeType::Element(create_standard_element(init)))
}

#[test]
fn test_document_mode_defaults_and_updates() {
    let mut tree = DomTree::new();
    assert_eq!(tree.mode(), DocumentMode::NoQuirks);
    tree.set_mode(DocumentMode::LimitedQuirks);
    assert_eq!(tree.mode(), DocumentMode::LimitedQuirks);
    assert_eq!(DocumentMode::Quirks.to_string(), "quirks");
}

#[test]
fn test_is_element_checks_namespace() {
    let mut tree = DomTree::new();
    let html_title = tree.alloc(NodeType::Element(ElementData::new(Namespace::Html, "title")));
    let svg_title = tree.alloc(NodeType::Element(ElementData::new(Namespace::Svg, "title")));

    assert!(tree.is_element(html_title, Namespace::Html, "title"));
    assert!(!tree.is_element(svg_title, Namespace::Html, "title"));
    assert!(tree.is_element(svg_title, Namespace::Svg, "title"));
}

#[test]
fn test_head_body_and_doctype() {
    let mut tree = DomTree::new();
    let doctype = tree.alloc(NodeType::DocumentType {
        name: "html".to_string(),
        public_id: String::new(),
        system_id: String::new(),
    });
    tree.append_child(NodeId::ROOT, doctype);
    let html = element_with_attrs(&mut tree, "html", &[]);
    tree.append_child(NodeId::ROOT, html);
    let head = element_with_attrs(&mut tree, "head", &[]);
    let body = element_with_attrs(&mut tree, "body", &[]);
    tree.append_child(html, head);
    tree.append_child(html, body);

    assert_eq!(tree.doctype(), Some(doctype));
    assert_eq!(tree.document_element(), Some(html));
    assert_eq!(tree.head(), Some(head));
    assert_eq!(tree.body(), Some(body));
}

#[test]
fn test_text_content_concatenates_descendants() {
    let mut tree = DomTree::new();
    let div = element_with_attrs(&mut tree, "div", &[]);
    let span = element_with_attrs(&mut tree, "span", &[]);
    let one = tree.alloc(NodeType::Text("one ".to_string()));
    let two = tree.alloc(NodeType::Text("two".to_string()));
    let comment = tree.alloc(NodeType::Comment("skip".to_string()));
    tree.append_child(div, one);
    tree.append_child(div, comment);
    tree.append_child(div, span);
    tree.append_child(span, two);

    assert_eq!(tree.text_content(div), "one two");
}

#[test]
fn test_template_contents_owner_is_separate_document() {
    let mut tree = DomTree::new();
    let owner = tree.template_contents_owner();
    assert_ne!(owner, NodeId::ROOT);
    assert_eq!(tree.template_contents_owner(), owner);

    let fragment = tree.alloc_in(owner, NodeType::DocumentFragment);
    assert_eq!(tree.node_document(fragment), owner);
    assert_eq!(tree.parent(owner), None);
}

#[test]
fn test_element_kinds() {
    assert_eq!(ElementKind::from_name(Namespace::Html, "style"), ElementKind::Style);
    assert_eq!(ElementKind::from_name(Namespace::Svg, "style"), ElementKind::Style);
    assert_eq!(ElementKind::from_name(Namespace::Svg, "rect"), ElementKind::Svg);
    assert_eq!(ElementKind::from_name(Namespace::Html, "x-foo"), ElementKind::Custom);
    assert_eq!(ElementKind::from_name(Namespace::Html, "div"), ElementKind::Generic);
}

#[test]
fn test_style_capability_captures_text() {
    let mut tree = DomTree::new();
    let style = element_with_attrs(&mut tree, "style", &[]);
    let text = tree.alloc(NodeType::Text("p { color: red }".to_string()));
    tree.append_child(style, text);

    let callback = tree
        .as_element(style)
        .and_then(|e| e.capabilities.on_popped_from_stack)
        .expect("style elements have a popped callback");
    callback(&mut tree, style);

    let state = &tree.as_element(style).unwrap().state;
    assert_eq!(state.stylesheet_text.as_deref(), Some("p { color: red }"));
}

#[test]
fn test_link_capability_queues_only_stylesheets() {
    let mut tree = DomTree::new();
    let sheet = element_with_attrs(&mut tree, "link", &[("rel", "Stylesheet"), ("href", "a.css")]);
    let icon = element_with_attrs(&mut tree, "link", &[("rel", "icon"), ("href", "a.ico")]);

    for id in [sheet, icon] {
        let callback = tree
            .as_element(id)
            .and_then(|e| e.capabilities.on_popped_from_stack)
            .unwrap();
        callback(&mut tree, id);
    }

    assert_eq!(
        tree.as_element(sheet).unwrap().state.pending_fetch.as_deref(),
        Some("a.css")
    );
    assert_eq!(tree.as_element(icon).unwrap().state.pending_fetch, None);
}

#[test]
fn test_intrinsic_size_and_hints() {
    let mut tree = DomTree::new();
    let img = element_with_attrs(&mut tree, "img", &[("width", "40"), ("height", "30px")]);
    let canvas = element_with_attrs(&mut tree, "canvas", &[]);
    let div = element_with_attrs(&mut tree, "div", &[("width", "10")]);

    let img = tree.as_element(img).unwrap();
    assert_eq!(
        img.intrinsic_size(),
        Some(IntrinsicSize {
            width: Some(40.0),
            height: Some(30.0)
        })
    );
    assert_eq!(img.presentational_hints().len(), 2);

    let canvas = tree.as_element(canvas).unwrap();
    assert_eq!(canvas.intrinsic_size().and_then(|s| s.width), Some(300.0));

    let div = tree.as_element(div).unwrap();
    assert_eq!(div.intrinsic_size(), None);
    assert!(div.presentational_hints().is_empty());
}

#[test]
fn test_registry_override_is_used() {
    fn shout(init: ElementInit) -> ElementData {
        let mut data = create_standard_element(init);
        data.local_name = data.local_name.to_ascii_uppercase();
        data
    }

    let mut registry = ElementRegistry::new();
    registry.register(Namespace::Html, "blink", shout);

    let constructor = registry.constructor_for(Namespace::Html, "blink");
    let data = constructor(ElementInit {
        namespace: Namespace::Html,
        prefix: None,
        local_name: "blink".to_string(),
        attributes: Vec::new(),
        is_value: None,
    });
    assert_eq!(data.local_name, "BLINK");

    let plain = registry.constructor_for(Namespace::Svg, "blink")(ElementInit {
        namespace: Namespace::Svg,
        prefix: None,
        local_name: "blink".to_string(),
        attributes: Vec::new(),
        is_value: None,
    });
    assert_eq!(plain.local_name, "blink");
}

#[test]
fn test_preceding_siblings_walk_backwards() {
    let mut tree = DomTree::new();
    let list = element_with_attrs(&mut tree, "ul", &[]);
    tree.append_child(NodeId::ROOT, list);
    let items: Vec<NodeId> = (0..3)
        .map(|_| {
            let li = element_with_attrs(&mut tree, "li", &[]);
            tree.append_child(list, li);
            li
        })
        .collect();

    let before_last: Vec<NodeId> = tree.preceding_siblings(items[2]).collect();
    assert_eq!(before_last, vec![items[1], items[0]]);
    assert_eq!(tree.preceding_siblings(items[0]).count(), 0);
}

#[test]
fn test_is_descendant_of() {
    let mut tree = DomTree::new();
    let div = element_with_attrs(&mut tree, "div", &[]);
    let span = element_with_attrs(&mut tree, "span", &[]);
    let text = tree.alloc(NodeType::Text("x".to_string()));
    tree.append_child(NodeId::ROOT, div);
    tree.append_child(div, span);
    tree.append_child(span, text);

    assert!(tree.is_descendant_of(text, div));
    assert!(tree.is_descendant_of(text, NodeId::ROOT));
    assert!(!tree.is_descendant_of(div, span));
    // A node is not its own descendant.
    assert!(!tree.is_descendant_of(div, div));

    tree.detach(span);
    assert!(!tree.is_descendant_of(text, div));
    assert!(tree.is_descendant_of(text, span));
}

#[test]
fn test_classes_split_on_ascii_whitespace() {
    let mut tree = DomTree::new();
    let div = element_with_attrs(&mut tree, "div", &[("class", " note\twide  note\n")]);
    let bare = element_with_attrs(&mut tree, "div", &[]);

    let classes = tree.as_element(div).map(ElementData::classes).unwrap_or_default();
    assert_eq!(classes.len(), 2);
    assert!(classes.contains("note"));
    assert!(classes.contains("wide"));
    assert!(tree.as_element(bare).is_some_and(|e| e.classes().is_empty()));
}
