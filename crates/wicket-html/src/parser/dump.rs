//! Tree printing: the html5lib tree-construction test format, and an
//! indented debug view.

use std::fmt;

use wicket_dom::{DomTree, ElementData, Namespace, NodeId, NodeType};

/// The html5lib `#document` format for the children of `parent`, one node
/// per line, each line starting with `| `.
struct TreeDump<'a> {
    tree: &'a DomTree,
    parent: NodeId,
}

impl TreeDump<'_> {
    fn write_children(&self, f: &mut fmt::Formatter<'_>, parent: NodeId, depth: usize) -> fmt::Result {
        for &child in self.tree.children(parent) {
            self.write_node(f, child, depth)?;
        }
        Ok(())
    }

    fn write_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let Some(node) = self.tree.get(id) else {
            return Ok(());
        };
        let indent = "  ".repeat(depth);
        match &node.node_type {
            NodeType::Document { .. } | NodeType::DocumentFragment => {
                self.write_children(f, id, depth)?;
            }
            NodeType::DocumentType {
                name,
                public_id,
                system_id,
            } => {
                if public_id.is_empty() && system_id.is_empty() {
                    writeln!(f, "| {indent}<!DOCTYPE {name}>")?;
                } else {
                    writeln!(
                        f,
                        "| {indent}<!DOCTYPE {name} \"{public_id}\" \"{system_id}\">"
                    )?;
                }
            }
            NodeType::Element(element) => {
                writeln!(f, "| {indent}<{}>", display_name(element))?;
                let mut attributes: Vec<(String, &str)> = element
                    .attrs
                    .iter()
                    .map(|attr| {
                        let name = match (&attr.prefix, attr.namespace) {
                            (Some(prefix), Some(_)) => format!("{prefix} {}", attr.local_name),
                            _ => attr.local_name.clone(),
                        };
                        (name, attr.value.as_str())
                    })
                    .collect();
                attributes.sort();
                for (name, value) in attributes {
                    writeln!(f, "| {indent}  {name}=\"{value}\"")?;
                }
                if let Some(contents) = element.template_contents {
                    writeln!(f, "| {indent}  content")?;
                    self.write_children(f, contents, depth + 2)?;
                }
                self.write_children(f, id, depth + 1)?;
            }
            NodeType::Text(data) => writeln!(f, "| {indent}\"{data}\"")?,
            NodeType::Comment(data) => writeln!(f, "| {indent}<!-- {data} -->")?,
        }
        Ok(())
    }
}

impl fmt::Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_children(f, self.parent, 0)
    }
}

/// `svg foo` and `math bar` for foreign elements, the bare name for HTML.
fn display_name(element: &ElementData) -> String {
    match element.namespace {
        Namespace::Svg => format!("svg {}", element.local_name),
        Namespace::MathMl => format!("math {}", element.local_name),
        _ => element.local_name.clone(),
    }
}

/// Dump the whole document in the html5lib tree-construction format.
///
/// ```
/// let output = wicket_html::parse_document("<!DOCTYPE html><p>Hi");
/// assert_eq!(
///     wicket_html::dump_tree(&output.tree),
///     "| <!DOCTYPE html>\n| <html>\n|   <head>\n|   <body>\n|     <p>\n|       \"Hi\"\n"
/// );
/// ```
#[must_use]
pub fn dump_tree(tree: &DomTree) -> String {
    dump_children(tree, NodeId::ROOT)
}

/// Dump the children of `parent`, for example the root of a parsed
/// fragment.
#[must_use]
pub fn dump_children(tree: &DomTree, parent: NodeId) -> String {
    TreeDump { tree, parent }.to_string()
}

/// Print an indented view of the subtree at `id` to stdout, with
/// whitespace made visible.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.node_type {
        NodeType::Document { mode } => println!("{prefix}Document ({mode})"),
        NodeType::DocumentType { name, .. } => println!("{prefix}<!DOCTYPE {name}>"),
        NodeType::DocumentFragment => println!("{prefix}#document-fragment"),
        NodeType::Element(element) => {
            if element.attrs.is_empty() {
                println!("{prefix}<{}>", display_name(element));
            } else {
                let attrs: Vec<String> = element
                    .attrs
                    .iter()
                    .map(|attr| {
                        if attr.value.is_empty() {
                            attr.qualified_name()
                        } else {
                            format!("{}=\"{}\"", attr.qualified_name(), attr.value)
                        }
                    })
                    .collect();
                println!("{prefix}<{} {}>", display_name(element), attrs.join(" "));
            }
            if let Some(contents) = element.template_contents {
                print_tree(tree, contents, indent + 1);
            }
        }
        NodeType::Text(data) => {
            let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
            println!("{prefix}\"{display}\"");
        }
        NodeType::Comment(data) => println!("{prefix}<!-- {data} -->"),
    }
    for &child in tree.children(id) {
        print_tree(tree, child, indent + 1);
    }
}
