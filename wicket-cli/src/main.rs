//! Wicket CLI
//!
//! Parse an HTML file or string and print the resulting tree, as the
//! html5lib test format or as JSON, along with the parser's diagnostics.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use serde::Serialize;
use wicket_dom::{DomTree, Namespace, NodeId, NodeType};
use wicket_html::{FragmentContext, HTMLParser, ParseOutput, ParserOptions};

/// Wicket: a WHATWG HTML5 parser
#[derive(Parser, Debug)]
#[command(name = "wicket")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Dump a file's DOM in the html5lib format
    wicket ./index.html

    # Parse an inline string and list its parse errors
    wicket --errors --html '<b><p>x</b>'

    # Parse a fragment as if assigned to a <tr>'s innerHTML
    wicket --fragment tr --html '<td>1<td>2'

    # Foreign context elements take a namespace prefix
    wicket --fragment 'svg svg' --html '<circle/>'
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE", required_unless_present = "html")]
    path: Option<PathBuf>,

    /// Parse this HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Print the tree as JSON
    #[arg(long)]
    json: bool,

    /// Parse with the scripting flag enabled
    #[arg(long)]
    scripting: bool,

    /// Fail on the first unsupported construct
    #[arg(long)]
    strict: bool,

    /// List parse errors after the tree
    #[arg(short, long)]
    errors: bool,

    /// Parse as a fragment in this context element, e.g. `td` or `svg path`
    #[arg(long, value_name = "CONTEXT")]
    fragment: Option<String>,
}

/// A node in the `--json` output.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
enum JsonNode {
    Document {
        mode: String,
        children: Vec<JsonNode>,
    },
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
    Fragment {
        children: Vec<JsonNode>,
    },
    Element {
        namespace: &'static str,
        tag_name: String,
        attributes: Vec<JsonAttribute>,
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<Box<JsonNode>>,
        children: Vec<JsonNode>,
    },
    Text {
        content: String,
    },
    Comment {
        content: String,
    },
}

#[derive(Serialize)]
struct JsonAttribute {
    name: String,
    value: String,
}

/// The JSON report: the tree plus the diagnostics.
#[derive(Serialize)]
struct JsonReport {
    tree: JsonNode,
    errors: Vec<String>,
    unsupported: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let input = match (&cli.html, &cli.path) {
        (Some(html), _) => html.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => bail!("a file path or --html is required"),
    };

    let mut options = ParserOptions::new().with_scripting(cli.scripting);
    if cli.strict {
        options = options.strict();
    }

    let mut parser = HTMLParser::new(&input).with_options(options);
    if let Some(context) = &cli.fragment {
        parser = parser.with_fragment_context(fragment_context(context)?);
    }
    let output = parser.parse().context("parsing stopped")?;

    if cli.json {
        let report = JsonReport {
            tree: match output.fragment_root {
                Some(root) => JsonNode::Fragment {
                    children: output
                        .tree
                        .children(root)
                        .iter()
                        .map(|&child| to_json(&output.tree, child))
                        .collect(),
                },
                None => to_json(&output.tree, NodeId::ROOT),
            },
            errors: output.errors.iter().map(ToString::to_string).collect(),
            unsupported: output.unsupported.iter().map(ToString::to_string).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&output, cli.errors);
    Ok(())
}

/// `td` is an HTML context; `svg path` and `math mi` are foreign ones.
fn fragment_context(context: &str) -> Result<FragmentContext> {
    let context = context.trim();
    let (namespace, local_name) = match context.split_once(' ') {
        Some(("svg", name)) => (Namespace::Svg, name),
        Some(("math", name)) => (Namespace::MathMl, name),
        Some((prefix, _)) => bail!("unknown namespace prefix {prefix:?}; use svg or math"),
        None => (Namespace::Html, context),
    };
    if local_name.is_empty() {
        bail!("the fragment context needs an element name");
    }
    Ok(FragmentContext::new(namespace, local_name))
}

fn print_report(output: &ParseOutput, show_errors: bool) {
    if output.fragment_root.is_none() {
        println!("{} {}", "Document mode:".bold(), output.tree.mode());
    }
    print!("{}", output.dump());

    for unsupported in &output.unsupported {
        eprintln!("{} {unsupported}", "unsupported:".yellow().bold());
    }

    if show_errors {
        println!();
        println!("{} {}", "Parse errors:".bold(), output.errors.len());
        for error in &output.errors {
            let detail = error
                .detail
                .as_deref()
                .map_or_else(String::new, |d| format!(" {d}"));
            println!(
                "  {} {}{}",
                error.location.dimmed(),
                error.code.red(),
                detail
            );
        }
    }
}

fn to_json(tree: &DomTree, id: NodeId) -> JsonNode {
    let children = || {
        tree.children(id)
            .iter()
            .map(|&child| to_json(tree, child))
            .collect()
    };
    let Some(node) = tree.get(id) else {
        return JsonNode::Fragment {
            children: Vec::new(),
        };
    };
    match &node.node_type {
        NodeType::Document { mode } => JsonNode::Document {
            mode: mode.to_string(),
            children: children(),
        },
        NodeType::DocumentType {
            name,
            public_id,
            system_id,
        } => JsonNode::Doctype {
            name: name.clone(),
            public_id: public_id.clone(),
            system_id: system_id.clone(),
        },
        NodeType::DocumentFragment => JsonNode::Fragment {
            children: children(),
        },
        NodeType::Element(element) => JsonNode::Element {
            namespace: element.namespace.url(),
            tag_name: element.local_name.clone(),
            attributes: element
                .attrs
                .iter()
                .map(|attr| JsonAttribute {
                    name: attr.qualified_name(),
                    value: attr.value.clone(),
                })
                .collect(),
            content: element
                .template_contents
                .map(|contents| Box::new(to_json(tree, contents))),
            children: children(),
        },
        NodeType::Text(data) => JsonNode::Text {
            content: data.clone(),
        },
        NodeType::Comment(data) => JsonNode::Comment {
            content: data.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_for(html: &str) -> serde_json::Value {
        let output = HTMLParser::new(html).parse().expect("parse failed");
        serde_json::to_value(to_json(&output.tree, NodeId::ROOT)).expect("serialize failed")
    }

    #[test]
    fn test_json_fields_are_camel_case() {
        let json = json_for(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN"><p>x"#);
        assert_eq!(json["type"], "document");
        assert_eq!(json["mode"], "no-quirks");

        let doctype = &json["children"][0];
        assert_eq!(doctype["type"], "doctype");
        assert_eq!(doctype["publicId"], "-//W3C//DTD HTML 4.01//EN");
        assert_eq!(doctype["systemId"], "");
        assert!(doctype.get("public_id").is_none());

        let html = &json["children"][1];
        assert_eq!(html["tagName"], "html");
        assert_eq!(html["namespace"], "http://www.w3.org/1999/xhtml");
    }

    #[test]
    fn test_fragment_context_prefixes() {
        let svg = fragment_context("svg path").expect("svg context");
        assert_eq!(svg.namespace, Namespace::Svg);
        assert_eq!(svg.local_name, "path");
        assert_eq!(
            fragment_context("td").map(|c| c.namespace).ok(),
            Some(Namespace::Html)
        );
        assert!(fragment_context("xul box").is_err());
    }
}
