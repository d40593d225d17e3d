//! HTML tree construction.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! The parser lives in [`core`]; each group of insertion modes has its own
//! file under `modes/`, and the shared algorithms (scope queries, the list
//! of active formatting elements, foreign content) have theirs.

mod core;
mod dump;
mod foreign_content;
mod formatting;
mod fragment;
mod insertion;
mod modes;
mod quirks;
mod scope;

use wicket_dom::{Attribute, DomTree, Namespace, NodeId};

pub use self::core::{ErrorReporter, HTMLParser, InsertionMode};
pub use dump::{dump_children, dump_tree, print_tree};
pub use quirks::{document_mode_for, is_conforming_doctype};

use crate::error::{HtmlError, ParseError, Unsupported};

/// Bookkeeping for the stack of open elements over a whole parse.
///
/// After a parse runs to completion `pushes - pops == final_depth`, and
/// `final_depth` is zero because "the end" pops everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StackStats {
    /// Elements pushed onto the stack.
    pub pushes: usize,
    /// Elements popped or removed from the stack.
    pub pops: usize,
    /// Elements still on the stack when the parser finished.
    pub final_depth: usize,
}

/// Everything a parse produces.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    /// The document. `NodeId::ROOT` is the Document node.
    pub tree: DomTree,
    /// Parse errors in the order they were found.
    pub errors: Vec<ParseError>,
    /// Constructs that were reached but not implemented.
    pub unsupported: Vec<Unsupported>,
    /// Stack push and pop counts.
    pub stack_stats: StackStats,
    /// In the fragment case, the `html` element whose children are the
    /// parsed fragment.
    pub fragment_root: Option<NodeId>,
}

impl ParseOutput {
    /// The nodes that make up the result: the fragment's children when a
    /// fragment was parsed, the Document's children otherwise.
    #[must_use]
    pub fn top_level_nodes(&self) -> &[NodeId] {
        self.tree
            .children(self.fragment_root.unwrap_or(NodeId::ROOT))
    }

    /// The result in the html5lib tree-construction format.
    #[must_use]
    pub fn dump(&self) -> String {
        match self.fragment_root {
            Some(root) => dump_children(&self.tree, root),
            None => dump_tree(&self.tree),
        }
    }
}

/// [§ 13.4](https://html.spec.whatwg.org/multipage/parsing.html#concept-frag-parse-context)
///
/// The context element for fragment parsing, as used by `innerHTML`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentContext {
    /// The context element's namespace.
    pub namespace: Namespace,
    /// The context element's local name.
    pub local_name: String,
    /// The context element's attributes; `annotation-xml` looks at `encoding`.
    pub attributes: Vec<Attribute>,
}

/// Parse a complete document with the default options.
///
/// Malformed markup is repaired, never rejected; the repairs are listed in
/// [`ParseOutput::errors`].
#[must_use]
pub fn parse_document(input: &str) -> ParseOutput {
    let mut parser = HTMLParser::new(input);
    // The default options never fail and no cancel flag is set.
    let _ = parser.run();
    parser.finish()
}

/// [§ 13.4 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
///
/// ```
/// use wicket_html::{FragmentContext, parse_fragment};
///
/// let output = parse_fragment("<td>cell", FragmentContext::html("tr")).unwrap();
/// assert_eq!(output.dump(), "| <td>\n|   \"cell\"\n");
/// ```
///
/// # Errors
///
/// Only with non-default options; see [`HTMLParser::parse`].
pub fn parse_fragment(input: &str, context: FragmentContext) -> Result<ParseOutput, HtmlError> {
    HTMLParser::new(input)
        .with_fragment_context(context)
        .parse()
}
