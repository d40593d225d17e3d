//! HTML tokenizer and tree-construction parser for wicket.
//!
//! # Scope
//!
//! This crate implements the parsing core of the WHATWG HTML standard:
//!
//! - **HTML Tokenizer** ([§ 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Every tokenizer state, including script data and CDATA sections
//!   - Named and numeric character references
//!   - A pull interface, so the tree builder can switch states between tokens
//!
//! - **Tree Construction** ([§ 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - All 23 insertion modes
//!   - The adoption agency algorithm and foster parenting
//!   - SVG and MathML foreign content
//!   - Templates and fragment parsing ([§ 13.4](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments))
//!
//! Parse errors are recovered from and collected. Constructs the core does
//! not carry out, such as running scripts or attaching declarative shadow
//! roots, are reported as [`Unsupported`] instead.
//!
//! ```
//! let output = wicket_html::parse_document("<table><tr><td>1</table>");
//! assert!(output.errors.iter().any(|e| e.code == wicket_html::ParseErrorCode::MissingDoctype));
//! ```

/// Parse errors, unsupported constructs and the error type.
pub mod error;
/// Parser configuration.
pub mod options;
/// HTML parser and tree construction.
pub mod parser;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use error::{HtmlError, Location, ParseError, ParseErrorCode, Unsupported, UnsupportedReason};
pub use options::{ParserOptions, UnsupportedPolicy};
pub use parser::{
    ErrorReporter, FragmentContext, HTMLParser, InsertionMode, ParseOutput, StackStats,
    dump_children, dump_tree, parse_document, parse_fragment, print_tree,
};
pub use tokenizer::{Attribute, Doctype, HTMLTokenizer, Tag, Token, TokenizerState, tokenize};
