//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard as a pull tokenizer.

/// Character reference states per § 13.2.5.72-80.
mod character_reference;
/// HTML tokenizer state machine and its public API.
mod core;
/// Helper methods for state transitions, emission and errors.
mod helpers;
/// Comment, DOCTYPE and CDATA states.
mod markup;
/// Named character reference lookup table per § 13.5.
pub mod named_character_references;
/// Script data states.
mod script;
/// Tag and attribute states.
mod tag;
/// Data, RCDATA, RAWTEXT and PLAINTEXT states.
mod text;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{HTMLTokenizer, TokenizerState, tokenize};
pub use token::{Attribute, Doctype, Tag, Token};
