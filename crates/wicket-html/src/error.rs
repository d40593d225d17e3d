//! Parse errors, unsupported constructs, and the parser's error type.
//!
//! [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//!
//! Parse errors are recoverable diagnostics and never stop the parser.
//! Constructs this parser does not implement are reported separately as
//! [`Unsupported`], so callers can tell "malformed input" apart from
//! "hit a known gap".

use std::fmt;

use strum_macros::{Display, IntoStaticStr};
use thiserror::Error;

/// A position in the input, counted in code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// Code points consumed before this position.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Named parse error conditions.
///
/// Tokenizer codes are the names from [§ 13.2.2](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors);
/// `Display` prints the kebab-case name. Tree construction errors have no
/// standard names, so the last group is ours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ParseErrorCode {
    // Tokenizer errors
    /// "abrupt-closing-of-empty-comment"
    AbruptClosingOfEmptyComment,
    /// "abrupt-doctype-public-identifier"
    AbruptDoctypePublicIdentifier,
    /// "abrupt-doctype-system-identifier"
    AbruptDoctypeSystemIdentifier,
    /// "absence-of-digits-in-numeric-character-reference"
    AbsenceOfDigitsInNumericCharacterReference,
    /// "cdata-in-html-content"
    CdataInHtmlContent,
    /// "character-reference-outside-unicode-range"
    CharacterReferenceOutsideUnicodeRange,
    /// "control-character-in-input-stream"
    ControlCharacterInInputStream,
    /// "control-character-reference"
    ControlCharacterReference,
    /// "duplicate-attribute"
    DuplicateAttribute,
    /// "end-tag-with-attributes"
    EndTagWithAttributes,
    /// "end-tag-with-trailing-solidus"
    EndTagWithTrailingSolidus,
    /// "eof-before-tag-name"
    EofBeforeTagName,
    /// "eof-in-cdata"
    EofInCdata,
    /// "eof-in-comment"
    EofInComment,
    /// "eof-in-doctype"
    EofInDoctype,
    /// "eof-in-script-html-comment-like-text"
    EofInScriptHtmlCommentLikeText,
    /// "eof-in-tag"
    EofInTag,
    /// "incorrectly-closed-comment"
    IncorrectlyClosedComment,
    /// "incorrectly-opened-comment"
    IncorrectlyOpenedComment,
    /// "invalid-character-sequence-after-doctype-name"
    InvalidCharacterSequenceAfterDoctypeName,
    /// "invalid-first-character-of-tag-name"
    InvalidFirstCharacterOfTagName,
    /// "missing-attribute-value"
    MissingAttributeValue,
    /// "missing-doctype-name"
    MissingDoctypeName,
    /// "missing-doctype-public-identifier"
    MissingDoctypePublicIdentifier,
    /// "missing-doctype-system-identifier"
    MissingDoctypeSystemIdentifier,
    /// "missing-end-tag-name"
    MissingEndTagName,
    /// "missing-quote-before-doctype-public-identifier"
    MissingQuoteBeforeDoctypePublicIdentifier,
    /// "missing-quote-before-doctype-system-identifier"
    MissingQuoteBeforeDoctypeSystemIdentifier,
    /// "missing-semicolon-after-character-reference"
    MissingSemicolonAfterCharacterReference,
    /// "missing-whitespace-after-doctype-public-keyword"
    MissingWhitespaceAfterDoctypePublicKeyword,
    /// "missing-whitespace-after-doctype-system-keyword"
    MissingWhitespaceAfterDoctypeSystemKeyword,
    /// "missing-whitespace-before-doctype-name"
    MissingWhitespaceBeforeDoctypeName,
    /// "missing-whitespace-between-attributes"
    MissingWhitespaceBetweenAttributes,
    /// "missing-whitespace-between-doctype-public-and-system-identifiers"
    MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
    /// "nested-comment"
    NestedComment,
    /// "noncharacter-character-reference"
    NoncharacterCharacterReference,
    /// "noncharacter-in-input-stream"
    NoncharacterInInputStream,
    /// "non-void-html-element-start-tag-with-trailing-solidus"
    NonVoidHtmlElementStartTagWithTrailingSolidus,
    /// "null-character-reference"
    NullCharacterReference,
    /// "surrogate-character-reference"
    SurrogateCharacterReference,
    /// "unexpected-character-after-doctype-system-identifier"
    UnexpectedCharacterAfterDoctypeSystemIdentifier,
    /// "unexpected-character-in-attribute-name"
    UnexpectedCharacterInAttributeName,
    /// "unexpected-character-in-unquoted-attribute-value"
    UnexpectedCharacterInUnquotedAttributeValue,
    /// "unexpected-equals-sign-before-attribute-name"
    UnexpectedEqualsSignBeforeAttributeName,
    /// "unexpected-null-character"
    UnexpectedNullCharacter,
    /// "unexpected-question-mark-instead-of-tag-name"
    UnexpectedQuestionMarkInsteadOfTagName,
    /// "unexpected-solidus-in-tag"
    UnexpectedSolidusInTag,
    /// "unknown-named-character-reference"
    UnknownNamedCharacterReference,

    // Tree construction errors
    /// A DOCTYPE token anywhere but the start of the document.
    UnexpectedDoctype,
    /// The document did not start with a DOCTYPE.
    MissingDoctype,
    /// A DOCTYPE other than `<!DOCTYPE html>` and the legacy-compat forms.
    NonConformingDoctype,
    /// A start tag the current insertion mode does not allow.
    UnexpectedStartTag,
    /// An end tag with no matching open element, or not allowed here.
    UnexpectedEndTag,
    /// Non-whitespace text where only whitespace is allowed.
    UnexpectedCharacter,
    /// Non-whitespace text directly inside a table, which gets foster parented.
    UnexpectedCharacterInTable,
    /// End of input while elements other than the implied ones were open.
    UnexpectedEof,
    /// The adoption agency algorithm had to repair mis-nested formatting.
    MisnestedFormattingElement,
    /// An end tag closed elements that were still open inside it.
    UnclosedElement,
    /// A `<form>` start tag while another form is open.
    NestedForm,
    /// Content was moved in front of a table by foster parenting.
    FosterParentedContent,
    /// A token that breaks out of or is misplaced in SVG/MathML content.
    UnexpectedTokenInForeignContent,
}

/// A recoverable parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code} at {location}{}", .detail.as_ref().map_or_else(String::new, |d| format!(" ({d})")))]
pub struct ParseError {
    /// Which condition was hit.
    pub code: ParseErrorCode,
    /// Where in the input.
    pub location: Location,
    /// Extra context, such as the offending tag name.
    pub detail: Option<String>,
}

/// Constructs the parsing core recognizes but does not implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum UnsupportedReason {
    /// A script element finished parsing while scripting is enabled.
    ScriptExecution,
    /// An element has a custom element definition whose constructor would run.
    CustomElementConstruction,
    /// A `<template shadowrootmode>` declarative shadow root.
    DeclarativeShadowRoot,
    /// A `<meta charset>` asked for a different encoding.
    EncodingChange,
}

/// An unimplemented construct was reached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported construct: {reason} at {location}")]
pub struct Unsupported {
    /// What was not supported.
    pub reason: UnsupportedReason,
    /// Where it happened.
    pub location: Location,
}

/// Errors returned by the parser.
///
/// Malformed input never produces one of these; see [`ParseError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HtmlError {
    /// An unsupported construct under [`crate::UnsupportedPolicy::Fail`].
    #[error(transparent)]
    Unsupported(#[from] Unsupported),
    /// The continue flag was cleared.
    #[error("parsing cancelled after {tokens} tokens")]
    Cancelled {
        /// Tokens processed before stopping.
        tokens: usize,
    },
}
