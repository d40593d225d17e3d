//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input/character handling ("Consume the next input character")
//! - Token emission ("Emit the current token")
//! - Appropriate end tag detection for RCDATA, RAWTEXT and script data
//! - Parse error recording

use super::core::{HTMLTokenizer, TokenizerState};
use super::token::Token;
use crate::error::{ParseError, ParseErrorCode};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    ///
    /// The next character will be consumed on the next step.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }

    /// Leave a character reference state for the saved return state.
    pub(super) fn switch_to_return_state(&mut self, reconsume: bool) {
        let state = self.return_state.take().unwrap_or(TokenizerState::Data);
        if reconsume {
            self.reconsume_in(state);
        } else {
            self.switch_to(state);
        }
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Consume the next input character"
    ///
    /// Returns None at the end of input. Controls and noncharacters are
    /// reported here, once per input position.
    ///
    /// [§ 13.2.3.5](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input.get(self.pos).copied()?;
        self.pos += 1;
        if is_noncharacter(c) {
            self.error(ParseErrorCode::NoncharacterInInputStream);
        } else if is_reportable_control(c) {
            self.error(ParseErrorCode::ControlCharacterInInputStream);
        }
        Some(c)
    }

    /// Peek at the character `offset` positions after the next one.
    #[must_use]
    pub(super) fn peek(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    /// "If the next few characters are..."
    #[must_use]
    pub(super) fn next_few_characters_are(&self, target: &str) -> bool {
        target
            .chars()
            .enumerate()
            .all(|(i, expected)| self.peek(i) == Some(expected))
    }

    /// "ASCII case-insensitive match for the word 'DOCTYPE'"
    #[must_use]
    pub(super) fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        target
            .chars()
            .enumerate()
            .all(|(i, expected)| self.peek(i).is_some_and(|c| c.eq_ignore_ascii_case(&expected)))
    }

    /// Consume `count` characters the caller has already matched.
    pub(super) const fn consume_count(&mut self, count: usize) {
        self.pos += count;
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// The whitespace set the tokenizer states switch on: tab, LF, FF and
    /// space. CR never reaches the tokenizer.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }
}

/// [Noncharacter](https://infra.spec.whatwg.org/#noncharacter):
/// U+FDD0 to U+FDEF, and the last two code points of every plane.
pub(crate) const fn is_noncharacter(c: char) -> bool {
    let cp = c as u32;
    matches!(cp, 0xFDD0..=0xFDEF) || (cp & 0xFFFE) == 0xFFFE
}

/// Controls other than ASCII whitespace and NULL.
const fn is_reportable_control(c: char) -> bool {
    let cp = c as u32;
    matches!(cp, 0x01..=0x08 | 0x0B | 0x0E..=0x1F | 0x7F..=0x9F)
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Emit the current token"
    ///
    /// Start tags record their name for the appropriate end tag check, and
    /// lose any attributes that duplicated an earlier name.
    pub(super) fn emit_current_token(&mut self) {
        let Some(mut token) = self.current_token.take() else {
            return;
        };
        let duplicates = std::mem::take(&mut self.duplicate_attributes);
        match &mut token {
            Token::StartTag(tag) => {
                remove_indices(&mut tag.attributes, &duplicates);
                self.last_start_tag_name = Some(tag.name.clone());
            }
            Token::EndTag(tag) => {
                remove_indices(&mut tag.attributes, &duplicates);
                // [§ 13.2.5 end tag token rules]
                // "When an end tag token is emitted with attributes, that is an
                // end-tag-with-attributes parse error. When an end tag token is
                // emitted with its self-closing flag set, that is an
                // end-tag-with-trailing-solidus parse error."
                if !tag.attributes.is_empty() {
                    self.error(ParseErrorCode::EndTagWithAttributes);
                }
                if tag.self_closing {
                    self.error(ParseErrorCode::EndTagWithTrailingSolidus);
                }
            }
            _ => {}
        }
        self.pending.push_back(token);
    }

    /// "Emit the current input character as a character token."
    pub(super) fn emit_char(&mut self, c: char) {
        self.pending.push_back(Token::Character(c));
    }

    /// Emit each character of `s` as a character token.
    pub(super) fn emit_str(&mut self, s: &str) {
        self.pending.extend(s.chars().map(Token::Character));
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof(&mut self) {
        self.pending.push_back(Token::EndOfFile);
        self.emitted_eof = true;
    }

    /// The current tag token being built, if any.
    pub(super) fn current_tag(&mut self) -> Option<&mut super::token::Tag> {
        self.current_token.as_mut().and_then(Token::tag_mut)
    }

    /// The current DOCTYPE token being built, if any.
    pub(super) fn current_doctype(&mut self) -> Option<&mut super::token::Doctype> {
        self.current_token.as_mut().and_then(Token::doctype_mut)
    }

    /// "Append ... to the comment token's data."
    pub(super) fn append_to_comment(&mut self, s: &str) {
        if let Some(data) = self.current_token.as_mut().and_then(Token::comment_mut) {
            data.push_str(s);
        }
    }

    /// "Append the current input character to the current tag token's tag name."
    pub(super) fn append_to_tag_name(&mut self, c: char) {
        if let Some(tag) = self.current_tag() {
            tag.name.push(c);
        }
    }

    /// "Start a new attribute in the current tag token."
    pub(super) fn start_new_attribute(&mut self) {
        if let Some(tag) = self.current_tag() {
            tag.attributes.push(super::token::Attribute::new("", ""));
        }
    }

    /// "Append ... to the current attribute's name."
    pub(super) fn append_to_attribute_name(&mut self, c: char) {
        if let Some(attr) = self.current_tag().and_then(super::token::Tag::current_attribute) {
            attr.name.push(c);
        }
    }

    /// "Append ... to the current attribute's value."
    pub(super) fn append_to_attribute_value(&mut self, c: char) {
        if let Some(attr) = self.current_tag().and_then(super::token::Tag::current_attribute) {
            attr.value.push(c);
        }
    }

    /// "Set the current DOCTYPE token's force-quirks flag to on."
    pub(super) fn set_force_quirks(&mut self) {
        if let Some(doctype) = self.current_doctype() {
            doctype.force_quirks = true;
        }
    }

    /// Emit the current DOCTYPE with its force-quirks flag set.
    pub(super) fn emit_quirky_doctype(&mut self) {
        self.set_force_quirks();
        self.emit_current_token();
    }
}

fn remove_indices<T>(items: &mut Vec<T>, indices: &[usize]) {
    if indices.is_empty() {
        return;
    }
    let mut index = 0;
    items.retain(|_| {
        let keep = !indices.contains(&index);
        index += 1;
        keep
    });
}

// =============================================================================
// Attribute and End Tag Helpers
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "When the user agent leaves the attribute name state (and before
    /// emitting the tag token, if appropriate), the complete attribute's name
    /// must be compared to the other attributes on the same token; if there
    /// is already an attribute on the token with the exact same name, then
    /// this is a duplicate-attribute parse error and the new attribute must
    /// be removed from the token."
    ///
    /// The attribute is only marked here: its value is still being built.
    pub(super) fn check_duplicate_attribute(&mut self) {
        let Some(tag) = self.current_token.as_ref().and_then(Token::tag) else {
            return;
        };
        let Some((current, earlier)) = tag.attributes.split_last() else {
            return;
        };
        let index = earlier.len();
        let is_duplicate = earlier
            .iter()
            .enumerate()
            .any(|(i, attr)| attr.name == current.name && !self.duplicate_attributes.contains(&i));
        if is_duplicate {
            self.error(ParseErrorCode::DuplicateAttribute);
            self.duplicate_attributes.push(index);
        }
    }

    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any. If no start tag has been emitted from this
    /// tokenizer, then no end tag token is appropriate."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        match (&self.last_start_tag_name, &self.current_token) {
            (Some(last), Some(Token::EndTag(tag))) => &tag.name == last,
            _ => false,
        }
    }

    /// The "anything else" branch shared by every end tag name state:
    /// "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS
    /// character token, and a character token for each of the characters in
    /// the temporary buffer (in the order they were added to the buffer).
    /// Reconsume in the X state."
    pub(super) fn abandon_end_tag(&mut self, text_state: TokenizerState) {
        self.emit_char('<');
        self.emit_char('/');
        let buffer = std::mem::take(&mut self.temporary_buffer);
        self.emit_str(&buffer);
        self.current_token = None;
        self.duplicate_attributes.clear();
        self.reconsume_in(text_state);
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Record a parse error at the current input position. Parse errors in
    /// HTML are not fatal; the state machine recovers and continues.
    pub(super) fn error(&mut self, code: ParseErrorCode) {
        self.errors.push(ParseError {
            code,
            location: self.location(),
            detail: None,
        });
    }
}
