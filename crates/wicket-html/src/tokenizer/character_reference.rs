//! Character reference states.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)

use super::core::{HTMLTokenizer, TokenizerState};
use super::helpers::is_noncharacter;
use super::named_character_references::{
    LONGEST_ENTITY_NAME, any_entity_has_prefix, lookup_entity,
};
use crate::error::ParseErrorCode;

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// "If the number is one of the numbers in the first column of the following
/// table, then find the row with that number in the first column, and set the
/// character reference code to the number in the second column."
const C1_REPLACEMENTS: &[(u32, u32)] = &[
    (0x80, 0x20AC),
    (0x82, 0x201A),
    (0x83, 0x0192),
    (0x84, 0x201E),
    (0x85, 0x2026),
    (0x86, 0x2020),
    (0x87, 0x2021),
    (0x88, 0x02C6),
    (0x89, 0x2030),
    (0x8A, 0x0160),
    (0x8B, 0x2039),
    (0x8C, 0x0152),
    (0x8E, 0x017D),
    (0x91, 0x2018),
    (0x92, 0x2019),
    (0x93, 0x201C),
    (0x94, 0x201D),
    (0x95, 0x2022),
    (0x96, 0x2013),
    (0x97, 0x2014),
    (0x98, 0x02DC),
    (0x99, 0x2122),
    (0x9A, 0x0161),
    (0x9B, 0x203A),
    (0x9C, 0x0153),
    (0x9E, 0x017E),
    (0x9F, 0x0178),
];

/// Any code point above this is outside Unicode. The accumulator saturates
/// just past it so long digit runs cannot overflow.
const MAX_CODE_POINT: u32 = 0x10_FFFF;

impl HTMLTokenizer {
    /// "consumed as part of an attribute": the return state is one of the
    /// attribute value states.
    pub(super) const fn is_consumed_as_part_of_attribute(&self) -> bool {
        matches!(
            self.return_state,
            Some(
                TokenizerState::AttributeValueDoubleQuoted
                    | TokenizerState::AttributeValueSingleQuoted
                    | TokenizerState::AttributeValueUnquoted
            )
        )
    }

    /// "Flush code points consumed as a character reference"
    ///
    /// "If the character reference was consumed as part of an attribute,
    /// then append each character to the current attribute's value.
    /// Otherwise, emit each character as a character token."
    pub(super) fn flush_code_points_consumed_as_character_reference(&mut self) {
        let buffer = std::mem::take(&mut self.temporary_buffer);
        if self.is_consumed_as_part_of_attribute() {
            for c in buffer.chars() {
                self.append_to_attribute_value(c);
            }
        } else {
            self.emit_str(&buffer);
        }
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    pub(super) fn handle_character_reference_state(&mut self) {
        // "Set the temporary buffer to the empty string. Append a U+0026
        // AMPERSAND (&) character to the temporary buffer."
        self.temporary_buffer.clear();
        self.temporary_buffer.push('&');

        match self.current_input_character {
            // "ASCII alphanumeric - Reconsume in the named character reference state."
            Some(c) if c.is_ascii_alphanumeric() => {
                self.reconsume_in(TokenizerState::NamedCharacterReference);
            }
            // "U+0023 NUMBER SIGN (#) - Append the current input character to the
            // temporary buffer. Switch to the numeric character reference state."
            Some('#') => {
                self.temporary_buffer.push('#');
                self.switch_to(TokenizerState::NumericCharacterReference);
            }
            // "Anything else - Flush code points consumed as a character reference.
            // Reconsume in the return state."
            _ => {
                self.flush_code_points_consumed_as_character_reference();
                self.switch_to_return_state(true);
            }
        }
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// "Consume the maximum number of characters possible, where the consumed
    /// characters are one of the identifiers in the first column of the named
    /// character references table."
    ///
    /// Scans ahead from the reconsumed character and only consumes the
    /// characters of the longest match.
    pub(super) fn handle_named_character_reference_state(&mut self) {
        let start = self.pos.saturating_sub(1);
        let mut candidate = String::new();
        let mut longest: Option<(usize, &'static str)> = None;

        for (len, &c) in self.input[start..].iter().enumerate() {
            if len >= LONGEST_ENTITY_NAME || !(c.is_ascii_alphanumeric() || c == ';') {
                break;
            }
            candidate.push(c);
            if let Some(replacement) = lookup_entity(&candidate) {
                longest = Some((len + 1, replacement));
            }
            if c == ';' || !any_entity_has_prefix(&candidate) {
                break;
            }
        }

        let Some((matched_len, replacement)) = longest else {
            // "Otherwise - Flush code points consumed as a character reference.
            // Switch to the ambiguous ampersand state."
            self.flush_code_points_consumed_as_character_reference();
            self.reconsume_in(TokenizerState::AmbiguousAmpersand);
            return;
        };

        // "Append each character to the temporary buffer when it's consumed."
        self.temporary_buffer
            .extend(&self.input[start..start + matched_len]);
        self.pos = start + matched_len;
        let ends_with_semicolon = self.input[self.pos - 1] == ';';

        // "If the character reference was consumed as part of an attribute, and
        // the last character matched is not a U+003B SEMICOLON character (;),
        // and the next input character is either a U+003D EQUALS SIGN character
        // (=) or an ASCII alphanumeric, then, for historical reasons, flush code
        // points consumed as a character reference and switch to the return state."
        let next_is_ambiguous = self
            .peek(0)
            .is_some_and(|c| c == '=' || c.is_ascii_alphanumeric());
        if self.is_consumed_as_part_of_attribute() && !ends_with_semicolon && next_is_ambiguous {
            self.flush_code_points_consumed_as_character_reference();
            self.switch_to_return_state(false);
            return;
        }

        // "If the last character matched is not a U+003B SEMICOLON character (;),
        // then this is a missing-semicolon-after-character-reference parse error."
        if !ends_with_semicolon {
            self.error(ParseErrorCode::MissingSemicolonAfterCharacterReference);
        }

        // "Set the temporary buffer to the empty string. Append one or two
        // characters corresponding to the character reference name (as given by
        // the second column of the named character references table) to the
        // temporary buffer."
        self.temporary_buffer.clear();
        self.temporary_buffer.push_str(replacement);
        self.flush_code_points_consumed_as_character_reference();
        self.switch_to_return_state(false);
    }

    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    pub(super) fn handle_ambiguous_ampersand_state(&mut self) {
        match self.current_input_character {
            // "If the character reference was consumed as part of an attribute, then
            // append the current input character to the current attribute's value.
            // Otherwise, emit the current input character as a character token."
            Some(c) if c.is_ascii_alphanumeric() => {
                if self.is_consumed_as_part_of_attribute() {
                    self.append_to_attribute_value(c);
                } else {
                    self.emit_char(c);
                }
            }
            // "This is an unknown-named-character-reference parse error. Reconsume
            // in the return state."
            Some(';') => {
                self.error(ParseErrorCode::UnknownNamedCharacterReference);
                self.switch_to_return_state(true);
            }
            _ => self.switch_to_return_state(true),
        }
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    pub(super) fn handle_numeric_character_reference_state(&mut self) {
        // "Set the character reference code to zero (0)."
        self.character_reference_code = 0;
        match self.current_input_character {
            Some(c @ ('x' | 'X')) => {
                self.temporary_buffer.push(c);
                self.switch_to(TokenizerState::HexadecimalCharacterReferenceStart);
            }
            _ => self.reconsume_in(TokenizerState::DecimalCharacterReferenceStart),
        }
    }

    /// [§ 13.2.5.76 Hexadecimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state)
    pub(super) fn handle_hexadecimal_character_reference_start_state(&mut self) {
        self.handle_numeric_start(16, TokenizerState::HexadecimalCharacterReference);
    }

    /// [§ 13.2.5.77 Decimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)
    pub(super) fn handle_decimal_character_reference_start_state(&mut self) {
        self.handle_numeric_start(10, TokenizerState::DecimalCharacterReference);
    }

    fn handle_numeric_start(&mut self, radix: u32, digits_state: TokenizerState) {
        if self
            .current_input_character
            .is_some_and(|c| c.is_digit(radix))
        {
            self.reconsume_in(digits_state);
        } else {
            // "This is an absence-of-digits-in-numeric-character-reference parse
            // error. Flush code points consumed as a character reference.
            // Reconsume in the return state."
            self.error(ParseErrorCode::AbsenceOfDigitsInNumericCharacterReference);
            self.flush_code_points_consumed_as_character_reference();
            self.switch_to_return_state(true);
        }
    }

    /// [§ 13.2.5.78 Hexadecimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state)
    pub(super) fn handle_hexadecimal_character_reference_state(&mut self) {
        self.handle_numeric_digits(16);
    }

    /// [§ 13.2.5.79 Decimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)
    pub(super) fn handle_decimal_character_reference_state(&mut self) {
        self.handle_numeric_digits(10);
    }

    fn handle_numeric_digits(&mut self, radix: u32) {
        match self.current_input_character {
            // "Multiply the character reference code by 16 (or 10). Add a numeric
            // version of the current input character to the character reference code."
            Some(c) if c.is_digit(radix) => {
                let digit = c.to_digit(radix).unwrap_or(0);
                self.character_reference_code = self
                    .character_reference_code
                    .saturating_mul(radix)
                    .saturating_add(digit)
                    .min(MAX_CODE_POINT + 1);
            }
            // "U+003B SEMICOLON - Switch to the numeric character reference end state."
            Some(';') => {
                self.finish_numeric_character_reference();
                self.switch_to_return_state(false);
            }
            // "This is a missing-semicolon-after-character-reference parse error.
            // Reconsume in the numeric character reference end state."
            _ => {
                self.error(ParseErrorCode::MissingSemicolonAfterCharacterReference);
                self.finish_numeric_character_reference();
                self.switch_to_return_state(true);
            }
        }
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    ///
    /// This state consumes nothing, so it runs inline at the end of the
    /// digit states rather than as its own step.
    fn finish_numeric_character_reference(&mut self) {
        let mut code = self.character_reference_code;

        if code == 0 {
            // "If the number is 0x00, then this is a null-character-reference parse
            // error. Set the character reference code to 0xFFFD."
            self.error(ParseErrorCode::NullCharacterReference);
            code = 0xFFFD;
        } else if code > MAX_CODE_POINT {
            // "If the number is greater than 0x10FFFF, then this is a
            // character-reference-outside-unicode-range parse error."
            self.error(ParseErrorCode::CharacterReferenceOutsideUnicodeRange);
            code = 0xFFFD;
        } else if (0xD800..=0xDFFF).contains(&code) {
            // "If the number is a surrogate, then this is a
            // surrogate-character-reference parse error."
            self.error(ParseErrorCode::SurrogateCharacterReference);
            code = 0xFFFD;
        } else if char::from_u32(code).is_some_and(is_noncharacter) {
            // "If the number is a noncharacter, then this is a
            // noncharacter-character-reference parse error." The code point is kept.
            self.error(ParseErrorCode::NoncharacterCharacterReference);
        } else if code == 0x0D || is_control_reference(code) {
            // "If the number is 0x0D, or a control that's not ASCII whitespace,
            // then this is a control-character-reference parse error."
            self.error(ParseErrorCode::ControlCharacterReference);
            if let Some(&(_, replacement)) = C1_REPLACEMENTS.iter().find(|(from, _)| *from == code)
            {
                code = replacement;
            }
        }

        // "Set the temporary buffer to the empty string. Append a code point equal
        // to the character reference code to the temporary buffer. Flush code
        // points consumed as a character reference."
        self.temporary_buffer.clear();
        self.temporary_buffer
            .push(char::from_u32(code).unwrap_or('\u{FFFD}'));
        self.flush_code_points_consumed_as_character_reference();
    }
}

/// A control code point that is not ASCII whitespace.
const fn is_control_reference(code: u32) -> bool {
    matches!(code, 0x01..=0x08 | 0x0B | 0x0E..=0x1F | 0x7F..=0x9F)
}
