//! Text content states: data, RCDATA, RAWTEXT and PLAINTEXT, plus the
//! end tag recognition they share with script data.

use super::core::{HTMLTokenizer, TokenizerState};
use super::token::Token;
use crate::error::ParseErrorCode;

impl HTMLTokenizer {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    pub(super) fn handle_data_state(&mut self) {
        match self.current_input_character {
            // "U+0026 AMPERSAND (&) - Set the return state to the data state.
            // Switch to the character reference state."
            Some('&') => {
                self.return_state = Some(TokenizerState::Data);
                self.switch_to(TokenizerState::CharacterReference);
            }
            // "U+003C LESS-THAN SIGN (<) - Switch to the tag open state."
            Some('<') => self.switch_to(TokenizerState::TagOpen),
            // "U+0000 NULL - This is an unexpected-null-character parse error.
            // Emit the current input character as a character token."
            Some('\0') => {
                self.error(ParseErrorCode::UnexpectedNullCharacter);
                self.emit_char('\0');
            }
            // "EOF - Emit an end-of-file token."
            None => self.emit_eof(),
            // "Anything else - Emit the current input character as a character token."
            Some(c) => self.emit_char(c),
        }
    }

    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    pub(super) fn handle_rcdata_state(&mut self) {
        match self.current_input_character {
            // "Set the return state to the RCDATA state. Switch to the character reference state."
            Some('&') => {
                self.return_state = Some(TokenizerState::Rcdata);
                self.switch_to(TokenizerState::CharacterReference);
            }
            Some('<') => self.switch_to(TokenizerState::RcdataLessThanSign),
            // "This is an unexpected-null-character parse error. Emit a U+FFFD REPLACEMENT
            // CHARACTER character token."
            Some('\0') => {
                self.error(ParseErrorCode::UnexpectedNullCharacter);
                self.emit_char('\u{FFFD}');
            }
            None => self.emit_eof(),
            Some(c) => self.emit_char(c),
        }
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    pub(super) fn handle_rawtext_state(&mut self) {
        self.handle_raw_text_like(TokenizerState::RawtextLessThanSign);
    }

    /// [§ 13.2.5.4 Script data state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-state)
    ///
    /// Identical to RAWTEXT apart from where `<` leads.
    pub(super) fn handle_script_data_state(&mut self) {
        self.handle_raw_text_like(TokenizerState::ScriptDataLessThanSign);
    }

    fn handle_raw_text_like(&mut self, less_than_state: TokenizerState) {
        match self.current_input_character {
            Some('<') => self.switch_to(less_than_state),
            Some('\0') => {
                self.error(ParseErrorCode::UnexpectedNullCharacter);
                self.emit_char('\u{FFFD}');
            }
            None => self.emit_eof(),
            Some(c) => self.emit_char(c),
        }
    }

    /// [§ 13.2.5.5 PLAINTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#plaintext-state)
    pub(super) fn handle_plaintext_state(&mut self) {
        match self.current_input_character {
            Some('\0') => {
                self.error(ParseErrorCode::UnexpectedNullCharacter);
                self.emit_char('\u{FFFD}');
            }
            None => self.emit_eof(),
            Some(c) => self.emit_char(c),
        }
    }

    /// [§ 13.2.5.9 RCDATA less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-less-than-sign-state)
    pub(super) fn handle_rcdata_less_than_sign_state(&mut self) {
        self.handle_text_less_than_sign(TokenizerState::Rcdata, TokenizerState::RcdataEndTagOpen);
    }

    /// [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    pub(super) fn handle_rawtext_less_than_sign_state(&mut self) {
        self.handle_text_less_than_sign(TokenizerState::Rawtext, TokenizerState::RawtextEndTagOpen);
    }

    fn handle_text_less_than_sign(
        &mut self,
        text_state: TokenizerState,
        end_tag_open: TokenizerState,
    ) {
        if self.current_input_character == Some('/') {
            // "Set the temporary buffer to the empty string. Switch to the X end tag open state."
            self.temporary_buffer.clear();
            self.switch_to(end_tag_open);
        } else {
            // "Emit a U+003C LESS-THAN SIGN character token. Reconsume in the X state."
            self.emit_char('<');
            self.reconsume_in(text_state);
        }
    }

    /// [§ 13.2.5.10 RCDATA end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-open-state)
    pub(super) fn handle_rcdata_end_tag_open_state(&mut self) {
        self.handle_text_end_tag_open(TokenizerState::Rcdata, TokenizerState::RcdataEndTagName);
    }

    /// [§ 13.2.5.13 RAWTEXT end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-open-state)
    pub(super) fn handle_rawtext_end_tag_open_state(&mut self) {
        self.handle_text_end_tag_open(TokenizerState::Rawtext, TokenizerState::RawtextEndTagName);
    }

    /// Shared by the RCDATA, RAWTEXT, script data and script data escaped
    /// end tag open states.
    pub(super) fn handle_text_end_tag_open(
        &mut self,
        text_state: TokenizerState,
        end_tag_name: TokenizerState,
    ) {
        match self.current_input_character {
            // "ASCII alpha - Create a new end tag token, set its tag name to the
            // empty string. Reconsume in the X end tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_end_tag());
                self.reconsume_in(end_tag_name);
            }
            // "Anything else - Emit a U+003C LESS-THAN SIGN character token and a
            // U+002F SOLIDUS character token. Reconsume in the X state."
            _ => {
                self.emit_char('<');
                self.emit_char('/');
                self.reconsume_in(text_state);
            }
        }
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    /// [§ 13.2.5.17 Script data end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-name-state)
    /// [§ 13.2.5.25 Script data escaped end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-end-tag-name-state)
    ///
    /// The four states differ only in the state "anything else" returns to.
    pub(super) fn handle_text_end_tag_name_state(&mut self, text_state: TokenizerState) {
        match self.current_input_character {
            // "If the current end tag token is an appropriate end tag token,
            // then switch to the before attribute name state."
            Some(c) if Self::is_whitespace_char(c) && self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "...then switch to the self-closing start tag state."
            Some('/') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            // "...then switch to the data state and emit the current tag token."
            Some('>') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            // "ASCII upper alpha - Append the lowercase version of the current
            // input character to the current tag token's tag name. Append the
            // current input character to the temporary buffer."
            // "ASCII lower alpha" is the same without lowercasing.
            Some(c) if c.is_ascii_alphabetic() => {
                self.append_to_tag_name(c.to_ascii_lowercase());
                self.temporary_buffer.push(c);
            }
            _ => self.abandon_end_tag(text_state),
        }
    }
}
