//! [§ 13.2.6.4 The rules for parsing tokens in HTML content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhtml)
//!
//! One `handle_*_mode` method per insertion mode, grouped by the part of
//! the document they build.

mod after;
mod body;
mod head;
mod select;
mod table;
mod template;

/// "U+0009 CHARACTER TABULATION, U+000A LINE FEED (LF), U+000C FORM FEED
/// (FF), U+000D CARRIAGE RETURN (CR), or U+0020 SPACE"
pub(super) const fn is_html_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
}
