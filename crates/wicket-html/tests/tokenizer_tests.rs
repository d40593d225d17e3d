//! Integration tests for the HTML tokenizer.

use wicket_html::{HTMLTokenizer, ParseErrorCode, Tag, Token, TokenizerState, tokenize};

/// Concatenate the character tokens in `tokens`.
fn text_of(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Character(c) => Some(*c),
            _ => None,
        })
        .collect()
}

/// The first start tag in `tokens`.
fn first_start_tag(tokens: &[Token]) -> &Tag {
    tokens
        .iter()
        .find_map(|token| match token {
            Token::StartTag(tag) => Some(tag),
            _ => None,
        })
        .expect("no start tag")
}

/// Drive a tokenizer in `state` to completion, the way the tree builder
/// would after seeing a raw text element's start tag.
fn tokenize_in(state: TokenizerState, last_start_tag: &str, input: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(input);
    tokenizer.set_state(state);
    tokenizer.set_last_start_tag(Some(last_start_tag));
    tokenizer.collect()
}

fn error_codes(input: &str) -> Vec<ParseErrorCode> {
    let mut tokenizer = HTMLTokenizer::new(input);
    let _ = tokenizer.by_ref().count();
    tokenizer.take_errors().into_iter().map(|e| e.code).collect()
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens.len(), 6); // 5 chars + EOF
    assert_eq!(tokens[0], Token::Character('H'));
    assert_eq!(tokens[4], Token::Character('o'));
    assert_eq!(tokens[5], Token::EndOfFile);
}

#[test]
fn test_characters_then_eof() {
    assert_eq!(
        tokenize("char"),
        vec![
            Token::Character('c'),
            Token::Character('h'),
            Token::Character('a'),
            Token::Character('r'),
            Token::EndOfFile,
        ]
    );
}

#[test]
fn test_empty_input_is_just_eof() {
    assert_eq!(tokenize(""), vec![Token::EndOfFile]);
}

#[test]
fn test_next_token_keeps_returning_eof() {
    let mut tokenizer = HTMLTokenizer::new("a");
    assert_eq!(tokenizer.next_token(), Token::Character('a'));
    assert_eq!(tokenizer.next_token(), Token::EndOfFile);
    assert_eq!(tokenizer.next_token(), Token::EndOfFile);
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 2);
    let Token::Doctype(doctype) = &tokens[0] else {
        panic!("Expected DOCTYPE token");
    };
    assert_eq!(doctype.name.as_deref(), Some("html"));
    assert_eq!(doctype.public_identifier, None);
    assert!(!doctype.force_quirks);
}

#[test]
fn test_doctype_name_is_lowercased() {
    let tokens = tokenize("<!doctype HTML>");
    let Token::Doctype(doctype) = &tokens[0] else {
        panic!("Expected DOCTYPE token");
    };
    assert_eq!(doctype.name.as_deref(), Some("html"));
}

#[test]
fn test_doctype_mixed_case_keyword_and_name() {
    let tokens = tokenize("<!DocType someName>");
    let Token::Doctype(doctype) = &tokens[0] else {
        panic!("Expected DOCTYPE token");
    };
    assert_eq!(doctype.name.as_deref(), Some("somename"));
}

#[test]
fn test_doctype_with_identifiers() {
    let tokens = tokenize(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" 'http://www.w3.org/TR/html4/strict.dtd'>"#,
    );
    let Token::Doctype(doctype) = &tokens[0] else {
        panic!("Expected DOCTYPE token");
    };
    assert_eq!(
        doctype.public_identifier.as_deref(),
        Some("-//W3C//DTD HTML 4.01//EN")
    );
    assert_eq!(
        doctype.system_identifier.as_deref(),
        Some("http://www.w3.org/TR/html4/strict.dtd")
    );
}

#[test]
fn test_doctype_without_name_forces_quirks() {
    let tokens = tokenize("<!DOCTYPE>");
    let Token::Doctype(doctype) = &tokens[0] else {
        panic!("Expected DOCTYPE token");
    };
    assert!(doctype.force_quirks);
    assert_eq!(doctype.name, None);
}

#[test]
fn test_start_and_end_tag() {
    let tokens = tokenize("<DIV></Div>");
    assert_eq!(tokens[0], Token::StartTag(Tag::named("div")));
    assert_eq!(tokens[1], Token::EndTag(Tag::named("div")));
    assert_eq!(tokens[2], Token::EndOfFile);
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    let tag = first_start_tag(&tokens);
    assert_eq!(tag.name, "br");
    assert!(tag.self_closing);
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- hi -->");
    assert_eq!(tokens[0], Token::Comment(" hi ".to_string()));
}

#[test]
fn test_bogus_comment_from_question_mark() {
    let tokens = tokenize("<?xml version?>");
    assert_eq!(tokens[0], Token::Comment("?xml version?".to_string()));
    assert_eq!(
        tokenize("<?$comment=bogus>")[0],
        Token::Comment("?$comment=bogus".to_string())
    );
    assert!(
        error_codes("<?xml?>").contains(&ParseErrorCode::UnexpectedQuestionMarkInsteadOfTagName)
    );
}

#[test]
fn test_cdata_is_a_bogus_comment_in_html_content() {
    let tokens = tokenize("<![CDATA[x]]>");
    assert_eq!(tokens[0], Token::Comment("[CDATA[x]]".to_string()));
}

#[test]
fn test_cdata_section_when_allowed() {
    let mut tokenizer = HTMLTokenizer::new("<![CDATA[a<b]]>");
    tokenizer.set_cdata_allowed(true);
    let tokens: Vec<Token> = tokenizer.collect();
    assert_eq!(text_of(&tokens), "a<b");
}

#[test]
fn test_attributes_in_all_quoting_styles() {
    let tokens = tokenize(r#"<a href="x" title='y' id=z checked>"#);
    let tag = first_start_tag(&tokens);
    assert_eq!(tag.attr("href"), Some("x"));
    assert_eq!(tag.attr("title"), Some("y"));
    assert_eq!(tag.attr("id"), Some("z"));
    assert_eq!(tag.attr("checked"), Some(""));
    assert_eq!(tag.attributes.len(), 4);
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    let tokens = tokenize(r#"<p class="a" CLASS="b">"#);
    let tag = first_start_tag(&tokens);
    assert_eq!(tag.attributes.len(), 1);
    assert_eq!(tag.attr("class"), Some("a"));
    assert!(error_codes(r#"<p a=1 a=2>"#).contains(&ParseErrorCode::DuplicateAttribute));
}

#[test]
fn test_newlines_are_normalized() {
    let tokens = tokenize("a\r\nb\rc");
    assert_eq!(text_of(&tokens), "a\nb\nc");
}

// ========== Raw text element (RCDATA/RAWTEXT) tests ==========

#[test]
fn test_rawtext_keeps_markup_as_text() {
    let tokens = tokenize_in(TokenizerState::Rawtext, "style", "p > a { } <b></style>");
    assert_eq!(text_of(&tokens), "p > a { } <b>");
    assert_eq!(tokens[tokens.len() - 2], Token::EndTag(Tag::named("style")));
}

#[test]
fn test_rawtext_ignores_wrong_end_tag() {
    let tokens = tokenize_in(TokenizerState::Rawtext, "style", "a</script>b</style>");
    assert_eq!(text_of(&tokens), "a</script>b");
}

#[test]
fn test_rcdata_decodes_character_references() {
    let tokens = tokenize_in(TokenizerState::Rcdata, "title", "a &amp; <b></title>");
    assert_eq!(text_of(&tokens), "a & <b>");
}

#[test]
fn test_script_data_escaped_comment() {
    let tokens = tokenize_in(
        TokenizerState::ScriptData,
        "script",
        "<!--<script></script>--></script>",
    );
    assert_eq!(text_of(&tokens), "<!--<script></script>-->");
}

#[test]
fn test_plaintext_never_ends() {
    let tokens = tokenize_in(TokenizerState::Plaintext, "plaintext", "</plaintext><b>");
    assert_eq!(text_of(&tokens), "</plaintext><b>");
}

// ========== Character references ==========

#[test]
fn test_character_reference_bare_ampersand() {
    assert_eq!(text_of(&tokenize("a & b")), "a & b");
}

#[test]
fn test_named_character_references() {
    assert_eq!(text_of(&tokenize("&lt;&gt;&amp;&quot;")), "<>&\"");
}

#[test]
fn test_named_character_reference_without_semicolon() {
    assert_eq!(text_of(&tokenize("&copy 2024")), "\u{00A9} 2024");
    assert!(
        error_codes("&copy").contains(&ParseErrorCode::MissingSemicolonAfterCharacterReference)
    );
}

#[test]
fn test_longest_named_reference_wins() {
    // "&notin;" is its own entity; "&notit;" is "&not" followed by "it;".
    assert_eq!(text_of(&tokenize("&notin;")), "\u{2209}");
    assert_eq!(text_of(&tokenize("&notit;")), "\u{00AC}it;");
}

#[test]
fn test_unknown_named_reference_is_left_alone() {
    assert_eq!(text_of(&tokenize("&bogus;")), "&bogus;");
    assert!(error_codes("&bogus;").contains(&ParseErrorCode::UnknownNamedCharacterReference));
}

#[test]
fn test_numeric_character_references() {
    assert_eq!(text_of(&tokenize("&#65;&#x42;&#X63;")), "ABc");
}

#[test]
fn test_decimal_and_hex_references_agree() {
    assert_eq!(tokenize("&#44032;"), vec![Token::Character('\u{AC00}'), Token::EndOfFile]);
    assert_eq!(tokenize("&#xAc00;"), vec![Token::Character('\u{AC00}'), Token::EndOfFile]);
}

#[test]
fn test_numeric_reference_replacements() {
    // Windows-1252 remapping, NULL and out of range.
    assert_eq!(text_of(&tokenize("&#x80;")), "\u{20AC}");
    assert_eq!(text_of(&tokenize("&#0;")), "\u{FFFD}");
    assert_eq!(text_of(&tokenize("&#x110000;")), "\u{FFFD}");
    assert!(error_codes("&#0;").contains(&ParseErrorCode::NullCharacterReference));
}

#[test]
fn test_legacy_reference_in_attribute_followed_by_alphanumeric() {
    // In an attribute, "&not" followed by "=" or an alphanumeric stays as-is.
    let tokens = tokenize(r#"<a href="?x=1&notice=2">"#);
    assert_eq!(first_start_tag(&tokens).attr("href"), Some("?x=1&notice=2"));
}

#[test]
fn test_character_reference_in_attribute() {
    let tokens = tokenize(r#"<a title="&lt;&#x41;">"#);
    assert_eq!(first_start_tag(&tokens).attr("title"), Some("<A"));
}

// ========== Errors ==========

#[test]
fn test_eof_in_tag_drops_the_tag() {
    let tokens = tokenize("<div class=");
    assert_eq!(tokens, vec![Token::EndOfFile]);
    assert!(error_codes("<div class=").contains(&ParseErrorCode::EofInTag));
}

#[test]
fn test_error_locations_are_line_and_column() {
    let mut tokenizer = HTMLTokenizer::new("ok\n  &#0;");
    let _ = tokenizer.by_ref().count();
    let errors = tokenizer.take_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].location.line, 2);
}
