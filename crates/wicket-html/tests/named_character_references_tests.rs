//! Integration tests for the named character reference table.

use wicket_html::tokenizer::named_character_references::{
    LONGEST_ENTITY_NAME, NAMED_CHARACTER_REFERENCES, any_entity_has_prefix, lookup_entity,
};

#[test]
fn test_table_has_every_entry() {
    assert_eq!(NAMED_CHARACTER_REFERENCES.len(), 2231);
}

#[test]
fn test_table_is_strictly_sorted() {
    // Binary search and the prefix scan both rely on this.
    for pair in NAMED_CHARACTER_REFERENCES.windows(2) {
        assert!(pair[0].0 < pair[1].0, "{:?} sorts after {:?}", pair[0].0, pair[1].0);
    }
}

#[test]
fn test_every_entry_is_found_by_lookup() {
    for (name, value) in NAMED_CHARACTER_REFERENCES {
        assert_eq!(lookup_entity(name), Some(*value), "lookup of {name:?}");
        assert!(any_entity_has_prefix(name));
    }
}

#[test]
fn test_longest_entity_name() {
    let longest = NAMED_CHARACTER_REFERENCES
        .iter()
        .map(|(name, _)| name.len())
        .max();
    assert_eq!(longest, Some(LONGEST_ENTITY_NAME));
    assert_eq!(
        lookup_entity("CounterClockwiseContourIntegral;"),
        Some("\u{2233}")
    );
}

#[test]
fn test_two_code_point_entities() {
    assert_eq!(lookup_entity("NotEqualTilde;"), Some("\u{2242}\u{338}"));
    assert_eq!(lookup_entity("nGt;"), Some("\u{226B}\u{20D2}"));
    assert_eq!(lookup_entity("ThickSpace;"), Some("\u{205F}\u{200A}"));
    assert_eq!(lookup_entity("fjlig;"), Some("fj"));
}

#[test]
fn test_legacy_names_without_semicolon() {
    let legacy = NAMED_CHARACTER_REFERENCES
        .iter()
        .filter(|(name, _)| !name.ends_with(';'))
        .count();
    assert_eq!(legacy, 106);

    assert_eq!(lookup_entity("not"), Some("\u{AC}"));
    assert_eq!(lookup_entity("copy"), Some("\u{A9}"));
    assert_eq!(lookup_entity("Aacute"), Some("\u{C1}"));
    assert_eq!(lookup_entity("yuml"), Some("\u{FF}"));
    // Only the semicolon form exists for newer names.
    assert_eq!(lookup_entity("notin"), None);
    assert_eq!(lookup_entity("notin;"), Some("\u{2209}"));
}

#[test]
fn test_every_legacy_name_has_a_semicolon_twin() {
    for (name, value) in NAMED_CHARACTER_REFERENCES
        .iter()
        .filter(|(name, _)| !name.ends_with(';'))
    {
        assert_eq!(lookup_entity(&format!("{name};")), Some(*value));
    }
}

#[test]
fn test_lookup_is_case_sensitive() {
    assert_eq!(lookup_entity("AMP;"), Some("&"));
    assert_eq!(lookup_entity("Amp;"), None);
    assert_eq!(lookup_entity("aacute;"), Some("\u{E1}"));
    assert_eq!(lookup_entity("Aacute;"), Some("\u{C1}"));
}

#[test]
fn test_lookup_unknown_entity() {
    assert_eq!(lookup_entity("notarealentity;"), None);
    assert_eq!(lookup_entity(""), None);
}

#[test]
fn test_prefix_scan_stops_where_no_longer_match_exists() {
    assert!(any_entity_has_prefix("noti"));
    assert!(any_entity_has_prefix("notinv"));
    assert!(!any_entity_has_prefix("notit"));
    assert!(any_entity_has_prefix("NotEqualT"));
    assert!(!any_entity_has_prefix("NotEqualX"));
    assert!(!any_entity_has_prefix("xyz"));
}
