//! Integration tests for the HTML parser.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use wicket_dom::{
    CustomElementState, DocumentMode, ElementData, ElementInit, ElementRegistry, Namespace,
    NodeId, NodeType, create_standard_element,
};
use wicket_html::{
    FragmentContext, HTMLParser, HtmlError, InsertionMode, ParseErrorCode, ParserOptions,
    UnsupportedReason, parse_document, parse_fragment,
};

/// Parse `input` as a document and compare its html5lib dump with `lines`,
/// given without the leading `| `.
fn assert_tree(input: &str, lines: &[&str]) {
    let output = parse_document(input);
    assert_eq!(output.dump(), expected(lines), "input: {input:?}");
}

fn assert_fragment(input: &str, context: FragmentContext, lines: &[&str]) {
    let output = parse_fragment(input, context).expect("fragment parse failed");
    assert_eq!(output.dump(), expected(lines), "input: {input:?}");
}

fn expected(lines: &[&str]) -> String {
    lines.iter().map(|line| format!("| {line}\n")).collect()
}

fn error_codes(input: &str) -> Vec<ParseErrorCode> {
    parse_document(input)
        .errors
        .iter()
        .map(|error| error.code)
        .collect()
}

// ========== Document structure ==========

#[test]
fn test_empty_document_is_quirks() {
    let output = parse_document("");
    assert_eq!(output.tree.mode(), DocumentMode::Quirks);
    assert_eq!(output.dump(), expected(&["<html>", "  <head>", "  <body>"]));
    assert!(
        output
            .errors
            .iter()
            .any(|e| e.code == ParseErrorCode::MissingDoctype)
    );
}

#[test]
fn test_lowercase_doctype_synthesizes_skeleton() {
    let output = parse_document("<!doctype html>");
    assert_eq!(output.tree.mode(), DocumentMode::NoQuirks);
    assert_eq!(
        output.dump(),
        expected(&["<!DOCTYPE html>", "<html>", "  <head>", "  <body>"])
    );
}

#[test]
fn test_html5_doctype_is_no_quirks() {
    let output = parse_document("<!DOCTYPE html><p>Hi");
    assert_eq!(output.tree.mode(), DocumentMode::NoQuirks);
    assert!(output.errors.is_empty(), "{:?}", output.errors);
    assert!(output.tree.doctype().is_some());
    assert!(output.tree.head().is_some());
    assert!(output.tree.body().is_some());
}

#[test]
fn test_legacy_doctypes_select_quirks_modes() {
    let quirks = parse_document(r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN">"#);
    assert_eq!(quirks.tree.mode(), DocumentMode::Quirks);

    let limited = parse_document(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">"#,
    );
    assert_eq!(limited.tree.mode(), DocumentMode::LimitedQuirks);
    assert!(
        limited
            .errors
            .iter()
            .any(|e| e.code == ParseErrorCode::NonConformingDoctype)
    );
}

#[test]
fn test_iframe_srcdoc_without_doctype_is_no_quirks() {
    let output = HTMLParser::new("<p>x")
        .with_options(ParserOptions::new().with_iframe_srcdoc(true))
        .parse()
        .unwrap();
    assert_eq!(output.tree.mode(), DocumentMode::NoQuirks);
    assert!(output.errors.is_empty());
}

#[test]
fn test_doctype_is_dumped_with_identifiers() {
    assert_tree(
        r#"<!DOCTYPE html SYSTEM "about:legacy-compat">"#,
        &[
            r#"<!DOCTYPE html "" "about:legacy-compat">"#,
            "<html>",
            "  <head>",
            "  <body>",
        ],
    );
}

#[test]
fn test_comments_before_and_after_root() {
    assert_tree(
        "<!--a--><!DOCTYPE html><html></html><!--b-->",
        &[
            "<!-- a -->",
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "<!-- b -->",
        ],
    );
}

#[test]
fn test_head_content_and_attributes() {
    assert_tree(
        r#"<!DOCTYPE html><title>T &amp; <b></title><meta charset="utf-8"><body class="x">"#,
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "    <title>",
            "      \"T & <b>\"",
            "    <meta>",
            "      charset=\"utf-8\"",
            "  <body>",
            "    class=\"x\"",
        ],
    );
}

#[test]
fn test_attributes_are_sorted_in_dump() {
    assert_tree(
        r#"<!DOCTYPE html><div z="1" a="2" m>"#,
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <div>",
            "      a=\"2\"",
            "      m=\"\"",
            "      z=\"1\"",
        ],
    );
}

#[test]
fn test_whitespace_before_head_is_dropped_and_text_merges() {
    assert_tree(
        "<!DOCTYPE html>  \n<p>a&amp;b</p>",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <p>",
            "      \"a&b\"",
        ],
    );
}

#[test]
fn test_style_content_is_raw_text() {
    assert_tree(
        "<!DOCTYPE html><style>p > a { content: \"<b>\" }</style>",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "    <style>",
            "      \"p > a { content: \"<b>\" }\"",
            "  <body>",
        ],
    );
}

#[test]
fn test_leading_newline_in_pre_is_skipped() {
    assert_tree(
        "<!DOCTYPE html><pre>\nx</pre>",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <pre>",
            "      \"x\"",
        ],
    );
}

// ========== Implied end tags and scope ==========

#[test]
fn test_headings_close_each_other() {
    assert_tree(
        "<!DOCTYPE html><h1>a<h2>b",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <h1>",
            "      \"a\"",
            "    <h2>",
            "      \"b\"",
        ],
    );
    assert!(error_codes("<!DOCTYPE html><h1>a<h2>b").contains(&ParseErrorCode::UnexpectedStartTag));
}

#[test]
fn test_six_headings_are_siblings() {
    let output = parse_document("<body><h1><h2><h3><h4><h5><h6>");
    let body = output.tree.body().unwrap();
    let names: Vec<&str> = output
        .tree
        .children(body)
        .iter()
        .filter_map(|&id| output.tree.local_name(id))
        .collect();
    assert_eq!(names, ["h1", "h2", "h3", "h4", "h5", "h6"]);
}

#[test]
fn test_list_items_and_definitions_auto_close() {
    let output = parse_document("<li><li><li><li><dd><dt><dd><dt><dd><dt>");
    let tree = &output.tree;
    let body = tree.body().unwrap();
    let items = tree.children(body);
    assert_eq!(items.len(), 4);
    assert!(items.iter().all(|&id| tree.local_name(id) == Some("li")));
    let last: Vec<&str> = tree
        .children(items[3])
        .iter()
        .filter_map(|&id| tree.local_name(id))
        .collect();
    assert_eq!(last, ["dd", "dt", "dd", "dt", "dd", "dt"]);
    assert!(tree.children(items[0]).is_empty());
}

#[test]
fn test_li_implicit_close() {
    assert_tree(
        "<!DOCTYPE html><ul><li>a<li>b</ul>",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <ul>",
            "      <li>",
            "        \"a\"",
            "      <li>",
            "        \"b\"",
        ],
    );
}

#[test]
fn test_dd_dt_implicit_close() {
    assert_tree(
        "<!DOCTYPE html><dl><dt>a<dd>b<dt>c</dl>",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <dl>",
            "      <dt>",
            "        \"a\"",
            "      <dd>",
            "        \"b\"",
            "      <dt>",
            "        \"c\"",
        ],
    );
}

#[test]
fn test_nested_lists_keep_outer_li_open() {
    assert_tree(
        "<!DOCTYPE html><ul><li>a<ul><li>b</ul>c</ul>",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <ul>",
            "      <li>",
            "        \"a\"",
            "        <ul>",
            "          <li>",
            "            \"b\"",
            "        \"c\"",
        ],
    );
}

#[test]
fn test_p_end_tag_without_p_inserts_empty_p() {
    assert_tree(
        "<!DOCTYPE html><body></p>",
        &["<!DOCTYPE html>", "<html>", "  <head>", "  <body>", "    <p>"],
    );
}

#[test]
fn test_p_end_tag_before_html_is_ignored() {
    assert_tree(
        "<!DOCTYPE html></p>",
        &["<!DOCTYPE html>", "<html>", "  <head>", "  <body>"],
    );
    assert!(error_codes("<!DOCTYPE html></p>").contains(&ParseErrorCode::UnexpectedEndTag));
}

#[test]
fn test_block_start_tag_closes_p() {
    assert_tree(
        "<!DOCTYPE html><p>a<div>b</div>",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <p>",
            "      \"a\"",
            "    <div>",
            "      \"b\"",
        ],
    );
}

#[test]
fn test_stray_end_tag_is_ignored() {
    assert_tree(
        "<!DOCTYPE html><div>a</span>b</div>",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <div>",
            "      \"ab\"",
        ],
    );
    assert!(error_codes("<!DOCTYPE html><div></span>").contains(&ParseErrorCode::UnexpectedEndTag));
}

#[test]
fn test_nested_form_is_ignored() {
    let output = parse_document("<!DOCTYPE html><form><form></form>");
    assert!(
        output
            .errors
            .iter()
            .any(|e| e.code == ParseErrorCode::NestedForm)
    );
    assert_eq!(
        output.dump(),
        expected(&["<!DOCTYPE html>", "<html>", "  <head>", "  <body>", "    <form>"])
    );
}

// ========== Formatting elements ==========

#[test]
fn test_adoption_agency_with_furthest_block() {
    assert_tree(
        "<!DOCTYPE html><b>1<p>2</b>3</p>",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <b>",
            "      \"1\"",
            "    <p>",
            "      <b>",
            "        \"2\"",
            "      \"3\"",
        ],
    );
    assert!(
        error_codes("<!DOCTYPE html><b>1<p>2</b>3</p>")
            .contains(&ParseErrorCode::MisnestedFormattingElement)
    );
}

#[test]
fn test_misnested_bold_and_paragraph() {
    assert_tree(
        "<b><p>X</b>Y</p>",
        &[
            "<html>",
            "  <head>",
            "  <body>",
            "    <b>",
            "    <p>",
            "      <b>",
            "        \"X\"",
            "      \"Y\"",
        ],
    );
}

#[test]
fn test_adoption_agency_clones_attributes() {
    assert_tree(
        r#"<!DOCTYPE html><a href="x">1<div>2</a>3</div>"#,
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <a>",
            "      href=\"x\"",
            "      \"1\"",
            "    <div>",
            "      <a>",
            "        href=\"x\"",
            "        \"2\"",
            "      \"3\"",
        ],
    );
}

#[test]
fn test_adoption_agency_without_furthest_block() {
    assert_tree(
        "<!DOCTYPE html><b><i>x</b>y",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <b>",
            "      <i>",
            "        \"x\"",
            "    <i>",
            "      \"y\"",
        ],
    );
}

#[test]
fn test_adoption_agency_inner_loop_drops_distant_formatting_entries() {
    // The fourth formatting element above the block is removed from the
    // list instead of being cloned, and a second pass pops the new <a>.
    assert_tree(
        "<!DOCTYPE html><a><b><em><i><u><div>x</a>y",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <a>",
            "      <b>",
            "        <em>",
            "          <i>",
            "            <u>",
            "    <em>",
            "      <i>",
            "        <u>",
            "          <div>",
            "            <a>",
            "              \"x\"",
            "            \"y\"",
        ],
    );
}

#[test]
fn test_adoption_agency_stops_after_eight_outer_iterations() {
    assert_tree(
        "<!DOCTYPE html><div><a><b><div><div><div><div><div><div><div><div><div><div></a>",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <div>",
            "      <a>",
            "        <b>",
            "      <b>",
            "        <div>",
            "          <a>",
            "          <div>",
            "            <a>",
            "            <div>",
            "              <a>",
            "              <div>",
            "                <a>",
            "                <div>",
            "                  <a>",
            "                  <div>",
            "                    <a>",
            "                    <div>",
            "                      <a>",
            "                      <div>",
            "                        <a>",
            "                          <div>",
            "                            <div>",
        ],
    );
}

#[test]
fn test_nested_anchor_closes_outer_anchor() {
    assert_tree(
        "<!DOCTYPE html><a>1<a>2",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <a>",
            "      \"1\"",
            "    <a>",
            "      \"2\"",
        ],
    );
}

#[test]
fn test_reconstruction_is_limited_to_three_identical_elements() {
    assert_tree(
        "<!DOCTYPE html><p><b><b><b><b>x</p><p>y",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <p>",
            "      <b>",
            "        <b>",
            "          <b>",
            "            <b>",
            "              \"x\"",
            "    <p>",
            "      <b>",
            "        <b>",
            "          <b>",
            "            \"y\"",
        ],
    );
}

// ========== Tables ==========

#[test]
fn test_table_text_is_foster_parented() {
    assert_tree(
        "<!DOCTYPE html><table>X<tr><td>Y</td></tr></table>",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    \"X\"",
            "    <table>",
            "      <tbody>",
            "        <tr>",
            "          <td>",
            "            \"Y\"",
        ],
    );
    assert!(
        error_codes("<!DOCTYPE html><table>X</table>")
            .contains(&ParseErrorCode::UnexpectedCharacterInTable)
    );
}

#[test]
fn test_table_elements_are_foster_parented() {
    assert_tree(
        "<!DOCTYPE html><table><b>x</b><tr><td>y</table>",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <b>",
            "      \"x\"",
            "    <table>",
            "      <tbody>",
            "        <tr>",
            "          <td>",
            "            \"y\"",
        ],
    );
}

#[test]
fn test_table_whitespace_stays_in_table() {
    assert_tree(
        "<!DOCTYPE html><table> <tr> </tr></table>",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <table>",
            "      \" \"",
            "      <tbody>",
            "        <tr>",
            "          \" \"",
        ],
    );
}

#[test]
fn test_cells_close_each_other() {
    assert_tree(
        "<!DOCTYPE html><table><caption>c<tr><td>1<td>2<tr><th>3</table>",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <table>",
            "      <caption>",
            "        \"c\"",
            "      <tbody>",
            "        <tr>",
            "          <td>",
            "            \"1\"",
            "          <td>",
            "            \"2\"",
            "        <tr>",
            "          <th>",
            "            \"3\"",
        ],
    );
}

#[test]
fn test_column_group_is_implied_for_col() {
    assert_tree(
        "<!DOCTYPE html><table><col><tr></table>",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <table>",
            "      <colgroup>",
            "        <col>",
            "      <tbody>",
            "        <tr>",
        ],
    );
}

#[test]
fn test_select_options_close_each_other() {
    assert_tree(
        "<!DOCTYPE html><select><option>a<option>b</select>c",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <select>",
            "      <option>",
            "        \"a\"",
            "      <option>",
            "        \"b\"",
            "    \"c\"",
        ],
    );
}

#[test]
fn test_table_tag_closes_select_in_table() {
    assert_tree(
        "<!DOCTYPE html><table><tr><td><select><option>a<td>b</table>",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <table>",
            "      <tbody>",
            "        <tr>",
            "          <td>",
            "            <select>",
            "              <option>",
            "                \"a\"",
            "          <td>",
            "            \"b\"",
        ],
    );
}

// ========== Templates and frames ==========

#[test]
fn test_template_contents_are_separate() {
    let output = parse_document("<template><td>x</td></template>");
    assert_eq!(
        output.dump(),
        expected(&[
            "<html>",
            "  <head>",
            "    <template>",
            "      content",
            "        <td>",
            "          \"x\"",
            "  <body>",
        ])
    );
    let head = output.tree.head().unwrap();
    let template = output.tree.children(head)[0];
    assert!(output.tree.children(template).is_empty());
    assert!(output.tree.template_contents(template).is_some());
}

#[test]
fn test_unclosed_template_at_eof() {
    let output = parse_document("<!DOCTYPE html><body><template><div>x");
    assert!(
        output
            .errors
            .iter()
            .any(|e| e.code == ParseErrorCode::UnexpectedEof)
    );
    assert_eq!(output.stack_stats.final_depth, 0);
}

#[test]
fn test_frameset_replaces_body() {
    assert_tree(
        "<!DOCTYPE html><frameset><frame></frameset>",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <frameset>",
            "    <frame>",
        ],
    );
}

// ========== Foreign content ==========

#[test]
fn test_svg_names_are_adjusted() {
    assert_tree(
        r#"<!DOCTYPE html><svg viewbox="0 0 1 1"><foreignObject><p>x</p></foreignObject></svg>"#,
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <svg svg>",
            "      viewBox=\"0 0 1 1\"",
            "      <svg foreignObject>",
            "        <p>",
            "          \"x\"",
        ],
    );
}

#[test]
fn test_xlink_attributes_are_namespaced() {
    let output = parse_document(r##"<!DOCTYPE html><svg><a xlink:href="#x"/></svg>"##);
    assert!(
        output
            .dump()
            .contains("|       <svg a>\n|         xlink href=\"#x\"\n")
    );
    let svg = output.tree.children(output.tree.body().unwrap())[0];
    let a = output.tree.children(svg)[0];
    let attrs = output.tree.attributes(a);
    assert_eq!(attrs[0].namespace, Some(Namespace::XLink));
    assert_eq!(attrs[0].local_name, "href");
}

#[test]
fn test_mathml_elements() {
    assert_tree(
        "<!DOCTYPE html><math><mi>x</mi><annotation-xml encoding=\"text/html\"><p>y</p></annotation-xml></math>",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <math math>",
            "      <math mi>",
            "        \"x\"",
            "      <math annotation-xml>",
            "        encoding=\"text/html\"",
            "        <p>",
            "          \"y\"",
        ],
    );
}

#[test]
fn test_html_start_tag_breaks_out_of_svg() {
    assert_tree(
        "<!DOCTYPE html><svg><g><p>x",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <svg svg>",
            "      <svg g>",
            "    <p>",
            "      \"x\"",
        ],
    );
    assert!(
        error_codes("<!DOCTYPE html><svg><p>")
            .contains(&ParseErrorCode::UnexpectedTokenInForeignContent)
    );
}

#[test]
fn test_cdata_in_svg_is_text() {
    assert_tree(
        "<!DOCTYPE html><svg><![CDATA[a<b]]></svg>",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    <svg svg>",
            "      \"a<b\"",
        ],
    );
}

// ========== Fragments ==========

#[test]
fn test_fragment_in_body_context() {
    assert_fragment(
        "<p>a<b>b",
        FragmentContext::html("body"),
        &["<p>", "  \"a\"", "  <b>", "    \"b\""],
    );
}

#[test]
fn test_fragment_in_row_context() {
    assert_fragment(
        "<td>1<td>2",
        FragmentContext::html("tr"),
        &["<td>", "  \"1\"", "<td>", "  \"2\""],
    );
}

#[test]
fn test_fragment_in_rcdata_context() {
    assert_fragment("a<b>c", FragmentContext::html("title"), &["\"a<b>c\""]);
}

#[test]
fn test_fragment_in_svg_context() {
    assert_fragment(
        "<circle/>",
        FragmentContext::new(Namespace::Svg, "svg"),
        &["<svg circle>"],
    );
}

#[test]
fn test_fragment_html_end_tag_is_an_error() {
    let output = parse_fragment("x</html>y", FragmentContext::html("div")).unwrap();
    assert_eq!(output.dump(), expected(&["\"xy\""]));
    assert!(!output.errors.is_empty());
}

#[test]
fn test_fragment_nodes_hang_off_the_fragment_root() {
    let output = parse_fragment("<i>a</i>b", FragmentContext::html("div")).unwrap();
    let root = output.fragment_root.unwrap();
    assert_eq!(output.top_level_nodes().len(), 2);
    for &node in output.top_level_nodes() {
        assert_eq!(output.tree.parent(node), Some(root));
    }
}

// ========== Unsupported constructs ==========

#[test]
fn test_script_is_recorded_when_scripting() {
    let output = HTMLParser::new("<script>alert(1)</script><p>after")
        .with_options(ParserOptions::new().with_scripting(true))
        .parse()
        .unwrap();
    assert_eq!(output.unsupported.len(), 1);
    assert_eq!(
        output.unsupported[0].reason,
        UnsupportedReason::ScriptExecution
    );
    assert!(output.tree.body().is_some());
}

#[test]
fn test_script_is_not_unsupported_without_scripting() {
    let output = parse_document("<script>alert(1)</script>");
    assert!(output.unsupported.is_empty());
}

#[test]
fn test_strict_policy_fails_on_unsupported() {
    let result = HTMLParser::new("<template shadowrootmode=open></template>")
        .with_options(ParserOptions::new().strict())
        .parse();
    let Err(HtmlError::Unsupported(unsupported)) = result else {
        panic!("expected an unsupported error, got {result:?}");
    };
    assert_eq!(unsupported.reason, UnsupportedReason::DeclarativeShadowRoot);
}

#[test]
fn test_parse_errors_are_not_unsupported() {
    let output = HTMLParser::new("<b><p></b></i></p>")
        .with_options(ParserOptions::new().strict())
        .parse()
        .unwrap();
    assert!(!output.errors.is_empty());
    assert!(output.unsupported.is_empty());
}

#[test]
fn test_meta_charset_change_is_unsupported() {
    let output = parse_document(r#"<meta charset="iso-8859-1">"#);
    assert_eq!(
        output.unsupported[0].reason,
        UnsupportedReason::EncodingChange
    );
}

#[test]
fn test_custom_element_definition_is_unsupported() {
    let mut registry = ElementRegistry::new();
    assert!(registry.define("x-widget", None));
    let output = HTMLParser::new("<x-widget></x-widget>")
        .with_factory(&registry)
        .parse()
        .unwrap();
    assert_eq!(
        output.unsupported[0].reason,
        UnsupportedReason::CustomElementConstruction
    );
    let body = output.tree.body().unwrap();
    let widget = output.tree.as_element(output.tree.children(body)[0]).unwrap();
    assert_eq!(
        widget.state.custom_element_state,
        CustomElementState::Undefined
    );
}

#[test]
fn test_element_factory_override_is_used() {
    fn tagged(init: ElementInit) -> ElementData {
        let mut element = create_standard_element(init);
        element
            .attrs
            .push(wicket_dom::Attribute::new("data-factory", "yes"));
        element
    }

    let mut registry = ElementRegistry::new();
    registry.register(Namespace::Html, "p", tagged);
    let output = HTMLParser::new("<p>x</p><div></div>")
        .with_factory(&registry)
        .parse()
        .unwrap();
    let body = output.tree.body().unwrap();
    let children = output.tree.children(body);
    assert_eq!(
        output.tree.as_element(children[0]).unwrap().attr("data-factory"),
        Some("yes")
    );
    assert_eq!(
        output.tree.as_element(children[1]).unwrap().attr("data-factory"),
        None
    );
}

// ========== Driver ==========

#[test]
fn test_cleared_continue_flag_cancels_before_first_token() {
    let flag = Arc::new(AtomicBool::new(false));
    let result = HTMLParser::new("<p>never parsed")
        .with_cancel_flag(flag)
        .parse();
    assert_eq!(result.unwrap_err(), HtmlError::Cancelled { tokens: 0 });
}

#[test]
fn test_set_continue_flag_parses_normally() {
    let flag = Arc::new(AtomicBool::new(true));
    let output = HTMLParser::new("<p>x").with_cancel_flag(flag).parse().unwrap();
    assert!(output.tree.body().is_some());
}

#[test]
fn test_error_reporter_sees_every_error_in_order() {
    let mut seen = Vec::new();
    let output = HTMLParser::new("<p></b>&#0;")
        .with_error_reporter(|error| seen.push(error.code))
        .parse()
        .unwrap();
    let recorded: Vec<ParseErrorCode> = output.errors.iter().map(|e| e.code).collect();
    assert_eq!(seen, recorded);
    assert_eq!(seen[0], ParseErrorCode::MissingDoctype);
    assert!(seen.contains(&ParseErrorCode::NullCharacterReference));
}

#[test]
fn test_max_errors_caps_recorded_errors() {
    let output = HTMLParser::new("</a></b></c></d>")
        .with_options(ParserOptions::new().with_max_errors(2))
        .parse()
        .unwrap();
    assert_eq!(output.errors.len(), 2);
}

#[test]
fn test_stack_is_empty_after_parse() {
    let output = parse_document("<div><span><b>unclosed");
    let stats = output.stack_stats;
    assert_eq!(stats.final_depth, 0);
    assert_eq!(stats.pushes, stats.pops);
    assert!(stats.pushes >= 5);
}

#[test]
fn test_insertion_mode_names() {
    assert_eq!(InsertionMode::InTableText.to_string(), "InTableText");
}

#[test]
fn test_tree_links_are_consistent() {
    let output = parse_document("<table><b>x<tr><td><i>y</table><p>z");
    let tree = &output.tree;
    for index in 0..tree.len() {
        let id = NodeId(index);
        for &child in tree.children(id) {
            assert_eq!(tree.parent(child), Some(id));
        }
        if let Some(node) = tree.get(id)
            && let NodeType::Element(element) = &node.node_type
        {
            assert!(!element.local_name.is_empty());
        }
    }
}
