use crate::parser::cst::SyntaxKind;
use crate::parser::tests::dump;
use crate::parser::{Grammar, parse};
use crate::tree::{find_node_of_type, render_to_text};
use indoc::indoc;

#[test]
fn documents_never_report_diagnostics() {
    let input = indoc! {"
    [[unclosed
    **open
    ```
    never closed
    "};
    let parse = parse(&Grammar::default(), input);
    assert!(parse.diagnostics().is_empty());
}

#[test]
fn broken_query_fence_keeps_its_diagnostics() {
    let input = indoc! {"
    ```query
    task where (a
    ```
    "};
    let parse = parse(&Grammar::default(), input);

    insta::assert_snapshot!(parse.diagnostics().to_string(), @"error at 20..23: missing closing `)` (related: opened here at 20..21)");
}

#[test]
fn broken_query_fence_tree() {
    let input = indoc! {"
    ```query
    where
    ```
    "};

    insta::assert_snapshot!(dump(input), @r#"
    Document
      CodeBlock
        CodeMark "```"
        CodeInfo "query"
        Query
          WhereClause
            KwWhere "where"
        CodeMark "```"
    "#);
}

#[test]
fn blank_query_fence_is_code() {
    let input = "```query\n\n```\n";

    insta::assert_snapshot!(dump(input), @r#"
    Document
      CodeBlock
        CodeMark "```"
        CodeInfo "query"
        CodeText "\n"
        CodeMark "```"
    "#);
}

#[test]
fn stray_closers_are_text() {
    insta::assert_snapshot!(dump("]] ** ) } -->"), @r#"
    Document
      Paragraph
        Text "]] ** ) } -->"
    "#);
}

#[test]
fn lone_angle_and_backslash_are_text() {
    insta::assert_snapshot!(dump("a < b \\ c"), @r#"
    Document
      Paragraph
        Text "a < b \\ c"
    "#);
}

#[test]
fn long_source_path_in_fence() {
    let path = format!("{}a", "a-".repeat(200));
    let input = format!("```query\n{path}\n```\n");
    let parse = parse(&Grammar::default(), &input);
    let root = parse.syntax();

    assert_eq!(render_to_text(&root), input);
    assert!(parse.diagnostics().is_empty(), "{}", parse.diagnostics());
    let query = find_node_of_type(&root, SyntaxKind::Query).unwrap();
    let source = query.first_token().map(|t| t.text().to_string());
    assert_eq!(source, Some(path));
}

#[test]
fn fence_info_after_unicode_whitespace() {
    for input in ["```\u{a0}a\n", "```\u{3000}rust\n```\n", "```\ré"] {
        let root = parse(&Grammar::default(), input).syntax();
        assert_eq!(render_to_text(&root), input, "input: {input:?}");
    }

    let root = parse(&Grammar::default(), "```\u{a0}query\ntask\n```\n").syntax();
    let info = root
        .descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == SyntaxKind::CodeInfo)
        .unwrap();
    assert_eq!(info.text(), "query");
    assert!(find_node_of_type(&root, SyntaxKind::Query).is_some());
}

#[test]
fn whitespace_only_query_fence_is_code() {
    let root = parse(&Grammar::default(), "```query\n \u{a0}\n\n```\n").syntax();
    assert!(find_node_of_type(&root, SyntaxKind::Query).is_none());
    assert!(find_node_of_type(&root, SyntaxKind::CodeBlock).is_some());
}
