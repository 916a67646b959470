use crate::parser::parse_query;
use crate::parser::tests::{dump_query, query_errors};
use crate::tree::render_to_text;

#[test]
fn valid_query_has_no_diagnostics() {
    let parse = parse_query("task where a = 1 order by b limit 2 select c render [[t]]");
    assert!(parse.diagnostics().is_empty());
}

#[test]
fn missing_source() {
    insta::assert_snapshot!(query_errors("where a = 1"), @"error at 0..5: expected a query source (hint: a query starts with the page or collection to read, e.g. `task`)");
}

#[test]
fn missing_operand() {
    insta::assert_snapshot!(query_errors("task where a = "), @"error at 15..15: expected an expression");
}

#[test]
fn missing_where_expression() {
    insta::assert_snapshot!(query_errors("task where limit 1"), @"error at 11..16: expected an expression");
}

#[test]
fn unclosed_paren() {
    insta::assert_snapshot!(query_errors("task where (a = 1"), @"error at 11..17: missing closing `)` (related: opened here at 11..12)");
}

#[test]
fn unclosed_list() {
    insta::assert_snapshot!(query_errors("task where a in [1, 2"), @"error at 16..21: missing closing `]` (related: opened here at 16..17)");
}

#[test]
fn missing_by() {
    insta::assert_snapshot!(query_errors("task order x"), @"error at 11..12: expected `by` after `order`");
}

#[test]
fn duplicate_limit_is_a_warning() {
    let parse = parse_query("task limit 1 limit 2");
    assert!(!parse.diagnostics().has_errors());
    assert!(parse.diagnostics().has_warnings());
    insta::assert_snapshot!(parse.diagnostics().to_string(), @"warning at 13..18: `limit` given more than once (hint: only the last `limit` is used)");
}

#[test]
fn trailing_input() {
    let input = "task where a = 1 )";

    insta::assert_snapshot!(query_errors(input), @"error at 17..18: unexpected input after query: expected `where`, `order by`, `limit`, `select` or `render`");
    insta::assert_snapshot!(dump_query(input), @r#"
    Query
      Id "task"
      WhereClause
        KwWhere "where"
        BinaryExpr
          Name
            Id "a"
          Eq "="
          NumberExpr
            Number "1"
      Error
        ParenClose ")"
    "#);
}

#[test]
fn render_needs_a_target() {
    insta::assert_snapshot!(query_errors("task render"), @"error at 11..11: expected a page reference (hint: e.g., `render [[templates/row]]`)");
}

#[test]
fn select_alias_needs_a_name() {
    insta::assert_snapshot!(query_errors("task select a as 1"), @"error at 17..18: expected a name");
}

#[test]
fn unterminated_regex() {
    let input = "task where a =~ /abc";

    insta::assert_snapshot!(query_errors(input), @r"
    error at 16..17: missing closing `/`
    error at 17..20: unexpected input after query: expected `where`, `order by`, `limit`, `select` or `render`
    ");
}

#[test]
fn garbage_in_list_recovers_at_comma() {
    let input = "task where a in [1, ^^, 3]";

    insta::assert_snapshot!(query_errors(input), @"error at 20..22: expected an expression: expected a list element");
    insta::assert_snapshot!(dump_query(input), @r#"
    Query
      Id "task"
      WhereClause
        KwWhere "where"
        BinaryExpr
          Name
            Id "a"
          KwIn "in"
          ListExpr
            BracketOpen "["
            NumberExpr
              Number "1"
            Comma ","
            Error
              Garbage "^^"
            Comma ","
            NumberExpr
              Number "3"
            BracketClose "]"
    "#);
}

#[test]
fn deep_nesting_is_an_error_not_a_crash() {
    let input = format!("task where {}a{}", "(".repeat(100), ")".repeat(100));
    let parse = parse_query(&input);

    assert_eq!(render_to_text(&parse.syntax()), input);
    assert!(parse.diagnostics().has_errors());
    assert!(
        parse
            .diagnostics()
            .iter()
            .any(|d| d.message().contains("nested too deeply"))
    );
}

#[test]
fn long_source_path_is_one_token() {
    let path = format!("{}a", "a-".repeat(200));
    let parse = parse_query(&path);

    assert!(parse.diagnostics().is_empty(), "{}", parse.diagnostics());
    let source = parse.syntax().first_token().map(|t| t.text().to_string());
    assert_eq!(source, Some(path));
}

#[test]
fn any_input_round_trips() {
    for input in [
        "task where = = ( [ , ] ) order by , limit select as render",
        ")))",
        "task where \"unterminated",
        "task where f(a, b",
        "[[page]] where",
        "task\r\n where\t",
        "task where a.",
    ] {
        let parse = parse_query(input);
        assert_eq!(render_to_text(&parse.syntax()), input, "input: {input:?}");
        assert!(parse.diagnostics().has_errors(), "input: {input:?}");
    }
}
