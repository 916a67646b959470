use crate::parser::tests::dump_query;

#[test]
fn empty_query() {
    insta::assert_snapshot!(dump_query(""), @"Query");
}

#[test]
fn source_path() {
    insta::assert_snapshot!(dump_query("my-pages/2024 limit 3"), @r#"
    Query
      Id "my-pages/2024"
      LimitClause
        KwLimit "limit"
        NumberExpr
          Number "3"
    "#);
}

#[test]
fn membership_and_order() {
    insta::assert_snapshot!(dump_query("task where a.b in [1, 2] order by x desc"), @r#"
    Query
      Id "task"
      WhereClause
        KwWhere "where"
        BinaryExpr
          AttrExpr
            Name
              Id "a"
            Dot "."
            Id "b"
          KwIn "in"
          ListExpr
            BracketOpen "["
            NumberExpr
              Number "1"
            Comma ","
            NumberExpr
              Number "2"
            BracketClose "]"
      OrderClause
        KwOrder "order"
        KwBy "by"
        OrderItem
          Name
            Id "x"
          KwDesc "desc"
    "#);
}

#[test]
fn page_ref_operand() {
    insta::assert_snapshot!(dump_query("p where page = [[Foo]]"), @r#"
    Query
      Id "p"
      WhereClause
        KwWhere "where"
        BinaryExpr
          Name
            Id "page"
          Eq "="
          StringExpr
            PageRef "[[Foo]]"
    "#);
}

#[test]
fn logical_precedence() {
    insta::assert_snapshot!(dump_query("p where a or b and not_c"), @r#"
    Query
      Id "p"
      WhereClause
        KwWhere "where"
        LogicalExpr
          Name
            Id "a"
          KwOr "or"
          LogicalExpr
            Name
              Id "b"
            KwAnd "and"
            Name
              Id "not_c"
    "#);
}

#[test]
fn select_and_render() {
    insta::assert_snapshot!(dump_query(r#"task select upper(name) as n, 1 + 2 * 3 render "row" all"#), @r#"
    Query
      Id "task"
      SelectClause
        KwSelect "select"
        SelectItem
          CallExpr
            Id "upper"
            ArgList
              ParenOpen "("
              Name
                Id "name"
              ParenClose ")"
          KwAs "as"
          Name
            Id "n"
        Comma ","
        SelectItem
          BinaryExpr
            NumberExpr
              Number "1"
            Plus "+"
            BinaryExpr
              NumberExpr
                Number "2"
              Star "*"
              NumberExpr
                Number "3"
      RenderClause
        KwRender "render"
        String "\"row\""
        KwAll "all"
    "#);
}

#[test]
fn regex_and_negative_numbers() {
    insta::assert_snapshot!(dump_query(r"task where name =~ /^a\/b/ and n > -1"), @r#"
    Query
      Id "task"
      WhereClause
        KwWhere "where"
        LogicalExpr
          BinaryExpr
            Name
              Id "name"
            Match "=~"
            RegexExpr
              RegexLit "/^a\\/b/"
          KwAnd "and"
          BinaryExpr
            Name
              Id "n"
            Gt ">"
            NumberExpr
              Minus "-"
              Number "1"
    "#);
}

#[test]
fn multiline_query() {
    let input = "task\n  where done\n  limit 1\n";

    insta::assert_snapshot!(dump_query(input), @r#"
    Query
      Id "task"
      WhereClause
        KwWhere "where"
        Name
          Id "done"
      LimitClause
        KwLimit "limit"
        NumberExpr
          Number "1"
    "#);
}
