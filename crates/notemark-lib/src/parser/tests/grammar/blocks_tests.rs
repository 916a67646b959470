use crate::parser::tests::dump;
use indoc::indoc;

#[test]
fn empty_document() {
    insta::assert_snapshot!(dump(""), @"Document");
}

#[test]
fn heading_and_paragraph() {
    let input = indoc! {"
    # Title

    Some *em* text.
    "};

    insta::assert_snapshot!(dump(input), @r##"
    Document
      Heading
        HeadingMark "#"
        Text " Title"
      Paragraph
        Text "Some "
        Emphasis
          EmphasisMark "*"
          Text "em"
          EmphasisMark "*"
        Text " text."
    "##);
}

#[test]
fn heading_needs_a_space() {
    insta::assert_snapshot!(dump("#tag\n"), @r##"
    Document
      Paragraph
        Hashtag "#tag"
    "##);
}

#[test]
fn paragraph_runs_until_interrupted() {
    let input = indoc! {"
    one
    two
    # three
    "};

    insta::assert_snapshot!(dump(input), @r##"
    Document
      Paragraph
        Text "one"
        Text "two"
      Heading
        HeadingMark "#"
        Text " three"
    "##);
}

#[test]
fn front_matter() {
    let input = indoc! {"
    ---
    title: x
    ---
    # Hi
    "};

    insta::assert_snapshot!(dump(input), @r##"
    Document
      FrontMatter
        FrontMatterMarker "---"
        FrontMatterCode "title: x\n"
        FrontMatterMarker "---"
      Heading
        HeadingMark "#"
        Text " Hi"
    "##);
}

#[test]
fn unclosed_front_matter_is_content() {
    let input = indoc! {"
    ---
    title: x
    "};

    insta::assert_snapshot!(dump(input), @r#"
    Document
      HorizontalRule
        HorizontalRuleMark "---"
      Paragraph
        Text "title: x"
    "#);
}

#[test]
fn code_block() {
    let input = indoc! {"
    ```rust
    fn main() {}
    ```
    "};

    insta::assert_snapshot!(dump(input), @r#"
    Document
      CodeBlock
        CodeMark "```"
        CodeInfo "rust"
        CodeText "fn main() {}\n"
        CodeMark "```"
    "#);
}

#[test]
fn unclosed_code_block_runs_to_end() {
    insta::assert_snapshot!(dump("```\ncode\n"), @r#"
    Document
      CodeBlock
        CodeMark "```"
        CodeText "code\n"
    "#);
}

#[test]
fn query_fence() {
    let input = indoc! {"
    ```query
    task where done = false
    ```
    "};

    insta::assert_snapshot!(dump(input), @r#"
    Document
      CodeBlock
        CodeMark "```"
        CodeInfo "query"
        Query
          Id "task"
          WhereClause
            KwWhere "where"
            BinaryExpr
              Name
                Id "done"
              Eq "="
              BoolExpr
                KwFalse "false"
        CodeMark "```"
    "#);
}

#[test]
fn blockquote() {
    let input = indoc! {"
    > one
    > two

    after
    "};

    insta::assert_snapshot!(dump(input), @r#"
    Document
      Blockquote
        QuoteMark ">"
        Text " one"
        QuoteMark ">"
        Text " two"
      Paragraph
        Text "after"
    "#);
}

#[test]
fn nested_bullet_list() {
    let input = indoc! {"
    - a
      - b
    - c
    "};

    insta::assert_snapshot!(dump(input), @r#"
    Document
      BulletList
        ListItem
          ListMark "-"
          Text " a"
          BulletList
            ListItem
              Text "  "
              ListMark "-"
              Text " b"
        ListItem
          ListMark "-"
          Text " c"
    "#);
}

#[test]
fn ordered_list_with_tasks() {
    let input = indoc! {"
    1. [TODO] a
    2. [x] b
    "};

    insta::assert_snapshot!(dump(input), @r#"
    Document
      OrderedList
        ListItem
          ListMark "1."
          Text " "
          Task
            TaskState
              TaskMark "["
              TaskMarker "TODO"
              TaskMark "]"
            Text " a"
        ListItem
          ListMark "2."
          Text " "
          Task
            TaskState
              TaskMark "["
              TaskMarker "x"
              TaskMark "]"
            Text " b"
    "#);
}

#[test]
fn list_type_change_starts_new_list() {
    let input = indoc! {"
    - a
    1. b
    "};

    insta::assert_snapshot!(dump(input), @r#"
    Document
      BulletList
        ListItem
          ListMark "-"
          Text " a"
      OrderedList
        ListItem
          ListMark "1."
          Text " b"
    "#);
}

#[test]
fn rule_is_not_a_list() {
    let input = indoc! {"
    - a
    ---
    "};

    insta::assert_snapshot!(dump(input), @r#"
    Document
      BulletList
        ListItem
          ListMark "-"
          Text " a"
      HorizontalRule
        HorizontalRuleMark "---"
    "#);
}

#[test]
fn table() {
    let input = indoc! {"
    | a | b |
    |---|---|
    | 1 | [[P|Q]] |
    "};

    insta::assert_snapshot!(dump(input), @r#"
    Document
      Table
        TableHeader
          TablePipe "|"
          TableCell
            Text " a "
          TablePipe "|"
          TableCell
            Text " b "
          TablePipe "|"
        TableDelimiterRow "|---|---|"
        TableRow
          TablePipe "|"
          TableCell
            Text " 1 "
          TablePipe "|"
          TableCell
            Text " "
            WikiLink
              WikiLinkMark "[["
              WikiLinkPage "P"
              WikiLinkMark "|"
              WikiLinkAlias "Q"
              WikiLinkMark "]]"
            Text " "
          TablePipe "|"
    "#);
}

#[test]
fn pipes_without_delimiter_row_are_text() {
    insta::assert_snapshot!(dump("a | b\n"), @r#"
    Document
      Paragraph
        Text "a | b"
    "#);
}
