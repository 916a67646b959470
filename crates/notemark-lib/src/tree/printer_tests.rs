use indoc::indoc;

use super::*;
use crate::parser::{Grammar, GrammarExtension, build_grammar, parse};

const SOURCE: &str = indoc! {"
    # Tasks

    - [ ] water [[Plants]]
"};

#[test]
fn dump_hides_trivia() {
    let root = parse(&Grammar::default(), SOURCE).syntax();

    insta::assert_snapshot!(CstPrinter::new(&root).dump(), @r##"
    Document
      Heading
        HeadingMark "#"
        Text " Tasks"
      BulletList
        ListItem
          ListMark "-"
          Text " "
          Task
            TaskState
              TaskMark "["
              TaskMarker " "
              TaskMark "]"
            Text " water "
            WikiLink
              WikiLinkMark "[["
              WikiLinkPage "Plants"
              WikiLinkMark "]]"
    "##);
}

#[test]
fn dump_with_spans() {
    let root = parse(&Grammar::default(), SOURCE).syntax();

    insta::assert_snapshot!(CstPrinter::new(&root).with_spans(true).dump(), @r##"
    Document [0..32]
      Heading [0..7]
        HeadingMark [0..1] "#"
        Text [1..7] " Tasks"
      BulletList [9..31]
        ListItem [9..31]
          ListMark [9..10] "-"
          Text [10..11] " "
          Task [11..31]
            TaskState [11..14]
              TaskMark [11..12] "["
              TaskMarker [12..13] " "
              TaskMark [13..14] "]"
            Text [14..21] " water "
            WikiLink [21..31]
              WikiLinkMark [21..23] "[["
              WikiLinkPage [23..29] "Plants"
              WikiLinkMark [29..31] "]]"
    "##);
}

#[test]
fn dump_with_trivia() {
    let root = parse(&Grammar::default(), "# A\n\nb\n").syntax();

    insta::assert_snapshot!(CstPrinter::new(&root).with_trivia(true).dump(), @r##"
    Document
      Heading
        HeadingMark "#"
        Text " A"
      Newline "\n"
      Newline "\n"
      Paragraph
        Text "b"
      Newline "\n"
    "##);
}

#[test]
fn dump_resolves_extension_names() {
    let grammar =
        build_grammar([GrammarExtension::new("Mention", "@[a-z]+").with_trigger('@')]).unwrap();
    let root = parse(&grammar, "hi @bob!").syntax();

    insta::assert_snapshot!(CstPrinter::new(&root).grammar(&grammar).dump(), @r#"
    Document
      Paragraph
        Text "hi "
        Mention
          Text "@bob"
        Text "!"
    "#);

    insta::assert_snapshot!(CstPrinter::new(&root).dump(), @r#"
    Document
      Paragraph
        Text "hi "
        Extension
          Text "@bob"
        Text "!"
    "#);
}

#[test]
fn dump_query_root() {
    let root = crate::parser::parse_query("task where done = false").syntax();

    insta::assert_snapshot!(CstPrinter::new(&root).dump(), @r#"
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
    "#);
}
