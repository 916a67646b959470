use crate::parser::cst::SyntaxKind;
use crate::parser::tests::dump;
use crate::parser::{Grammar, parse};
use crate::tree::collect_nodes_of_type;
use indoc::indoc;

#[test]
fn directive_with_body() {
    let input = indoc! {"
    <!-- #note kind=x -->
    inside **b**
    <!-- /note -->
    "};

    insta::assert_snapshot!(dump(input), @r##"
    Document
      Directive
        DirectiveStart
          DirectiveMark "<!--"
          Text " "
          DirectiveName "#note"
          Text " "
          DirectiveArgs "kind=x"
          Text " "
          DirectiveMark "-->"
        Paragraph
          Text "inside "
          Strong
            EmphasisMark "**"
            Text "b"
            EmphasisMark "**"
        DirectiveEnd
          DirectiveMark "<!--"
          Text " "
          DirectiveName "/note"
          Text " "
          DirectiveMark "-->"
    "##);
}

#[test]
fn query_directive() {
    let input = indoc! {"
    <!-- #query task limit 5 -->
    <!-- /query -->
    "};

    insta::assert_snapshot!(dump(input), @r##"
    Document
      Directive
        DirectiveStart
          DirectiveMark "<!--"
          Text " "
          DirectiveName "#query"
          Text " "
          Query
            Id "task"
            LimitClause
              KwLimit "limit"
              NumberExpr
                Number "5"
          Text " "
          DirectiveMark "-->"
        DirectiveEnd
          DirectiveMark "<!--"
          Text " "
          DirectiveName "/query"
          Text " "
          DirectiveMark "-->"
    "##);
}

#[test]
fn unclosed_directive_is_a_comment() {
    let input = indoc! {"
    <!-- #a -->
    text
    "};

    insta::assert_snapshot!(dump(input), @r#"
    Document
      Paragraph
        Comment
          CommentMark "<!--"
          CommentText " #a "
          CommentMark "-->"
        Text "text"
    "#);
}

#[test]
fn same_name_directives_nest() {
    let input = indoc! {"
    <!-- #a -->
    <!-- #a -->
    x
    <!-- /a -->
    <!-- /a -->
    "};
    let root = parse(&Grammar::default(), input).syntax();

    let directives = collect_nodes_of_type(&root, SyntaxKind::Directive);
    assert_eq!(directives.len(), 2);
    assert_eq!(directives[1].parent().as_ref(), Some(&directives[0]));
    assert_eq!(directives[0].text().to_string(), input.trim_end());
}

#[test]
fn other_directives_do_not_close() {
    let input = indoc! {"
    <!-- #a -->
    <!-- /b -->
    <!-- /a -->
    "};

    insta::assert_snapshot!(dump(input), @r##"
    Document
      Directive
        DirectiveStart
          DirectiveMark "<!--"
          Text " "
          DirectiveName "#a"
          Text " "
          DirectiveMark "-->"
        Paragraph
          Comment
            CommentMark "<!--"
            CommentText " /b "
            CommentMark "-->"
        DirectiveEnd
          DirectiveMark "<!--"
          Text " "
          DirectiveName "/a"
          Text " "
          DirectiveMark "-->"
    "##);
}
