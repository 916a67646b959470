use crate::parser::tests::dump;

#[test]
fn emphasis_kinds() {
    insta::assert_snapshot!(dump("*a* **b** ~~c~~ ==d== _e_\n"), @r#"
    Document
      Paragraph
        Emphasis
          EmphasisMark "*"
          Text "a"
          EmphasisMark "*"
        Text " "
        Strong
          EmphasisMark "**"
          Text "b"
          EmphasisMark "**"
        Text " "
        Strikethrough
          EmphasisMark "~~"
          Text "c"
          EmphasisMark "~~"
        Text " "
        Highlight
          EmphasisMark "=="
          Text "d"
          EmphasisMark "=="
        Text " "
        Emphasis
          EmphasisMark "_"
          Text "e"
          EmphasisMark "_"
    "#);
}

#[test]
fn intraword_underscores_are_text() {
    insta::assert_snapshot!(dump("snake_case_name\n"), @r#"
    Document
      Paragraph
        Text "snake_case_name"
    "#);
}

#[test]
fn unmatched_delimiters_are_text() {
    insta::assert_snapshot!(dump("a * b ** c ~~"), @r#"
    Document
      Paragraph
        Text "a * b ** c ~~"
    "#);
}

#[test]
fn emphasis_does_not_cross_blocks() {
    insta::assert_snapshot!(dump("*a\n\nb*"), @r#"
    Document
      Paragraph
        Text "*a"
      Paragraph
        Text "b*"
    "#);
}

#[test]
fn code_comment_and_hashtag() {
    insta::assert_snapshot!(dump("use `a*b*` here <!-- note --> #tag #1\n"), @r##"
    Document
      Paragraph
        Text "use "
        InlineCode
          CodeMark "`"
          CodeText "a*b*"
          CodeMark "`"
        Text " here "
        Comment
          CommentMark "<!--"
          CommentText " note "
          CommentMark "-->"
        Text " "
        Hashtag "#tag"
        Text " #1"
    "##);
}

#[test]
fn hashtag_with_path() {
    insta::assert_snapshot!(dump("#project/alpha-2, done"), @r##"
    Document
      Paragraph
        Hashtag "#project/alpha-2"
        Text ", done"
    "##);
}

#[test]
fn naked_url_and_escapes() {
    insta::assert_snapshot!(dump("see https://example.com/a. \\*not em\\*\n"), @r#"
    Document
      Paragraph
        Text "see "
        NakedUrl "https://example.com/a"
        Text ". "
        Escape "\\*"
        Text "not em"
        Escape "\\*"
    "#);
}

#[test]
fn comment_spans_lines() {
    insta::assert_snapshot!(dump("a <!-- x\ny --> b"), @r#"
    Document
      Paragraph
        Text "a "
        Comment
          CommentMark "<!--"
          CommentText " x\ny "
          CommentMark "-->"
        Text " b"
    "#);
}
