use crate::parser::tests::dump;

#[test]
fn wiki_link_with_alias() {
    insta::assert_snapshot!(dump("[[Page|Alias]]\n"), @r#"
    Document
      Paragraph
        WikiLink
          WikiLinkMark "[["
          WikiLinkPage "Page"
          WikiLinkMark "|"
          WikiLinkAlias "Alias"
          WikiLinkMark "]]"
    "#);
}

#[test]
fn attributes() {
    insta::assert_snapshot!(dump("[due: 2024-05-01] [tags:: [a, b]]\n"), @r#"
    Document
      Paragraph
        Attribute
          AttributeMark "["
          AttributeName "due"
          Colon ":"
          Text " "
          AttributeValue "2024-05-01"
          AttributeMark "]"
        Text " "
        Attribute
          AttributeMark "["
          AttributeName "tags"
          DoubleColon "::"
          Text " "
          AttributeValue "[a, b]"
          AttributeMark "]"
    "#);
}

#[test]
fn link_and_image() {
    insta::assert_snapshot!(dump("[see *this*](http://a.b) ![alt](img.png)\n"), @r#"
    Document
      Paragraph
        Link
          LinkMark "["
          Text "see "
          Emphasis
            EmphasisMark "*"
            Text "this"
            EmphasisMark "*"
          LinkMark "]"
          LinkMark "("
          Url "http://a.b"
          LinkMark ")"
        Text " "
        Image
          LinkMark "!["
          Text "alt"
          LinkMark "]"
          LinkMark "("
          Url "img.png"
          LinkMark ")"
    "#);
}

#[test]
fn command_links() {
    insta::assert_snapshot!(dump(r#"{[Cmd: Run|Go]("a", 1)} {[Plain]}"#), @r#"
    Document
      Paragraph
        CommandLink
          CommandLinkMark "{["
          CommandLinkName "Cmd: Run"
          CommandLinkMark "|"
          CommandLinkAlias "Go"
          CommandLinkMark "]"
          CommandLinkMark "("
          CommandLinkArgs "\"a\", 1"
          CommandLinkMark ")"
          CommandLinkMark "}"
        Text " "
        CommandLink
          CommandLinkMark "{["
          CommandLinkName "Plain"
          CommandLinkMark "]"
          CommandLinkMark "}"
    "#);
}

#[test]
fn command_link_with_empty_args() {
    insta::assert_snapshot!(dump("{[Go]()}"), @r#"
    Document
      Paragraph
        CommandLink
          CommandLinkMark "{["
          CommandLinkName "Go"
          CommandLinkMark "]"
          CommandLinkMark "("
          CommandLinkMark ")"
          CommandLinkMark "}"
    "#);
}

#[test]
fn incomplete_brackets_are_text() {
    insta::assert_snapshot!(dump("[[unclosed and [x] and ![no](url with space)\n"), @r#"
    Document
      Paragraph
        Text "[[unclosed and [x] and ![no](url with space)"
    "#);
}

#[test]
fn attribute_needs_a_value() {
    insta::assert_snapshot!(dump("[note:] [:x]"), @r#"
    Document
      Paragraph
        Text "[note:] [:x]"
    "#);
}
