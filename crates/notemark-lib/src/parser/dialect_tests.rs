use indoc::indoc;

use super::dialect::DEFAULT_MAX_DEPTH;
use super::*;
use crate::tree::{CstPrinter, render_to_text};

fn dump(grammar: &Grammar, source: &str) -> String {
    let root = parse(grammar, source).syntax();
    assert_eq!(render_to_text(&root), source);
    CstPrinter::new(&root).grammar(grammar).dump()
}

#[test]
fn default_grammar() {
    let grammar = Grammar::default();
    assert_eq!(grammar.max_depth(), DEFAULT_MAX_DEPTH);
    assert!(!grammar.has_extensions());
    assert_eq!(grammar.extension_names().count(), 0);
}

#[test]
fn extension_names_keep_registration_order() {
    let grammar = Grammar::builder()
        .extension(GrammarExtension::new("Mention", "@[a-z]+"))
        .extension(GrammarExtension::new("Ticket", "[A-Z]+-[0-9]+"))
        .max_depth(8)
        .build()
        .unwrap();

    assert_eq!(grammar.extension_names().collect::<Vec<_>>(), ["Mention", "Ticket"]);
    assert_eq!(grammar.extension_name(1), Some("Ticket"));
    assert_eq!(grammar.extension_name(2), None);
    assert_eq!(grammar.max_depth(), 8);
}

#[test]
fn rejects_empty_name() {
    let err = build_grammar([GrammarExtension::new("", "x")]).unwrap_err();
    assert!(matches!(err, GrammarError::EmptyName));
}

#[test]
fn rejects_builtin_name() {
    let err = build_grammar([GrammarExtension::new("WikiLink", "x")]).unwrap_err();
    assert_eq!(err.to_string(), "extension `WikiLink` shadows a built-in node kind");
}

#[test]
fn rejects_duplicate_name() {
    let err = build_grammar([
        GrammarExtension::new("Mention", "@[a-z]+"),
        GrammarExtension::new("Mention", "@[A-Z]+"),
    ])
    .unwrap_err();
    assert_eq!(err.to_string(), "extension `Mention` is registered twice");
}

#[test]
fn rejects_invalid_pattern() {
    let err = build_grammar([GrammarExtension::new("Broken", "(")]).unwrap_err();
    let GrammarError::InvalidPattern { name, .. } = &err else {
        panic!("expected InvalidPattern, got {err:?}");
    };
    assert_eq!(name, "Broken");
    assert!(err.to_string().starts_with("extension `Broken` has an invalid pattern"));
}

#[test]
fn extensions_deserialize_from_json() {
    let extensions: Vec<GrammarExtension> = serde_json::from_str(
        r#"[{"name": "Mention", "pattern": "@[a-z]+", "trigger": "@"}, {"name": "Ticket", "pattern": "T-[0-9]+"}]"#,
    )
    .unwrap();
    assert_eq!(
        extensions,
        [
            GrammarExtension::new("Mention", "@[a-z]+").with_trigger('@'),
            GrammarExtension::new("Ticket", "T-[0-9]+"),
        ]
    );

    let unknown = serde_json::from_str::<Vec<GrammarExtension>>(
        r#"[{"name": "A", "pattern": "a", "kind": 1}]"#,
    );
    assert!(unknown.is_err());
}

#[test]
fn first_registered_extension_wins() {
    let grammar = build_grammar([
        GrammarExtension::new("Tag", "@[a-z]+"),
        GrammarExtension::new("Mention", "@[a-z]+"),
    ])
    .unwrap();

    insta::assert_snapshot!(dump(&grammar, "@bob"), @r#"
    Document
      Paragraph
        Tag
          Text "@bob"
    "#);
}

#[test]
fn extensions_take_precedence_over_builtins() {
    let grammar = build_grammar([GrammarExtension::new("Embed", r"\[\[[^\]]+\]\]")]).unwrap();

    insta::assert_snapshot!(dump(&grammar, "see [[Page]]"), @r#"
    Document
      Paragraph
        Text "see "
        Embed
          Text "[[Page]]"
    "#);
}

#[test]
fn trigger_limits_match_positions() {
    let grammar =
        build_grammar([GrammarExtension::new("Ticket", "[A-Z]+-[0-9]+").with_trigger('T')]).unwrap();

    insta::assert_snapshot!(dump(&grammar, "ABC-1 TKT-2"), @r#"
    Document
      Paragraph
        Text "ABC-1 "
        Ticket
          Text "TKT-2"
    "#);
}

#[test]
fn extension_match_stops_at_block_end() {
    let grammar = build_grammar([GrammarExtension::new("Shout", "[A-Z!\n]+")]).unwrap();
    let source = indoc! {"
        # HI
        THERE
    "};

    insta::assert_snapshot!(dump(&grammar, source), @r##"
    Document
      Heading
        HeadingMark "#"
        Text " "
        Shout
          Text "HI"
      Paragraph
        Shout
          Text "THERE"
    "##);
}

#[test]
fn nesting_limit_degrades_markup_to_text() {
    let source = "**a *b* c**";

    insta::assert_snapshot!(dump(&Grammar::default(), source), @r#"
    Document
      Paragraph
        Strong
          EmphasisMark "**"
          Text "a "
          Emphasis
            EmphasisMark "*"
            Text "b"
            EmphasisMark "*"
          Text " c"
          EmphasisMark "**"
    "#);

    let shallow = Grammar::builder().max_depth(1).build().unwrap();
    insta::assert_snapshot!(dump(&shallow, source), @r#"
    Document
      Paragraph
        Strong
          EmphasisMark "**"
          Text "a *b* c"
          EmphasisMark "**"
    "#);
}

#[test]
fn nesting_limit_applies_to_lists() {
    let source = indoc! {"
        - a
          - b
    "};
    let shallow = Grammar::builder().max_depth(1).build().unwrap();

    insta::assert_snapshot!(dump(&shallow, source), @r#"
    Document
      BulletList
        ListItem
          ListMark "-"
          Text " a"
          Text "  - b"
    "#);
}
