//! Lexers for documents and queries.
//!
//! Both produce span-based tokens without storing text; text is sliced from
//! source only when needed. Tokens are deliberately coarse: the document lexer
//! only separates runs of punctuation that can open a construct from everything
//! else, and the parser glues tokens back together into composite tokens.
//!
//! ## Error handling
//!
//! Consecutive error characters are coalesced into single `Garbage` tokens
//! rather than producing one token per character.

use logos::Logos;
use rowan::{TextRange, TextSize};
use std::ops::Range;

use super::cst::SyntaxKind;

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum DocToken {
    #[token("\n")]
    #[token("\r\n")]
    Newline,
    #[regex(r"[ \t]+")]
    Whitespace,
    #[regex(r"[^ \t\r\n#*_~=`+>!|:\[\](){}<\\-]+")]
    Word,
    #[regex(r"#+")]
    Hashes,
    #[regex(r"-+")]
    Dashes,
    #[regex(r"\*+")]
    Stars,
    #[regex(r"_+")]
    Underscores,
    #[regex(r"~+")]
    Tildes,
    #[regex(r"=+")]
    Equalses,
    #[regex(r"`+")]
    Backticks,
    #[token("+")]
    Plus,
    #[token(">")]
    Gt,
    #[token("!")]
    Bang,
    #[token("|")]
    Pipe,
    #[token(":")]
    Colon,
    #[token("::")]
    DoubleColon,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token("<!--")]
    CommentOpen,
    #[regex(r"\\[!-/:-@\[-`{-~]")]
    Escape,
    #[regex(r"https?://[^\s<>\[\]()]+")]
    NakedUrl,
}

impl DocToken {
    fn kind(self) -> SyntaxKind {
        match self {
            DocToken::Newline => SyntaxKind::Newline,
            DocToken::Whitespace => SyntaxKind::Whitespace,
            DocToken::Word => SyntaxKind::Word,
            DocToken::Hashes => SyntaxKind::Hashes,
            DocToken::Dashes => SyntaxKind::Dashes,
            DocToken::Stars => SyntaxKind::Stars,
            DocToken::Underscores => SyntaxKind::Underscores,
            DocToken::Tildes => SyntaxKind::Tildes,
            DocToken::Equalses => SyntaxKind::Equalses,
            DocToken::Backticks => SyntaxKind::Backticks,
            DocToken::Plus => SyntaxKind::Plus,
            DocToken::Gt => SyntaxKind::Gt,
            DocToken::Bang => SyntaxKind::Bang,
            DocToken::Pipe => SyntaxKind::Pipe,
            DocToken::Colon => SyntaxKind::Colon,
            DocToken::DoubleColon => SyntaxKind::DoubleColon,
            DocToken::BracketOpen => SyntaxKind::BracketOpen,
            DocToken::BracketClose => SyntaxKind::BracketClose,
            DocToken::ParenOpen => SyntaxKind::ParenOpen,
            DocToken::ParenClose => SyntaxKind::ParenClose,
            DocToken::BraceOpen => SyntaxKind::BraceOpen,
            DocToken::BraceClose => SyntaxKind::BraceClose,
            DocToken::CommentOpen => SyntaxKind::CommentOpen,
            DocToken::Escape => SyntaxKind::Escape,
            DocToken::NakedUrl => SyntaxKind::NakedUrl,
        }
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum QueryToken {
    #[token("\n")]
    #[token("\r\n")]
    Newline,
    #[regex(r"[ \t]+")]
    Whitespace,
    #[token("where")]
    KwWhere,
    #[token("order")]
    KwOrder,
    #[token("limit")]
    KwLimit,
    #[token("select")]
    KwSelect,
    #[token("render")]
    KwRender,
    #[token("and")]
    KwAnd,
    #[token("or")]
    KwOr,
    #[token("in")]
    KwIn,
    #[token("true")]
    KwTrue,
    #[token("false")]
    KwFalse,
    #[token("null")]
    KwNull,
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Id,
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    #[regex(r#""(?:[^"\\\n]|\\.)*""#)]
    #[regex(r"'(?:[^'\\\n]|\\.)*'")]
    String,
    #[regex(r"\[\[[^\]\n]+\]\]")]
    PageRef,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token("=")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("=~")]
    Match,
    #[token("!=~")]
    NotMatch,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
}

impl QueryToken {
    fn kind(self) -> SyntaxKind {
        match self {
            QueryToken::Newline => SyntaxKind::Newline,
            QueryToken::Whitespace => SyntaxKind::Whitespace,
            QueryToken::KwWhere => SyntaxKind::KwWhere,
            QueryToken::KwOrder => SyntaxKind::KwOrder,
            QueryToken::KwLimit => SyntaxKind::KwLimit,
            QueryToken::KwSelect => SyntaxKind::KwSelect,
            QueryToken::KwRender => SyntaxKind::KwRender,
            QueryToken::KwAnd => SyntaxKind::KwAnd,
            QueryToken::KwOr => SyntaxKind::KwOr,
            QueryToken::KwIn => SyntaxKind::KwIn,
            QueryToken::KwTrue => SyntaxKind::KwTrue,
            QueryToken::KwFalse => SyntaxKind::KwFalse,
            QueryToken::KwNull => SyntaxKind::KwNull,
            QueryToken::Id => SyntaxKind::Id,
            QueryToken::Number => SyntaxKind::Number,
            QueryToken::String => SyntaxKind::String,
            QueryToken::PageRef => SyntaxKind::PageRef,
            QueryToken::Dot => SyntaxKind::Dot,
            QueryToken::Comma => SyntaxKind::Comma,
            QueryToken::ParenOpen => SyntaxKind::ParenOpen,
            QueryToken::ParenClose => SyntaxKind::ParenClose,
            QueryToken::BracketOpen => SyntaxKind::BracketOpen,
            QueryToken::BracketClose => SyntaxKind::BracketClose,
            QueryToken::Eq => SyntaxKind::Eq,
            QueryToken::NotEq => SyntaxKind::NotEq,
            QueryToken::Lt => SyntaxKind::Lt,
            QueryToken::LtEq => SyntaxKind::LtEq,
            QueryToken::Gt => SyntaxKind::Gt,
            QueryToken::GtEq => SyntaxKind::GtEq,
            QueryToken::Match => SyntaxKind::Match,
            QueryToken::NotMatch => SyntaxKind::NotMatch,
            QueryToken::Plus => SyntaxKind::Plus,
            QueryToken::Minus => SyntaxKind::Minus,
            QueryToken::Star => SyntaxKind::Star,
            QueryToken::Slash => SyntaxKind::Slash,
            QueryToken::Percent => SyntaxKind::Percent,
        }
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes `source[range]` with the document lexer. Spans are absolute.
pub fn lex_document(source: &str, range: Range<usize>) -> Vec<Token> {
    lex_with(source, range, |lexer: &mut logos::Lexer<'_, DocToken>| {
        lexer.next().map(|res| res.map(DocToken::kind))
    })
}

/// Tokenizes `source[range]` with the query lexer. Spans are absolute.
pub fn lex_query(source: &str, range: Range<usize>) -> Vec<Token> {
    lex_with(source, range, |lexer: &mut logos::Lexer<'_, QueryToken>| {
        lexer.next().map(|res| res.map(QueryToken::kind))
    })
}

fn lex_with<'s, T>(
    source: &'s str,
    range: Range<usize>,
    mut next: impl FnMut(&mut logos::Lexer<'s, T>) -> Option<Result<SyntaxKind, ()>>,
) -> Vec<Token>
where
    T: Logos<'s, Source = str, Extras = (), Error = ()>,
{
    let base = range.start;
    let end = range.end;
    let mut tokens = Vec::new();
    let mut lexer = T::lexer(&source[range]);
    let mut error_start: Option<usize> = None;

    loop {
        match next(&mut lexer) {
            Some(Ok(kind)) => {
                let span = lexer.span();
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(
                        SyntaxKind::Garbage,
                        range_to_text_range(base + start..base + span.start),
                    ));
                }
                tokens.push(Token::new(
                    kind,
                    range_to_text_range(base + span.start..base + span.end),
                ));
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(
                        SyntaxKind::Garbage,
                        range_to_text_range(base + start..end),
                    ));
                }
                break;
            }
        }
    }

    tokens
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[Range::<usize>::from(token.span)]
}

#[inline]
pub(crate) fn offset(size: TextSize) -> usize {
    u32::from(size) as usize
}
