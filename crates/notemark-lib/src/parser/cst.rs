//! Syntax kinds for documents and queries.
//!
//! `SyntaxKind` covers both grammars: raw lexer tokens first, then the composite
//! tokens the parser emits, then node kinds, then the `__LAST` sentinel.
//! `NoteLang` implements Rowan's `Language` trait for tree construction.
//!
//! Extension node kinds registered through a [`Grammar`](super::Grammar) are not
//! enum variants. They are stored as raw kinds starting at [`EXTENSION_BASE`]
//! and read back as [`SyntaxKind::Extension`]; use [`extension_index`] to
//! recover which extension produced a node.

use rowan::Language;

/// First raw kind value used for grammar extensions.
pub const EXTENSION_BASE: u16 = 0x4000;

/// All token and node kinds.
/// `#[repr(u16)]` enables safe transmute in `kind_from_raw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // --- Document lexer tokens ---
    Newline = 0,
    Whitespace,
    Word,
    /// Run of `#`
    Hashes,
    /// Run of `-`
    Dashes,
    /// Run of `*`
    Stars,
    /// Run of `_`
    Underscores,
    /// Run of `~`
    Tildes,
    /// Run of `=`
    Equalses,
    /// Run of backticks
    Backticks,
    Plus,
    Gt,
    Bang,
    Pipe,
    Colon,
    /// `::`, defined separately so `[name:: value]` is a single lookahead.
    DoubleColon,
    BracketOpen,
    BracketClose,
    ParenOpen,
    ParenClose,
    BraceOpen,
    BraceClose,
    /// `<!--`
    CommentOpen,
    /// Backslash followed by ASCII punctuation
    Escape,
    NakedUrl,
    /// Coalesced unrecognized characters
    Garbage,

    // --- Query lexer tokens ---
    Id,
    KwWhere,
    KwOrder,
    /// Contextual: lexed as `Id`, remapped by the parser.
    KwBy,
    KwAsc,
    KwDesc,
    KwLimit,
    KwSelect,
    KwRender,
    KwAll,
    KwAs,
    KwAnd,
    KwOr,
    KwIn,
    KwTrue,
    KwFalse,
    KwNull,
    Number,
    String,
    /// `[[page]]` inside a query
    PageRef,
    /// `/pattern/`, assembled by the parser from raw tokens
    RegexLit,
    Dot,
    Comma,
    Eq,
    NotEq,
    Lt,
    LtEq,
    GtEq,
    /// `=~`
    Match,
    /// `!=~`
    NotMatch,
    Minus,
    Star,
    Slash,
    Percent,

    // --- Composite tokens emitted by the document parser ---
    /// Plain text run. Carries no kind when serialized.
    Text,
    HeadingMark,
    HorizontalRuleMark,
    CodeMark,
    CodeInfo,
    CodeText,
    QuoteMark,
    ListMark,
    TaskMark,
    /// Verbatim task state: ` `, `x`, `TODO`, ...
    TaskMarker,
    WikiLinkMark,
    WikiLinkPage,
    WikiLinkAlias,
    AttributeMark,
    AttributeName,
    AttributeValue,
    CommandLinkMark,
    CommandLinkName,
    CommandLinkAlias,
    /// Raw argument list text, not split into arguments.
    CommandLinkArgs,
    LinkMark,
    Url,
    EmphasisMark,
    Hashtag,
    CommentMark,
    CommentText,
    DirectiveMark,
    /// `#name` in a directive start, `/name` in a directive end
    DirectiveName,
    DirectiveArgs,
    FrontMatterMarker,
    FrontMatterCode,
    TablePipe,
    TableDelimiterRow,

    // --- Document node kinds ---
    Document,
    FrontMatter,
    Paragraph,
    Heading,
    HorizontalRule,
    CodeBlock,
    Blockquote,
    BulletList,
    OrderedList,
    ListItem,
    Task,
    TaskState,
    Table,
    TableHeader,
    TableRow,
    TableCell,
    Directive,
    DirectiveStart,
    DirectiveEnd,
    Comment,
    WikiLink,
    Attribute,
    CommandLink,
    Link,
    Image,
    InlineCode,
    Emphasis,
    Strong,
    Strikethrough,
    Highlight,
    /// Node produced by a caller-registered grammar extension.
    Extension,

    // --- Query node kinds ---
    Query,
    WhereClause,
    OrderClause,
    OrderItem,
    LimitClause,
    SelectClause,
    SelectItem,
    RenderClause,
    Name,
    AttrExpr,
    StringExpr,
    NumberExpr,
    BoolExpr,
    NullExpr,
    RegexExpr,
    ListExpr,
    BinaryExpr,
    LogicalExpr,
    ParenExpr,
    CallExpr,
    ArgList,
    Error,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    /// Insignificant inside queries; buffered and attached as leading trivia.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Newline)
    }

    /// Kinds that serialize without a `kind` tag.
    #[inline]
    pub fn is_plain(self) -> bool {
        matches!(self, Text | Whitespace | Newline)
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Error | Garbage)
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        (KwWhere as u16..=KwNull as u16).contains(&(self as u16))
    }

    #[inline]
    pub fn is_token(self) -> bool {
        (self as u16) < Document as u16
    }

    /// Query expression node kinds the compiler understands.
    #[inline]
    pub fn is_expr(self) -> bool {
        (Name as u16..=CallExpr as u16).contains(&(self as u16))
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NoteLang {}

impl Language for NoteLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        if raw.0 >= EXTENSION_BASE {
            return Extension;
        }
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        match kind {
            Extension => rowan::SyntaxKind(EXTENSION_BASE),
            kind => kind.into(),
        }
    }
}

/// Raw kind for the extension registered at `index`.
#[inline]
pub fn extension_kind(index: usize) -> rowan::SyntaxKind {
    rowan::SyntaxKind(EXTENSION_BASE + index as u16)
}

/// Registration index of the extension that produced `node`, if any.
pub fn extension_index(node: &SyntaxNode) -> Option<usize> {
    let raw = node.green().kind().0;
    (raw >= EXTENSION_BASE).then(|| usize::from(raw - EXTENSION_BASE))
}

/// Type aliases for Rowan types parameterized by our language.
pub type SyntaxNode = rowan::SyntaxNode<NoteLang>;
pub type SyntaxToken = rowan::SyntaxToken<NoteLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// 128-bit bitset of token `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    /// Creates an empty token set.
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 128.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn single(kind: SyntaxKind) -> Self {
        let kind = kind as u16;
        assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
        TokenSet(1 << kind)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 128 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..128u16 {
            if self.0 & (1 << i) != 0 && i < __LAST as u16 {
                let kind: SyntaxKind = unsafe { std::mem::transmute(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    /// FIRST set of a query expression.
    pub const EXPR_FIRST: TokenSet = TokenSet::new(&[
        Id,
        String,
        PageRef,
        Number,
        Minus,
        KwTrue,
        KwFalse,
        KwNull,
        Slash,
        BracketOpen,
        ParenOpen,
    ]);

    /// Keywords that start a query clause.
    pub const CLAUSE_FIRST: TokenSet =
        TokenSet::new(&[KwWhere, KwOrder, KwLimit, KwSelect, KwRender]);

    /// Synchronization points inside a list or argument list.
    pub const LIST_RECOVERY: TokenSet = CLAUSE_FIRST.union(TokenSet::new(&[
        Comma,
        BracketClose,
        ParenClose,
    ]));
}
