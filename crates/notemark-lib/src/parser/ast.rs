//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides named accessors, so consumers
//! never index children by position. Cast is infallible for the matching
//! `SyntaxKind`; accessors return `None` for parts missing in recovered trees.

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| t.kind() == kind)
}

fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    token(node, kind).is_some()
}

// --- Document ---

ast_node!(Document, Document);
ast_node!(FrontMatter, FrontMatter);
ast_node!(Heading, Heading);
ast_node!(CodeBlock, CodeBlock);
ast_node!(ListItem, ListItem);
ast_node!(
    /// A `[state]` checkbox opening a list item. States are any non-empty
    /// run without `[`, `:` or a newline, so `- [[page]]` stays a wiki link
    /// and `- [due: today]` stays an attribute.
    Task,
    Task
);
ast_node!(
    /// The bracketed state of a `Task`; `x` and `X` mean done.
    TaskState,
    TaskState
);
ast_node!(Directive, Directive);
ast_node!(WikiLink, WikiLink);
ast_node!(Attribute, Attribute);
ast_node!(CommandLink, CommandLink);
ast_node!(Link, Link);
ast_node!(Image, Image);

/// The typed root of a [`Parse`](super::Parse).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Root {
    Document(Document),
    Query(Query),
}

impl Root {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::Document => Document::cast(node).map(Root::Document),
            SyntaxKind::Query => Query::cast(node).map(Root::Query),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Root::Document(n) => n.as_cst(),
            Root::Query(n) => n.as_cst(),
        }
    }
}

impl Document {
    pub fn front_matter(&self) -> Option<FrontMatter> {
        self.0.children().find_map(FrontMatter::cast)
    }

    /// Top-level blocks, front matter excluded.
    pub fn blocks(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0
            .children()
            .filter(|n| n.kind() != SyntaxKind::FrontMatter)
    }

    /// Every query in the document: `#query` directives and `query` fences,
    /// in document order.
    pub fn queries(&self) -> impl Iterator<Item = Query> + '_ {
        self.0.descendants().filter_map(Query::cast)
    }
}

impl FrontMatter {
    /// Raw text between the fence lines.
    pub fn code(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::FrontMatterCode)
    }
}

impl Heading {
    pub fn level(&self) -> usize {
        token(&self.0, SyntaxKind::HeadingMark).map_or(0, |t| t.text().len())
    }

    /// Heading text after the marker, trimmed.
    pub fn title(&self) -> String {
        let text = self.0.text().to_string();
        text.trim_start_matches('#').trim().to_string()
    }
}

impl CodeBlock {
    pub fn info(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::CodeInfo)
    }

    pub fn code(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::CodeText)
    }

    /// Present when the fence is tagged `query`.
    pub fn query(&self) -> Option<Query> {
        self.0.children().find_map(Query::cast)
    }
}

impl ListItem {
    pub fn task(&self) -> Option<Task> {
        self.0.children().find_map(Task::cast)
    }

    pub fn marker(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::ListMark)
    }
}

impl Task {
    pub fn state(&self) -> Option<TaskState> {
        self.0.children().find_map(TaskState::cast)
    }
}

impl TaskState {
    /// The verbatim state text between the brackets.
    pub fn marker(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::TaskMarker)
    }

    pub fn is_done(&self) -> bool {
        self.marker()
            .is_some_and(|t| t.text().eq_ignore_ascii_case("x"))
    }
}

impl Directive {
    fn start(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::DirectiveStart)
    }

    /// Directive name without its `#` sigil.
    pub fn name(&self) -> Option<String> {
        let name = token(&self.start()?, SyntaxKind::DirectiveName)?;
        Some(name.text()[1..].to_string())
    }

    /// Raw arguments of a non-query directive.
    pub fn args(&self) -> Option<SyntaxToken> {
        token(&self.start()?, SyntaxKind::DirectiveArgs)
    }

    /// Parsed arguments of a `#query` directive.
    pub fn query(&self) -> Option<Query> {
        self.start()?.children().find_map(Query::cast)
    }

    /// Blocks between the start and end markers.
    pub fn body(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children().filter(|n| {
            !matches!(
                n.kind(),
                SyntaxKind::DirectiveStart | SyntaxKind::DirectiveEnd
            )
        })
    }
}

impl WikiLink {
    pub fn page(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::WikiLinkPage)
    }

    pub fn alias(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::WikiLinkAlias)
    }
}

impl Attribute {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::AttributeName)
    }

    pub fn value(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::AttributeValue)
    }

    /// `[name:: value]`
    pub fn is_shorthand(&self) -> bool {
        has_token(&self.0, SyntaxKind::DoubleColon)
    }
}

impl CommandLink {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::CommandLinkName)
    }

    pub fn alias(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::CommandLinkAlias)
    }

    /// Raw argument text, verbatim.
    pub fn args(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::CommandLinkArgs)
    }
}

impl Link {
    pub fn url(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Url)
    }
}

impl Image {
    pub fn url(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Url)
    }
}

// --- Query ---

ast_node!(Query, Query);
ast_node!(WhereClause, WhereClause);
ast_node!(OrderClause, OrderClause);
ast_node!(OrderItem, OrderItem);
ast_node!(LimitClause, LimitClause);
ast_node!(SelectClause, SelectClause);
ast_node!(SelectItem, SelectItem);
ast_node!(RenderClause, RenderClause);
ast_node!(Name, Name);
ast_node!(AttrExpr, AttrExpr);
ast_node!(StringExpr, StringExpr);
ast_node!(NumberExpr, NumberExpr);
ast_node!(BoolExpr, BoolExpr);
ast_node!(NullExpr, NullExpr);
ast_node!(RegexExpr, RegexExpr);
ast_node!(ListExpr, ListExpr);
ast_node!(BinaryExpr, BinaryExpr);
ast_node!(LogicalExpr, LogicalExpr);
ast_node!(ParenExpr, ParenExpr);
ast_node!(CallExpr, CallExpr);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Clause {
    Where(WhereClause),
    Order(OrderClause),
    Limit(LimitClause),
    Select(SelectClause),
    Render(RenderClause),
}

impl Clause {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::WhereClause => WhereClause::cast(node).map(Clause::Where),
            SyntaxKind::OrderClause => OrderClause::cast(node).map(Clause::Order),
            SyntaxKind::LimitClause => LimitClause::cast(node).map(Clause::Limit),
            SyntaxKind::SelectClause => SelectClause::cast(node).map(Clause::Select),
            SyntaxKind::RenderClause => RenderClause::cast(node).map(Clause::Render),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Clause::Where(n) => n.as_cst(),
            Clause::Order(n) => n.as_cst(),
            Clause::Limit(n) => n.as_cst(),
            Clause::Select(n) => n.as_cst(),
            Clause::Render(n) => n.as_cst(),
        }
    }
}

/// Expression: anything that can appear in a clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Name(Name),
    Attr(AttrExpr),
    String(StringExpr),
    Number(NumberExpr),
    Bool(BoolExpr),
    Null(NullExpr),
    Regex(RegexExpr),
    List(ListExpr),
    Binary(BinaryExpr),
    Logical(LogicalExpr),
    Paren(ParenExpr),
    Call(CallExpr),
}

impl Expr {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::Name => Name::cast(node).map(Expr::Name),
            SyntaxKind::AttrExpr => AttrExpr::cast(node).map(Expr::Attr),
            SyntaxKind::StringExpr => StringExpr::cast(node).map(Expr::String),
            SyntaxKind::NumberExpr => NumberExpr::cast(node).map(Expr::Number),
            SyntaxKind::BoolExpr => BoolExpr::cast(node).map(Expr::Bool),
            SyntaxKind::NullExpr => NullExpr::cast(node).map(Expr::Null),
            SyntaxKind::RegexExpr => RegexExpr::cast(node).map(Expr::Regex),
            SyntaxKind::ListExpr => ListExpr::cast(node).map(Expr::List),
            SyntaxKind::BinaryExpr => BinaryExpr::cast(node).map(Expr::Binary),
            SyntaxKind::LogicalExpr => LogicalExpr::cast(node).map(Expr::Logical),
            SyntaxKind::ParenExpr => ParenExpr::cast(node).map(Expr::Paren),
            SyntaxKind::CallExpr => CallExpr::cast(node).map(Expr::Call),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Expr::Name(n) => n.as_cst(),
            Expr::Attr(n) => n.as_cst(),
            Expr::String(n) => n.as_cst(),
            Expr::Number(n) => n.as_cst(),
            Expr::Bool(n) => n.as_cst(),
            Expr::Null(n) => n.as_cst(),
            Expr::Regex(n) => n.as_cst(),
            Expr::List(n) => n.as_cst(),
            Expr::Binary(n) => n.as_cst(),
            Expr::Logical(n) => n.as_cst(),
            Expr::Paren(n) => n.as_cst(),
            Expr::Call(n) => n.as_cst(),
        }
    }

    /// Source text without surrounding trivia.
    pub fn source_text(&self) -> String {
        self.as_cst().text().to_string().trim().to_string()
    }
}

impl Query {
    /// The page or collection being queried.
    pub fn source(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }

    /// Every child node after the source, in order. Non-clause children
    /// (error nodes in recovered trees) are yielded too.
    pub fn clause_nodes(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children()
    }

    pub fn clauses(&self) -> impl Iterator<Item = Clause> + '_ {
        self.0.children().filter_map(Clause::cast)
    }
}

impl WhereClause {
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl LimitClause {
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl OrderClause {
    pub fn items(&self) -> impl Iterator<Item = OrderItem> + '_ {
        self.0.children().filter_map(OrderItem::cast)
    }
}

impl OrderItem {
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn is_desc(&self) -> bool {
        has_token(&self.0, SyntaxKind::KwDesc)
    }
}

impl SelectClause {
    pub fn items(&self) -> impl Iterator<Item = SelectItem> + '_ {
        self.0.children().filter_map(SelectItem::cast)
    }
}

impl SelectItem {
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    /// The name after `as`.
    pub fn alias(&self) -> Option<Name> {
        has_token(&self.0, SyntaxKind::KwAs)
            .then(|| self.0.children().filter_map(Name::cast).last())
            .flatten()
            .filter(|name| {
                self.expr()
                    .is_none_or(|expr| expr.as_cst() != name.as_cst())
            })
    }
}

impl RenderClause {
    /// `[[page]]` or string token.
    pub fn target(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| matches!(t.kind(), SyntaxKind::PageRef | SyntaxKind::String))
    }

    /// Page name with its delimiters stripped.
    pub fn page(&self) -> Option<String> {
        self.target().map(|t| strip_literal(t.text()).to_string())
    }

    pub fn is_all(&self) -> bool {
        has_token(&self.0, SyntaxKind::KwAll)
    }
}

impl Name {
    pub fn id(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }
}

impl AttrExpr {
    pub fn base(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn field(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }
}

impl StringExpr {
    pub fn value(&self) -> Option<String> {
        let token = self
            .0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| matches!(t.kind(), SyntaxKind::String | SyntaxKind::PageRef))?;
        Some(strip_literal(token.text()).to_string())
    }
}

impl NumberExpr {
    pub fn value(&self) -> Option<f64> {
        let number: f64 = token(&self.0, SyntaxKind::Number)?.text().parse().ok()?;
        if has_token(&self.0, SyntaxKind::Minus) {
            Some(-number)
        } else {
            Some(number)
        }
    }
}

impl BoolExpr {
    pub fn value(&self) -> bool {
        has_token(&self.0, SyntaxKind::KwTrue)
    }
}

impl RegexExpr {
    /// Pattern between the slashes, escapes untouched.
    pub fn pattern(&self) -> Option<String> {
        let lit = token(&self.0, SyntaxKind::RegexLit)?;
        let text = lit.text();
        Some(text[1..text.len() - 1].to_string())
    }
}

impl ListExpr {
    pub fn items(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

fn operator(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| !t.kind().is_trivia())
}

impl BinaryExpr {
    pub fn lhs(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn op(&self) -> Option<SyntaxToken> {
        operator(&self.0)
    }

    pub fn rhs(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }
}

impl LogicalExpr {
    pub fn lhs(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn op(&self) -> Option<SyntaxToken> {
        operator(&self.0)
    }

    pub fn rhs(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }
}

impl ParenExpr {
    pub fn inner(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl CallExpr {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }

    pub fn args(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::ArgList)
            .flat_map(|list| list.children().filter_map(Expr::cast))
    }
}

/// `"text"`, `'text'` and `[[page]]` without their delimiters.
pub fn strip_literal(text: &str) -> &str {
    if let Some(page) = text.strip_prefix("[[").and_then(|t| t.strip_suffix("]]")) {
        return page;
    }
    let quoted = text.len() >= 2
        && (text.starts_with('"') && text.ends_with('"')
            || text.starts_with('\'') && text.ends_with('\''));
    if quoted { &text[1..text.len() - 1] } else { text }
}
