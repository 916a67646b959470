use std::str::FromStr;

use notemark_core::{BinaryOp, Literal, LogicalOp, OrderBy, Query, QueryExpression, SelectItem};
use tracing::{debug, instrument};

use super::{CompileError, ExprContext};
use crate::parser::ast::{self, BinaryExpr, Clause, Expr, LogicalExpr};
use crate::parser::{SyntaxKind, SyntaxNode};

fn incomplete(kind: SyntaxKind, what: &'static str) -> CompileError {
    CompileError::Incomplete { kind, what }
}

/// Lowers a `Query` node. Clauses fold in source order: filters are ANDed,
/// orderings and projections accumulate, and the last `limit` wins.
#[instrument(level = "debug", skip_all)]
pub fn compile_query(node: &SyntaxNode) -> Result<Query, CompileError> {
    let query = ast::Query::cast(node.clone()).ok_or(CompileError::NotAQuery { kind: node.kind() })?;
    let source = query
        .source()
        .ok_or_else(|| incomplete(SyntaxKind::Query, "source"))?;
    let mut out = Query::new(source.text());

    for child in query.clause_nodes() {
        let clause = Clause::cast(child.clone())
            .ok_or(CompileError::UnknownClause { kind: child.kind() })?;
        match clause {
            Clause::Where(clause) => {
                let expr = clause
                    .expr()
                    .ok_or_else(|| incomplete(SyntaxKind::WhereClause, "condition"))?;
                out.add_filter(compile_filter(&expr)?);
            }
            Clause::Order(clause) => {
                for item in clause.items() {
                    let expr = item
                        .expr()
                        .ok_or_else(|| incomplete(SyntaxKind::OrderItem, "expression"))?;
                    out.order_by.push(OrderBy {
                        expr: compile_value(&expr)?,
                        desc: item.is_desc(),
                    });
                }
            }
            Clause::Limit(clause) => {
                let expr = clause
                    .expr()
                    .ok_or_else(|| incomplete(SyntaxKind::LimitClause, "count"))?;
                if out.limit.is_some() {
                    debug!("`limit` given more than once, keeping the last one");
                }
                out.limit = Some(compile_value(&expr)?);
            }
            Clause::Select(clause) => {
                let mut items = Vec::new();
                for item in clause.items() {
                    items.push(compile_select_item(&item)?);
                }
                out.select.get_or_insert_with(Vec::new).extend(items);
            }
            Clause::Render(clause) => {
                let page = clause
                    .page()
                    .ok_or_else(|| incomplete(SyntaxKind::RenderClause, "page"))?;
                out.render = Some(page);
                out.render_all = clause.is_all();
            }
        }
    }

    Ok(out)
}

/// A bare name is a raw projection. Anything else is computed, named by its
/// alias or, lacking one, by its own source text.
fn compile_select_item(item: &ast::SelectItem) -> Result<SelectItem, CompileError> {
    let expr = item
        .expr()
        .ok_or_else(|| incomplete(SyntaxKind::SelectItem, "expression"))?;

    if let Some(alias) = item.alias() {
        let name = alias
            .id()
            .ok_or_else(|| incomplete(SyntaxKind::Name, "identifier"))?;
        return Ok(SelectItem {
            name: name.text().to_string(),
            expr: Some(compile_value(&expr)?),
        });
    }

    if let Expr::Name(name) = &expr {
        let id = name
            .id()
            .ok_or_else(|| incomplete(SyntaxKind::Name, "identifier"))?;
        return Ok(SelectItem {
            name: id.text().to_string(),
            expr: None,
        });
    }

    Ok(SelectItem {
        name: expr.source_text(),
        expr: Some(compile_value(&expr)?),
    })
}

pub fn compile_expression(
    node: &SyntaxNode,
    context: ExprContext,
) -> Result<QueryExpression, CompileError> {
    let expr = Expr::cast(node.clone()).ok_or(CompileError::UnexpectedExpression {
        kind: node.kind(),
        context,
    })?;
    match context {
        ExprContext::Value => compile_value(&expr),
        ExprContext::Filter => compile_filter(&expr),
    }
}

/// Comparisons, `and`/`or` over filters, and parenthesized filters.
fn compile_filter(expr: &Expr) -> Result<QueryExpression, CompileError> {
    match expr {
        Expr::Binary(binary) => {
            let op = binary_op(binary)?;
            if !op.is_comparison() {
                return Err(CompileError::UnexpectedExpression {
                    kind: SyntaxKind::BinaryExpr,
                    context: ExprContext::Filter,
                });
            }
            let (lhs, rhs) = operands(binary.lhs(), binary.rhs(), SyntaxKind::BinaryExpr)?;
            Ok(QueryExpression::binary(op, compile_value(&lhs)?, compile_value(&rhs)?))
        }
        Expr::Logical(logical) => {
            let op = logical_op(logical)?;
            let (lhs, rhs) = operands(logical.lhs(), logical.rhs(), SyntaxKind::LogicalExpr)?;
            Ok(QueryExpression::logical(op, compile_filter(&lhs)?, compile_filter(&rhs)?))
        }
        Expr::Paren(paren) => {
            let inner = paren
                .inner()
                .ok_or_else(|| incomplete(SyntaxKind::ParenExpr, "expression"))?;
            compile_filter(&inner)
        }
        other => Err(CompileError::UnexpectedExpression {
            kind: other.as_cst().kind(),
            context: ExprContext::Filter,
        }),
    }
}

fn compile_value(expr: &Expr) -> Result<QueryExpression, CompileError> {
    Ok(match expr {
        Expr::Name(name) => {
            let id = name
                .id()
                .ok_or_else(|| incomplete(SyntaxKind::Name, "identifier"))?;
            QueryExpression::attr(id.text())
        }
        Expr::Attr(attr) => {
            let base = attr
                .base()
                .ok_or_else(|| incomplete(SyntaxKind::AttrExpr, "base"))?;
            let field = attr
                .field()
                .ok_or_else(|| incomplete(SyntaxKind::AttrExpr, "field"))?;
            QueryExpression::attr_of(compile_value(&base)?, field.text())
        }
        Expr::String(string) => QueryExpression::string(
            string
                .value()
                .ok_or_else(|| incomplete(SyntaxKind::StringExpr, "literal"))?,
        ),
        Expr::Number(number) => QueryExpression::number(
            number
                .value()
                .ok_or_else(|| incomplete(SyntaxKind::NumberExpr, "literal"))?,
        ),
        Expr::Bool(boolean) => QueryExpression::Literal(Literal::Bool(boolean.value())),
        Expr::Null(_) => QueryExpression::Literal(Literal::Null),
        Expr::Regex(regex) => QueryExpression::Regexp {
            pattern: regex
                .pattern()
                .ok_or_else(|| incomplete(SyntaxKind::RegexExpr, "pattern"))?,
            flags: "i".to_string(),
        },
        Expr::List(list) => QueryExpression::Array(
            list.items()
                .map(|item| compile_value(&item))
                .collect::<Result<_, _>>()?,
        ),
        Expr::Binary(binary) => {
            let op = binary_op(binary)?;
            let (lhs, rhs) = operands(binary.lhs(), binary.rhs(), SyntaxKind::BinaryExpr)?;
            QueryExpression::binary(op, compile_value(&lhs)?, compile_value(&rhs)?)
        }
        Expr::Logical(logical) => {
            let op = logical_op(logical)?;
            let (lhs, rhs) = operands(logical.lhs(), logical.rhs(), SyntaxKind::LogicalExpr)?;
            QueryExpression::logical(op, compile_value(&lhs)?, compile_value(&rhs)?)
        }
        Expr::Paren(paren) => {
            let inner = paren
                .inner()
                .ok_or_else(|| incomplete(SyntaxKind::ParenExpr, "expression"))?;
            compile_value(&inner)?
        }
        Expr::Call(call) => {
            let name = call
                .name()
                .ok_or_else(|| incomplete(SyntaxKind::CallExpr, "name"))?;
            QueryExpression::Call {
                name: name.text().to_string(),
                args: call
                    .args()
                    .map(|arg| compile_value(&arg))
                    .collect::<Result<_, _>>()?,
            }
        }
    })
}

fn operands(
    lhs: Option<Expr>,
    rhs: Option<Expr>,
    kind: SyntaxKind,
) -> Result<(Expr, Expr), CompileError> {
    let lhs = lhs.ok_or_else(|| incomplete(kind, "left operand"))?;
    let rhs = rhs.ok_or_else(|| incomplete(kind, "right operand"))?;
    Ok((lhs, rhs))
}

fn binary_op(binary: &BinaryExpr) -> Result<BinaryOp, CompileError> {
    binary
        .op()
        .and_then(|token| BinaryOp::from_str(token.text()).ok())
        .ok_or_else(|| incomplete(SyntaxKind::BinaryExpr, "operator"))
}

fn logical_op(logical: &LogicalExpr) -> Result<LogicalOp, CompileError> {
    logical
        .op()
        .and_then(|token| LogicalOp::from_str(token.text()).ok())
        .ok_or_else(|| incomplete(SyntaxKind::LogicalExpr, "operator"))
}
