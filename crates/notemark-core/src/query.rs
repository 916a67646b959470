//! The compiled query value handed to an execution engine.

use std::fmt;

use serde::Serialize;

use crate::expr::QueryExpression;

/// One sort key. `desc: false` is ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderBy {
    pub expr: QueryExpression,
    pub desc: bool,
}

/// One projected column.
///
/// `expr: None` is a raw field projection of `name`; otherwise `expr` is
/// computed and stored under `name`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expr: Option<QueryExpression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    /// Page or collection the query reads from.
    #[serde(rename = "querySource")]
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<QueryExpression>,
    pub order_by: Vec<OrderBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<QueryExpression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<Vec<SelectItem>>,
    /// Template page, without `[[`/`]]` delimiters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render: Option<String>,
    /// Render the template once over the whole result set instead of per row.
    pub render_all: bool,
}

impl Query {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            filter: None,
            order_by: Vec::new(),
            limit: None,
            select: None,
            render: None,
            render_all: false,
        }
    }

    /// ANDs `filter` onto the existing filter, if any.
    pub fn add_filter(&mut self, filter: QueryExpression) {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(filter),
            None => filter,
        });
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Renders the query in its canonical surface form.
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)?;
        if let Some(filter) = &self.filter {
            write!(f, " where {filter}")?;
        }
        if !self.order_by.is_empty() {
            f.write_str(" order by ")?;
            for (i, key) in self.order_by.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", key.expr)?;
                if key.desc {
                    f.write_str(" desc")?;
                }
            }
        }
        if let Some(limit) = &self.limit {
            write!(f, " limit {limit}")?;
        }
        if let Some(select) = &self.select {
            f.write_str(" select ")?;
            for (i, item) in select.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                match &item.expr {
                    Some(expr) => write!(f, "{expr} as {}", item.name)?,
                    None => f.write_str(&item.name)?,
                }
            }
        }
        if let Some(render) = &self.render {
            write!(f, " render [[{render}]]")?;
            if self.render_all {
                f.write_str(" all")?;
            }
        }
        Ok(())
    }
}
