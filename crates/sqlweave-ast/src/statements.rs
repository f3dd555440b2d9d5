//! Statement nodes: SELECT, INSERT, UPDATE, DELETE and set operations

use crate::{Expr, Node, NodeType, impl_expr_from_node, types};

/// `SELECT` statement.
///
/// Optional clauses compiled in raw mode, so plain strings in `where_clause`,
/// `group_by`, `having` and `order_by` are emitted verbatim. When `tables` is
/// absent the FROM clause is built from the tables referenced by the columns
/// and conditions, falling back to `default_tables`.
#[derive(Debug, Clone)]
pub struct Select {
    pub columns: Expr,
    pub where_clause: Option<Expr>,
    pub tables: Option<Expr>,
    pub default_tables: Option<Expr>,
    pub order_by: Option<Expr>,
    pub group_by: Option<Expr>,
    pub having: Option<Expr>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub distinct: bool,
    pub distinct_on: Option<Expr>,
}

impl Select {
    pub fn new(columns: impl Into<Expr>) -> Self {
        Self {
            columns: columns.into(),
            where_clause: None,
            tables: None,
            default_tables: None,
            order_by: None,
            group_by: None,
            having: None,
            limit: None,
            offset: None,
            distinct: false,
            distinct_on: None,
        }
    }

    pub fn where_clause(mut self, condition: impl Into<Expr>) -> Self {
        self.where_clause = Some(condition.into());
        self
    }

    pub fn tables(mut self, tables: impl Into<Expr>) -> Self {
        self.tables = Some(tables.into());
        self
    }

    pub fn default_tables(mut self, tables: impl Into<Expr>) -> Self {
        self.default_tables = Some(tables.into());
        self
    }

    pub fn order_by(mut self, order_by: impl Into<Expr>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn group_by(mut self, group_by: impl Into<Expr>) -> Self {
        self.group_by = Some(group_by.into());
        self
    }

    pub fn having(mut self, having: impl Into<Expr>) -> Self {
        self.having = Some(having.into());
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// `DISTINCT ON (...)`, implies `distinct`
    pub fn distinct_on(mut self, on: impl Into<Expr>) -> Self {
        self.distinct = true;
        self.distinct_on = Some(on.into());
        self
    }
}

impl Node for Select {
    fn node_type(&self) -> &'static NodeType {
        &types::SELECT
    }
}

/// Source of the rows written by an [`Insert`]
#[derive(Debug, Clone)]
pub enum InsertValues {
    Rows(Vec<Vec<Expr>>),
    Query(Expr),
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub columns: Vec<Expr>,
    pub values: InsertValues,
    pub table: Option<Expr>,
    pub default_table: Option<Expr>,
}

impl Insert {
    /// Insert a single row from column/value pairs
    pub fn new<I, C, V>(map: I) -> Self
    where
        I: IntoIterator<Item = (C, V)>,
        C: Into<Expr>,
        V: Into<Expr>,
    {
        let (columns, row): (Vec<Expr>, Vec<Expr>) = map
            .into_iter()
            .map(|(column, value)| (column.into(), value.into()))
            .unzip();
        Self {
            columns,
            values: InsertValues::Rows(vec![row]),
            table: None,
            default_table: None,
        }
    }

    /// Insert into the given columns; add rows with [`Insert::row`] or a
    /// source query with [`Insert::query`]
    pub fn columns<I>(columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            values: InsertValues::Rows(Vec::new()),
            table: None,
            default_table: None,
        }
    }

    pub fn row<I>(mut self, row: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        let row = row.into_iter().map(Into::into).collect();
        if let InsertValues::Rows(rows) = &mut self.values {
            rows.push(row);
        } else {
            self.values = InsertValues::Rows(vec![row]);
        }
        self
    }

    pub fn query(mut self, query: impl Into<Expr>) -> Self {
        self.values = InsertValues::Query(query.into());
        self
    }

    pub fn table(mut self, table: impl Into<Expr>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn default_table(mut self, table: impl Into<Expr>) -> Self {
        self.default_table = Some(table.into());
        self
    }
}

impl Node for Insert {
    fn node_type(&self) -> &'static NodeType {
        &types::INSERT
    }
}

#[derive(Debug, Clone)]
pub struct Update {
    pub map: Vec<(Expr, Expr)>,
    pub where_clause: Option<Expr>,
    pub table: Option<Expr>,
    pub default_table: Option<Expr>,
}

impl Update {
    pub fn new<I, C, V>(map: I) -> Self
    where
        I: IntoIterator<Item = (C, V)>,
        C: Into<Expr>,
        V: Into<Expr>,
    {
        Self {
            map: map
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
            where_clause: None,
            table: None,
            default_table: None,
        }
    }

    pub fn where_clause(mut self, condition: impl Into<Expr>) -> Self {
        self.where_clause = Some(condition.into());
        self
    }

    pub fn table(mut self, table: impl Into<Expr>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn default_table(mut self, table: impl Into<Expr>) -> Self {
        self.default_table = Some(table.into());
        self
    }
}

impl Node for Update {
    fn node_type(&self) -> &'static NodeType {
        &types::UPDATE
    }
}

#[derive(Debug, Clone, Default)]
pub struct Delete {
    pub where_clause: Option<Expr>,
    pub table: Option<Expr>,
    pub default_table: Option<Expr>,
}

impl Delete {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn where_clause(mut self, condition: impl Into<Expr>) -> Self {
        self.where_clause = Some(condition.into());
        self
    }

    pub fn table(mut self, table: impl Into<Expr>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn default_table(mut self, table: impl Into<Expr>) -> Self {
        self.default_table = Some(table.into());
        self
    }
}

impl Node for Delete {
    fn node_type(&self) -> &'static NodeType {
        &types::DELETE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    Union,
    Except,
    Intersect,
}

impl SetOperator {
    pub fn node_type(self) -> &'static NodeType {
        match self {
            Self::Union => &types::UNION,
            Self::Except => &types::EXCEPT,
            Self::Intersect => &types::INTERSECT,
        }
    }

    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Except => "EXCEPT",
            Self::Intersect => "INTERSECT",
        }
    }
}

/// `UNION`, `EXCEPT` or `INTERSECT` over two or more queries.
///
/// A leading operand that is the same operation with the same `ALL` flag and
/// no limit or offset is flattened into this one, so chained unions render
/// without nesting.
#[derive(Debug, Clone)]
pub struct SetExpr {
    pub operator: SetOperator,
    pub expressions: Vec<Expr>,
    pub all: bool,
    pub order_by: Option<Expr>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl SetExpr {
    pub fn new<I>(operator: SetOperator, expressions: I, all: bool) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        let mut expressions: Vec<Expr> = expressions.into_iter().map(Into::into).collect();
        let collapsed = expressions
            .first()
            .and_then(|first| first.downcast_ref::<SetExpr>())
            .filter(|inner| {
                inner.operator == operator
                    && inner.all == all
                    && inner.limit.is_none()
                    && inner.offset.is_none()
            })
            .map(|inner| inner.expressions.clone());
        if let Some(mut flattened) = collapsed {
            flattened.extend(expressions.drain(1..));
            expressions = flattened;
        }
        Self {
            operator,
            expressions,
            all,
            order_by: None,
            limit: None,
            offset: None,
        }
    }

    pub fn union<I>(expressions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Self::new(SetOperator::Union, expressions, false)
    }

    pub fn union_all<I>(expressions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Self::new(SetOperator::Union, expressions, true)
    }

    pub fn except<I>(expressions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Self::new(SetOperator::Except, expressions, false)
    }

    pub fn intersect<I>(expressions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Self::new(SetOperator::Intersect, expressions, false)
    }

    pub fn order_by(mut self, order_by: impl Into<Expr>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl Node for SetExpr {
    fn node_type(&self) -> &'static NodeType {
        self.operator.node_type()
    }
}

/// Compiles `expression` and then records `tables` as implicitly used.
/// With `replace`, tables collected while compiling `expression` are dropped.
#[derive(Debug, Clone)]
pub struct AutoTables {
    pub expression: Expr,
    pub tables: Vec<Expr>,
    pub replace: bool,
}

impl AutoTables {
    pub fn new<I>(expression: impl Into<Expr>, tables: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        Self {
            expression: expression.into(),
            tables: tables.into_iter().map(Into::into).collect(),
            replace: true,
        }
    }

    pub fn keep_collected(mut self) -> Self {
        self.replace = false;
        self
    }
}

impl Node for AutoTables {
    fn node_type(&self) -> &'static NodeType {
        &types::AUTO_TABLES
    }
}

/// Next value of a named auto-incrementing sequence; rendering is dialect
/// specific
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub name: String,
}

impl Sequence {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Node for Sequence {
    fn node_type(&self) -> &'static NodeType {
        &types::SEQUENCE
    }
}

impl_expr_from_node!(Select, Insert, Update, Delete, SetExpr, AutoTables, Sequence);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Field;

    fn elems() -> (Expr, Expr, Expr) {
        (
            Expr::from(Field::new("elem1")),
            Expr::from(Field::new("elem2")),
            Expr::from(Field::new("elem3")),
        )
    }

    fn operands(set: &SetExpr) -> Vec<&'static str> {
        set.expressions.iter().map(|e| e.node_type().name()).collect()
    }

    #[test]
    fn test_union_collapses_leading_union() {
        let (a, b, c) = elems();
        let union = SetExpr::union([Expr::from(SetExpr::union([a, b])), c]);
        assert_eq!(union.expressions.len(), 3);
        assert_eq!(operands(&union), vec!["Field", "Field", "Field"]);
    }

    #[test]
    fn test_only_first_operand_collapses() {
        let (a, b, c) = elems();
        let union = SetExpr::union([a, Expr::from(SetExpr::union([b, c]))]);
        assert_eq!(operands(&union), vec!["Field", "Union"]);
    }

    #[test]
    fn test_no_collapse_when_all_differs() {
        let (a, b, c) = elems();
        let union = SetExpr::union([Expr::from(SetExpr::union_all([a.clone(), b.clone()])), c.clone()]);
        assert_eq!(operands(&union), vec!["Union", "Field"]);

        let union = SetExpr::union_all([Expr::from(SetExpr::union_all([a, b])), c]);
        assert_eq!(union.expressions.len(), 3);
    }

    #[test]
    fn test_no_collapse_with_limit_or_offset() {
        let (a, b, c) = elems();
        let limited = SetExpr::union([a.clone(), b.clone()]).limit(1);
        let union = SetExpr::union([Expr::from(limited), c.clone()]);
        assert_eq!(operands(&union), vec!["Union", "Field"]);

        let offset = SetExpr::union([a, b]).offset(3);
        let union = SetExpr::union([Expr::from(offset), c]);
        assert_eq!(operands(&union), vec!["Union", "Field"]);
    }

    #[test]
    fn test_no_collapse_across_operators() {
        let (a, b, c) = elems();
        let union = SetExpr::union([Expr::from(SetExpr::except([a, b])), c]);
        assert_eq!(operands(&union), vec!["Except", "Field"]);
    }

    #[test]
    fn test_insert_from_pairs() {
        let insert = Insert::new([(Field::new("a"), 1), (Field::new("b"), 2)]);
        assert_eq!(insert.columns.len(), 2);
        match insert.values {
            InsertValues::Rows(rows) => assert_eq!(rows[0].len(), 2),
            InsertValues::Query(_) => panic!("expected rows"),
        }
    }
}
