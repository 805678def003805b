//! SELECT statement builder.

use super::expr::{Column, Operand, SqlExpr};
use super::fragment::{SqlFragment, SqlWriter};

#[derive(Debug, Clone, PartialEq)]
struct Join {
    table: &'static str,
    alias: &'static str,
    on: SqlExpr,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

/// A SELECT statement over the legacy schema.
///
/// Conditions added with [`Select::and_where`] are combined with `AND`.
/// Unconstrained conditions (the empty conjunction) are dropped, so a
/// select without real conditions renders without a `WHERE` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    distinct: bool,
    columns: Vec<Operand>,
    table: &'static str,
    alias: &'static str,
    joins: Vec<Join>,
    conditions: Vec<SqlExpr>,
    order_by: Vec<(Column, SortDirection)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Select {
    /// Starts a select over `table AS alias`.
    pub fn from_table(table: &'static str, alias: &'static str) -> Self {
        Self {
            distinct: false,
            columns: Vec::new(),
            table,
            alias,
            joins: Vec::new(),
            conditions: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Adds a result column.
    pub fn column(mut self, column: impl Into<Operand>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Selects `1`, for `EXISTS` sub-queries.
    pub fn select_one(self) -> Self {
        self.column(Operand::Int(1))
    }

    /// Emits `SELECT DISTINCT`.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Adds an `INNER JOIN`.
    pub fn inner_join(mut self, table: &'static str, alias: &'static str, on: SqlExpr) -> Self {
        self.joins.push(Join { table, alias, on });
        self
    }

    /// Adds a condition to the `WHERE` clause.
    pub fn and_where(mut self, condition: SqlExpr) -> Self {
        if !condition.is_unconstrained() {
            self.conditions.push(condition);
        }
        self
    }

    /// Adds an `ORDER BY` term.
    pub fn order_by(mut self, column: Column, direction: SortDirection) -> Self {
        self.order_by.push((column, direction));
        self
    }

    /// Sets `LIMIT`.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets `OFFSET`.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Returns true if the statement carries a `WHERE` clause.
    pub fn has_conditions(&self) -> bool {
        !self.conditions.is_empty()
    }

    /// Replaces the result columns with a single `COUNT(DISTINCT column)`.
    ///
    /// Ordering and paging are dropped.
    pub fn into_count(mut self, column: Column) -> Self {
        self.distinct = false;
        self.columns = vec![Operand::CountDistinct(Box::new(Operand::Column(column)))];
        self.order_by.clear();
        self.limit = None;
        self.offset = None;
        self
    }

    /// Renders the statement with placeholders starting at `?1`.
    pub fn to_fragment(&self) -> SqlFragment {
        let mut writer = SqlWriter::new(0);
        self.write(&mut writer);
        writer.finish()
    }

    pub(crate) fn write(&self, w: &mut SqlWriter) {
        w.push_str(if self.distinct {
            "SELECT DISTINCT "
        } else {
            "SELECT "
        });

        if self.columns.is_empty() {
            w.push_str("*");
        }
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                w.push_str(", ");
            }
            column.write(w);
        }

        w.push_str(" FROM ");
        w.push_str(self.table);
        if !self.alias.is_empty() {
            w.push_str(" ");
            w.push_str(self.alias);
        }

        for join in &self.joins {
            w.push_str(" INNER JOIN ");
            w.push_str(join.table);
            w.push_str(" ");
            w.push_str(join.alias);
            w.push_str(" ON ");
            join.on.write(w);
        }

        match self.conditions.as_slice() {
            [] => {}
            [only] => {
                w.push_str(" WHERE ");
                only.write(w);
            }
            conditions => {
                w.push_str(" WHERE ");
                for (i, condition) in conditions.iter().enumerate() {
                    if i > 0 {
                        w.push_str(" AND ");
                    }
                    w.push_str("(");
                    condition.write(w);
                    w.push_str(")");
                }
            }
        }

        if !self.order_by.is_empty() {
            w.push_str(" ORDER BY ");
            for (i, (column, direction)) in self.order_by.iter().enumerate() {
                if i > 0 {
                    w.push_str(", ");
                }
                Operand::Column(*column).write(w);
                w.push_str(match direction {
                    SortDirection::Asc => " ASC",
                    SortDirection::Desc => " DESC",
                });
            }
        }

        if let Some(limit) = self.limit {
            w.push_str(" LIMIT ");
            w.push_int(limit as i64);
        }
        if let Some(offset) = self.offset {
            w.push_str(" OFFSET ");
            w.push_int(offset as i64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::SqlParam;

    #[test]
    fn test_unconstrained_select_has_no_where() {
        let select = Select::from_table("ezcontentobject", "c")
            .column(Column::new("c", "id"))
            .and_where(SqlExpr::unconstrained());
        assert!(!select.has_conditions());
        assert_eq!(select.to_fragment().sql, "SELECT c.id FROM ezcontentobject c");
    }

    #[test]
    fn test_where_conditions_are_anded() {
        let select = Select::from_table("ezcontentobject", "c")
            .column(Column::new("c", "id"))
            .and_where(SqlExpr::eq(Column::new("c", "status"), Operand::Int(1)))
            .and_where(SqlExpr::in_list(
                Column::new("c", "id"),
                vec![SqlParam::integer(12)],
            ))
            .order_by(Column::new("c", "id"), SortDirection::Asc)
            .limit(10)
            .offset(20);

        assert_eq!(
            select.to_fragment().sql,
            "SELECT c.id FROM ezcontentobject c WHERE (c.status = 1) AND (c.id IN (?1)) \
             ORDER BY c.id ASC LIMIT 10 OFFSET 20"
        );
    }

    #[test]
    fn test_nested_select_continues_numbering() {
        let inner = Select::from_table("ezcontentobject_tree", "")
            .column(Column::bare("contentobject_id"))
            .and_where(SqlExpr::in_list(
                Column::bare("node_id"),
                vec![SqlParam::integer(2)],
            ));
        let outer = Select::from_table("ezcontentobject", "c")
            .column(Column::new("c", "id"))
            .and_where(SqlExpr::eq(
                Column::new("c", "section_id"),
                Operand::param(SqlParam::integer(1)),
            ))
            .and_where(SqlExpr::in_select(Column::new("c", "id"), inner));

        let frag = outer.to_fragment();
        assert_eq!(
            frag.sql,
            "SELECT c.id FROM ezcontentobject c WHERE (c.section_id = ?1) AND \
             (c.id IN (SELECT contentobject_id FROM ezcontentobject_tree WHERE node_id IN (?2)))"
        );
        assert_eq!(frag.params, vec![SqlParam::integer(1), SqlParam::integer(2)]);
    }

    #[test]
    fn test_into_count_drops_paging() {
        let select = Select::from_table("ezcontentobject", "c")
            .column(Column::new("c", "id"))
            .limit(5)
            .into_count(Column::new("c", "id"));
        assert_eq!(
            select.to_fragment().sql,
            "SELECT COUNT(DISTINCT c.id) FROM ezcontentobject c"
        );
    }

    #[test]
    fn test_joins_render_inner() {
        let select = Select::from_table("ezcontentobject", "c")
            .column(Column::new("c", "id"))
            .inner_join(
                "ezcontentobject_tree",
                "t",
                SqlExpr::eq(
                    Column::new("t", "contentobject_id"),
                    Operand::Column(Column::new("c", "id")),
                ),
            )
            .and_where(SqlExpr::eq(Column::new("t", "depth"), Operand::Int(2)));
        assert_eq!(
            select.to_fragment().sql,
            "SELECT c.id FROM ezcontentobject c INNER JOIN ezcontentobject_tree t \
             ON t.contentobject_id = c.id WHERE t.depth = 2"
        );
    }
}
