use crate::error::RepositoryResult;
use crate::search::SearchScope;
use crate::sql::{Column, Operand, Select, SqlExpr, SqlParam, like_pattern, operator_filter};
use crate::types::{Operator, Specification, VisibilityState, parse_path_string};

use super::{ensure_operator, id_filter, int_params, string_filter};

const TREE: &str = "ezcontentobject_tree";

const RANGE_OPERATORS: &[Operator] = &[
    Operator::Eq,
    Operator::Gt,
    Operator::Gte,
    Operator::Lt,
    Operator::Lte,
    Operator::In,
    Operator::Between,
];

/// Criteria on location rows.
///
/// With a location row in the query (`t`), columns are tested directly.
/// In content scope the filter moves into a sub-select on the tree and the
/// content matches if any of its locations does.
pub struct LocationHandler;

impl LocationHandler {
    /// `node_id`
    pub fn location_id(scope: SearchScope, spec: &Specification) -> RepositoryResult<SqlExpr> {
        Self::on_location(scope, |alias| {
            id_filter("LocationId", Column::new(alias, "node_id"), spec)
        })
    }

    /// `parent_node_id`
    pub fn parent_location_id(scope: SearchScope, spec: &Specification) -> RepositoryResult<SqlExpr> {
        Self::on_location(scope, |alias| {
            id_filter("ParentLocationId", Column::new(alias, "parent_node_id"), spec)
        })
    }

    /// `remote_id` of the location.
    pub fn location_remote_id(scope: SearchScope, spec: &Specification) -> RepositoryResult<SqlExpr> {
        Self::on_location(scope, |alias| {
            string_filter("LocationRemoteId", Column::new(alias, "remote_id"), spec)
        })
    }

    /// Locations at or below any of the given path strings.
    pub fn subtree(scope: SearchScope, spec: &Specification) -> RepositoryResult<SqlExpr> {
        ensure_operator("Subtree", spec, &[Operator::In, Operator::Eq])?;
        let mut patterns = Vec::with_capacity(spec.values().len());
        for path in spec.string_values() {
            parse_path_string(&path)?;
            patterns.push(SqlParam::String(format!("{}%", like_pattern(&path))));
        }

        Self::on_location(scope, |alias| {
            let path_string = Operand::column(alias, "path_string");
            let mut matches: Vec<SqlExpr> = patterns
                .iter()
                .map(|pattern| SqlExpr::like(path_string.clone(), Operand::param(pattern.clone())))
                .collect();
            Ok(if matches.len() == 1 {
                matches.remove(0)
            } else {
                SqlExpr::or(matches)
            })
        })
    }

    /// Locations that are ancestors of (or equal to) the given path strings.
    pub fn ancestor(scope: SearchScope, spec: &Specification) -> RepositoryResult<SqlExpr> {
        ensure_operator("Ancestor", spec, &[Operator::In, Operator::Eq])?;
        let mut node_ids: Vec<i64> = Vec::new();
        for path in spec.string_values() {
            node_ids.extend(parse_path_string(&path)?);
        }
        node_ids.sort_unstable();
        node_ids.dedup();

        Self::on_location(scope, |alias| {
            Ok(SqlExpr::in_list(
                Column::new(alias, "node_id"),
                node_ids.iter().copied().map(SqlParam::Integer),
            ))
        })
    }

    /// Location visibility, or content visibility in content scope.
    ///
    /// Visible content is not hidden itself and has at least one visible
    /// location.
    pub fn visibility(scope: SearchScope, state: VisibilityState) -> SqlExpr {
        if scope.has_location_row() {
            let invisible = match state {
                VisibilityState::Visible => 0,
                VisibilityState::Hidden => 1,
            };
            return SqlExpr::eq(Column::new("t", "is_invisible"), Operand::Int(invisible));
        }

        let visible_locations = Select::from_table(TREE, "")
            .column(Column::bare("contentobject_id"))
            .and_where(SqlExpr::eq(Column::bare("is_hidden"), Operand::Int(0)))
            .and_where(SqlExpr::eq(Column::bare("is_invisible"), Operand::Int(0)));
        let visible = SqlExpr::and(vec![
            SqlExpr::eq(Column::new("c", "is_hidden"), Operand::Int(0)),
            SqlExpr::in_select(Column::new("c", "id"), visible_locations),
        ]);

        match state {
            VisibilityState::Visible => visible,
            VisibilityState::Hidden => SqlExpr::not(visible),
        }
    }

    /// `t.depth`
    pub fn depth(spec: &Specification) -> RepositoryResult<SqlExpr> {
        Self::range("Depth", Operand::column("t", "depth"), spec)
    }

    /// `t.priority`
    pub fn priority(spec: &Specification) -> RepositoryResult<SqlExpr> {
        Self::range("LocationPriority", Operand::column("t", "priority"), spec)
    }

    /// Main (or secondary) locations.
    pub fn is_main_location(main: bool) -> SqlExpr {
        let node_id = Column::new("t", "node_id");
        let main_node_id = Column::new("t", "main_node_id");
        if main {
            SqlExpr::eq(node_id, main_node_id)
        } else {
            SqlExpr::neq(node_id, main_node_id)
        }
    }

    fn range(criterion: &'static str, operand: Operand, spec: &Specification) -> RepositoryResult<SqlExpr> {
        ensure_operator(criterion, spec, RANGE_OPERATORS)?;
        let values = int_params(criterion, spec)?;
        operator_filter(criterion, operand, spec.operator(), values)
    }

    /// Applies `filter` to `t`, or to an unaliased tree sub-select in content scope.
    fn on_location<F>(scope: SearchScope, filter: F) -> RepositoryResult<SqlExpr>
    where
        F: FnOnce(&'static str) -> RepositoryResult<SqlExpr>,
    {
        if scope.has_location_row() {
            return filter("t");
        }

        let locations = Select::from_table(TREE, "")
            .column(Column::bare("contentobject_id"))
            .and_where(filter("")?);
        Ok(SqlExpr::in_select(Column::new("c", "id"), locations))
    }
}
