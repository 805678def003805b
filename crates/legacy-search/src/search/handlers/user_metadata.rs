use crate::error::RepositoryResult;
use crate::sql::{Column, Operand, Select, SqlExpr};
use crate::types::{UserMetadataCriterion, UserMetadataTarget};

use super::id_filter;

const CRITERION: &str = "UserMetadata";

/// Matches content by owner, current version creator or owner group.
pub struct UserMetadataHandler;

impl UserMetadataHandler {
    /// Builds the user relation filter.
    ///
    /// Group membership is transitive: the owner's location must lie
    /// anywhere below a location of one of the groups.
    pub fn handle(criterion: &UserMetadataCriterion) -> RepositoryResult<SqlExpr> {
        let spec = &criterion.specification;
        match criterion.target {
            UserMetadataTarget::Owner => id_filter(CRITERION, Column::new("c", "owner_id"), spec),
            UserMetadataTarget::Modifier => {
                id_filter(CRITERION, Column::new("v", "creator_id"), spec)
            }
            UserMetadataTarget::Group => {
                let subtree = SqlExpr::like(
                    Column::new("t1", "path_string"),
                    Operand::column("t2", "path_string").concat(Operand::Literal("%")),
                );
                let members = Select::from_table("ezcontentobject_tree", "t1")
                    .column(Column::new("t1", "contentobject_id"))
                    .inner_join("ezcontentobject_tree", "t2", subtree)
                    .and_where(id_filter(
                        CRITERION,
                        Column::new("t2", "contentobject_id"),
                        spec,
                    )?);
                Ok(SqlExpr::in_select(Column::new("c", "owner_id"), members))
            }
        }
    }
}
