//! Search gateways running translated criteria against SQLite.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content_type::ContentTypeCriteriaConverter;
use crate::error::RepositoryResult;
use crate::search::{CriteriaConverter, SearchContext, SearchScope};
use crate::sql::{Column, Operand, Select, SortDirection, SqlExpr, SqlFragment};
use crate::types::{ContentTypeCriterion, Criterion, LanguageSettings};

use super::database::SqliteDatabase;

/// `ezcontentobject.status` of published content.
const STATUS_PUBLISHED: i64 = 1;

/// Matching ids and the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHits {
    /// Number of matches ignoring paging.
    pub total_count: u64,
    /// Ids of the requested page, ascending.
    pub ids: Vec<i64>,
}

fn current_version_join() -> SqlExpr {
    SqlExpr::and(vec![
        SqlExpr::eq(Column::new("v", "contentobject_id"), Column::new("c", "id")),
        SqlExpr::eq(Column::new("v", "version"), Column::new("c", "current_version")),
    ])
}

fn paged(select: Select, offset: u64, limit: Option<u64>) -> Select {
    let select = if offset > 0 { select.offset(offset) } else { select };
    match limit {
        Some(limit) => select.limit(limit),
        // SQLite needs a LIMIT before OFFSET.
        None if offset > 0 => select.limit(i64::MAX as u64),
        None => select,
    }
}

fn run(db: &SqliteDatabase, select: &Select, id: Column) -> RepositoryResult<SearchHits> {
    let count = select.clone().into_count(id).to_fragment();
    let page = select.to_fragment();
    debug!(
        sql = %page.sql,
        params = page.params.len(),
        "Executing search query"
    );

    let conn = db.connection()?;
    let total_count: i64 = conn.query_row(
        &count.sql,
        rusqlite::params_from_iter(count.params.iter()),
        |row| row.get(0),
    )?;

    let mut stmt = conn.prepare(&page.sql)?;
    let ids = stmt
        .query_map(rusqlite::params_from_iter(page.params.iter()), |row| row.get(0))?
        .collect::<Result<Vec<i64>, _>>()?;

    Ok(SearchHits {
        total_count: total_count.max(0) as u64,
        ids,
    })
}

/// Content search: one row per published content item.
#[derive(Debug, Clone)]
pub struct ContentSearchGateway {
    db: SqliteDatabase,
    converter: CriteriaConverter,
}

impl ContentSearchGateway {
    /// Creates the gateway.
    pub fn new(db: SqliteDatabase, context: SearchContext) -> Self {
        Self {
            db,
            converter: CriteriaConverter::content(context),
        }
    }

    /// Returns the converter used by this gateway.
    pub fn converter(&self) -> &CriteriaConverter {
        &self.converter
    }

    /// Builds the id query for `criterion`.
    pub fn query(
        &self,
        criterion: &Criterion,
        settings: &LanguageSettings,
        offset: u64,
        limit: Option<u64>,
    ) -> RepositoryResult<Select> {
        criterion.validate()?;
        let filter = self.converter.convert(criterion, settings)?;

        let select = Select::from_table("ezcontentobject", "c")
            .distinct()
            .column(Column::new("c", "id"))
            .inner_join("ezcontentobject_version", "v", current_version_join())
            .and_where(SqlExpr::eq(
                Column::new("c", "status"),
                Operand::Int(STATUS_PUBLISHED),
            ))
            .and_where(filter)
            .order_by(Column::new("c", "id"), SortDirection::Asc);
        Ok(paged(select, offset, limit))
    }

    /// Renders the id query for `criterion`.
    pub fn build(
        &self,
        criterion: &Criterion,
        settings: &LanguageSettings,
        offset: u64,
        limit: Option<u64>,
    ) -> RepositoryResult<SqlFragment> {
        Ok(self.query(criterion, settings, offset, limit)?.to_fragment())
    }

    /// Runs the search.
    pub fn find(
        &self,
        criterion: &Criterion,
        settings: &LanguageSettings,
        offset: u64,
        limit: Option<u64>,
    ) -> RepositoryResult<SearchHits> {
        let select = self.query(criterion, settings, offset, limit)?;
        run(&self.db, &select, Column::new("c", "id"))
    }
}

/// Location search: one row per location, or per trashed location.
#[derive(Debug, Clone)]
pub struct LocationSearchGateway {
    db: SqliteDatabase,
    converter: CriteriaConverter,
}

impl LocationSearchGateway {
    /// Searches `ezcontentobject_tree`.
    pub fn new(db: SqliteDatabase, context: SearchContext) -> Self {
        Self {
            db,
            converter: CriteriaConverter::location(context),
        }
    }

    /// Searches `ezcontentobject_trash`.
    pub fn trash(db: SqliteDatabase, context: SearchContext) -> Self {
        Self {
            db,
            converter: CriteriaConverter::new(context, SearchScope::Trash),
        }
    }

    /// Returns the converter used by this gateway.
    pub fn converter(&self) -> &CriteriaConverter {
        &self.converter
    }

    /// Builds the node id query for `criterion`.
    pub fn query(
        &self,
        criterion: &Criterion,
        settings: &LanguageSettings,
        offset: u64,
        limit: Option<u64>,
    ) -> RepositoryResult<Select> {
        criterion.validate()?;
        let filter = self.converter.convert(criterion, settings)?;

        let select = match self.converter.scope() {
            SearchScope::Trash => Select::from_table("ezcontentobject_trash", "t"),
            _ => Select::from_table("ezcontentobject_tree", "t"),
        }
        .distinct()
        .column(Column::new("t", "node_id"))
        .inner_join(
            "ezcontentobject",
            "c",
            SqlExpr::eq(Column::new("c", "id"), Column::new("t", "contentobject_id")),
        )
        .inner_join("ezcontentobject_version", "v", current_version_join());

        let select = if self.converter.scope() == SearchScope::Trash {
            select
        } else {
            select.and_where(SqlExpr::eq(
                Column::new("c", "status"),
                Operand::Int(STATUS_PUBLISHED),
            ))
        };

        let select = select
            .and_where(filter)
            .order_by(Column::new("t", "node_id"), SortDirection::Asc);
        Ok(paged(select, offset, limit))
    }

    /// Renders the node id query for `criterion`.
    pub fn build(
        &self,
        criterion: &Criterion,
        settings: &LanguageSettings,
        offset: u64,
        limit: Option<u64>,
    ) -> RepositoryResult<SqlFragment> {
        Ok(self.query(criterion, settings, offset, limit)?.to_fragment())
    }

    /// Runs the search.
    pub fn find(
        &self,
        criterion: &Criterion,
        settings: &LanguageSettings,
        offset: u64,
        limit: Option<u64>,
    ) -> RepositoryResult<SearchHits> {
        let select = self.query(criterion, settings, offset, limit)?;
        run(&self.db, &select, Column::new("t", "node_id"))
    }
}

/// Content type search over defined content types.
#[derive(Debug, Clone)]
pub struct ContentTypeGateway {
    db: SqliteDatabase,
    converter: ContentTypeCriteriaConverter,
}

impl ContentTypeGateway {
    /// Creates the gateway.
    pub fn new(db: SqliteDatabase) -> Self {
        Self {
            db,
            converter: ContentTypeCriteriaConverter::new(),
        }
    }

    /// Builds the content type id query for `criterion`.
    pub fn query(&self, criterion: &ContentTypeCriterion) -> RepositoryResult<Select> {
        criterion.validate()?;
        let filter = self.converter.convert(criterion)?;

        Ok(Select::from_table("ezcontentclass", "c")
            .column(Column::new("c", "id"))
            .and_where(SqlExpr::eq(Column::new("c", "version"), Operand::Int(0)))
            .and_where(filter)
            .order_by(Column::new("c", "id"), SortDirection::Asc))
    }

    /// Renders the content type id query for `criterion`.
    pub fn build(&self, criterion: &ContentTypeCriterion) -> RepositoryResult<SqlFragment> {
        Ok(self.query(criterion)?.to_fragment())
    }

    /// Runs the search.
    pub fn find(&self, criterion: &ContentTypeCriterion) -> RepositoryResult<SearchHits> {
        let select = self.query(criterion)?;
        run(&self.db, &select, Column::new("c", "id"))
    }
}
