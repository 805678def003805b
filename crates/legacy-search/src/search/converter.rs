use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::core::{
    ContentTypeHandler, FieldTypeService, LanguageHandler, LowercaseTransformation,
    TransformationProcessor,
};
use crate::error::{NotImplementedError, RepositoryResult};
use crate::field_value::FieldValueConverterRegistry;
use crate::language::MaskGenerator;
use crate::sql::SqlExpr;
use crate::types::{Criterion, LanguageSettings};

use super::handlers::{
    ContentHandler, ContentNameHandler, ContentTypeIdentifierHandler, DateMetadataHandler,
    FieldHandler, IsFieldEmptyHandler, LanguageCodeHandler, LocationHandler, LogicalHandler,
    UserMetadataHandler,
};

/// The table the search query is rooted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchScope {
    /// One row per content item.
    Content,
    /// One row per location, `t` is `ezcontentobject_tree`.
    Location,
    /// One row per trashed location, `t` is `ezcontentobject_trash`.
    Trash,
}

impl SearchScope {
    /// Returns the scope name used in errors and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchScope::Content => "content",
            SearchScope::Location => "location",
            SearchScope::Trash => "trash",
        }
    }

    /// Returns true if the query exposes a location row as `t`.
    pub fn has_location_row(&self) -> bool {
        !matches!(self, SearchScope::Content)
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collaborators shared by all handlers.
#[derive(Debug, Clone)]
pub struct SearchContext {
    /// Language lookup.
    pub languages: Arc<dyn LanguageHandler>,
    /// Content type lookup and searchable field map.
    pub content_types: Arc<dyn ContentTypeHandler>,
    /// Field type empty values.
    pub field_types: Arc<dyn FieldTypeService>,
    /// Field value converters by field type.
    pub converters: Arc<FieldValueConverterRegistry>,
    /// Text normalization.
    pub transformation: Arc<dyn TransformationProcessor>,
    /// Language masks over `languages`.
    pub masks: MaskGenerator,
}

impl SearchContext {
    /// Creates a context with lowercase text normalization.
    pub fn new(
        languages: Arc<dyn LanguageHandler>,
        content_types: Arc<dyn ContentTypeHandler>,
        field_types: Arc<dyn FieldTypeService>,
        converters: Arc<FieldValueConverterRegistry>,
    ) -> Self {
        Self {
            masks: MaskGenerator::new(languages.clone()),
            languages,
            content_types,
            field_types,
            converters,
            transformation: Arc::new(LowercaseTransformation),
        }
    }
}

/// Translates criterion trees into SQL expressions for one scope.
///
/// Immutable after construction and safe to share between threads.
#[derive(Debug, Clone)]
pub struct CriteriaConverter {
    context: SearchContext,
    scope: SearchScope,
}

impl CriteriaConverter {
    /// Creates a converter for `scope`.
    pub fn new(context: SearchContext, scope: SearchScope) -> Self {
        Self { context, scope }
    }

    /// Converter for content search.
    pub fn content(context: SearchContext) -> Self {
        Self::new(context, SearchScope::Content)
    }

    /// Converter for location search.
    pub fn location(context: SearchContext) -> Self {
        Self::new(context, SearchScope::Location)
    }

    /// Returns the scope.
    pub fn scope(&self) -> SearchScope {
        self.scope
    }

    /// Returns the shared collaborators.
    pub fn context(&self) -> &SearchContext {
        &self.context
    }

    /// Converts a criterion tree.
    ///
    /// Operators are checked by the handlers; call
    /// [`Criterion::validate`] first to get `InvalidArgument` errors instead
    /// of runtime errors for unsupported operators.
    pub fn convert(
        &self,
        criterion: &Criterion,
        settings: &LanguageSettings,
    ) -> RepositoryResult<SqlExpr> {
        debug!(
            criterion = criterion.name(),
            scope = self.scope.as_str(),
            languages = settings.languages.len(),
            "Converting criterion"
        );
        self.dispatch(criterion, settings)
    }

    pub(crate) fn dispatch(
        &self,
        criterion: &Criterion,
        settings: &LanguageSettings,
    ) -> RepositoryResult<SqlExpr> {
        let context = &self.context;
        let scope = self.scope;

        match criterion {
            Criterion::LogicalAnd(children) => LogicalHandler::and(self, children, settings),
            Criterion::LogicalOr(children) => LogicalHandler::or(self, children, settings),
            Criterion::LogicalNot(child) => LogicalHandler::not(self, child, settings),
            Criterion::MatchAll => Ok(SqlExpr::match_all()),
            Criterion::MatchNone => Ok(SqlExpr::match_none()),

            Criterion::ContentId(spec) => ContentHandler::content_id(spec),
            Criterion::RemoteId(spec) => ContentHandler::remote_id(spec),
            Criterion::ContentTypeId(spec) => ContentHandler::content_type_id(spec),
            Criterion::ContentTypeGroupId(spec) => ContentHandler::content_type_group_id(spec),
            Criterion::SectionId(spec) => ContentHandler::section_id(spec),
            Criterion::SectionIdentifier(spec) => ContentHandler::section_identifier(spec),
            Criterion::ObjectStateId(spec) => ContentHandler::object_state_id(spec),
            Criterion::ContentTypeIdentifier(spec) => {
                ContentTypeIdentifierHandler::handle(context, spec)
            }
            Criterion::LanguageCode(c) => LanguageCodeHandler::handle(context, c),
            Criterion::DateMetadata(c) => DateMetadataHandler::handle(scope, c),
            Criterion::UserMetadata(c) => UserMetadataHandler::handle(c),
            Criterion::Field(c) => FieldHandler::handle(context, c, settings),
            Criterion::IsFieldEmpty(c) => IsFieldEmptyHandler::handle(context, c, settings),
            Criterion::ContentName(spec) => ContentNameHandler::handle(context, spec),

            Criterion::LocationId(spec) => LocationHandler::location_id(scope, spec),
            Criterion::ParentLocationId(spec) => LocationHandler::parent_location_id(scope, spec),
            Criterion::LocationRemoteId(spec) => LocationHandler::location_remote_id(scope, spec),
            Criterion::Subtree(spec) => LocationHandler::subtree(scope, spec),
            Criterion::Ancestor(spec) => LocationHandler::ancestor(scope, spec),
            Criterion::Visibility(state) => Ok(LocationHandler::visibility(scope, *state)),

            Criterion::Depth(_) | Criterion::LocationPriority(_) | Criterion::IsMainLocation(_)
                if !scope.has_location_row() =>
            {
                Err(NotImplementedError::UnsupportedCriterion {
                    criterion: criterion.name(),
                    scope: scope.as_str(),
                }
                .into())
            }
            Criterion::Depth(spec) => LocationHandler::depth(spec),
            Criterion::LocationPriority(spec) => LocationHandler::priority(spec),
            Criterion::IsMainLocation(main) => Ok(LocationHandler::is_main_location(*main)),
        }
    }
}
