//! Language filtering shared by the field criteria.

use std::collections::BTreeMap;

use crate::error::{InvalidArgumentError, NotImplementedError, RepositoryResult};
use crate::field_value::FieldValueConverter;
use crate::search::SearchContext;
use crate::sql::{Column, Operand, Select, SqlExpr, SqlParam};
use crate::types::LanguageSettings;

/// Alias of `ezcontentobject_attribute` inside field sub-selects.
pub const FIELD_ALIAS: &str = "f_def";

/// Restricts field rows to the translation that would be shown.
///
/// Without prioritized languages only the main (initial) translation
/// matches. Otherwise each candidate field language is weighted by its
/// priority: every prioritized language is mapped to its own bit position
/// (lowest priority on bit 1, then upwards), and a field row matches when
/// its weight is higher than the weight of every other translation the
/// content has. Bit 0 carries the always-available fallback and is only
/// weighted when `use_always_available` is set.
pub fn language_condition(
    context: &SearchContext,
    field_alias: &'static str,
    settings: &LanguageSettings,
) -> RepositoryResult<SqlExpr> {
    let mask = || Operand::column("c", "language_mask");
    let field_language = || Operand::column(field_alias, "language_id");
    let available_here = SqlExpr::gt(mask().bit_and(field_language()), Operand::Int(0));

    if settings.is_main_language_only() {
        return Ok(SqlExpr::and(vec![
            available_here,
            SqlExpr::gt(
                Operand::column("c", "initial_language_id").bit_and(field_language()),
                Operand::Int(0),
            ),
        ]));
    }

    // Languages of the content other than the one of this field row.
    let other_languages = || mask().minus(mask().bit_and(field_language()));

    let (mut left, mut right) = if settings.use_always_available {
        (
            Some(other_languages().bit_and(Operand::Int(1))),
            Some(field_language().bit_and(Operand::Int(1))),
        )
    } else {
        (None, None)
    };

    for (position, code) in settings.languages.iter().rev().enumerate() {
        let language = context.languages.load_by_language_code(code)?;
        if !language.has_valid_id() {
            return Err(InvalidArgumentError::InvalidValue {
                argument: "language.id".to_string(),
                message: format!(
                    "language '{}' has id {}, expected a single bit greater than 1",
                    language.language_code, language.id
                ),
            }
            .into());
        }
        let id = language.id;
        let target_bit = position as i64 + 1;
        let shift = target_bit - i64::from(id.trailing_zeros());

        let weigh = |term: Operand| match shift {
            s if s > 0 => term.shift_left(s as u32),
            s if s < 0 => term.shift_right(s.unsigned_abs() as u32),
            _ => term,
        };
        let add_left = weigh(other_languages().bit_and(Operand::Int(id)));
        let add_right = weigh(field_language().bit_and(Operand::Int(id)));

        left = Some(match left {
            Some(acc) => acc.plus(add_left),
            None => add_left,
        });
        right = Some(match right {
            Some(acc) => acc.plus(add_right),
            None => add_right,
        });
    }

    match (left, right) {
        (Some(left), Some(right)) => Ok(SqlExpr::and(vec![available_here, SqlExpr::lt(left, right)])),
        _ => Ok(available_here),
    }
}

/// Builds `EXISTS (...)` over the field rows of `target`.
///
/// Searchable fields with identifier `target` are grouped by field type.
/// `filter` receives each searchable type's converter and index column and
/// returns the value filter for that group. Fails with
/// `InvalidArgument(NoSearchableFields)` when no content type has a
/// searchable field `target`, and with `NotImplemented(UnsearchableFieldTypes)`
/// when every matching field type is unsearchable.
pub(crate) fn field_exists<F>(
    context: &SearchContext,
    target: &str,
    settings: &LanguageSettings,
    mut filter: F,
) -> RepositoryResult<SqlExpr>
where
    F: FnMut(&str, &dyn FieldValueConverter, Operand) -> RepositoryResult<SqlExpr>,
{
    let field_map = context.content_types.searchable_field_map()?;

    let mut by_type: BTreeMap<&str, Vec<i64>> = BTreeMap::new();
    for fields in field_map.values() {
        if let Some(field) = fields.get(target) {
            by_type
                .entry(field.field_type_identifier.as_str())
                .or_default()
                .push(field.field_definition_id);
        }
    }

    if by_type.is_empty() {
        return Err(InvalidArgumentError::NoSearchableFields {
            target: target.to_string(),
        }
        .into());
    }

    let mut filters = Vec::with_capacity(by_type.len());
    let mut unsearchable = Vec::new();
    for (field_type, mut definition_ids) in by_type {
        let converter = context.converters.get(field_type)?;
        let Some(column) = converter.index_column() else {
            unsearchable.push(field_type.to_string());
            continue;
        };

        definition_ids.sort_unstable();
        filters.push(SqlExpr::and(vec![
            SqlExpr::in_list(
                Column::new(FIELD_ALIAS, "contentclassattribute_id"),
                definition_ids.into_iter().map(SqlParam::Integer),
            ),
            filter(field_type, converter.as_ref(), Operand::column(FIELD_ALIAS, column))?,
        ]));
    }

    if filters.is_empty() {
        return Err(NotImplementedError::UnsearchableFieldTypes {
            target: target.to_string(),
            field_types: unsearchable,
        }
        .into());
    }

    let select = Select::from_table("ezcontentobject_attribute", FIELD_ALIAS)
        .select_one()
        .and_where(SqlExpr::eq(
            Column::new(FIELD_ALIAS, "contentobject_id"),
            Column::new("c", "id"),
        ))
        .and_where(SqlExpr::eq(
            Column::new(FIELD_ALIAS, "version"),
            Column::new("c", "current_version"),
        ))
        .and_where(SqlExpr::or(filters))
        .and_where(language_condition(context, FIELD_ALIAS, settings)?);

    Ok(SqlExpr::exists(select))
}
