//! Query resolution: filter text → condition, sort token → ordering.

use sea_orm::{ColumnTrait, Condition, EntityTrait, IdenStatic, Order};
use serde_json::{Map, Value as JsonValue};
use storefront_entities_sdk::{SortDir, SortSpec};
use tracing::debug;

use super::error::DomainError;
use super::fields::FieldMap;

pub type Filter = Map<String, JsonValue>;

/// Parse the raw filter text.
///
/// Blank text and a JSON `null` mean "no filter".
///
/// # Errors
/// Returns `DomainError::Validation` on malformed JSON or when the document is
/// not a JSON object.
pub fn parse_filter(raw: Option<&str>) -> Result<Option<Filter>, DomainError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let parsed: JsonValue = serde_json::from_str(raw)
        .map_err(|e| DomainError::validation("query", format!("Invalid JSON query: {e}")))?;
    match parsed {
        JsonValue::Null => Ok(None),
        JsonValue::Object(map) => Ok(Some(map)),
        _ => Err(DomainError::validation(
            "query",
            "Query must be a JSON object",
        )),
    }
}

/// Turn a filter object into an equality condition over known fields.
///
/// Keys that are not fields of the entity are skipped. A `null` value matches
/// rows where the column is NULL.
///
/// # Errors
/// Returns `DomainError::Validation` when a value does not match its field's type.
pub fn filter_condition<E: EntityTrait>(
    fields: &FieldMap<E>,
    filter: &Filter,
) -> Result<Condition, DomainError> {
    let mut cond = Condition::all();
    for (key, value) in filter {
        let Some(field) = fields.get(key) else {
            debug!(field = %key, "ignoring unknown filter field");
            continue;
        };
        cond = if value.is_null() {
            cond.add(field.column.is_null())
        } else {
            cond.add(field.column.eq(field.coerce(key, value)?))
        };
    }
    Ok(cond)
}

/// Resolve the ordering for a list query.
///
/// An absent or unknown sort field falls back to `id` descending. Sorting by
/// any other field appends `id` descending as a tiebreaker so pages are stable.
#[must_use]
pub fn resolve_order<E: EntityTrait>(
    fields: &FieldMap<E>,
    sort: Option<&SortSpec>,
    id_column: E::Column,
) -> Vec<(E::Column, Order)> {
    let fallback = (id_column, Order::Desc);
    let Some(sort) = sort else {
        return vec![fallback];
    };
    let Some(field) = fields.get(&sort.field) else {
        debug!(field = %sort.field, "ignoring unknown sort field");
        return vec![fallback];
    };
    let order = match sort.dir {
        SortDir::Asc => Order::Asc,
        SortDir::Desc => Order::Desc,
    };
    if field.column.as_str() == id_column.as_str() {
        vec![(id_column, order)]
    } else {
        vec![(field.column, order), fallback]
    }
}

/// Check pagination bounds: `limit` must lie in `1..=max_limit` and both
/// values must fit the signed 64-bit range the drivers bind offsets as.
///
/// # Errors
/// Returns `DomainError::Validation` for an out-of-range skip or limit.
pub fn check_page(skip: u64, limit: u64, max_limit: u64) -> Result<(), DomainError> {
    if i64::try_from(skip).is_err() {
        return Err(DomainError::validation(
            "skip",
            format!("skip must be between 0 and {}", i64::MAX),
        ));
    }
    if limit == 0 || limit > max_limit || i64::try_from(limit).is_err() {
        return Err(DomainError::validation(
            "limit",
            format!("limit must be between 1 and {max_limit}"),
        ));
    }
    Ok(())
}
