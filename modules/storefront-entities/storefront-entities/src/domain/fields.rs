//! Static per-entity field registry.
//!
//! Every entity declares once which of its fields are addressable by name,
//! which column backs each of them, what JSON shape a value must have and
//! whether an update may overwrite it. The query resolver and the mutation
//! path both consult the same registry.

use std::collections::HashMap;
use std::fmt;

use sea_orm::{EntityTrait, Value};
use serde_json::Value as JsonValue;
use time::{OffsetDateTime, UtcOffset};
use time::format_description::well_known::Rfc3339;

use super::error::DomainError;

/// Stored type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    I32,
    F64,
    String,
    Bool,
    DateTime,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldKind::I32 => "integer",
            FieldKind::F64 => "number",
            FieldKind::String => "string",
            FieldKind::Bool => "boolean",
            FieldKind::DateTime => "date-time",
        };
        f.write_str(s)
    }
}

impl FieldKind {
    /// Whether `value` can be written to a column of this kind.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (FieldKind::I32, Value::Int(_))
                | (FieldKind::F64, Value::Double(_))
                | (FieldKind::String, Value::String(_))
                | (FieldKind::Bool, Value::Bool(_))
                | (FieldKind::DateTime, Value::TimeDateTimeWithTimeZone(_))
        )
    }
}

/// One addressable field of an entity.
pub struct Field<E: EntityTrait> {
    pub column: E::Column,
    pub kind: FieldKind,
    pub required: bool,
    pub mutable: bool,
}

impl<E: EntityTrait> Field<E> {
    #[must_use]
    pub fn required(column: E::Column, kind: FieldKind) -> Self {
        Self {
            column,
            kind,
            required: true,
            mutable: true,
        }
    }

    #[must_use]
    pub fn optional(column: E::Column, kind: FieldKind) -> Self {
        Self {
            column,
            kind,
            required: false,
            mutable: true,
        }
    }

    /// Never overwritten by an update.
    #[must_use]
    pub fn immutable(mut self) -> Self {
        self.mutable = false;
        self
    }

    /// Convert a JSON value into a database value of this field's kind.
    ///
    /// # Errors
    /// Returns `DomainError::Validation` when the JSON value has the wrong shape
    /// (e.g. a string for a boolean field, or an integer outside `i32`).
    pub fn coerce(&self, name: &str, value: &JsonValue) -> Result<Value, DomainError> {
        let coerced = match self.kind {
            FieldKind::I32 => value
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .map(Value::from),
            FieldKind::F64 => value.as_f64().map(Value::from),
            FieldKind::String => value.as_str().map(Value::from),
            FieldKind::Bool => value.as_bool().map(Value::from),
            FieldKind::DateTime => value
                .as_str()
                .and_then(|s| OffsetDateTime::parse(s, &Rfc3339).ok())
                .map(|at| Value::from(to_utc(at))),
        };
        coerced.ok_or_else(|| DomainError::validation(name, format!("expected {}", self.kind)))
    }
}

/// Timestamps are stored in UTC so equal instants compare equal as stored text.
#[must_use]
pub fn to_utc(at: OffsetDateTime) -> OffsetDateTime {
    at.to_offset(UtcOffset::UTC)
}

/// Field name → field, for one entity.
pub struct FieldMap<E: EntityTrait> {
    fields: HashMap<&'static str, Field<E>>,
}

impl<E: EntityTrait> Default for FieldMap<E> {
    fn default() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }
}

impl<E: EntityTrait> FieldMap<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: &'static str, field: Field<E>) -> Self {
        self.fields.insert(name, field);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field<E>> {
        self.fields.get(name)
    }

    /// Like [`FieldMap::get`], but an unknown name is an error.
    ///
    /// # Errors
    /// Returns `DomainError::Validation` when `name` is not a field of the entity.
    pub fn require(&self, name: &str) -> Result<&Field<E>, DomainError> {
        self.get(name)
            .ok_or_else(|| DomainError::validation(name, "unknown field"))
    }

    #[must_use]
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }
}
