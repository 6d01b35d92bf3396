//! Per-entity binding consumed by the generic service.

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, EntityTrait, FromQueryResult, IntoActiveModel,
    ModelTrait, Value,
};
use tracing::debug;

use super::error::DomainError;
use super::fields::FieldMap;

/// Everything the generic service needs to know about one entity.
pub trait Resource: Send + Sync + 'static {
    /// Human-readable entity name used in errors and logs.
    const LABEL: &'static str;

    type Entity: EntityTrait<Model = Self::Model>;
    type Model: ModelTrait<Entity = Self::Entity>
        + FromQueryResult
        + IntoActiveModel<Self::ActiveModel>
        + Clone
        + Send
        + Sync
        + 'static;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + Send
        + Sync
        + 'static;

    /// Contract record returned to callers.
    type Record: From<Self::Model> + Send + 'static;
    /// Creation input.
    type New: Send + 'static;
    /// Partial update input.
    type Patch: Changeset + Send + 'static;

    fn fields() -> &'static FieldMap<Self::Entity>;

    fn id_column() -> <Self::Entity as EntityTrait>::Column;

    /// Column holding the owning user, for owner-scoped entities.
    fn owner_column() -> Option<<Self::Entity as EntityTrait>::Column> {
        None
    }

    /// Check a creation input before it reaches the database.
    ///
    /// # Errors
    /// Returns `DomainError::Validation` describing the first offending field.
    fn validate_new(new: &Self::New) -> Result<(), DomainError>;

    /// Build the row to insert. `owner` is the caller for owner-scoped entities.
    fn active_model(new: Self::New, owner: Option<&str>) -> Self::ActiveModel;

    /// Hook run on a row that is about to be updated with at least one change.
    fn touch(_am: &mut Self::ActiveModel) {}
}

/// A partial update expressed as `field name → new value` pairs.
///
/// Only supplied fields appear; absent fields are left unchanged.
pub trait Changeset {
    fn into_changes(self) -> Vec<(&'static str, Value)>;
}

/// Overlay `changes` onto `am`, honoring the field registry.
///
/// Immutable and unknown fields are skipped. Returns how many fields were set.
///
/// # Errors
/// Returns `DomainError::Validation` when a value has the wrong type or a
/// required text field would become blank.
pub fn apply_changes<R: Resource>(
    am: &mut R::ActiveModel,
    changes: Vec<(&'static str, Value)>,
) -> Result<usize, DomainError> {
    let fields = R::fields();
    let mut applied = 0;
    for (name, value) in changes {
        let Some(field) = fields.get(name) else {
            debug!(entity = R::LABEL, field = name, "skipping unknown field in update");
            continue;
        };
        if !field.mutable {
            debug!(entity = R::LABEL, field = name, "skipping immutable field in update");
            continue;
        }
        if !field.kind.accepts(&value) {
            return Err(DomainError::validation(
                name,
                format!("expected {}", field.kind),
            ));
        }
        if field.required && is_blank(&value) {
            return Err(DomainError::validation(name, "must not be empty"));
        }
        am.set(field.column, value);
        applied += 1;
    }
    Ok(applied)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::String(Some(s)) => s.trim().is_empty(),
        Value::String(None) => true,
        _ => false,
    }
}

/// Shared check for a required text field on creation.
///
/// # Errors
/// Returns `DomainError::Validation` when `value` is blank.
pub fn require_text(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    Ok(())
}
