use std::marker::PhantomData;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use serde_json::Value as JsonValue;
use storefront_entities_sdk::{ListQuery, Page};
use tracing::{debug, info, instrument, warn};

use super::ServiceConfig;
use crate::domain::error::DomainError;
use crate::domain::query::{check_page, filter_condition, parse_filter, resolve_order};
use crate::domain::resource::{Changeset, Resource, apply_changes};

/// Generic CRUD service for one entity.
///
/// Every operation taking `owner` restricts itself to rows owned by that
/// caller when the entity is owner-scoped. Rows outside the scope behave
/// exactly like missing rows.
pub struct EntityService<R: Resource> {
    db: DatabaseConnection,
    config: ServiceConfig,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> EntityService<R> {
    #[must_use]
    pub fn new(db: DatabaseConnection, config: ServiceConfig) -> Self {
        Self {
            db,
            config,
            _resource: PhantomData,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn scope(owner: Option<&str>) -> Condition {
        let cond = Condition::all();
        match (owner, R::owner_column()) {
            (Some(owner), Some(col)) => cond.add(col.eq(owner)),
            _ => cond,
        }
    }

    fn by_id(owner: Option<&str>, id: i32) -> Condition {
        Self::scope(owner).add(R::id_column().eq(id))
    }

    /// Filtered, sorted, paginated listing with the total match count.
    ///
    /// # Errors
    /// `Validation` for a malformed filter, a mistyped filter value or an
    /// out-of-range skip or limit; `Database` for storage failures.
    #[instrument(skip(self, query), fields(entity = R::LABEL, skip = query.skip, limit = query.limit))]
    pub async fn list(
        &self,
        owner: Option<&str>,
        query: &ListQuery,
    ) -> Result<Page<R::Record>, DomainError> {
        debug!("Listing entities");
        check_page(query.skip, query.limit, self.config.max_page_size)?;

        let mut cond = Self::scope(owner);
        if let Some(filter) = parse_filter(query.filter.as_deref())? {
            cond = cond.add(filter_condition(R::fields(), &filter)?);
        }

        let total = R::Entity::find()
            .filter(cond.clone())
            .count(&self.db)
            .await?;

        let mut select = R::Entity::find().filter(cond);
        for (col, order) in resolve_order(R::fields(), query.sort.as_ref(), R::id_column()) {
            select = select.order_by(col, order);
        }
        let rows = select
            .offset(query.skip)
            .limit(query.limit)
            .all(&self.db)
            .await?;

        debug!(total, returned = rows.len(), "Listed entities");
        Ok(Page {
            items: rows.into_iter().map(R::Record::from).collect(),
            total,
            skip: query.skip,
            limit: query.limit,
        })
    }

    /// # Errors
    /// `Database` for storage failures.
    #[instrument(skip(self), fields(entity = R::LABEL))]
    pub async fn get(&self, owner: Option<&str>, id: i32) -> Result<Option<R::Record>, DomainError> {
        debug!("Getting entity by id");
        let found = R::Entity::find()
            .filter(Self::by_id(owner, id))
            .one(&self.db)
            .await?;
        Ok(found.map(R::Record::from))
    }

    /// Persist a new row, stamping the owner for owner-scoped entities.
    ///
    /// # Errors
    /// `Validation` when the input is invalid or an owner-scoped entity is
    /// created without an owner; `Database` for storage failures.
    #[instrument(skip(self, new), fields(entity = R::LABEL))]
    pub async fn create(&self, owner: Option<&str>, new: R::New) -> Result<R::Record, DomainError> {
        info!("Creating entity");
        R::validate_new(&new)?;
        if R::owner_column().is_some() && owner.is_none() {
            return Err(DomainError::validation("user_id", "owner is required"));
        }

        let am = R::active_model(new, owner);
        let model = self
            .db
            .transaction::<_, R::Model, DomainError>(move |txn| {
                Box::pin(async move { Ok(am.insert(txn).await?) })
            })
            .await?;

        let record = R::Record::from(model);
        info!("Successfully created entity");
        Ok(record)
    }

    /// Apply a partial update. `Ok(None)` means the row is missing or not owned.
    ///
    /// # Errors
    /// `Validation` when a supplied value is invalid; `Database` for storage failures.
    #[instrument(skip(self, patch), fields(entity = R::LABEL))]
    pub async fn update(
        &self,
        owner: Option<&str>,
        id: i32,
        patch: R::Patch,
    ) -> Result<Option<R::Record>, DomainError> {
        info!("Updating entity");
        let cond = Self::by_id(owner, id);
        let changes = patch.into_changes();

        let updated = self
            .db
            .transaction::<_, Option<R::Model>, DomainError>(move |txn| {
                Box::pin(async move {
                    let Some(current) = R::Entity::find().filter(cond).one(txn).await? else {
                        return Ok(None);
                    };
                    let mut am = current.clone().into_active_model();
                    if apply_changes::<R>(&mut am, changes)? == 0 {
                        return Ok(Some(current));
                    }
                    R::touch(&mut am);
                    Ok(Some(am.update(txn).await?))
                })
            })
            .await?;

        if updated.is_none() {
            warn!("Entity not found for update");
        }
        Ok(updated.map(R::Record::from))
    }

    /// Hard delete. Returns `false` when the row is missing or not owned.
    ///
    /// # Errors
    /// `Database` for storage failures.
    #[instrument(skip(self), fields(entity = R::LABEL))]
    pub async fn delete(&self, owner: Option<&str>, id: i32) -> Result<bool, DomainError> {
        info!("Deleting entity");
        let cond = Self::by_id(owner, id);
        let affected = self
            .db
            .transaction::<_, u64, DomainError>(move |txn| {
                Box::pin(async move {
                    let res = R::Entity::delete_many().filter(cond).exec(txn).await?;
                    Ok(res.rows_affected)
                })
            })
            .await?;

        if affected == 0 {
            warn!("Entity not found for deletion");
        }
        Ok(affected > 0)
    }

    /// Create each item independently; items failing validation are skipped.
    ///
    /// Not atomic: items created before a storage failure stay committed.
    ///
    /// # Errors
    /// `Database` on the first storage failure.
    #[instrument(skip(self, items), fields(entity = R::LABEL, count = items.len()))]
    pub async fn create_many(
        &self,
        owner: Option<&str>,
        items: Vec<R::New>,
    ) -> Result<Vec<R::Record>, DomainError> {
        let mut created = Vec::with_capacity(items.len());
        for new in items {
            match self.create(owner, new).await {
                Ok(record) => created.push(record),
                Err(e) if e.is_expected() => debug!(error = %e, "Skipping batch item"),
                Err(e) => return Err(e),
            }
        }
        info!(created = created.len(), "Batch create finished");
        Ok(created)
    }

    /// Update each `(id, patch)` independently; missing, foreign and invalid
    /// items are skipped.
    ///
    /// # Errors
    /// `Database` on the first storage failure.
    #[instrument(skip(self, items), fields(entity = R::LABEL, count = items.len()))]
    pub async fn update_many(
        &self,
        owner: Option<&str>,
        items: Vec<(i32, R::Patch)>,
    ) -> Result<Vec<R::Record>, DomainError> {
        let mut updated = Vec::with_capacity(items.len());
        for (id, patch) in items {
            match self.update(owner, id, patch).await {
                Ok(Some(record)) => updated.push(record),
                Ok(None) => debug!(id, "Skipping missing batch item"),
                Err(e) if e.is_expected() => debug!(id, error = %e, "Skipping batch item"),
                Err(e) => return Err(e),
            }
        }
        info!(updated = updated.len(), "Batch update finished");
        Ok(updated)
    }

    /// Delete each id independently and return how many rows were removed.
    ///
    /// # Errors
    /// `Database` on the first storage failure.
    #[instrument(skip(self, ids), fields(entity = R::LABEL, count = ids.len()))]
    pub async fn delete_many(&self, owner: Option<&str>, ids: &[i32]) -> Result<u64, DomainError> {
        let mut deleted = 0;
        for &id in ids {
            if self.delete(owner, id).await? {
                deleted += 1;
            }
        }
        info!(deleted, "Batch delete finished");
        Ok(deleted)
    }

    fn field_condition(field: &str, value: &JsonValue) -> Result<Condition, DomainError> {
        let f = R::fields().require(field)?;
        let cond = Condition::all();
        Ok(if value.is_null() {
            cond.add(f.column.is_null())
        } else {
            cond.add(f.column.eq(f.coerce(field, value)?))
        })
    }

    /// First row (lowest id) whose `field` equals `value`.
    ///
    /// # Errors
    /// `Validation` for an unknown field or a mistyped value; `Database` for
    /// storage failures.
    #[instrument(skip(self, value), fields(entity = R::LABEL))]
    pub async fn find_by_field(
        &self,
        owner: Option<&str>,
        field: &str,
        value: &JsonValue,
    ) -> Result<Option<R::Record>, DomainError> {
        let cond = Self::scope(owner).add(Self::field_condition(field, value)?);
        let found = R::Entity::find()
            .filter(cond)
            .order_by_asc(R::id_column())
            .one(&self.db)
            .await?;
        Ok(found.map(R::Record::from))
    }

    /// Rows whose `field` equals `value`, newest id first.
    ///
    /// # Errors
    /// `Validation` for an unknown field, a mistyped value or an out-of-range
    /// skip or limit; `Database` for storage failures.
    #[instrument(skip(self, value), fields(entity = R::LABEL))]
    pub async fn list_by_field(
        &self,
        owner: Option<&str>,
        field: &str,
        value: &JsonValue,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<R::Record>, DomainError> {
        check_page(skip, limit, self.config.max_page_size)?;
        let cond = Self::scope(owner).add(Self::field_condition(field, value)?);
        let rows = R::Entity::find()
            .filter(cond)
            .order_by_desc(R::id_column())
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(R::Record::from).collect())
    }

    /// Whether row `id` exists and belongs to `owner`. Always `false` for
    /// entities without an owner column.
    ///
    /// # Errors
    /// `Database` for storage failures.
    pub async fn is_owned_by(&self, id: i32, owner: &str) -> Result<bool, DomainError> {
        if R::owner_column().is_none() {
            return Ok(false);
        }
        Ok(self.get(Some(owner), id).await?.is_some())
    }
}
