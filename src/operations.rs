//! # Query Execution
//!
//! The one place this crate talks to a database: run a compiled listing and its count query.
//!
//! ```rust,ignore
//! let (main, count) = list_query.apply_with_count(user::Entity::find(), db.get_database_backend());
//! let (rows, total) = execute_with_count(&db, main, count).await?;
//! let meta = list_query.metadata(total, "/users?page=2&pageSize=10");
//! ```

use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, Select};

use crate::errors::{QueryError, QueryStage, Result};

/// Execute the count query, then the main query.
///
/// Each failure is tagged with the query that produced it and logged; nothing is retried.
///
/// # Errors
///
/// Returns [`QueryError::Execution`] with [`QueryStage::Count`] or [`QueryStage::Main`].
pub async fn execute_with_count<'db, E, C>(
    db: &'db C,
    query: Select<E>,
    count_query: Select<E>,
) -> Result<(Vec<E::Model>, u64)>
where
    E: EntityTrait,
    E::Model: Sync + 'db,
    C: ConnectionTrait,
{
    let total = PaginatorTrait::count(count_query, db).await.map_err(|e| {
        let err = QueryError::execution(QueryStage::Count, e);
        err.log_internal();
        err
    })?;

    let rows = query.all(db).await.map_err(|e| {
        let err = QueryError::execution(QueryStage::Main, e);
        err.log_internal();
        err
    })?;

    tracing::debug!(rows = rows.len(), total, "Executed list query");
    Ok((rows, total))
}
