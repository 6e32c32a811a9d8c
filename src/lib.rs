//! # querycrate
//!
//! JSON filter trees, sorting and pagination for SeaORM list endpoints.
//!
//! A request carries three optional parameters: `filter` (a nested `and`/`or` tree of
//! conditions), `sort` (a list of fields and directions) and `page`/`pageSize`. This crate parses
//! them, checks them against per-endpoint field allowlists, and applies them to any SeaORM
//! `Select`. Values are always bound and identifiers quoted.
//!
//! ```rust,ignore
//! use querycrate::{ListParams, ListQuery, execute_with_count};
//!
//! async fn list_users(db: &DatabaseConnection, params: ListParams) -> querycrate::Result<()> {
//!     let list = params.into_query(&["age", "first_name"], &["age"])?;
//!     let (main, count) = list.apply_with_count(user::Entity::find(), db.get_database_backend());
//!     let (rows, total) = execute_with_count(db, main, count).await?;
//!     let meta = list.metadata(total, "/users");
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod filtering;
pub mod models;
pub mod operations;
pub mod query;

pub use errors::{QueryError, Result};
pub use filtering::{
    apply_filter_group, apply_pagination, apply_sort, compile_filter, compile_filter_group,
    encode_sort, is_valid_operator, pagination_metadata, parse_sort, sort_from_params,
    supported_operators, validate_filter_fields, validate_filter_group, validate_sort_fields,
};
pub use models::{
    Filter, FilterGroup, FilterValue, ListParams, Logic, Pagination, PaginationMetadata,
    SortDirection, SortField,
};
pub use operations::execute_with_count;
pub use query::{ListQuery, filter_param, merged_filter_param};
