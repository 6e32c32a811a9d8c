//! # Filtering, Sorting & Pagination
//!
//! Translates the JSON list parameters into SeaORM query clauses. Nothing here touches the
//! database: every function takes a query and returns it with conditions, ordering or limits
//! appended.
//!
//! ## Filter trees
//!
//! A filter is a group of leaves and nested groups, each group combined with its own `and`/`or`:
//!
//! ```rust,ignore
//! // age > 21 AND (first_name = 'User1' OR age > 55)
//! GET /users?filter={"logic":"and","filters":[{"field":"age","operator":"gt","value":21}],
//!     "groups":[{"logic":"or","filters":[
//!         {"field":"first_name","operator":"eq","value":"User1"},
//!         {"field":"age","operator":"gt","value":55}]}]}
//! ```
//!
//! Operators are `eq`, `neq`, `gt`, `gte`, `lt`, `lte`, `like`, `in`, `notin`, `isnull`,
//! `isnotnull` and `between`, matched case-insensitively. Text values that look like dates are
//! compared as dates on both sides, using `DATE(..)` on `SQLite` and `CAST(.. AS DATE)` elsewhere.
//!
//! ## Sorting & pagination
//!
//! ```rust,ignore
//! GET /users?sort=[{"field":"age","dir":"desc"}]&page=2&pageSize=10
//! ```

pub mod conditions;
pub mod dialect;
pub mod operator;
pub mod pagination;
pub mod sort;
pub mod validation;

// Re-export commonly used items
pub use conditions::{apply_filter_group, compile_filter, compile_filter_group};
pub use dialect::{DateCast, is_date_literal};
pub use operator::{PredicateKind, is_valid_operator, supported_operators};
pub use pagination::{apply_pagination, pagination_metadata};
pub use sort::{apply_sort, encode_sort, parse_sort, sort_from_params};
pub use validation::{validate_filter_fields, validate_filter_group, validate_sort_fields};
