use sea_orm::{
    QueryOrder,
    sea_query::{Alias, Expr, Order, SimpleExpr},
};

use crate::errors::{InputKind, QueryError, Result};
use crate::models::{SortDirection, SortField};

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

/// Parse the sort wire format: `[{"field": "age", "dir": "desc"}]`.
///
/// A missing or unrecognized `dir` reads as ascending.
///
/// # Errors
///
/// Returns [`QueryError::MalformedInput`] when the text is not a sort list.
pub fn parse_sort(json: &str) -> Result<Vec<SortField>> {
    serde_json::from_str(json).map_err(|e| QueryError::malformed(InputKind::Sort, e))
}

/// Append one `ORDER BY` term per entry, in input order. Duplicates are kept.
pub fn apply_sort<Q: QueryOrder>(query: Q, fields: &[SortField]) -> Q {
    fields.iter().fold(query, |query, sort| {
        tracing::debug!(field = %sort.field, direction = sort.direction.as_sql(), "Applying sort");
        let column: SimpleExpr = Expr::col(Alias::new(sort.field.as_str())).into();
        query.order_by(column, sort.direction.into())
    })
}

/// Sort list for a single `sortby`/`sortDirection` style pair. An empty field means no sorting.
#[must_use]
pub fn sort_from_params(field: &str, direction: &str) -> Vec<SortField> {
    if field.is_empty() {
        return Vec::new();
    }
    vec![SortField::new(field, SortDirection::normalize(direction))]
}

/// Encode a sort list back to its wire format.
///
/// # Errors
///
/// Returns [`QueryError::Serialization`] if serde fails.
pub fn encode_sort(fields: &[SortField]) -> Result<String> {
    serde_json::to_string(fields).map_err(QueryError::Serialization)
}
