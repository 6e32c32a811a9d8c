//! # List Query
//!
//! [`ListQuery`] bundles a filter tree, a sort list, optional pagination and the field allowlists
//! for one listing request, and applies them to a SeaORM query in a fixed order: filter, then
//! sort, then pagination.
//!
//! ```rust,ignore
//! let list = ListQuery::from_params_with_allowed_fields(
//!     r#"{"logic":"and","filters":[{"field":"age","operator":"gt","value":21}]}"#,
//!     r#"[{"field":"age","dir":"desc"}]"#,
//!     1,
//!     10,
//!     &["age", "first_name"],
//!     &["age"],
//! )?;
//! let (main, count) = list.apply_with_count(user::Entity::find(), DatabaseBackend::Sqlite);
//! ```

use sea_orm::{DatabaseBackend, QueryFilter, QueryOrder, QuerySelect};

use crate::errors::Result;
use crate::filtering::{
    apply_filter_group, apply_pagination, apply_sort, pagination_metadata, parse_sort,
    validate_filter_fields, validate_sort_fields,
};
use crate::models::{
    Filter, FilterGroup, FilterValue, ListParams, Pagination, PaginationMetadata, SortField,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub filters: FilterGroup,
    pub sort: Vec<SortField>,
    pub pagination: Option<Pagination>,
    /// Empty means every field may be filtered on
    pub allowed_filter_fields: Vec<String>,
    /// Empty means every field may be sorted on
    pub allowed_sort_fields: Vec<String>,
}

fn to_owned_fields(fields: &[&str]) -> Vec<String> {
    fields.iter().map(ToString::to_string).collect()
}

impl ListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_allowed_fields(allowed_filter_fields: &[&str], allowed_sort_fields: &[&str]) -> Self {
        Self {
            allowed_filter_fields: to_owned_fields(allowed_filter_fields),
            allowed_sort_fields: to_owned_fields(allowed_sort_fields),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_filters(mut self, filters: FilterGroup) -> Self {
        self.filters = filters;
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: Vec<SortField>) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Apply filter, sort and pagination, each only when set.
    pub fn apply<Q>(&self, query: Q, backend: DatabaseBackend) -> Q
    where
        Q: QueryFilter + QueryOrder + QuerySelect,
    {
        let mut query = apply_filter_group(query, &self.filters, backend);
        if !self.sort.is_empty() {
            query = apply_sort(query, &self.sort);
        }
        if let Some(pagination) = &self.pagination {
            query = apply_pagination(query, pagination);
        }
        query
    }

    /// Build the main query and a count query from the same base.
    ///
    /// The count query only receives the filter, so it counts every matching row regardless of
    /// the requested page.
    pub fn apply_with_count<Q>(&self, query: Q, backend: DatabaseBackend) -> (Q, Q)
    where
        Q: QueryFilter + QueryOrder + QuerySelect + Clone,
    {
        let count = apply_filter_group(query.clone(), &self.filters, backend);
        (self.apply(query, backend), count)
    }

    /// Build from raw request parameters without field restrictions.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MalformedInput`](crate::QueryError::MalformedInput) when either
    /// JSON parameter does not parse.
    pub fn from_params(filter: &str, sort: &str, page: i64, page_size: i64) -> Result<Self> {
        Self::from_params_with_allowed_fields(filter, sort, page, page_size, &[], &[])
    }

    /// Build from raw request parameters, rejecting fields outside the allowlists.
    ///
    /// Empty `filter`/`sort` strings are skipped. Fields are checked as soon as each parameter
    /// is parsed, so nothing disallowed is ever stored. Pagination is set when either `page` or
    /// `page_size` is positive.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MalformedInput`](crate::QueryError::MalformedInput) or
    /// [`QueryError::DisallowedField`](crate::QueryError::DisallowedField).
    pub fn from_params_with_allowed_fields(
        filter: &str,
        sort: &str,
        page: i64,
        page_size: i64,
        allowed_filter_fields: &[&str],
        allowed_sort_fields: &[&str],
    ) -> Result<Self> {
        let mut query = Self::with_allowed_fields(allowed_filter_fields, allowed_sort_fields);

        if !filter.is_empty() {
            let filters = FilterGroup::parse(filter)?;
            validate_filter_fields(&filters, &query.allowed_filter_fields)?;
            query = query.with_filters(filters);
        }

        if !sort.is_empty() {
            let sort = parse_sort(sort)?;
            validate_sort_fields(&sort, &query.allowed_sort_fields)?;
            query = query.with_sort(sort);
        }

        if page > 0 || page_size > 0 {
            query = query.with_pagination(Pagination::new(page, page_size));
        }

        Ok(query)
    }

    /// Pagination metadata for this query's page, given the count query's result.
    #[must_use]
    pub fn metadata(&self, total_items: u64, base_uri: &str) -> PaginationMetadata {
        pagination_metadata(self.pagination.as_ref(), total_items, base_uri)
    }
}

impl ListParams {
    /// Parse and validate these parameters into a [`ListQuery`].
    ///
    /// # Errors
    ///
    /// See [`ListQuery::from_params_with_allowed_fields`].
    pub fn into_query(
        &self,
        allowed_filter_fields: &[&str],
        allowed_sort_fields: &[&str],
    ) -> Result<ListQuery> {
        ListQuery::from_params_with_allowed_fields(
            self.filter.as_deref().unwrap_or_default(),
            self.sort.as_deref().unwrap_or_default(),
            self.page.unwrap_or_default(),
            self.page_size.unwrap_or_default(),
            allowed_filter_fields,
            allowed_sort_fields,
        )
    }
}

/// Filter parameter JSON for a single condition.
///
/// # Errors
///
/// Returns [`QueryError::EmptyField`](crate::QueryError::EmptyField) or
/// [`QueryError::UnknownOperator`](crate::QueryError::UnknownOperator).
pub fn filter_param(
    field: &str,
    operator: &str,
    value: impl Into<FilterValue>,
    logic: &str,
) -> Result<String> {
    FilterGroup::single(field, operator, value, logic)?.to_json()
}

/// Filter parameter JSON combining several conditions under one logic.
///
/// # Errors
///
/// Fails on the first condition [`Filter::validate`] rejects.
pub fn merged_filter_param(filters: impl IntoIterator<Item = Filter>, logic: &str) -> Result<String> {
    FilterGroup::merge_leaves(filters, logic)?.to_json()
}
