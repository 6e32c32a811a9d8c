//! Checks that run before anything is compiled.
//!
//! The compiler is permissive on its own; these functions are the strict path. Allowlist checks
//! fail on the first offending field, walking leaves before sub-groups.

use crate::errors::{FieldUsage, QueryError, Result};
use crate::models::{FilterGroup, Logic, SortField};

/// Strict structural check of a filter tree.
///
/// `logic` must be `and` or `or` in any case, and every leaf needs a non-empty field and a
/// registered operator. Sub-groups are checked recursively. [`FilterGroup::parse`] fills in a
/// missing `logic`, so only hand-built trees can fail on an empty one.
///
/// # Errors
///
/// Returns [`QueryError::InvalidLogic`], [`QueryError::EmptyField`] or
/// [`QueryError::UnknownOperator`] for the first problem found.
pub fn validate_filter_group(group: &FilterGroup) -> Result<()> {
    if Logic::parse(&group.logic).is_none() {
        return Err(QueryError::InvalidLogic(group.logic.clone()));
    }

    for filter in &group.filters {
        filter.validate()?;
    }

    group.groups.iter().try_for_each(validate_filter_group)
}

fn is_allowed(field: &str, allowed: &[String]) -> bool {
    allowed.is_empty() || allowed.iter().any(|name| name == field)
}

/// Reject the first filter leaf, at any depth, whose field is not in `allowed`.
/// An empty allowlist accepts everything.
///
/// # Errors
///
/// Returns [`QueryError::DisallowedField`] naming the field.
pub fn validate_filter_fields(group: &FilterGroup, allowed: &[String]) -> Result<()> {
    if allowed.is_empty() {
        return Ok(());
    }

    if let Some(filter) = group.filters.iter().find(|f| !is_allowed(&f.field, allowed)) {
        return Err(QueryError::disallowed(FieldUsage::Filter, &filter.field));
    }

    group
        .groups
        .iter()
        .try_for_each(|nested| validate_filter_fields(nested, allowed))
}

/// Reject the first sort field not in `allowed`. An empty allowlist accepts everything.
///
/// # Errors
///
/// Returns [`QueryError::DisallowedField`] naming the field.
pub fn validate_sort_fields(fields: &[SortField], allowed: &[String]) -> Result<()> {
    match fields.iter().find(|s| !is_allowed(&s.field, allowed)) {
        Some(sort) => Err(QueryError::disallowed(FieldUsage::Sort, &sort.field)),
        None => Ok(()),
    }
}
