use sea_orm::{
    Condition, DatabaseBackend, QueryFilter, Value,
    sea_query::{Alias, Expr, SimpleExpr},
};

use super::dialect::{DateCast, is_date_literal};
use super::operator::PredicateKind;
use crate::models::{Filter, FilterGroup, FilterValue, Logic};

/// Quoted column reference; identifiers never reach the SQL text unescaped
fn column(field: &str) -> Expr {
    Expr::col(Alias::new(field))
}

/// Convert a leaf value into a bound SQL value. Nested lists are bound as their text form.
fn bind_value(value: &FilterValue) -> Value {
    match value {
        FilterValue::Null => Value::String(None),
        FilterValue::Bool(b) => (*b).into(),
        FilterValue::Int(n) => (*n).into(),
        FilterValue::Float(n) => (*n).into(),
        FilterValue::Text(s) => s.clone().into(),
        FilterValue::List(_) => value.to_string().into(),
    }
}

fn bind_list(value: &FilterValue) -> Vec<Value> {
    match value {
        FilterValue::List(items) => items.iter().map(bind_value).collect(),
        // A scalar is a one-element set
        other => vec![bind_value(other)],
    }
}

fn binary<V: Into<SimpleExpr>>(lhs: Expr, kind: PredicateKind, rhs: V) -> SimpleExpr {
    match kind {
        PredicateKind::NotEqual => lhs.ne(rhs),
        PredicateKind::GreaterThan => lhs.gt(rhs),
        PredicateKind::GreaterOrEqual => lhs.gte(rhs),
        PredicateKind::LessThan => lhs.lt(rhs),
        PredicateKind::LessOrEqual => lhs.lte(rhs),
        _ => lhs.eq(rhs),
    }
}

fn date_column(field: &str, backend: DatabaseBackend) -> Expr {
    Expr::expr(backend.cast_to_date(column(field).into()))
}

fn date_value(text: &str, backend: DatabaseBackend) -> SimpleExpr {
    backend.cast_to_date(Expr::val(text).into())
}

fn build_comparison(
    field: &str,
    kind: PredicateKind,
    value: &FilterValue,
    backend: DatabaseBackend,
) -> SimpleExpr {
    if let Some(text) = value.as_text()
        && is_date_literal(text)
    {
        return binary(date_column(field, backend), kind, date_value(text, backend));
    }

    // `= NULL` never matches anything, so equality against null means IS NULL
    match (kind, value) {
        (PredicateKind::Equal, FilterValue::Null) => column(field).is_null(),
        (PredicateKind::NotEqual, FilterValue::Null) => column(field).is_not_null(),
        _ => binary(column(field), kind, bind_value(value)),
    }
}

/// Substring match: text without a `%` gets wrapped as `%text%`, other values are stringified
/// and always wrapped.
#[must_use]
pub fn like_pattern(value: &FilterValue) -> String {
    match value {
        FilterValue::Text(text) if text.contains('%') => text.clone(),
        other => format!("%{other}%"),
    }
}

fn build_between(field: &str, value: &FilterValue, backend: DatabaseBackend) -> SimpleExpr {
    let Some([low, high]) = value.as_list() else {
        tracing::debug!(field, value = %value, "between needs two bounds, comparing for equality");
        return column(field).eq(bind_value(value));
    };

    if let (Some(low), Some(high)) = (low.as_text(), high.as_text())
        && is_date_literal(low)
        && is_date_literal(high)
    {
        return date_column(field, backend)
            .between(date_value(low, backend), date_value(high, backend));
    }

    column(field).between(bind_value(low), bind_value(high))
}

/// Compile one leaf. Never fails: unknown operators compile as equality.
#[must_use]
pub fn compile_filter(filter: &Filter, backend: DatabaseBackend) -> SimpleExpr {
    let field = filter.field.as_str();
    let value = &filter.value;

    match PredicateKind::resolve(&filter.operator) {
        kind if kind.is_comparison() => build_comparison(field, kind, value, backend),
        PredicateKind::Like => column(field).like(like_pattern(value)),
        PredicateKind::In => column(field).is_in(bind_list(value)),
        PredicateKind::NotIn => column(field).is_not_in(bind_list(value)),
        PredicateKind::IsNull => column(field).is_null(),
        PredicateKind::IsNotNull => column(field).is_not_null(),
        PredicateKind::Between => build_between(field, value, backend),
        _ => column(field).eq(bind_value(value)),
    }
}

/// Compile a filter tree into one nested condition.
///
/// Leaves and sub-groups are combined with the group's own logic, each sub-group nesting one
/// level deeper. Returns `None` for a group that contributes nothing, including one whose
/// sub-groups are all empty.
#[must_use]
pub fn compile_filter_group(group: &FilterGroup, backend: DatabaseBackend) -> Option<Condition> {
    if group.is_empty() {
        return None;
    }

    let mut condition = match group.combinator() {
        Logic::And => Condition::all(),
        Logic::Or => Condition::any(),
    };
    let mut terms = 0;

    for filter in &group.filters {
        condition = condition.add(compile_filter(filter, backend));
        terms += 1;
    }

    for nested in &group.groups {
        if let Some(nested_condition) = compile_filter_group(nested, backend) {
            condition = condition.add(nested_condition);
            terms += 1;
        }
    }

    (terms > 0).then_some(condition)
}

/// Apply a filter tree to any query that accepts conditions. An empty tree leaves the query
/// untouched.
pub fn apply_filter_group<Q: QueryFilter>(
    query: Q,
    group: &FilterGroup,
    backend: DatabaseBackend,
) -> Q {
    match compile_filter_group(group, backend) {
        Some(condition) => {
            tracing::debug!(?condition, "Applying filter group");
            query.filter(condition)
        }
        None => query,
    }
}
