use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use utoipa::{IntoParams, ToSchema};

use crate::errors::{InputKind, QueryError, Result};
use crate::filtering::operator::is_valid_operator;

/// Boolean combinator of a [`FilterGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Logic {
    #[default]
    And,
    Or,
}

impl Logic {
    /// Strict, case-insensitive parse used by validation.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("and") {
            Some(Self::And)
        } else if raw.eq_ignore_ascii_case("or") {
            Some(Self::Or)
        } else {
            None
        }
    }

    /// Lenient parse: anything that is not `or` is treated as `and`.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_default()
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a filter leaf.
///
/// Untagged on the wire, so `25`, `"2024-01-01"`, `[1, 2]` and `null` all deserialize directly.
/// JSON objects are rejected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<FilterValue>),
}

impl FilterValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[FilterValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A single `field operator value` condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    /// Operator mnemonic (`eq`, `gt`, `like`, `between`, ...), case-insensitive
    pub operator: String,
    #[serde(default)]
    pub value: FilterValue,
}

impl Filter {
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<FilterValue>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    /// Rejects an empty field or an unregistered operator.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyField`] or [`QueryError::UnknownOperator`].
    pub fn validate(&self) -> Result<()> {
        if self.field.is_empty() {
            return Err(QueryError::EmptyField);
        }
        if !is_valid_operator(&self.operator) {
            return Err(QueryError::UnknownOperator(self.operator.clone()));
        }
        Ok(())
    }
}

/// Explicit `null` reads the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Boolean combination of filter leaves and nested groups.
///
/// `logic` keeps the raw wire string so strict validation can reject unknown values; the
/// compiler reads it through [`FilterGroup::combinator`], which falls back to AND.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterGroup {
    #[serde(default, deserialize_with = "null_as_default")]
    pub logic: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub filters: Vec<Filter>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: Vec<FilterGroup>,
}

impl Default for FilterGroup {
    fn default() -> Self {
        Self::new(Logic::And)
    }
}

impl FilterGroup {
    #[must_use]
    pub fn new(logic: Logic) -> Self {
        Self {
            logic: logic.as_str().to_string(),
            filters: Vec::new(),
            groups: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: FilterGroup) -> Self {
        self.groups.push(group);
        self
    }

    #[must_use]
    pub fn combinator(&self) -> Logic {
        Logic::normalize(&self.logic)
    }

    /// A group without leaves or sub-groups adds nothing to a WHERE clause.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.groups.is_empty()
    }

    /// Parse the JSON wire format, defaulting a missing `logic` to `and`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::MalformedInput`] when the text is not a filter group.
    pub fn parse(json: &str) -> Result<Self> {
        let mut group: Self =
            serde_json::from_str(json).map_err(|e| QueryError::malformed(InputKind::Filter, e))?;
        group.default_missing_logic();
        Ok(group)
    }

    fn default_missing_logic(&mut self) {
        if self.logic.is_empty() {
            self.logic = Logic::And.as_str().to_string();
        }
        for group in &mut self.groups {
            group.default_missing_logic();
        }
    }

    /// Build a one-leaf group. Unknown `logic` values fall back to `and`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyField`] or [`QueryError::UnknownOperator`].
    pub fn single(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<FilterValue>,
        logic: &str,
    ) -> Result<Self> {
        let filter = Filter::new(field, operator, value);
        filter.validate()?;
        Ok(Self::new(Logic::normalize(logic)).with_filter(filter))
    }

    /// Concatenate several leaves under one shared logic. Order is preserved and duplicates kept.
    ///
    /// # Errors
    ///
    /// Fails on the first leaf that [`Filter::validate`] rejects.
    pub fn merge_leaves(leaves: impl IntoIterator<Item = Filter>, logic: &str) -> Result<Self> {
        let mut group = Self::new(Logic::normalize(logic));
        for leaf in leaves {
            let single = Self::single(leaf.field, leaf.operator, leaf.value, logic)?;
            group.filters.extend(single.filters);
        }
        Ok(group)
    }

    /// Serialize back to the JSON wire format.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Serialization`] if serde fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(QueryError::Serialization)
    }
}

/// Sort direction; anything other than `asc`/`desc` (any case), or `null`, reads as ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl From<Option<String>> for SortDirection {
    fn from(raw: Option<String>) -> Self {
        raw.as_deref().map_or_else(Self::default, Self::normalize)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    pub field: String,
    #[serde(rename = "dir", default)]
    pub direction: SortDirection,
}

impl SortField {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

/// Page-based pagination. `page` is 1-based; a `page_size` of zero or less disables limiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
}

impl Pagination {
    #[must_use]
    pub const fn new(page: i64, page_size: i64) -> Self {
        Self { page, page_size }
    }

    /// `LIMIT` to apply, if any.
    #[must_use]
    pub fn limit(&self) -> Option<u64> {
        u64::try_from(self.page_size).ok().filter(|size| *size > 0)
    }

    /// `OFFSET` to apply; only a positive page with a positive page size produces one.
    #[must_use]
    pub fn offset(&self) -> Option<u64> {
        let limit = self.limit()?;
        let page = u64::try_from(self.page).ok().filter(|page| *page > 0)?;
        Some((page - 1).saturating_mul(limit))
    }
}

/// Page count and navigation links for a listing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub total_pages: u64,
    pub total_items: u64,
    #[serde(rename = "prevLink")]
    pub prev: Option<String>,
    #[serde(rename = "nextLink")]
    pub next: Option<String>,
}

/// Query parameters accepted by list endpoints.
///
/// # Filtering
/// `filter` is a JSON-encoded filter group, for example:
/// ```json
/// {"logic": "and", "filters": [{"field": "age", "operator": "gt", "value": 21}]}
/// ```
///
/// # Sorting
/// `sort` is a JSON array of `{"field", "dir"}` objects, for example:
/// ```json
/// [{"field": "age", "dir": "desc"}, {"field": "last_name", "dir": "asc"}]
/// ```
///
/// # Pagination
/// `page` (1-based) and `pageSize`. Omitting both returns every row.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// JSON-encoded filter group.
    #[param(example = r#"{"logic":"and","filters":[{"field":"age","operator":"gt","value":21}]}"#)]
    pub filter: Option<String>,
    /// JSON-encoded sort list.
    #[param(example = r#"[{"field":"age","dir":"desc"}]"#)]
    pub sort: Option<String>,
    /// Page number (1-based).
    #[param(example = 1)]
    pub page: Option<i64>,
    /// Number of items per page.
    #[serde(rename = "pageSize")]
    #[param(example = 10)]
    pub page_size: Option<i64>,
}
