//! Date literal detection and the per-backend date cast.

use regex::RegexSet;
use sea_orm::{
    DatabaseBackend,
    sea_query::{Alias, Expr, Func, SimpleExpr},
};
use std::sync::LazyLock;

static DATE_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$",                        // YYYY-MM-DD
        r"^[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}$",                    // MM/DD/YYYY
        r"^[0-9]{1,2}-[0-9]{1,2}-[0-9]{4}$",                    // DD-MM-YYYY
        r"^[0-9]{4}/[0-9]{1,2}/[0-9]{1,2}$",                    // YYYY/MM/DD
        r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}", // ISO-8601 prefix
    ])
    .expect("date patterns are valid regexes")
});

/// Heuristic: does this string look like one of the common date formats?
///
/// Only the shape is checked, `2024-13-45` still counts as a date literal.
#[must_use]
pub fn is_date_literal(value: &str) -> bool {
    DATE_PATTERNS.is_match(value)
}

/// Dialect hook for comparing values as dates.
pub trait DateCast {
    fn cast_to_date(&self, expr: SimpleExpr) -> SimpleExpr;
}

impl DateCast for DatabaseBackend {
    fn cast_to_date(&self, expr: SimpleExpr) -> SimpleExpr {
        match self {
            // SQLite has no DATE type; CAST(x AS DATE) would produce a number
            DatabaseBackend::Sqlite => Func::cust(Alias::new("DATE")).arg(expr).into(),
            _ => Expr::expr(expr).cast_as(Alias::new("DATE")),
        }
    }
}
