//! # Error Handling
//!
//! Every fallible operation in this crate returns [`QueryError`]. Input problems (bad JSON, a
//! disallowed field, an unknown operator) are reported with enough detail to show to the caller,
//! while failures from the database are tagged with the stage that produced them and logged
//! rather than exposed.
//!
//! Compilation itself never fails: an unknown operator or a malformed `between` value degrades to
//! an equality predicate. Use [`validate_filter_group`](crate::validate_filter_group) before
//! compiling when that permissiveness is not wanted.
//!
//! ## Usage with Axum
//!
//! ```rust,ignore
//! use querycrate::{ListQuery, QueryError, execute_with_count};
//!
//! async fn list_users(
//!     State(db): State<DatabaseConnection>,
//!     Query(params): Query<ListParams>,
//! ) -> Result<Json<Vec<user::Model>>, QueryError> {
//!     let query = params.into_query(&["age", "first_name"], &["age"])?;
//!     let (main, count) = query.apply_with_count(user::Entity::find(), db.get_database_backend());
//!     let (rows, _total) = execute_with_count(&db, main, count).await?;
//!     Ok(Json(rows))
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;

/// Convenience alias used throughout the crate.
pub type Result<T, E = QueryError> = std::result::Result<T, E>;

/// Which raw parameter failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Filter,
    Sort,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filter => f.write_str("filter"),
            Self::Sort => f.write_str("sort"),
        }
    }
}

/// Where a disallowed field was referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUsage {
    Filter,
    Sort,
}

impl fmt::Display for FieldUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filter => f.write_str("filter"),
            Self::Sort => f.write_str("sort"),
        }
    }
}

/// The query that failed in [`execute_with_count`](crate::execute_with_count).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStage {
    Count,
    Main,
}

impl fmt::Display for QueryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count => f.write_str("count"),
            Self::Main => f.write_str("main"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The raw JSON did not parse into the expected shape
    #[error("invalid {input} parameter: {source}")]
    MalformedInput {
        input: InputKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("filter group logic must be 'and' or 'or', got '{0}'")]
    InvalidLogic(String),

    #[error("filter field cannot be empty")]
    EmptyField,

    #[error("invalid operator: {0}")]
    UnknownOperator(String),

    /// Allowlist violation, checked before any predicate is compiled
    #[error("{usage} field '{field}' is not allowed")]
    DisallowedField { usage: FieldUsage, field: String },

    #[error("failed to encode query parameter: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The database rejected the count or the main query
    #[error("failed to execute {stage} query: {source}")]
    Execution {
        stage: QueryStage,
        #[source]
        source: DbErr,
    },
}

impl QueryError {
    pub(crate) fn malformed(input: InputKind, source: serde_json::Error) -> Self {
        Self::MalformedInput { input, source }
    }

    pub(crate) fn disallowed(usage: FieldUsage, field: impl Into<String>) -> Self {
        Self::DisallowedField {
            usage,
            field: field.into(),
        }
    }

    pub(crate) fn execution(stage: QueryStage, source: DbErr) -> Self {
        Self::Execution { stage, source }
    }

    /// True when the error was caused by the caller's input rather than the database.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Execution { .. } | Self::Serialization(_))
    }

    fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Message safe to send to API users
    fn user_message(&self) -> String {
        if self.is_client_error() {
            self.to_string()
        } else {
            "A database error occurred".to_string()
        }
    }

    /// Uses `tracing`; silent unless the application installed a subscriber.
    pub(crate) fn log_internal(&self) {
        match self {
            Self::Execution { stage, source } => {
                tracing::error!(stage = %stage, error = ?source, "Query execution failed");
            }
            Self::Serialization(source) => {
                tracing::error!(error = %source, "Query parameter encoding failed");
            }
            _ => {
                tracing::debug!(error = %self, "Rejected query parameters");
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        self.log_internal();

        let body = ErrorResponse {
            error: self.user_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
