//! Paginated, filterable user listing with Axum
//!
//! ```bash
//! RUST_LOG=querycrate=debug cargo run --example users_api
//! ```
//!
//! Then visit:
//! - **API**: <http://localhost:3000/users?page=1&pageSize=2>
//! - **Filtered**: `/users?filter={"filters":[{"field":"age","operator":"gt","value":30}]}`
//! - **OpenAPI**: <http://localhost:3000/api-docs/openapi.json>

use axum::{
    Json, Router,
    extract::{OriginalUri, Query, State},
    routing::get,
};
use querycrate::{ListParams, PaginationMetadata, QueryError, execute_with_count};
use sea_orm::{Database, DatabaseConnection, Statement, entity::prelude::*};
use serde::Serialize;
use std::env;
use tracing_subscriber::EnvFilter;
use utoipa::{OpenApi, ToSchema};

const FILTERABLE: &[&str] = &["name", "email", "age", "created_on"];
const SORTABLE: &[&str] = &["name", "age", "created_on"];

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, ToSchema)]
#[sea_orm(table_name = "users")]
#[schema(as = User)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub age: i32,
    pub created_on: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}
impl ActiveModelBehavior for ActiveModel {}

#[derive(Serialize, ToSchema)]
struct UserPage {
    data: Vec<Model>,
    meta: PaginationMetadata,
}

#[utoipa::path(
    get,
    path = "/users",
    params(ListParams),
    responses(
        (status = 200, description = "One page of users", body = UserPage),
        (status = 400, description = "Invalid filter, sort or disallowed field"),
    )
)]
async fn list_users(
    State(db): State<DatabaseConnection>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<ListParams>,
) -> Result<Json<UserPage>, QueryError> {
    let list = params.into_query(FILTERABLE, SORTABLE)?;
    let (main, count) = list.apply_with_count(Entity::find(), db.get_database_backend());
    let (data, total) = execute_with_count(&db, main, count).await?;
    let meta = list.metadata(total, &uri.to_string());

    Ok(Json(UserPage { data, meta }))
}

#[derive(OpenApi)]
#[openapi(paths(list_users), components(schemas(UserPage, PaginationMetadata)))]
struct ApiDoc;

async fn seed(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r"CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT,
            age INTEGER NOT NULL,
            created_on TEXT NOT NULL
        );"
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r"INSERT INTO users (name, email, age, created_on) VALUES
            ('Alice', 'alice@example.com', 34, '2024-01-15'),
            ('Bob', NULL, 61, '2024-03-20'),
            ('Carol', 'carol@example.com', 22, '2023-11-05'),
            ('Dave', 'dave@example.com', 45, '2024-07-01'),
            ('Erin', NULL, 29, '2024-09-12');"
            .to_owned(),
    ))
    .await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
    let db: DatabaseConnection = Database::connect(&database_url).await?;
    seed(&db).await?;

    let app = Router::new()
        .route("/users", get(list_users))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .with_state(db);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    tracing::info!("API: http://0.0.0.0:3000/users, OpenAPI: http://0.0.0.0:3000/api-docs/openapi.json");
    axum::serve(listener, app).await?;
    Ok(())
}
