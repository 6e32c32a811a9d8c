use axum::{
    Json,
    extract::{OriginalUri, Query, State},
};
use querycrate::{ListParams, PaginationMetadata, QueryError, execute_with_count};
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, entity::prelude::*};
use serde::{Deserialize, Serialize};

pub const FILTERABLE: &[&str] = &["first_name", "last_name", "age", "active", "joined_on"];
pub const SORTABLE: &[&str] = &["first_name", "age", "joined_on"];

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub age: i32,
    pub active: bool,
    pub joined_on: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserPage {
    pub data: Vec<Model>,
    pub meta: PaginationMetadata,
}

pub async fn list_users(
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
