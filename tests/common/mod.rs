#![allow(dead_code)]

use axum::Router;
use sea_orm::{ActiveValue::Set, Database, DatabaseConnection, DbErr, EntityTrait};
use sea_orm_migration::prelude::*;

pub mod user_entity;

use user_entity::{ActiveModel as UserActiveModel, Entity as UserEntity};

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    // Run migrations
    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Three users: `User1` (25), `User2` (60, no email, inactive) and `User3` (20).
pub async fn setup_seeded_db() -> Result<DatabaseConnection, DbErr> {
    let db = setup_test_db().await?;
    seed_users(&db).await?;
    Ok(db)
}

pub async fn seed_users(db: &DatabaseConnection) -> Result<(), DbErr> {
    let users = [
        ("User1", "Last1", Some("user1@example.com"), 25, true, "2024-01-15"),
        ("User2", "Last2", None, 60, false, "2024-03-20"),
        ("User3", "Last3", Some("user3@example.com"), 20, true, "2023-11-05"),
    ];

    UserEntity::insert_many(users.into_iter().map(
        |(first_name, last_name, email, age, active, joined_on)| UserActiveModel {
            first_name: Set(first_name.to_string()),
            last_name: Set(last_name.to_string()),
            email: Set(email.map(ToString::to_string)),
            age: Set(age),
            active: Set(active),
            joined_on: Set(joined_on.to_string()),
            ..Default::default()
        },
    ))
    .exec(db)
    .await?;

    Ok(())
}

/// Insert `count` extra users named `Bulk{n}`, all aged 30.
pub async fn seed_bulk_users(db: &DatabaseConnection, count: usize) -> Result<(), DbErr> {
    UserEntity::insert_many((1..=count).map(|n| UserActiveModel {
        first_name: Set(format!("Bulk{n}")),
        last_name: Set("Bulk".to_string()),
        email: Set(None),
        age: Set(30),
        active: Set(true),
        joined_on: Set("2024-06-01".to_string()),
        ..Default::default()
    }))
    .exec(db)
    .await?;

    Ok(())
}

pub fn setup_test_app(db: DatabaseConnection) -> Router {
    let api = Router::new()
        .route("/users", axum::routing::get(user_entity::list_users))
        .with_state(db);

    Router::new().nest("/api/v1", api)
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateUsersTable)]
    }
}

pub struct CreateUsersTable;

#[async_trait::async_trait]
impl MigrationName for CreateUsersTable {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_users_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateUsersTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(Users::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Users::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(Users::FirstName).string().not_null())
            .col(ColumnDef::new(Users::LastName).string().not_null())
            .col(ColumnDef::new(Users::Email).string().null())
            .col(ColumnDef::new(Users::Age).integer().not_null())
            .col(
                ColumnDef::new(Users::Active)
                    .boolean()
                    .not_null()
                    .default(true),
            )
            .col(ColumnDef::new(Users::JoinedOn).string().not_null())
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Age,
    Active,
    JoinedOn,
}
