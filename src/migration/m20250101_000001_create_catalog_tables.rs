// ABOUTME: Initial migration to create users, characters, planets, and favorites tables
// ABOUTME: Favorites carry foreign keys to the other three tables

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string_len(120).not_null().unique_key())
                    .col(ColumnDef::new(Users::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Users::LastName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Users::SubscriptionDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(ColumnDef::new(Users::IsActive).boolean().not_null())
                    .to_owned(),
            )
            .await?;

        // Create characters table
        manager
            .create_table(
                Table::create()
                    .table(Characters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Characters::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Characters::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Characters::Gender).string_len(100))
                    .col(ColumnDef::new(Characters::Specie).string_len(100))
                    .to_owned(),
            )
            .await?;

        // Create planets table
        manager
            .create_table(
                Table::create()
                    .table(Planets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Planets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Planets::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Planets::Climate).string_len(100))
                    .col(ColumnDef::new(Planets::Terrain).string_len(100))
                    .col(ColumnDef::new(Planets::Population).string_len(100))
                    .col(ColumnDef::new(Planets::Location).string_len(100))
                    .to_owned(),
            )
            .await?;

        // Create favorites table
        manager
            .create_table(
                Table::create()
                    .table(Favorites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Favorites::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Favorites::UserId).integer().not_null())
                    .col(ColumnDef::new(Favorites::CharacterId).integer())
                    .col(ColumnDef::new(Favorites::PlanetId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorites_user_id")
                            .from(Favorites::Table, Favorites::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorites_character_id")
                            .from(Favorites::Table, Favorites::CharacterId)
                            .to(Characters::Table, Characters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorites_planet_id")
                            .from(Favorites::Table, Favorites::PlanetId)
                            .to(Planets::Table, Planets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Favorites::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Planets::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Characters::Table).to_owned())
            .await?;

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
    Email,
    FirstName,
    LastName,
    SubscriptionDate,
    Password,
    IsActive,
}

#[derive(DeriveIden)]
enum Characters {
    Table,
    Id,
    Name,
    Gender,
    Specie,
}

#[derive(DeriveIden)]
enum Planets {
    Table,
    Id,
    Name,
    Climate,
    Terrain,
    Population,
    Location,
}

#[derive(DeriveIden)]
enum Favorites {
    Table,
    Id,
    UserId,
    CharacterId,
    PlanetId,
}
