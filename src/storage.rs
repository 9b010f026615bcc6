// ABOUTME: SeaORM storage layer for users, characters, planets, and favorites
// ABOUTME: Handles connection setup, migrations, payload validation, and every query the API runs

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use sea_orm_migration::MigratorTrait;
use std::collections::HashMap;

use crate::config::Config;
use crate::entities::{character, favorite, planet, user};
use crate::error::{AppError, Result};
use crate::migration::Migrator;
use crate::types::*;

pub struct Storage {
    pub db: DatabaseConnection,
}

impl Storage {
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let mut options = ConnectOptions::new(config.database_url.clone());
        options
            .max_connections(config.max_connections)
            .sqlx_logging(false);

        let db = Database::connect(options).await?;

        if config.run_migrations {
            Migrator::up(&db, None).await?;
            tracing::info!("Database schema is up to date");
        }

        Ok(Self { db })
    }

    pub async fn list_users(&self) -> Result<Vec<user::Model>> {
        let users = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;
        Ok(users)
    }

    pub async fn find_user(&self, user_id: i32) -> Result<Option<user::Model>> {
        Ok(user::Entity::find_by_id(user_id).one(&self.db).await?)
    }

    /// Inserts a user inside its own transaction. Any failure, including a
    /// duplicate email, is rolled back and reported as `UserCreation`.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<user::Model> {
        let (Some(email), Some(password)) = (required(request.email), required(request.password))
        else {
            return Err(AppError::Validation(
                "Email and password are required".to_string(),
            ));
        };

        let new_user = user::ActiveModel {
            email: Set(email),
            password: Set(password),
            first_name: Set(request.first_name.unwrap_or_default()),
            last_name: Set(request.last_name.unwrap_or_default()),
            subscription_date: Set(chrono::Utc::now()),
            is_active: Set(true),
            ..Default::default()
        };

        let txn = self.db.begin().await.map_err(AppError::UserCreation)?;
        match new_user.insert(&txn).await {
            Ok(model) => {
                txn.commit().await.map_err(AppError::UserCreation)?;
                tracing::info!(user_id = model.id, "Created user");
                Ok(model)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Rollback after failed user insert failed: {}", rollback_err);
                }
                Err(AppError::UserCreation(err))
            }
        }
    }

    pub async fn list_planets(&self) -> Result<Vec<planet::Model>> {
        let planets = planet::Entity::find()
            .order_by_asc(planet::Column::Id)
            .all(&self.db)
            .await?;
        Ok(planets)
    }

    pub async fn find_planet(&self, planet_id: i32) -> Result<Option<planet::Model>> {
        Ok(planet::Entity::find_by_id(planet_id).one(&self.db).await?)
    }

    pub async fn create_planet(&self, request: CreatePlanetRequest) -> Result<planet::Model> {
        let name = required(request.name)
            .ok_or_else(|| AppError::Validation("Planet name is required".to_string()))?;

        let planet = planet::ActiveModel {
            name: Set(name),
            climate: Set(request.climate),
            terrain: Set(request.terrain),
            population: Set(request.population),
            location: Set(request.location),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!(planet_id = planet.id, "Created planet");
        Ok(planet)
    }

    pub async fn list_people(&self) -> Result<Vec<character::Model>> {
        let people = character::Entity::find()
            .order_by_asc(character::Column::Id)
            .all(&self.db)
            .await?;
        Ok(people)
    }

    pub async fn find_person(&self, person_id: i32) -> Result<Option<character::Model>> {
        Ok(character::Entity::find_by_id(person_id).one(&self.db).await?)
    }

    pub async fn create_person(&self, request: CreatePersonRequest) -> Result<character::Model> {
        let name = required(request.name)
            .ok_or_else(|| AppError::Validation("Character name is required".to_string()))?;

        let person = character::ActiveModel {
            name: Set(name),
            gender: Set(request.gender),
            specie: Set(request.specie),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!(character_id = person.id, "Created character");
        Ok(person)
    }

    /// Favorites of `user` in creation order, each joined with the planet or
    /// character it points at.
    pub async fn user_favorites(&self, user: &user::Model) -> Result<Vec<FavoriteResponse>> {
        let favorites = favorite::Entity::find()
            .filter(favorite::Column::UserId.eq(user.id))
            .order_by_asc(favorite::Column::Id)
            .all(&self.db)
            .await?;

        let planet_ids: Vec<i32> = favorites.iter().filter_map(|f| f.planet_id).collect();
        let character_ids: Vec<i32> = favorites.iter().filter_map(|f| f.character_id).collect();

        let mut planets: HashMap<i32, planet::Model> = HashMap::new();
        if !planet_ids.is_empty() {
            for planet in planet::Entity::find()
                .filter(planet::Column::Id.is_in(planet_ids))
                .all(&self.db)
                .await?
            {
                planets.insert(planet.id, planet);
            }
        }

        let mut characters: HashMap<i32, character::Model> = HashMap::new();
        if !character_ids.is_empty() {
            for character in character::Entity::find()
                .filter(character::Column::Id.is_in(character_ids))
                .all(&self.db)
                .await?
            {
                characters.insert(character.id, character);
            }
        }

        Ok(favorites
            .into_iter()
            .map(|fav| {
                let planet = fav.planet_id.and_then(|id| planets.get(&id).cloned());
                let character = fav.character_id.and_then(|id| characters.get(&id).cloned());
                FavoriteResponse::new(fav, &user.email, character, planet)
            })
            .collect())
    }

    pub async fn find_favorite(
        &self,
        user_id: i32,
        target: FavoriteTarget,
    ) -> Result<Option<favorite::Model>> {
        let query = favorite::Entity::find().filter(favorite::Column::UserId.eq(user_id));
        let query = match target {
            FavoriteTarget::Planet(id) => query.filter(favorite::Column::PlanetId.eq(id)),
            FavoriteTarget::Character(id) => query.filter(favorite::Column::CharacterId.eq(id)),
        };

        Ok(query.one(&self.db).await?)
    }

    /// Records a favorite after checking that the user, the target, and no
    /// identical favorite exist. The check and the insert are separate
    /// statements, so two concurrent identical requests can both succeed.
    pub async fn add_favorite(
        &self,
        request: AddFavoriteRequest,
        target: FavoriteTarget,
    ) -> Result<favorite::Model> {
        let user_id = request
            .user_id
            .ok_or_else(|| AppError::Validation("user_id is required".to_string()))?;

        if self.find_user(user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let (planet_id, character_id) = match target {
            FavoriteTarget::Planet(id) => {
                if self.find_planet(id).await?.is_none() {
                    return Err(AppError::NotFound("Planet not found".to_string()));
                }
                (Some(id), None)
            }
            FavoriteTarget::Character(id) => {
                if self.find_person(id).await?.is_none() {
                    return Err(AppError::NotFound("Character not found".to_string()));
                }
                (None, Some(id))
            }
        };

        if self.find_favorite(user_id, target).await?.is_some() {
            let msg = match target {
                FavoriteTarget::Planet(_) => "This planet is already a favorite",
                FavoriteTarget::Character(_) => "This character is already a favorite",
            };
            return Err(AppError::Duplicate(msg.to_string()));
        }

        let favorite = favorite::ActiveModel {
            user_id: Set(user_id),
            planet_id: Set(planet_id),
            character_id: Set(character_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!(favorite_id = favorite.id, user_id, "Added favorite");
        Ok(favorite)
    }
}
