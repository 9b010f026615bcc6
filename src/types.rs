// ABOUTME: Type definitions for API request payloads and serialized response bodies
// ABOUTME: Response shapes are flat views over the entity models, never exposing passwords

use serde::{Deserialize, Serialize};

use crate::entities::{character, favorite, planet, user};

// Request payloads. Required fields are still Option so a missing value
// is reported by storage as a 400 with a message instead of a 422.

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePlanetRequest {
    pub name: Option<String>,
    pub climate: Option<String>,
    pub terrain: Option<String>,
    pub population: Option<String>,
    pub location: Option<String>,
}

/// Unknown fields such as `hair_color` are accepted and dropped.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePersonRequest {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub specie: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddFavoriteRequest {
    pub user_id: Option<i32>,
}

/// What a favorite points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteTarget {
    Planet(i32),
    Character(i32),
}

// Serialized entities

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub subscription_date: String,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            subscription_date: model.subscription_date.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanetResponse {
    pub id: i32,
    pub name: String,
    pub climate: Option<String>,
    pub terrain: Option<String>,
    pub population: Option<String>,
    pub location: Option<String>,
}

impl From<planet::Model> for PlanetResponse {
    fn from(model: planet::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            climate: model.climate,
            terrain: model.terrain,
            population: model.population,
            location: model.location,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CharacterResponse {
    pub id: i32,
    pub name: String,
    pub gender: Option<String>,
    pub specie: Option<String>,
}

impl From<character::Model> for CharacterResponse {
    fn from(model: character::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            gender: model.gender,
            specie: model.specie,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteResponse {
    pub id: i32,
    pub user_email: String,
    pub character: Option<CharacterResponse>,
    pub planet: Option<PlanetResponse>,
}

impl FavoriteResponse {
    pub fn new(
        model: favorite::Model,
        user_email: &str,
        character: Option<character::Model>,
        planet: Option<planet::Model>,
    ) -> Self {
        Self {
            id: model.id,
            user_email: user_email.to_string(),
            character: character.map(CharacterResponse::from),
            planet: planet.map(PlanetResponse::from),
        }
    }
}

// Envelopes for the create endpoints

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub msg: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePlanetResponse {
    pub msg: String,
    pub planet: PlanetResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePersonResponse {
    pub msg: String,
    pub person: CharacterResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub msg: String,
}

/// Absent and empty strings both count as missing.
pub fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
