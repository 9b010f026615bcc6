// ABOUTME: Axum route handlers for users, planets, people, and favorites
// ABOUTME: Each handler runs one storage operation and wraps the result in the JSON contract

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::AppState;
use crate::error::{AppError, Result};
use crate::types::*;

/// Parses an id path segment. Integers outside the key range cannot match a
/// row, so they are reported as `missing` rather than as a malformed path.
fn parse_id(raw: &str, missing: &str) -> Result<i32> {
    if let Ok(id) = raw.parse::<i32>() {
        return Ok(id);
    }

    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Err(AppError::NotFound(missing.to_string()))
    } else {
        Err(AppError::Validation(format!("Invalid id: {}", raw)))
    }
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>> {
    let users = state.storage.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>)> {
    let user = state.storage.create_user(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            msg: "User created successfully".to_string(),
            user: user.into(),
        }),
    ))
}

pub async fn list_planets(State(state): State<AppState>) -> Result<Json<Vec<PlanetResponse>>> {
    let planets = state.storage.list_planets().await?;
    Ok(Json(planets.into_iter().map(PlanetResponse::from).collect()))
}

pub async fn get_planet(
    Path(raw_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<PlanetResponse>> {
    let planet_id = parse_id(&raw_id, "Planet not found")?;
    let planet = state
        .storage
        .find_planet(planet_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Planet not found".to_string()))?;

    Ok(Json(planet.into()))
}

pub async fn create_planet(
    State(state): State<AppState>,
    Json(payload): Json<CreatePlanetRequest>,
) -> Result<(StatusCode, Json<CreatePlanetResponse>)> {
    let planet = state.storage.create_planet(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePlanetResponse {
            msg: "Planet created".to_string(),
            planet: planet.into(),
        }),
    ))
}

pub async fn list_people(State(state): State<AppState>) -> Result<Json<Vec<CharacterResponse>>> {
    let people = state.storage.list_people().await?;
    Ok(Json(people.into_iter().map(CharacterResponse::from).collect()))
}

pub async fn get_person(
    Path(raw_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CharacterResponse>> {
    let people_id = parse_id(&raw_id, "Character not found")?;
    let person = state
        .storage
        .find_person(people_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Character not found".to_string()))?;

    Ok(Json(person.into()))
}

pub async fn create_person(
    State(state): State<AppState>,
    Json(payload): Json<CreatePersonRequest>,
) -> Result<(StatusCode, Json<CreatePersonResponse>)> {
    let person = state.storage.create_person(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePersonResponse {
            msg: "Character created".to_string(),
            person: person.into(),
        }),
    ))
}

pub async fn list_user_favorites(
    Path(raw_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<FavoriteResponse>>> {
    let user_id = parse_id(&raw_id, "User not found")?;
    let user = state
        .storage
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(state.storage.user_favorites(&user).await?))
}

pub async fn add_favorite_planet(
    Path(raw_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<AddFavoriteRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let planet_id = parse_id(&raw_id, "Planet not found")?;
    state
        .storage
        .add_favorite(payload, FavoriteTarget::Planet(planet_id))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            msg: "Planet added to favorites".to_string(),
        }),
    ))
}

pub async fn add_favorite_person(
    Path(raw_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<AddFavoriteRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let people_id = parse_id(&raw_id, "Character not found")?;
    state
        .storage
        .add_favorite(payload, FavoriteTarget::Character(people_id))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            msg: "Character added to favorites".to_string(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_in_range() {
        assert_eq!(parse_id("42", "Planet not found").unwrap(), 42);
        assert_eq!(parse_id("-5", "Planet not found").unwrap(), -5);
    }

    #[test]
    fn test_parse_id_out_of_range_is_not_found() {
        for raw in ["2147483648", "-2147483649", "99999999999999999999999"] {
            match parse_id(raw, "Planet not found") {
                Err(AppError::NotFound(msg)) => assert_eq!(msg, "Planet not found"),
                other => panic!("expected NotFound for {}, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn test_parse_id_rejects_non_numeric() {
        for raw in ["abc", "-", "1.5", "12a"] {
            assert!(matches!(parse_id(raw, "Planet not found"), Err(AppError::Validation(_))));
        }
    }
}
