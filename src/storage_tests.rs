// ABOUTME: Tests for the storage layer against a migrated SQLite file
// ABOUTME: Covers validation, transactional user creation, lookups, and favorite bookkeeping

#[cfg(test)]
mod tests {
    use super::super::config::Config;
    use super::super::entities::{favorite, user};
    use super::super::error::AppError;
    use super::super::storage::*;
    use super::super::types::*;
    use sea_orm::{EntityTrait, PaginatorTrait, SqlErr};
    use tempfile::TempDir;

    async fn create_test_storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::sqlite(&temp_dir.path().join("test.db"));
        let storage = Storage::connect(&config).await.unwrap();
        (storage, temp_dir)
    }

    fn user_request(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            email: Some(email.to_string()),
            password: Some("secret".to_string()),
            first_name: Some("Luke".to_string()),
            last_name: None,
        }
    }

    fn planet_request(name: &str) -> CreatePlanetRequest {
        CreatePlanetRequest {
            name: Some(name.to_string()),
            climate: Some("arid".to_string()),
            terrain: Some("desert".to_string()),
            population: Some("200000".to_string()),
            location: None,
        }
    }

    fn person_request(name: &str) -> CreatePersonRequest {
        CreatePersonRequest {
            name: Some(name.to_string()),
            gender: Some("male".to_string()),
            specie: Some("human".to_string()),
        }
    }

    fn favorite_for(user_id: i32) -> AddFavoriteRequest {
        AddFavoriteRequest {
            user_id: Some(user_id),
        }
    }

    #[tokio::test]
    async fn test_user_operations() {
        let (storage, _temp_dir) = create_test_storage().await;

        let created = storage.create_user(user_request("luke@rebels.org")).await.unwrap();
        assert_eq!(created.email, "luke@rebels.org");
        assert_eq!(created.first_name, "Luke");
        assert_eq!(created.last_name, "");
        assert_eq!(created.password, "secret");
        assert!(created.is_active);

        let found = storage.find_user(created.id).await.unwrap().unwrap();
        assert_eq!(found.email, created.email);

        let users = storage.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, created.id);
    }

    #[tokio::test]
    async fn test_user_requires_email_and_password() {
        let (storage, _temp_dir) = create_test_storage().await;

        let mut missing_password = user_request("a@b.com");
        missing_password.password = None;
        let result = storage.create_user(missing_password).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let mut empty_email = user_request("");
        empty_email.email = Some(String::new());
        let result = storage.create_user(empty_email).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        assert!(storage.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rolled_back() {
        let (storage, _temp_dir) = create_test_storage().await;

        storage.create_user(user_request("han@falcon.net")).await.unwrap();
        let result = storage.create_user(user_request("han@falcon.net")).await;

        match result {
            Err(AppError::UserCreation(err)) => {
                assert!(matches!(
                    err.sql_err(),
                    Some(SqlErr::UniqueConstraintViolation(_))
                ));
            }
            other => panic!("expected UserCreation error, got {:?}", other),
        }

        let count = user::Entity::find().count(&storage.db).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_user_not_found() {
        let (storage, _temp_dir) = create_test_storage().await;

        assert!(storage.find_user(42).await.unwrap().is_none());
        assert!(storage.find_planet(42).await.unwrap().is_none());
        assert!(storage.find_person(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_planet_operations() {
        let (storage, _temp_dir) = create_test_storage().await;

        let tatooine = storage.create_planet(planet_request("Tatooine")).await.unwrap();
        let hoth = storage.create_planet(planet_request("Hoth")).await.unwrap();
        assert_eq!(tatooine.climate.as_deref(), Some("arid"));
        assert_eq!(tatooine.location, None);

        let planets = storage.list_planets().await.unwrap();
        let names: Vec<&str> = planets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Tatooine", "Hoth"]);

        let found = storage.find_planet(hoth.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Hoth");

        let mut nameless = planet_request("");
        nameless.name = None;
        let result = storage.create_planet(nameless).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(storage.list_planets().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_person_operations() {
        let (storage, _temp_dir) = create_test_storage().await;

        let leia = storage.create_person(person_request("Leia Organa")).await.unwrap();
        assert_eq!(leia.gender.as_deref(), Some("male"));
        assert_eq!(leia.specie.as_deref(), Some("human"));

        let found = storage.find_person(leia.id).await.unwrap().unwrap();
        assert_eq!(found, leia);
        assert_eq!(storage.list_people().await.unwrap().len(), 1);

        let result = storage.create_person(person_request("")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_duplicate_favorite_rejected() {
        let (storage, _temp_dir) = create_test_storage().await;

        let user = storage.create_user(user_request("a@b.com")).await.unwrap();
        let planet = storage.create_planet(planet_request("Tatooine")).await.unwrap();
        let target = FavoriteTarget::Planet(planet.id);

        let favorite = storage.add_favorite(favorite_for(user.id), target).await.unwrap();
        assert_eq!(favorite.planet_id, Some(planet.id));
        assert_eq!(favorite.character_id, None);

        let result = storage.add_favorite(favorite_for(user.id), target).await;
        assert!(matches!(result, Err(AppError::Duplicate(_))));

        let rows = favorite::Entity::find().all(&storage.db).await.unwrap();
        assert_eq!(rows.len(), 1);

        let found = storage.find_favorite(user.id, target).await.unwrap();
        assert_eq!(found.map(|f| f.id), Some(favorite.id));
    }

    #[tokio::test]
    async fn test_same_id_different_target_kinds_are_distinct() {
        let (storage, _temp_dir) = create_test_storage().await;

        let user = storage.create_user(user_request("a@b.com")).await.unwrap();
        let planet = storage.create_planet(planet_request("Tatooine")).await.unwrap();
        let person = storage.create_person(person_request("Luke")).await.unwrap();
        assert_eq!(planet.id, person.id);

        storage
            .add_favorite(favorite_for(user.id), FavoriteTarget::Planet(planet.id))
            .await
            .unwrap();
        let person_fav = storage
            .add_favorite(favorite_for(user.id), FavoriteTarget::Character(person.id))
            .await
            .unwrap();
        assert_eq!(person_fav.character_id, Some(person.id));
        assert_eq!(person_fav.planet_id, None);
    }

    #[tokio::test]
    async fn test_favorite_requires_existing_rows() {
        let (storage, _temp_dir) = create_test_storage().await;

        let user = storage.create_user(user_request("a@b.com")).await.unwrap();
        let planet = storage.create_planet(planet_request("Tatooine")).await.unwrap();

        let result = storage
            .add_favorite(AddFavoriteRequest { user_id: None }, FavoriteTarget::Planet(planet.id))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = storage
            .add_favorite(favorite_for(user.id + 100), FavoriteTarget::Planet(planet.id))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let result = storage
            .add_favorite(favorite_for(user.id), FavoriteTarget::Planet(planet.id + 100))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let result = storage
            .add_favorite(favorite_for(user.id), FavoriteTarget::Character(1))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        assert!(favorite::Entity::find().all(&storage.db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_user_favorites_in_creation_order() {
        let (storage, _temp_dir) = create_test_storage().await;

        let user = storage.create_user(user_request("a@b.com")).await.unwrap();
        let other = storage.create_user(user_request("c@d.com")).await.unwrap();
        let tatooine = storage.create_planet(planet_request("Tatooine")).await.unwrap();
        let hoth = storage.create_planet(planet_request("Hoth")).await.unwrap();
        let luke = storage.create_person(person_request("Luke")).await.unwrap();

        for target in [
            FavoriteTarget::Planet(hoth.id),
            FavoriteTarget::Character(luke.id),
            FavoriteTarget::Planet(tatooine.id),
        ] {
            storage.add_favorite(favorite_for(user.id), target).await.unwrap();
        }
        storage
            .add_favorite(favorite_for(other.id), FavoriteTarget::Planet(hoth.id))
            .await
            .unwrap();

        let favorites = storage.user_favorites(&user).await.unwrap();
        assert_eq!(favorites.len(), 3);
        assert!(favorites.iter().all(|f| f.user_email == "a@b.com"));

        assert_eq!(favorites[0].planet.as_ref().map(|p| p.name.as_str()), Some("Hoth"));
        assert!(favorites[0].character.is_none());
        assert_eq!(
            favorites[1].character.as_ref().map(|c| c.name.as_str()),
            Some("Luke")
        );
        assert!(favorites[1].planet.is_none());
        assert_eq!(
            favorites[2].planet.as_ref().map(|p| p.name.as_str()),
            Some("Tatooine")
        );

        let other_favorites = storage.user_favorites(&other).await.unwrap();
        assert_eq!(other_favorites.len(), 1);
    }

    #[tokio::test]
    async fn test_migration_down_and_up() {
        use super::super::migration::Migrator;
        use sea_orm_migration::MigratorTrait;

        let (storage, _temp_dir) = create_test_storage().await;
        storage.create_user(user_request("a@b.com")).await.unwrap();

        Migrator::down(&storage.db, None).await.unwrap();
        assert!(storage.list_users().await.is_err());

        Migrator::up(&storage.db, None).await.unwrap();
        assert!(storage.list_users().await.unwrap().is_empty());
    }
}
