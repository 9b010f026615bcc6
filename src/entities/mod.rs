// ABOUTME: SeaORM entities module for the catalog tables and their relationships
// ABOUTME: Exports entity definitions for users, characters, planets, and favorites

pub mod character;
pub mod favorite;
pub mod planet;
pub mod user;
