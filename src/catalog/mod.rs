//! Typed read-only access to the external recipe catalog.
//!
//! The catalog is a fixed-base-URL HTTP JSON API queried by id, name
//! fragment, first letter, ingredient, category, or area. All operations are
//! idempotent single round trips; there is no retry and no timeout beyond
//! the transport default.

use crate::{
    error::AppResult,
    models::{Category, Recipe},
};

mod mealdb;

pub use mealdb::MealDbCatalog;

/// Catalog accessor seam.
///
/// Methods return `AppResult` so that a failing request aborts the batch it
/// is part of; callers fronting the UI apply the fail-soft policy themselves.
/// Filter queries (`filter_by_*`) return partial records that need a
/// `lookup_by_id` backfill for category/area/instructions.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecipeCatalog: Send + Sync {
    /// Full record for a single recipe, absent when the id is unknown.
    async fn lookup_by_id(&self, id: &str) -> AppResult<Option<Recipe>>;

    /// Full records whose name contains the query.
    async fn search_by_name(&self, query: &str) -> AppResult<Vec<Recipe>>;

    /// Full records whose name starts with the letter.
    async fn search_by_first_letter(&self, letter: char) -> AppResult<Vec<Recipe>>;

    /// Partial records using the ingredient.
    async fn filter_by_ingredient(&self, ingredient: &str) -> AppResult<Vec<Recipe>>;

    /// Partial records in the category.
    async fn filter_by_category(&self, category: &str) -> AppResult<Vec<Recipe>>;

    /// Partial records from the area/cuisine.
    async fn filter_by_area(&self, area: &str) -> AppResult<Vec<Recipe>>;

    /// All catalog categories.
    async fn list_categories(&self) -> AppResult<Vec<Category>>;

    /// All catalog areas/cuisines.
    async fn list_areas(&self) -> AppResult<Vec<String>>;
}
