/// TheMealDB catalog client
///
/// All endpoints are unauthenticated GETs parameterized by query string and
/// answer with `{"meals": [...] | null}` (the category listing uses a
/// `categories` key instead). A null payload means "no matches" and is
/// normalized to an empty list / absent single here.
use reqwest::Client as HttpClient;
use serde_json::Value;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{Category, Recipe},
};

use super::RecipeCatalog;

#[derive(Clone)]
pub struct MealDbCatalog {
    http_client: HttpClient,
    api_url: String,
}

impl MealDbCatalog {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url: api_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.catalog_api_url.clone())
    }

    async fn get_json(&self, endpoint: &str, params: &[(&str, &str)]) -> AppResult<Value> {
        let url = format!("{}/{}", self.api_url.trim_end_matches('/'), endpoint);

        let response = self.http_client.get(&url).query(params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Catalog(format!(
                "catalog returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }

    /// Fetches an endpoint and projects its `meals` array, treating the
    /// API's `"meals": null` as an empty result.
    async fn get_meals(&self, endpoint: &str, params: &[(&str, &str)]) -> AppResult<Vec<Recipe>> {
        let payload = self.get_json(endpoint, params).await?;

        let recipes: Vec<Recipe> = payload
            .get("meals")
            .and_then(Value::as_array)
            .map(|meals| meals.iter().filter_map(Recipe::from_meal).collect())
            .unwrap_or_default();

        Ok(recipes)
    }
}

#[async_trait::async_trait]
impl RecipeCatalog for MealDbCatalog {
    async fn lookup_by_id(&self, id: &str) -> AppResult<Option<Recipe>> {
        let recipes = self.get_meals("lookup.php", &[("i", id)]).await?;
        Ok(recipes.into_iter().next())
    }

    async fn search_by_name(&self, query: &str) -> AppResult<Vec<Recipe>> {
        let recipes = self.get_meals("search.php", &[("s", query)]).await?;

        tracing::info!(query = %query, results = recipes.len(), "name search completed");

        Ok(recipes)
    }

    async fn search_by_first_letter(&self, letter: char) -> AppResult<Vec<Recipe>> {
        let letter = letter.to_string();
        self.get_meals("search.php", &[("f", letter.as_str())]).await
    }

    async fn filter_by_ingredient(&self, ingredient: &str) -> AppResult<Vec<Recipe>> {
        let recipes = self.get_meals("filter.php", &[("i", ingredient)]).await?;

        tracing::info!(
            ingredient = %ingredient,
            results = recipes.len(),
            "ingredient search completed"
        );

        Ok(recipes)
    }

    async fn filter_by_category(&self, category: &str) -> AppResult<Vec<Recipe>> {
        self.get_meals("filter.php", &[("c", category)]).await
    }

    async fn filter_by_area(&self, area: &str) -> AppResult<Vec<Recipe>> {
        self.get_meals("filter.php", &[("a", area)]).await
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let payload = self.get_json("categories.php", &[]).await?;

        let categories = payload
            .get("categories")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();

        Ok(categories)
    }

    async fn list_areas(&self) -> AppResult<Vec<String>> {
        let payload = self.get_json("list.php", &[("a", "list")]).await?;

        let areas = payload
            .get("meals")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| entry.get("strArea").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(areas)
    }
}
