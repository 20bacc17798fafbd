//! Combined recipe search.
//!
//! One query fans out to a name search and an ingredient search; optional
//! category/area filters add their own legs. Results merge into a single
//! tagged list: name matches first and with priority on collisions, then
//! ingredient, category and area matches, deduplicated by first appearance.
//! No relevance scoring beyond that order.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;

use crate::{
    catalog::RecipeCatalog,
    error::FailSoft,
    models::{MatchTag, Recipe, SearchResult},
};

/// Optional exact-match filters alongside the free-text query
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub category: Option<String>,
    pub area: Option<String>,
}

pub struct SearchService<C> {
    catalog: Arc<C>,
}

impl<C: RecipeCatalog> SearchService<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    /// Runs the combined search. Each leg degrades to empty on failure, so
    /// a total outage yields an empty list rather than an error.
    pub async fn search(&self, query: &str, filters: &SearchFilters) -> Vec<SearchResult> {
        let query = query.trim();

        let mut results: Vec<SearchResult> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        if !query.is_empty() {
            let (by_name, by_ingredient) = tokio::join!(
                self.catalog.search_by_name(query),
                self.catalog.filter_by_ingredient(query)
            );

            for recipe in by_name.soft("name search") {
                push_new(&mut results, &mut seen, recipe, MatchTag::Name);
            }

            // Ingredient hits are partial records; resolve before merging.
            let resolved = self.resolve(by_ingredient.soft("ingredient search")).await;
            for recipe in resolved {
                push_new(&mut results, &mut seen, recipe, MatchTag::Ingredient);
            }
        }

        if let Some(category) = filters.category.as_deref() {
            let hits = self
                .catalog
                .filter_by_category(category)
                .await
                .soft("category filter");
            for recipe in self.resolve(hits).await {
                push_new(&mut results, &mut seen, recipe, MatchTag::Category);
            }
        }

        if let Some(area) = filters.area.as_deref() {
            let hits = self.catalog.filter_by_area(area).await.soft("area filter");
            for recipe in self.resolve(hits).await {
                push_new(&mut results, &mut seen, recipe, MatchTag::Area);
            }
        }

        tracing::info!(
            query = %query,
            results = results.len(),
            category = filters.category.as_deref().unwrap_or(""),
            area = filters.area.as_deref().unwrap_or(""),
            "search completed"
        );

        results
    }

    /// Resolves partial records to full ones, dropping any that fail or
    /// come back absent.
    async fn resolve(&self, partial: Vec<Recipe>) -> Vec<Recipe> {
        let lookups = partial.into_iter().map(|recipe| async move {
            match self.catalog.lookup_by_id(&recipe.id).await {
                Ok(full) => full,
                Err(error) => {
                    tracing::warn!(%error, recipe_id = %recipe.id, "detail resolution failed, dropping hit");
                    None
                }
            }
        });

        join_all(lookups).await.into_iter().flatten().collect()
    }
}

fn push_new(
    results: &mut Vec<SearchResult>,
    seen: &mut HashSet<String>,
    recipe: Recipe,
    matched: MatchTag,
) {
    if seen.insert(recipe.id.clone()) {
        results.push(SearchResult { recipe, matched });
    }
}
