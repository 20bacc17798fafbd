//! Randomized discovery sampling.
//!
//! The catalog has no "give me N random recipes" primitive, so the feed is
//! assembled from randomized slices of what it does offer: recipes by first
//! letter, by category, and by area. Per call, a random 2-or-3 subset of
//! those strategies runs concurrently, each fanning out its own catalog
//! queries; the pooled results are shuffled, deduplicated, filtered against
//! the caller's exclusion list and truncated. Partial records surviving the
//! cut are backfilled with a detail lookup.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{join_all, try_join_all, BoxFuture};
use futures::FutureExt;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::{catalog::RecipeCatalog, error::AppResult, models::Recipe};

/// The letter/category/area pools the strategies draw from.
///
/// Small curated lists; kept as data so deployments can tune them without
/// touching the sampling logic.
#[derive(Debug, Clone)]
pub struct SamplerPools {
    pub letters: Vec<char>,
    pub categories: Vec<String>,
    pub areas: Vec<String>,
}

impl Default for SamplerPools {
    fn default() -> Self {
        Self {
            letters: ('a'..='z').collect(),
            categories: [
                "Beef",
                "Breakfast",
                "Chicken",
                "Dessert",
                "Lamb",
                "Miscellaneous",
                "Pasta",
                "Seafood",
                "Vegetarian",
            ]
            .map(String::from)
            .to_vec(),
            areas: [
                "American",
                "British",
                "Chinese",
                "French",
                "Indian",
                "Italian",
                "Japanese",
                "Mexican",
                "Thai",
                "Turkish",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

/// How many letters/categories/areas each strategy queries per call
#[derive(Debug, Clone, Copy)]
struct DrawCounts {
    letters: usize,
    categories: usize,
    areas: usize,
}

/// Initial load draws wider than the infinite-scroll refill.
const INITIAL_DRAWS: DrawCounts = DrawCounts {
    letters: 8,
    categories: 3,
    areas: 3,
};

const REFILL_DRAWS: DrawCounts = DrawCounts {
    letters: 6,
    categories: 2,
    areas: 2,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Letters,
    Categories,
    Areas,
}

struct SamplePlan {
    strategies: Vec<Strategy>,
    letters: Vec<char>,
    categories: Vec<String>,
    areas: Vec<String>,
}

pub struct DiscoverySampler<C> {
    catalog: Arc<C>,
    pools: SamplerPools,
    rng: Mutex<StdRng>,
}

impl<C: RecipeCatalog> DiscoverySampler<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self::with_pools(catalog, SamplerPools::default())
    }

    pub fn with_pools(catalog: Arc<C>, pools: SamplerPools) -> Self {
        Self {
            catalog,
            pools,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Fixed-seed constructor for deterministic sampling in tests.
    pub fn seeded(catalog: Arc<C>, pools: SamplerPools, seed: u64) -> Self {
        Self {
            catalog,
            pools,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Samples `count` recipes for an initial feed, omitting any ids the
    /// caller has already placed.
    pub async fn initial(&self, count: usize, exclude: &[String]) -> Vec<Recipe> {
        self.sample(count, exclude, INITIAL_DRAWS).await
    }

    /// Samples up to `count` more recipes, omitting ids already shown.
    /// An empty result means the catalog has nothing further to offer.
    pub async fn more(&self, count: usize, exclude: &[String]) -> Vec<Recipe> {
        self.sample(count, exclude, REFILL_DRAWS).await
    }

    async fn sample(&self, count: usize, exclude: &[String], draws: DrawCounts) -> Vec<Recipe> {
        if count == 0 {
            return Vec::new();
        }

        let plan = self.plan(draws);

        let mut strategies: Vec<BoxFuture<'_, AppResult<Vec<Recipe>>>> = Vec::new();
        for strategy in &plan.strategies {
            match strategy {
                Strategy::Letters => strategies.push(self.by_letters(&plan.letters).boxed()),
                Strategy::Categories => {
                    strategies.push(self.by_categories(&plan.categories).boxed())
                }
                Strategy::Areas => strategies.push(self.by_areas(&plan.areas).boxed()),
            }
        }

        // A failed query aborts its whole strategy; the strategy is then
        // skipped and the others still contribute.
        let mut pool: Vec<Recipe> = Vec::new();
        for outcome in join_all(strategies).await {
            match outcome {
                Ok(batch) => pool.extend(batch),
                Err(error) => {
                    tracing::warn!(%error, "sampling strategy failed, skipping");
                }
            }
        }

        pool = self.shuffle(pool);

        let excluded: HashSet<&str> = exclude.iter().map(String::as_str).collect();
        let mut seen: HashSet<String> = HashSet::new();
        let picked: Vec<Recipe> = pool
            .into_iter()
            .filter(|recipe| seen.insert(recipe.id.clone()))
            .filter(|recipe| !excluded.contains(recipe.id.as_str()))
            .take(count)
            .collect();

        let complete: Vec<Recipe> = join_all(picked.into_iter().map(|r| self.backfill(r)))
            .await
            .into_iter()
            .flatten()
            .collect();

        tracing::info!(
            requested = count,
            sampled = complete.len(),
            excluded = exclude.len(),
            "discovery sample assembled"
        );

        complete
    }

    /// Draws the strategy subset and per-strategy query subsets up front so
    /// the RNG lock is never held across an await.
    fn plan(&self, draws: DrawCounts) -> SamplePlan {
        let mut rng = self.rng();

        let mut kinds = [Strategy::Letters, Strategy::Categories, Strategy::Areas];
        kinds.shuffle(&mut *rng);
        let picked = rng.gen_range(2..=3usize);

        SamplePlan {
            strategies: kinds[..picked].to_vec(),
            letters: self
                .pools
                .letters
                .choose_multiple(&mut *rng, draws.letters)
                .copied()
                .collect(),
            categories: self
                .pools
                .categories
                .choose_multiple(&mut *rng, draws.categories)
                .cloned()
                .collect(),
            areas: self
                .pools
                .areas
                .choose_multiple(&mut *rng, draws.areas)
                .cloned()
                .collect(),
        }
    }

    async fn by_letters(&self, letters: &[char]) -> AppResult<Vec<Recipe>> {
        let batches = try_join_all(
            letters
                .iter()
                .map(|letter| self.catalog.search_by_first_letter(*letter)),
        )
        .await?;
        Ok(batches.into_iter().flatten().collect())
    }

    async fn by_categories(&self, categories: &[String]) -> AppResult<Vec<Recipe>> {
        let batches = try_join_all(
            categories
                .iter()
                .map(|category| self.catalog.filter_by_category(category)),
        )
        .await?;
        Ok(batches.into_iter().flatten().collect())
    }

    async fn by_areas(&self, areas: &[String]) -> AppResult<Vec<Recipe>> {
        let batches =
            try_join_all(areas.iter().map(|area| self.catalog.filter_by_area(area))).await?;
        Ok(batches.into_iter().flatten().collect())
    }

    /// Completes a partial record with a detail lookup. A failed lookup
    /// keeps the partial record; an absent one drops it.
    async fn backfill(&self, recipe: Recipe) -> Option<Recipe> {
        if recipe.is_complete() {
            return Some(recipe);
        }

        match self.catalog.lookup_by_id(&recipe.id).await {
            Ok(Some(full)) => Some(full),
            Ok(None) => None,
            Err(error) => {
                tracing::warn!(%error, recipe_id = %recipe.id, "detail backfill failed, keeping partial record");
                Some(recipe)
            }
        }
    }

    fn shuffle(&self, mut recipes: Vec<Recipe>) -> Vec<Recipe> {
        let mut rng = self.rng();
        recipes.shuffle(&mut *rng);
        recipes
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
