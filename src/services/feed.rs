//! Home feed assembly.
//!
//! The feed leads with what the community is engaging with and fills the
//! rest with randomized discovery: the top-engaged recipe ids are resolved
//! through the catalog, the remaining slots come from the sampler (which is
//! told to skip the ids already placed), and the combined list is shuffled
//! so the engaged picks are not pinned to the top.

use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::join_all;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::{
    catalog::RecipeCatalog,
    models::Recipe,
    services::sampler::{DiscoverySampler, SamplerPools},
    store::EngagementStore,
};

pub struct FeedService<C> {
    catalog: Arc<C>,
    engagement: EngagementStore,
    sampler: DiscoverySampler<C>,
    rng: Mutex<StdRng>,
}

impl<C: RecipeCatalog> FeedService<C> {
    pub fn new(catalog: Arc<C>, engagement: EngagementStore) -> Self {
        let sampler = DiscoverySampler::new(catalog.clone());
        Self {
            catalog,
            engagement,
            sampler,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Fixed-seed constructor for deterministic feeds in tests.
    pub fn seeded(catalog: Arc<C>, engagement: EngagementStore, seed: u64) -> Self {
        let sampler =
            DiscoverySampler::seeded(catalog.clone(), SamplerPools::default(), seed.wrapping_add(1));
        Self {
            catalog,
            engagement,
            sampler,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Builds the initial feed of `size` recipes. Degrades gracefully: if
    /// the engagement ranking is empty or unavailable the whole feed comes
    /// from the sampler, and an unresolvable engaged id just gives its slot
    /// to discovery.
    pub async fn initial_feed(&self, size: usize) -> Vec<Recipe> {
        let top_ids = self.engagement.top_by_engagement(size / 2).await;

        let mut feed: Vec<Recipe> = join_all(top_ids.iter().map(|id| async move {
            match self.catalog.lookup_by_id(id).await {
                Ok(found) => found,
                Err(error) => {
                    tracing::warn!(%error, recipe_id = %id, "engaged recipe resolution failed, skipping");
                    None
                }
            }
        }))
        .await
        .into_iter()
        .flatten()
        .collect();

        let placed: Vec<String> = feed.iter().map(|recipe| recipe.id.clone()).collect();
        let remaining = size.saturating_sub(feed.len());
        feed.extend(self.sampler.initial(remaining, &placed).await);

        {
            let mut rng = self.rng();
            feed.shuffle(&mut *rng);
        }

        tracing::info!(
            size = feed.len(),
            engaged = placed.len(),
            "initial feed assembled"
        );

        feed
    }

    /// Loads the next infinite-scroll page. An empty result means there is
    /// nothing further to show.
    pub async fn load_more(&self, count: usize, exclude: &[String]) -> Vec<Recipe> {
        self.sampler.more(count, exclude).await
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
