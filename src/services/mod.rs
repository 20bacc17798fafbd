//! The aggregation layer: discovery sampling, engagement ranking, search
//! merging and feed assembly on top of the catalog and store accessors.

pub mod feed;
pub mod ranking;
pub mod sampler;
pub mod search;

pub use feed::FeedService;
pub use sampler::{DiscoverySampler, SamplerPools};
pub use search::{SearchFilters, SearchService};
