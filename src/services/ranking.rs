//! Engagement ranking.
//!
//! Pure top-N scoring over full-collection scan projections. Every call
//! rescans; there is no incremental variant. Sorting is stable, so recipes
//! with equal scores keep their scan order.

/// Per-recipe counts gathered from the store scans
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngagementEntry {
    pub id: String,
    pub likes: usize,
    pub comments: usize,
}

impl EngagementEntry {
    fn score(&self) -> usize {
        self.likes + self.comments
    }
}

/// Top `limit` recipe ids by combined likes + comments, zero scores dropped.
pub fn top_engaged(mut entries: Vec<EngagementEntry>, limit: usize) -> Vec<String> {
    entries.retain(|entry| entry.score() > 0);
    entries.sort_by(|a, b| b.score().cmp(&a.score()));
    entries.truncate(limit);
    entries.into_iter().map(|entry| entry.id).collect()
}

/// Top `limit` recipe ids by like count alone, zero counts dropped.
pub fn top_liked(mut entries: Vec<EngagementEntry>, limit: usize) -> Vec<String> {
    entries.retain(|entry| entry.likes > 0);
    entries.sort_by(|a, b| b.likes.cmp(&a.likes));
    entries.truncate(limit);
    entries.into_iter().map(|entry| entry.id).collect()
}
