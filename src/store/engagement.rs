use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult, FailSoft},
    models::{Comment, Planner, Preferences, UserIdentity},
    services::ranking::{self, EngagementEntry},
};

use super::{collections, DocumentStore};

/// Typed accessor over the engagement collections.
///
/// Reads fail soft: a failed background fetch degrades the view to an empty
/// default instead of crashing it. Writes triggered directly by a user
/// action fail loud and return the error for the UI to display.
#[derive(Clone)]
pub struct EngagementStore {
    store: Arc<dyn DocumentStore>,
}

impl EngagementStore {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    // ------------------------------------------------------------------
    // Soft reads
    // ------------------------------------------------------------------

    /// User ids that have liked the recipe. Empty when no record exists;
    /// the record itself is only created on first like.
    pub async fn likers(&self, recipe_id: &str) -> HashSet<String> {
        self.try_likers(recipe_id).await.soft("likers read")
    }

    /// Ids of every recipe the user has liked.
    pub async fn liked_recipe_ids(&self, user_id: &str) -> Vec<String> {
        self.try_liked_recipe_ids(user_id)
            .await
            .soft("liked recipes read")
    }

    /// Comments for a recipe, newest first.
    pub async fn comments(&self, recipe_id: &str) -> Vec<Comment> {
        self.try_comments(recipe_id).await.soft("comments read")
    }

    /// The user's weekly planner; empty when never saved.
    pub async fn planner(&self, user_id: &str) -> Planner {
        self.try_planner(user_id).await.soft("planner read")
    }

    /// The user's preferences; defaults when never saved.
    pub async fn preferences(&self, user_id: &str) -> Preferences {
        self.try_preferences(user_id).await.soft("preferences read")
    }

    /// Top recipe ids by like count.
    pub async fn top_by_likes(&self, limit: usize) -> Vec<String> {
        self.try_top_by_likes(limit).await.soft("like ranking")
    }

    /// Top recipe ids by combined likes + comments.
    pub async fn top_by_engagement(&self, limit: usize) -> Vec<String> {
        self.try_top_by_engagement(limit)
            .await
            .soft("engagement ranking")
    }

    // ------------------------------------------------------------------
    // Loud writes
    // ------------------------------------------------------------------

    /// Flips the user's like on a recipe and returns the new state.
    ///
    /// Read-then-write: two sessions toggling at once can race and the last
    /// write wins. The first like on a recipe creates its record.
    pub async fn toggle_like(&self, recipe_id: &str, user_id: &str) -> AppResult<bool> {
        let existing = self.store.get(collections::RECIPES, recipe_id).await?;

        let liked = match existing {
            Some(doc) => {
                let mut likes = likes_of(&doc);
                let was_liked = likes.iter().any(|liker| liker == user_id);

                if was_liked {
                    likes.retain(|liker| liker != user_id);
                } else {
                    likes.push(user_id.to_string());
                }

                self.store
                    .set(collections::RECIPES, recipe_id, json!({ "likes": likes }), true)
                    .await?;

                !was_liked
            }
            None => {
                self.store
                    .set(
                        collections::RECIPES,
                        recipe_id,
                        json!({ "likes": [user_id] }),
                        false,
                    )
                    .await?;
                true
            }
        };

        tracing::info!(recipe_id, user_id, liked, "like toggled");

        Ok(liked)
    }

    /// Appends a comment and returns it with its assigned id and the
    /// write-time timestamp.
    pub async fn add_comment(
        &self,
        recipe_id: &str,
        author: &UserIdentity,
        body: &str,
    ) -> AppResult<Comment> {
        let body = body.trim();
        if body.is_empty() {
            return Err(AppError::InvalidInput("comment cannot be empty".to_string()));
        }
        if body.chars().count() > Comment::MAX_LEN {
            return Err(AppError::InvalidInput(format!(
                "comment exceeds {} characters",
                Comment::MAX_LEN
            )));
        }

        let mut comment = Comment {
            id: String::new(),
            recipe_id: recipe_id.to_string(),
            user: author.display_label(),
            user_id: author.uid.clone(),
            body: body.to_string(),
            timestamp: Utc::now(),
        };

        let doc = serde_json::to_value(&comment)?;
        comment.id = self.store.add(collections::COMMENTS, doc).await?;

        tracing::info!(recipe_id, comment_id = %comment.id, "comment added");

        Ok(comment)
    }

    /// Replaces the user's planner. The planner field is overwritten as a
    /// unit; the surrounding user document is merged so preferences survive.
    pub async fn save_planner(&self, user_id: &str, planner: &Planner) -> AppResult<()> {
        self.store
            .set(
                collections::USERS,
                user_id,
                json!({ "planner": planner }),
                true,
            )
            .await?;

        tracing::info!(user_id, "planner saved");

        Ok(())
    }

    /// Replaces the user's preferences, merging at the user-document level.
    pub async fn update_preferences(
        &self,
        user_id: &str,
        preferences: &Preferences,
    ) -> AppResult<()> {
        self.store
            .set(
                collections::USERS,
                user_id,
                json!({ "preferences": preferences }),
                true,
            )
            .await
    }

    // ------------------------------------------------------------------
    // Fallible internals
    // ------------------------------------------------------------------

    async fn try_likers(&self, recipe_id: &str) -> AppResult<HashSet<String>> {
        let doc = self.store.get(collections::RECIPES, recipe_id).await?;
        Ok(doc
            .map(|doc| likes_of(&doc).into_iter().collect())
            .unwrap_or_default())
    }

    async fn try_liked_recipe_ids(&self, user_id: &str) -> AppResult<Vec<String>> {
        let records = self.store.list(collections::RECIPES).await?;
        Ok(records
            .into_iter()
            .filter(|record| likes_of(&record.doc).iter().any(|liker| liker == user_id))
            .map(|record| record.id)
            .collect())
    }

    async fn try_comments(&self, recipe_id: &str) -> AppResult<Vec<Comment>> {
        let records = self.store.list(collections::COMMENTS).await?;

        let mut comments: Vec<Comment> = records
            .into_iter()
            .filter_map(|record| {
                let mut comment: Comment = serde_json::from_value(record.doc).ok()?;
                comment.id = record.id;
                Some(comment)
            })
            .filter(|comment| comment.recipe_id == recipe_id)
            .collect();

        comments.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(comments)
    }

    async fn try_planner(&self, user_id: &str) -> AppResult<Planner> {
        let doc = self.store.get(collections::USERS, user_id).await?;
        match doc.and_then(|doc| doc.get("planner").cloned()) {
            Some(planner) => Ok(serde_json::from_value(planner)?),
            None => Ok(Planner::default()),
        }
    }

    async fn try_preferences(&self, user_id: &str) -> AppResult<Preferences> {
        let doc = self.store.get(collections::USERS, user_id).await?;
        match doc.and_then(|doc| doc.get("preferences").cloned()) {
            Some(preferences) => Ok(serde_json::from_value(preferences)?),
            None => Ok(Preferences::default()),
        }
    }

    async fn try_top_by_likes(&self, limit: usize) -> AppResult<Vec<String>> {
        let records = self.store.list(collections::RECIPES).await?;

        let entries = records
            .into_iter()
            .map(|record| EngagementEntry {
                likes: likes_of(&record.doc).len(),
                comments: 0,
                id: record.id,
            })
            .collect();

        Ok(ranking::top_liked(entries, limit))
    }

    async fn try_top_by_engagement(&self, limit: usize) -> AppResult<Vec<String>> {
        let records = self.store.list(collections::RECIPES).await?;
        let comments = self.store.list(collections::COMMENTS).await?;

        // One pass over comments: counts, plus first-seen order for recipes
        // that have comments but no engagement record yet.
        let mut comment_counts: HashMap<String, usize> = HashMap::new();
        let mut comment_order: Vec<String> = Vec::new();
        for record in &comments {
            if let Some(recipe_id) = record.doc.get("recipeId").and_then(Value::as_str) {
                let count = comment_counts.entry(recipe_id.to_string()).or_insert(0);
                if *count == 0 {
                    comment_order.push(recipe_id.to_string());
                }
                *count += 1;
            }
        }

        let mut entries: Vec<EngagementEntry> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for record in records {
            seen.insert(record.id.clone());
            entries.push(EngagementEntry {
                likes: likes_of(&record.doc).len(),
                comments: comment_counts.get(&record.id).copied().unwrap_or(0),
                id: record.id,
            });
        }
        for recipe_id in comment_order {
            if !seen.contains(&recipe_id) {
                entries.push(EngagementEntry {
                    likes: 0,
                    comments: comment_counts[&recipe_id],
                    id: recipe_id,
                });
            }
        }

        Ok(ranking::top_engaged(entries, limit))
    }
}

fn likes_of(doc: &Value) -> Vec<String> {
    doc.get("likes")
        .and_then(Value::as_array)
        .map(|likes| {
            likes
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
