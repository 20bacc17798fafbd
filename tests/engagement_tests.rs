use std::sync::Arc;
use std::time::Duration;

use orb_core::error::AppError;
use orb_core::models::{MealSlot, Planner, PlannerRef, Preferences, Recipe, UserIdentity, Weekday};
use orb_core::store::{EngagementStore, MemoryStore};

fn engagement() -> EngagementStore {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    EngagementStore::new(Arc::new(MemoryStore::new()))
}

fn user(uid: &str, name: &str) -> UserIdentity {
    UserIdentity {
        uid: uid.to_string(),
        display_name: Some(name.to_string()),
        email: Some(format!("{}@example.test", uid)),
    }
}

#[tokio::test]
async fn test_toggle_like_flips_state_and_membership() {
    let store = engagement();

    assert!(store.toggle_like("52771", "u1").await.unwrap());
    assert!(store.likers("52771").await.contains("u1"));

    assert!(!store.toggle_like("52771", "u1").await.unwrap());
    assert!(!store.likers("52771").await.contains("u1"));
}

#[tokio::test]
async fn test_first_like_creates_record() {
    let store = engagement();

    assert!(store.likers("52771").await.is_empty());
    assert!(store.toggle_like("52771", "u1").await.unwrap());

    let likers = store.likers("52771").await;
    assert_eq!(likers.len(), 1);
    assert!(likers.contains("u1"));
}

#[tokio::test]
async fn test_likes_have_set_semantics() {
    let store = engagement();

    store.toggle_like("52771", "u1").await.unwrap();
    store.toggle_like("52771", "u2").await.unwrap();

    let likers = store.likers("52771").await;
    assert_eq!(likers.len(), 2);
}

#[tokio::test]
async fn test_liked_recipe_ids_tracks_membership() {
    let store = engagement();

    store.toggle_like("1", "u1").await.unwrap();
    store.toggle_like("2", "u1").await.unwrap();
    store.toggle_like("3", "u2").await.unwrap();

    let mut liked = store.liked_recipe_ids("u1").await;
    liked.sort();
    assert_eq!(liked, vec!["1", "2"]);

    store.toggle_like("2", "u1").await.unwrap();
    let liked = store.liked_recipe_ids("u1").await;
    assert_eq!(liked, vec!["1"]);
}

#[tokio::test]
async fn test_comments_returned_newest_first() {
    let store = engagement();
    let author = user("u1", "Alex");

    let first = store.add_comment("52771", &author, "First!").await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = store.add_comment("52771", &author, "Second!").await.unwrap();

    let comments = store.comments("52771").await;
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].id, second.id);
    assert_eq!(comments[1].id, first.id);
}

#[tokio::test]
async fn test_comments_filtered_by_recipe() {
    let store = engagement();
    let author = user("u1", "Alex");

    store.add_comment("1", &author, "On one").await.unwrap();
    store.add_comment("2", &author, "On two").await.unwrap();

    let comments = store.comments("1").await;
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].body, "On one");
    assert_eq!(comments[0].user, "Alex");
}

#[tokio::test]
async fn test_comment_rejects_empty_body() {
    let store = engagement();
    let author = user("u1", "Alex");

    let result = store.add_comment("1", &author, "   ").await;
    assert!(matches!(result, Err(AppError::InvalidInput(_))));
}

#[tokio::test]
async fn test_comment_rejects_overlong_body() {
    let store = engagement();
    let author = user("u1", "Alex");

    let body = "x".repeat(501);
    let result = store.add_comment("1", &author, &body).await;
    assert!(matches!(result, Err(AppError::InvalidInput(_))));

    let body = "x".repeat(500);
    assert!(store.add_comment("1", &author, &body).await.is_ok());
}

#[tokio::test]
async fn test_planner_missing_user_is_empty() {
    let store = engagement();
    assert!(store.planner("u1").await.is_empty());
}

#[tokio::test]
async fn test_planner_round_trip() {
    let store = engagement();

    let recipe = Recipe::from_meal(&serde_json::json!({
        "idMeal": "52771",
        "strMeal": "Spicy Arrabiata Penne",
        "strMealThumb": "https://example.test/52771.jpg"
    }))
    .unwrap();

    let mut planner = Planner::default();
    planner.set(Weekday::Wednesday, MealSlot::Dinner, recipe.planner_ref());

    store.save_planner("u1", &planner).await.unwrap();

    let loaded = store.planner("u1").await;
    assert_eq!(loaded, planner);
    assert_eq!(
        loaded.get(Weekday::Wednesday, MealSlot::Dinner).unwrap().id,
        "52771"
    );
}

#[tokio::test]
async fn test_planner_save_overwrites_whole_document() {
    let store = engagement();

    let mut planner = Planner::default();
    planner.set(
        Weekday::Monday,
        MealSlot::Lunch,
        PlannerRef {
            id: "1".to_string(),
            name: "One".to_string(),
            thumbnail: None,
        },
    );
    store.save_planner("u1", &planner).await.unwrap();

    let mut replacement = Planner::default();
    replacement.set(
        Weekday::Friday,
        MealSlot::Snack,
        PlannerRef {
            id: "2".to_string(),
            name: "Two".to_string(),
            thumbnail: None,
        },
    );
    store.save_planner("u1", &replacement).await.unwrap();

    let loaded = store.planner("u1").await;
    assert!(loaded.get(Weekday::Monday, MealSlot::Lunch).is_none());
    assert_eq!(loaded.get(Weekday::Friday, MealSlot::Snack).unwrap().id, "2");
}

#[tokio::test]
async fn test_preferences_survive_planner_saves() {
    let store = engagement();

    let preferences = Preferences {
        serving_size: 4,
        theme: "dark".to_string(),
        notifications: false,
    };
    store.update_preferences("u1", &preferences).await.unwrap();
    store.save_planner("u1", &Planner::default()).await.unwrap();

    assert_eq!(store.preferences("u1").await, preferences);
}

#[tokio::test]
async fn test_preferences_default_when_missing() {
    let store = engagement();
    assert_eq!(store.preferences("u1").await, Preferences::default());
}

#[tokio::test]
async fn test_top_by_engagement_properties() {
    let store = engagement();
    let author = user("u9", "Critic");

    // "a": 2 likes, 1 comment = 3; "b": 1 like = 1; "c": 2 comments = 2;
    // "d": liked then unliked = 0.
    store.toggle_like("a", "u1").await.unwrap();
    store.toggle_like("a", "u2").await.unwrap();
    store.add_comment("a", &author, "solid").await.unwrap();
    store.toggle_like("b", "u1").await.unwrap();
    store.add_comment("c", &author, "hm").await.unwrap();
    store.add_comment("c", &author, "actually good").await.unwrap();
    store.toggle_like("d", "u1").await.unwrap();
    store.toggle_like("d", "u1").await.unwrap();

    let ranked = store.top_by_engagement(10).await;
    assert_eq!(ranked, vec!["a", "c", "b"]);

    let limited = store.top_by_engagement(2).await;
    assert_eq!(limited, vec!["a", "c"]);
}

#[tokio::test]
async fn test_top_by_likes_ignores_comments() {
    let store = engagement();
    let author = user("u9", "Critic");

    store.toggle_like("a", "u1").await.unwrap();
    store.add_comment("b", &author, "chatty").await.unwrap();
    store.add_comment("b", &author, "but unliked").await.unwrap();

    let ranked = store.top_by_likes(10).await;
    assert_eq!(ranked, vec!["a"]);
}

#[tokio::test]
async fn test_rankings_empty_when_store_empty() {
    let store = engagement();
    assert!(store.top_by_engagement(5).await.is_empty());
    assert!(store.top_by_likes(5).await.is_empty());
}
