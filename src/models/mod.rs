use serde::{Deserialize, Serialize};
use serde_json::Value;

mod engagement;
mod planner;
mod user;

pub use engagement::Comment;
pub use planner::{MealSlot, Planner, PlannerRef, Weekday};
pub use user::{Preferences, UserIdentity};

/// One ingredient line of a recipe. The catalog stores these as twenty
/// positional column pairs; absent positions are empty strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub name: String,
    pub measure: String,
}

/// A recipe as served by the catalog.
///
/// Filter endpoints return partial records (id, name, thumbnail only);
/// `is_complete` distinguishes those from full lookups so callers know when
/// a detail backfill is needed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub thumbnail: Option<String>,
    pub category: Option<String>,
    pub area: Option<String>,
    pub instructions: Option<String>,
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    /// Projects a raw catalog meal object into a `Recipe`.
    ///
    /// Returns `None` when the required `idMeal`/`strMeal` fields are
    /// missing, which drops the record rather than failing the batch.
    pub fn from_meal(value: &Value) -> Option<Self> {
        let id = text_field(value, "idMeal")?;
        let name = text_field(value, "strMeal")?;

        let mut ingredients = Vec::new();
        for i in 1..=20 {
            if let Some(ingredient) = text_field(value, &format!("strIngredient{}", i)) {
                let measure = text_field(value, &format!("strMeasure{}", i)).unwrap_or_default();
                ingredients.push(Ingredient {
                    name: ingredient,
                    measure,
                });
            }
        }

        Some(Recipe {
            id,
            name,
            thumbnail: text_field(value, "strMealThumb"),
            category: text_field(value, "strCategory"),
            area: text_field(value, "strArea"),
            instructions: text_field(value, "strInstructions"),
            ingredients,
        })
    }

    /// Whether the record carries its category and area. Partial records
    /// from the filter endpoints do not.
    pub fn is_complete(&self) -> bool {
        self.category.is_some() && self.area.is_some()
    }

    /// The slimmed-down reference stored in planner slots.
    pub fn planner_ref(&self) -> PlannerRef {
        PlannerRef {
            id: self.id.clone(),
            name: self.name.clone(),
            thumbnail: self.thumbnail.clone(),
        }
    }
}

fn text_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A catalog category as returned by the category listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    #[serde(rename = "idCategory", default)]
    pub id: Option<String>,
    #[serde(rename = "strCategory")]
    pub name: String,
    #[serde(rename = "strCategoryThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategoryDescription", default)]
    pub description: Option<String>,
}

/// Why a search result was included
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchTag {
    Name,
    Ingredient,
    Category,
    Area,
}

/// A recipe tagged with the reason it matched a search. UI labeling only,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub matched: MatchTag,
}
