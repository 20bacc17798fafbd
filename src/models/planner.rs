use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Planner rows, Monday-first
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];
}

/// Planner columns
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snack,
    ];
}

/// The slice of a recipe a planner slot keeps: enough to render a card and
/// link back to the full record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannerRef {
    pub id: String,
    pub name: String,
    pub thumbnail: Option<String>,
}

/// A user's weekly meal plan: day → meal slot → recipe reference.
///
/// Saved as a whole on every change (last write wins); an absent user
/// document reads back as the empty planner.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Planner {
    #[serde(flatten)]
    days: BTreeMap<Weekday, BTreeMap<MealSlot, PlannerRef>>,
}

impl Planner {
    pub fn get(&self, day: Weekday, slot: MealSlot) -> Option<&PlannerRef> {
        self.days.get(&day).and_then(|slots| slots.get(&slot))
    }

    /// Assigns a recipe to a slot, replacing any previous assignment.
    pub fn set(&mut self, day: Weekday, slot: MealSlot, recipe: PlannerRef) {
        self.days.entry(day).or_default().insert(slot, recipe);
    }

    /// Clears a slot, returning the reference that was there. Days with no
    /// remaining slots are removed so the stored document stays sparse.
    pub fn remove(&mut self, day: Weekday, slot: MealSlot) -> Option<PlannerRef> {
        let slots = self.days.get_mut(&day)?;
        let removed = slots.remove(&slot);
        if slots.is_empty() {
            self.days.remove(&day);
        }
        removed
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Iterates filled slots in day, then slot, order.
    pub fn entries(&self) -> impl Iterator<Item = (Weekday, MealSlot, &PlannerRef)> {
        self.days.iter().flat_map(|(day, slots)| {
            slots.iter().map(move |(slot, recipe)| (*day, *slot, recipe))
        })
    }
}
