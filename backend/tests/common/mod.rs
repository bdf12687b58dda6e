//! Shared seeding helpers for integration tests.

use foodgram::domain::{IngredientLine, RecipeId, RecipeSummary, UserId};
use foodgram::outbound::memory::InMemoryStore;

/// Build a recipe id, panicking on invalid literals.
pub fn recipe_id(raw: i64) -> RecipeId {
    RecipeId::new(raw).expect("positive recipe id")
}

/// Build ingredient lines from `(name, unit, amount)` triples.
pub fn lines(raw: &[(&str, &str, u64)]) -> Vec<IngredientLine> {
    raw.iter()
        .map(|(name, unit, amount)| {
            IngredientLine::try_from_parts(*name, *unit, *amount).expect("valid ingredient line")
        })
        .collect()
}

/// Insert a recipe authored by a random user.
pub fn seed_recipe(store: &InMemoryStore, id: i64, name: &str, raw: &[(&str, &str, u64)]) -> RecipeId {
    let id = recipe_id(id);
    store.insert_recipe(
        RecipeSummary {
            id,
            author: UserId::random(),
            name: name.to_owned(),
        },
        lines(raw),
    );
    id
}
