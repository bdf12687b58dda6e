//! In-memory store adapter implementing both driven ports.
//!
//! Used when no database URL is configured and by integration tests. All
//! state sits behind one mutex so each port call is atomic, which gives the
//! same uniqueness guarantees the PostgreSQL constraints provide: one cart
//! entry per `(user, recipe)`, one link per recipe and one recipe per code.
//!
//! The server fallback starts from [`InMemoryStore::with_fixture_recipes`]
//! so carts and short links have something to point at.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::ports::{
    CartInsertOutcome, ShoppingCartRepository, ShoppingCartRepositoryError,
    ShortLinkInsertOutcome, ShortLinkRepository, ShortLinkRepositoryError,
};
use crate::domain::{
    IngredientLine, RecipeId, RecipeSummary, RecipeValidationError, ShortCode, ShortLink, UserId,
};

/// Author of the fixture recipes.
const FIXTURE_AUTHOR: Uuid = Uuid::from_u128(0x0f0d_9a3e_51c4_4c8e_9b1a_2d7e_6f30_a001);

/// `(id, name, [(ingredient, unit, amount)])` rows served by the fallback store.
const FIXTURE_RECIPES: [(i64, &str, &[(&str, &str, u64)]); 3] = [
    (
        1,
        "Pancakes",
        &[("Flour", "g", 200), ("Milk", "ml", 300), ("Egg", "pcs", 2)],
    ),
    (
        2,
        "Country bread",
        &[("Flour", "g", 500), ("Water", "ml", 350), ("Salt", "g", 10)],
    ),
    (
        3,
        "Omelette",
        &[("Egg", "pcs", 3), ("Milk", "ml", 50), ("Salt", "g", 2)],
    ),
];

#[derive(Debug, Clone)]
struct StoredRecipe {
    summary: RecipeSummary,
    lines: Vec<IngredientLine>,
}

#[derive(Debug, Default)]
struct StoreState {
    recipes: BTreeMap<RecipeId, StoredRecipe>,
    cart_entries: BTreeSet<(UserId, RecipeId)>,
    links_by_recipe: HashMap<RecipeId, ShortLink>,
    recipes_by_code: HashMap<String, RecipeId>,
}

/// Mutex-guarded recipe, cart and short-link tables.
///
/// Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the fixture recipes with ids 1 to 3.
    pub fn with_fixture_recipes() -> Result<Self, RecipeValidationError> {
        let store = Self::new();
        for (id, name, lines) in FIXTURE_RECIPES {
            let lines = lines
                .iter()
                .map(|(ingredient, unit, amount)| {
                    IngredientLine::try_from_parts(*ingredient, *unit, *amount)
                })
                .collect::<Result<Vec<_>, _>>()?;
            store.insert_recipe(
                RecipeSummary {
                    id: RecipeId::new(id)?,
                    author: UserId::from_uuid(FIXTURE_AUTHOR),
                    name: name.to_owned(),
                },
                lines,
            );
        }
        Ok(store)
    }

    /// Number of stored recipes.
    pub fn recipe_count(&self) -> usize {
        self.lock().recipes.len()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Insert or replace a recipe together with its ingredient lines.
    pub fn insert_recipe(&self, summary: RecipeSummary, lines: Vec<IngredientLine>) {
        let id = summary.id;
        self.lock()
            .recipes
            .insert(id, StoredRecipe { summary, lines });
    }

    /// Delete a recipe, cascading to cart entries and its short link.
    ///
    /// Returns `false` when the recipe was unknown.
    pub fn delete_recipe(&self, recipe_id: RecipeId) -> bool {
        let mut state = self.lock();
        if state.recipes.remove(&recipe_id).is_none() {
            return false;
        }
        state.cart_entries.retain(|(_, recipe)| *recipe != recipe_id);
        if let Some(link) = state.links_by_recipe.remove(&recipe_id) {
            state.recipes_by_code.remove(link.code.as_str());
        }
        true
    }

    /// Number of stored short links.
    pub fn short_link_count(&self) -> usize {
        self.lock().links_by_recipe.len()
    }
}

#[async_trait]
impl ShoppingCartRepository for InMemoryStore {
    async fn list_cart_recipes(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<RecipeSummary>, ShoppingCartRepositoryError> {
        let state = self.lock();
        Ok(state
            .cart_entries
            .iter()
            .filter(|(owner, _)| owner == user_id)
            .filter_map(|(_, recipe_id)| state.recipes.get(recipe_id))
            .map(|stored| stored.summary.clone())
            .collect())
    }

    async fn list_ingredient_lines(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Vec<IngredientLine>, ShoppingCartRepositoryError> {
        Ok(self
            .lock()
            .recipes
            .get(&recipe_id)
            .map(|stored| stored.lines.clone())
            .unwrap_or_default())
    }

    async fn add_entry(
        &self,
        user_id: &UserId,
        recipe_id: RecipeId,
    ) -> Result<CartInsertOutcome, ShoppingCartRepositoryError> {
        let mut state = self.lock();
        if !state.recipes.contains_key(&recipe_id) {
            return Err(ShoppingCartRepositoryError::recipe_not_found(recipe_id.get()));
        }
        Ok(if state.cart_entries.insert((*user_id, recipe_id)) {
            CartInsertOutcome::Added
        } else {
            CartInsertOutcome::AlreadyPresent
        })
    }

    async fn remove_entry(
        &self,
        user_id: &UserId,
        recipe_id: RecipeId,
    ) -> Result<bool, ShoppingCartRepositoryError> {
        Ok(self.lock().cart_entries.remove(&(*user_id, recipe_id)))
    }
}

#[async_trait]
impl ShortLinkRepository for InMemoryStore {
    async fn find_by_recipe(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Option<ShortLink>, ShortLinkRepositoryError> {
        Ok(self.lock().links_by_recipe.get(&recipe_id).cloned())
    }

    async fn insert_if_absent(
        &self,
        recipe_id: RecipeId,
        code: &ShortCode,
    ) -> Result<ShortLinkInsertOutcome, ShortLinkRepositoryError> {
        let mut state = self.lock();
        if !state.recipes.contains_key(&recipe_id) {
            return Err(ShortLinkRepositoryError::recipe_not_found(recipe_id.get()));
        }
        if state.links_by_recipe.contains_key(&recipe_id) {
            return Ok(ShortLinkInsertOutcome::RecipeAlreadyLinked);
        }
        if state.recipes_by_code.contains_key(code.as_str()) {
            return Ok(ShortLinkInsertOutcome::CodeTaken);
        }
        let link = ShortLink {
            code: code.clone(),
            recipe_id,
            created_at: Utc::now(),
        };
        state
            .recipes_by_code
            .insert(code.as_str().to_owned(), recipe_id);
        state.links_by_recipe.insert(recipe_id, link.clone());
        Ok(ShortLinkInsertOutcome::Inserted(link))
    }

    async fn find_recipe_by_code(
        &self,
        code: &ShortCode,
    ) -> Result<Option<RecipeId>, ShortLinkRepositoryError> {
        Ok(self.lock().recipes_by_code.get(code.as_str()).copied())
    }
}
