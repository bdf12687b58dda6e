//! Driving port for editing a user's shopping cart.

use async_trait::async_trait;

use crate::domain::{Error, RecipeId, UserId};

/// Use-case port for adding and removing cart entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingCartCommand: Send + Sync {
    /// Put a recipe in the cart. Adding a recipe twice is rejected.
    async fn add_recipe(&self, user_id: &UserId, recipe_id: RecipeId) -> Result<(), Error>;

    /// Take a recipe out of the cart. Removing an absent recipe is rejected.
    async fn remove_recipe(&self, user_id: &UserId, recipe_id: RecipeId) -> Result<(), Error>;
}
