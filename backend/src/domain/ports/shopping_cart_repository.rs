//! Driven port for reading and editing shopping carts.
//!
//! Carts are `(user, recipe)` pairs. The aggregator reads recipes and their
//! ingredient lines through this port; cart commands add and remove entries.

use async_trait::async_trait;

use crate::domain::{IngredientLine, RecipeId, RecipeSummary, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by shopping cart repository adapters.
    pub enum ShoppingCartRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "shopping cart repository connection failed: {message}",
        /// The store did not answer before the query deadline.
        Timeout { message: String } =>
            "shopping cart repository timed out: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "shopping cart repository query failed: {message}",
        /// The referenced recipe does not exist.
        RecipeNotFound { recipe_id: i64 } =>
            "recipe {recipe_id} does not exist",
    }
}

/// Result of inserting a cart entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartInsertOutcome {
    /// A new entry was created.
    Added,
    /// The recipe was already in the user's cart; nothing changed.
    AlreadyPresent,
}

/// Port for shopping cart storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingCartRepository: Send + Sync {
    /// List the recipes currently in the user's cart.
    ///
    /// An empty cart yields an empty vector, not an error.
    async fn list_cart_recipes(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<RecipeSummary>, ShoppingCartRepositoryError>;

    /// List the ingredient lines of one recipe.
    async fn list_ingredient_lines(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Vec<IngredientLine>, ShoppingCartRepositoryError>;

    /// Insert a `(user, recipe)` entry unless it already exists.
    ///
    /// Returns [`ShoppingCartRepositoryError::RecipeNotFound`] when the
    /// recipe is unknown.
    async fn add_entry(
        &self,
        user_id: &UserId,
        recipe_id: RecipeId,
    ) -> Result<CartInsertOutcome, ShoppingCartRepositoryError>;

    /// Delete a `(user, recipe)` entry. Returns `false` when none existed.
    async fn remove_entry(
        &self,
        user_id: &UserId,
        recipe_id: RecipeId,
    ) -> Result<bool, ShoppingCartRepositoryError>;
}
