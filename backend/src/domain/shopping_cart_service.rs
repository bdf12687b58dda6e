//! Shopping cart command service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::shopping_list::map_cart_repository_error;
use crate::domain::ports::{CartInsertOutcome, ShoppingCartCommand, ShoppingCartRepository};
use crate::domain::{Error, RecipeId, UserId};

/// Adds and removes recipes in a user's cart.
#[derive(Clone)]
pub struct ShoppingCartService<R> {
    repository: Arc<R>,
}

impl<R> ShoppingCartService<R> {
    /// Create a service over the given cart repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn cart_conflict(code: &str, message: String, recipe_id: RecipeId) -> Error {
    Error::invalid_request(message).with_details(json!({
        "code": code,
        "recipeId": recipe_id.get(),
    }))
}

#[async_trait]
impl<R> ShoppingCartCommand for ShoppingCartService<R>
where
    R: ShoppingCartRepository,
{
    async fn add_recipe(&self, user_id: &UserId, recipe_id: RecipeId) -> Result<(), Error> {
        let outcome = self
            .repository
            .add_entry(user_id, recipe_id)
            .await
            .map_err(map_cart_repository_error)?;
        match outcome {
            CartInsertOutcome::Added => {
                debug!(%user_id, %recipe_id, "recipe added to cart");
                Ok(())
            }
            CartInsertOutcome::AlreadyPresent => Err(cart_conflict(
                "already_in_cart",
                format!("recipe {recipe_id} is already in the shopping cart"),
                recipe_id,
            )),
        }
    }

    async fn remove_recipe(&self, user_id: &UserId, recipe_id: RecipeId) -> Result<(), Error> {
        let removed = self
            .repository
            .remove_entry(user_id, recipe_id)
            .await
            .map_err(map_cart_repository_error)?;
        if removed {
            debug!(%user_id, %recipe_id, "recipe removed from cart");
            Ok(())
        } else {
            Err(cart_conflict(
                "not_in_cart",
                format!("recipe {recipe_id} is not in the shopping cart"),
                recipe_id,
            ))
        }
    }
}
