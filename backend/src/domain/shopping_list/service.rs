//! Shopping-list query service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::{ShoppingList, aggregate_lines};
use crate::domain::ports::{ShoppingCartRepository, ShoppingCartRepositoryError, ShoppingListQuery};
use crate::domain::{Error, UserId};

/// Reads a user's cart and merges its ingredient lines.
#[derive(Clone)]
pub struct ShoppingListService<R> {
    repository: Arc<R>,
}

impl<R> ShoppingListService<R> {
    /// Create a service over the given cart repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

pub(crate) fn map_cart_repository_error(error: ShoppingCartRepositoryError) -> Error {
    match error {
        ShoppingCartRepositoryError::Connection { message } => {
            Error::store_unavailable(format!("shopping cart store unavailable: {message}"))
        }
        ShoppingCartRepositoryError::Timeout { message } => {
            Error::store_timeout(format!("shopping cart store timed out: {message}"))
        }
        ShoppingCartRepositoryError::Query { message } => {
            Error::internal(format!("shopping cart store error: {message}"))
        }
        ShoppingCartRepositoryError::RecipeNotFound { recipe_id } => {
            Error::not_found(format!("recipe {recipe_id} not found"))
        }
    }
}

#[async_trait]
impl<R> ShoppingListQuery for ShoppingListService<R>
where
    R: ShoppingCartRepository,
{
    async fn shopping_list(&self, user_id: &UserId) -> Result<ShoppingList, Error> {
        let recipes = self
            .repository
            .list_cart_recipes(user_id)
            .await
            .map_err(map_cart_repository_error)?;

        let mut lines = Vec::new();
        for recipe in &recipes {
            let recipe_lines = self
                .repository
                .list_ingredient_lines(recipe.id)
                .await
                .map_err(map_cart_repository_error)?;
            lines.extend(recipe_lines);
        }

        let list = aggregate_lines(lines)?;
        debug!(
            %user_id,
            recipes = recipes.len(),
            items = list.items().len(),
            "aggregated shopping list"
        );
        Ok(list)
    }
}
