//! Driving port for reading a user's aggregated shopping list.

use async_trait::async_trait;

use crate::domain::{Error, ShoppingList, UserId};

/// Use-case port for the "download shopping list" feature.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingListQuery: Send + Sync {
    /// Merge the ingredient lines of every recipe in the user's cart.
    async fn shopping_list(&self, user_id: &UserId) -> Result<ShoppingList, Error>;
}
