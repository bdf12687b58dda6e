//! Driving port for issuing recipe short links.

use async_trait::async_trait;

use crate::domain::{Error, RecipeId, ShortCode};

/// Use-case port behind `GET /recipes/{id}/get-link`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkCommand: Send + Sync {
    /// Return the recipe's code, minting and storing one on first use.
    async fn get_or_create(&self, recipe_id: RecipeId) -> Result<ShortCode, Error>;
}
