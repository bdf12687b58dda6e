//! Driving port for resolving short links.

use async_trait::async_trait;

use crate::domain::{Error, RecipeId};

/// Use-case port behind the `/s/{code}/` redirect.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkQuery: Send + Sync {
    /// Map a raw code to its recipe, or fail with `not_found`.
    async fn resolve(&self, code: &str) -> Result<RecipeId, Error>;
}
