//! Driven port for short-link persistence.
//!
//! Adapters must enforce two uniqueness constraints: `code` is unique across
//! all links and `recipe_id` has at most one link. Conflicts are reported as
//! [`ShortLinkInsertOutcome`] values rather than errors so the service can
//! decide between regenerating a code and re-reading the winner's link.

use async_trait::async_trait;

use crate::domain::{RecipeId, ShortCode, ShortLink};

use super::define_port_error;

define_port_error! {
    /// Errors raised by short-link repository adapters.
    pub enum ShortLinkRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "short link repository connection failed: {message}",
        /// The store did not answer before the query deadline.
        Timeout { message: String } =>
            "short link repository timed out: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "short link repository query failed: {message}",
        /// The recipe being linked does not exist.
        RecipeNotFound { recipe_id: i64 } =>
            "recipe {recipe_id} does not exist",
    }
}

/// Result of a conditional short-link insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortLinkInsertOutcome {
    /// The link was stored.
    Inserted(ShortLink),
    /// Another link already uses this code; pick a new one.
    CodeTaken,
    /// The recipe already has a link, typically minted by a concurrent
    /// request; read it back.
    RecipeAlreadyLinked,
}

/// Port for short-link storage and lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Fetch the link issued for a recipe, if any.
    async fn find_by_recipe(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Option<ShortLink>, ShortLinkRepositoryError>;

    /// Store `(recipe_id, code)` unless either side is already taken.
    async fn insert_if_absent(
        &self,
        recipe_id: RecipeId,
        code: &ShortCode,
    ) -> Result<ShortLinkInsertOutcome, ShortLinkRepositoryError>;

    /// Resolve a code to the recipe it points at.
    async fn find_recipe_by_code(
        &self,
        code: &ShortCode,
    ) -> Result<Option<RecipeId>, ShortLinkRepositoryError>;
}
