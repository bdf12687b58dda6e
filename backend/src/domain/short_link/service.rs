//! Short-link domain service implementing the driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error, warn};

use super::{RandomShortCodeGenerator, ShortCode, ShortCodeGenerator};
use crate::domain::ports::{
    ShortLinkCommand, ShortLinkInsertOutcome, ShortLinkQuery, ShortLinkRepository,
    ShortLinkRepositoryError,
};
use crate::domain::{Error, FailureKind, RecipeId};

/// Candidate codes tried before giving up with `code_space_exhausted`.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Issues and resolves recipe short links.
#[derive(Clone)]
pub struct ShortLinkService<R, G = RandomShortCodeGenerator> {
    repository: Arc<R>,
    generator: G,
    max_attempts: u32,
}

impl<R> ShortLinkService<R> {
    /// Create a service drawing codes from the system CSPRNG.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_generator(repository, RandomShortCodeGenerator)
    }
}

impl<R, G> ShortLinkService<R, G> {
    /// Create a service with a custom code source.
    pub fn with_generator(repository: Arc<R>, generator: G) -> Self {
        Self {
            repository,
            generator,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Override the collision retry bound. Values below one are raised to one.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }
}

impl<R, G> ShortLinkService<R, G>
where
    R: ShortLinkRepository,
    G: ShortCodeGenerator,
{
    fn map_repository_error(error: ShortLinkRepositoryError) -> Error {
        match error {
            ShortLinkRepositoryError::Connection { message } => {
                Error::store_unavailable(format!("short link store unavailable: {message}"))
            }
            ShortLinkRepositoryError::Timeout { message } => {
                Error::store_timeout(format!("short link store timed out: {message}"))
            }
            ShortLinkRepositoryError::Query { message } => {
                Error::internal(format!("short link store error: {message}"))
            }
            ShortLinkRepositoryError::RecipeNotFound { recipe_id } => {
                Self::recipe_not_found(recipe_id)
            }
        }
    }

    fn recipe_not_found(recipe_id: i64) -> Error {
        Error::not_found(format!("recipe {recipe_id} not found"))
    }

    fn unknown_code() -> Error {
        Error::not_found("short link not found")
    }

    fn code_space_exhausted(&self) -> Error {
        Error::internal("could not allocate a unique short code").with_details(json!({
            "code": FailureKind::CodeSpaceExhausted.as_str(),
            "attempts": self.max_attempts,
        }))
    }

    async fn existing_code(&self, recipe_id: RecipeId) -> Result<Option<ShortCode>, Error> {
        let link = self
            .repository
            .find_by_recipe(recipe_id)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(link.map(|link| link.code))
    }

    /// Another request linked the recipe between our read and our insert.
    async fn read_concurrent_winner(&self, recipe_id: RecipeId) -> Result<ShortCode, Error> {
        debug!(%recipe_id, "recipe linked concurrently; reading existing code");
        // Links are only removed by cascade, so a vanished row means the
        // recipe itself was deleted.
        self.existing_code(recipe_id)
            .await?
            .ok_or_else(|| Self::recipe_not_found(recipe_id.get()))
    }
}

#[async_trait]
impl<R, G> ShortLinkCommand for ShortLinkService<R, G>
where
    R: ShortLinkRepository,
    G: ShortCodeGenerator,
{
    async fn get_or_create(&self, recipe_id: RecipeId) -> Result<ShortCode, Error> {
        if let Some(code) = self.existing_code(recipe_id).await? {
            return Ok(code);
        }

        for attempt in 1..=self.max_attempts {
            let candidate = self.generator.generate();
            let outcome = self
                .repository
                .insert_if_absent(recipe_id, &candidate)
                .await
                .map_err(Self::map_repository_error)?;

            match outcome {
                ShortLinkInsertOutcome::Inserted(link) => {
                    debug!(%recipe_id, attempt, "issued short link");
                    return Ok(link.code);
                }
                ShortLinkInsertOutcome::RecipeAlreadyLinked => {
                    return self.read_concurrent_winner(recipe_id).await;
                }
                ShortLinkInsertOutcome::CodeTaken => {
                    warn!(%recipe_id, attempt, "short code collision; regenerating");
                }
            }
        }

        error!(
            %recipe_id,
            attempts = self.max_attempts,
            "short code space exhausted"
        );
        Err(self.code_space_exhausted())
    }
}

#[async_trait]
impl<R, G> ShortLinkQuery for ShortLinkService<R, G>
where
    R: ShortLinkRepository,
    G: ShortCodeGenerator,
{
    async fn resolve(&self, code: &str) -> Result<RecipeId, Error> {
        let Ok(code) = ShortCode::parse(code) else {
            return Err(Self::unknown_code());
        };
        self.repository
            .find_recipe_by_code(&code)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(Self::unknown_code)
    }
}
