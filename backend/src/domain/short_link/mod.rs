//! Recipe short links.
//!
//! A short link maps a compact code to a recipe's canonical page. Codes are
//! sampled at random and their uniqueness is enforced by the store, so no
//! process-wide counter or lock is needed across replicas.

mod code;
mod service;

pub use code::{
    RandomShortCodeGenerator, SHORT_CODE_LENGTH, ShortCode, ShortCodeGenerator,
    ShortCodeValidationError,
};
pub use service::{DEFAULT_MAX_ATTEMPTS, ShortLinkService};

use chrono::{DateTime, Utc};

use super::RecipeId;

/// A stored `(code, recipe)` mapping. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    /// Public eight-character code.
    pub code: ShortCode,
    /// Linked recipe.
    pub recipe_id: RecipeId,
    /// Issue time.
    pub created_at: DateTime<Utc>,
}
