//! Domain primitives, services and ports.
//!
//! Purpose: hold the shopping-list aggregator and the recipe short linker
//! behind transport-agnostic ports. Adapters in `inbound` and `outbound`
//! depend on this module; it depends on neither.
//!
//! Public surface:
//! - Error / ErrorCode / FailureKind: the error envelope adapters map.
//! - UserId, RecipeId, IngredientLine: validated identifiers and lines.
//! - ShoppingListService, ShoppingCartService, ShortLinkService: the
//!   driving-port implementations.

pub mod error;
pub mod ports;
pub mod recipe;
pub mod shopping_cart_service;
pub mod shopping_list;
pub mod short_link;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode, FailureKind};
pub use self::recipe::{
    Amount, IngredientLine, IngredientName, MeasurementUnit, RecipeId, RecipeSummary,
    RecipeValidationError,
};
pub use self::shopping_cart_service::ShoppingCartService;
pub use self::shopping_list::{
    ShoppingList, ShoppingListItem, ShoppingListService, aggregate_lines,
};
pub use self::short_link::{
    DEFAULT_MAX_ATTEMPTS, RandomShortCodeGenerator, SHORT_CODE_LENGTH, ShortCode,
    ShortCodeGenerator, ShortCodeValidationError, ShortLink, ShortLinkService,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use foodgram::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::unauthorized("login required"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
