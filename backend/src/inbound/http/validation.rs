//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{Error, RecipeId};

/// Parse the `{id}` path segment of recipe routes.
///
/// A malformed or non-positive id is a client error with
/// `details.code = "invalid_recipe_id"`. Whether the recipe exists is left
/// to the store.
pub(crate) fn parse_recipe_id(raw: &str) -> Result<RecipeId, Error> {
    raw.parse::<RecipeId>().map_err(|error| {
        Error::invalid_request(error.to_string()).with_details(json!({
            "field": "id",
            "value": raw,
            "code": "invalid_recipe_id",
        }))
    })
}
