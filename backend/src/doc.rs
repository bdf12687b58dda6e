//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the shopping-list, cart, short-link and health
//! endpoints together with the schema wrappers for domain types
//! ([`ErrorSchema`], [`ErrorCodeSchema`]) and the session cookie scheme.
//!
//! The document backs Swagger UI in debug builds and is exported by
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::shopping_cart::CartEntryResponse;
use crate::inbound::http::shopping_list::{ShoppingListItemResponse, ShoppingListResponse};
use crate::inbound::http::short_links::ShortLinkResponse;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Private session cookie carrying the authenticated user id.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Foodgram shopping API",
        description = "Shopping-list aggregation, cart editing and recipe short links.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::shopping_list::get_shopping_list,
        crate::inbound::http::shopping_list::download_shopping_cart,
        crate::inbound::http::shopping_cart::add_to_cart,
        crate::inbound::http::shopping_cart::remove_from_cart,
        crate::inbound::http::short_links::get_link,
        crate::inbound::http::short_links::follow_short_link,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ShoppingListResponse,
        ShoppingListItemResponse,
        CartEntryResponse,
        ShortLinkResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "shopping", description = "Cart contents and the merged shopping list"),
        (name = "short-links", description = "Issuing and following recipe short links"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
/// OpenAPI document covering every HTTP endpoint.
pub struct ApiDoc;
