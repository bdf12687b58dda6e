//! Builders wiring repositories into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use foodgram::domain::ports::{ShoppingCartRepository, ShortLinkRepository};
use foodgram::domain::{ShoppingCartService, ShoppingListService, ShortLinkService};
use foodgram::inbound::http::state::{HttpState, HttpStatePorts};
use foodgram::outbound::memory::InMemoryStore;
use foodgram::outbound::persistence::{DieselShoppingCartRepository, DieselShortLinkRepository};

use super::ServerConfig;

/// Wrap repositories in the domain services behind each driving port.
fn ports_from_repositories<C, L>(carts: Arc<C>, links: Arc<L>, max_attempts: u32) -> HttpStatePorts
where
    C: ShoppingCartRepository + 'static,
    L: ShortLinkRepository + 'static,
{
    let short_links = Arc::new(ShortLinkService::new(links).with_max_attempts(max_attempts));
    HttpStatePorts {
        shopping_list: Arc::new(ShoppingListService::new(carts.clone())),
        shopping_cart: Arc::new(ShoppingCartService::new(carts)),
        short_links: short_links.clone(),
        short_links_query: short_links,
    }
}

/// Build HTTP state from PostgreSQL repositories when a pool is configured,
/// otherwise from an in-memory store seeded with fixture recipes.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let attempts = config.short_link_max_attempts;
    let ports = match &config.db_pool {
        Some(pool) => ports_from_repositories(
            Arc::new(DieselShoppingCartRepository::new(pool.clone())),
            Arc::new(DieselShortLinkRepository::new(pool.clone())),
            attempts,
        ),
        None => {
            let store = InMemoryStore::with_fixture_recipes().unwrap_or_else(|error| {
                warn!(%error, "fixture recipes rejected; starting empty");
                InMemoryStore::new()
            });
            info!(
                recipes = store.recipe_count(),
                "no database configured; using the in-memory store"
            );
            let store = Arc::new(store);
            ports_from_repositories(store.clone(), store, attempts)
        }
    };
    web::Data::new(HttpState::new(ports).with_public_base_url(config.public_base_url.clone()))
}
