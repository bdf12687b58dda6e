//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable without I/O.

use std::sync::Arc;

use url::Url;

use crate::domain::ports::{
    ShoppingCartCommand, ShoppingListQuery, ShortLinkCommand, ShortLinkQuery,
};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Shopping-list aggregation.
    pub shopping_list: Arc<dyn ShoppingListQuery>,
    /// Cart add and remove.
    pub shopping_cart: Arc<dyn ShoppingCartCommand>,
    /// Short-link issuance.
    pub short_links: Arc<dyn ShortLinkCommand>,
    /// Short-code resolution.
    pub short_links_query: Arc<dyn ShortLinkQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Shopping-list aggregation.
    pub shopping_list: Arc<dyn ShoppingListQuery>,
    /// Cart add and remove.
    pub shopping_cart: Arc<dyn ShoppingCartCommand>,
    /// Short-link issuance.
    pub short_links: Arc<dyn ShortLinkCommand>,
    /// Short-code resolution.
    pub short_links_query: Arc<dyn ShortLinkQuery>,
    /// Origin used for absolute short-link URLs. When unset the request's
    /// own scheme and host are used.
    pub public_base_url: Option<Url>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            shopping_list,
            shopping_cart,
            short_links,
            short_links_query,
        } = ports;
        Self {
            shopping_list,
            shopping_cart,
            short_links,
            short_links_query,
            public_base_url: None,
        }
    }

    /// Pin absolute short-link URLs to a configured origin.
    #[must_use]
    pub fn with_public_base_url(mut self, base: Option<Url>) -> Self {
        self.public_base_url = base;
        self
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
