//! Foodgram shopping-list aggregation and recipe short links.
//!
//! Hexagonal layout: `domain` holds the services and ports, `inbound`
//! the actix-web adapter and `outbound` the store adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
