//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, web};

use crate::domain::ports::{
    MockShoppingCartCommand, MockShoppingListQuery, MockShortLinkCommand, MockShortLinkQuery,
};
use crate::domain::{Error, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// User stored in the session by [`fixture_login`].
pub const FIXTURE_USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Stand-in for the upstream login flow: stores [`FIXTURE_USER_ID`].
pub async fn fixture_login(session: SessionContext) -> Result<HttpResponse, Error> {
    let user_id = UserId::new(FIXTURE_USER_ID).expect("valid fixture user id");
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Route serving [`fixture_login`] at `/login`.
pub fn login_route(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(fixture_login));
}

/// Extract the session cookie set by a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Collected mocks, defaulting to ones that expect no calls.
#[derive(Default)]
pub struct MockPorts {
    /// Aggregation mock.
    pub shopping_list: MockShoppingListQuery,
    /// Cart command mock.
    pub shopping_cart: MockShoppingCartCommand,
    /// Issuance mock.
    pub short_links: MockShortLinkCommand,
    /// Resolution mock.
    pub short_links_query: MockShortLinkQuery,
}

impl MockPorts {
    /// Move the mocks into handler state.
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            shopping_list: Arc::new(self.shopping_list),
            shopping_cart: Arc::new(self.shopping_cart),
            short_links: Arc::new(self.short_links),
            short_links_query: Arc::new(self.short_links_query),
        })
    }
}
