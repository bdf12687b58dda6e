//! Shopping cart HTTP handlers.
//!
//! ```text
//! POST   /api/v1/recipes/{id}/shopping_cart
//! DELETE /api/v1/recipes/{id}/shopping_cart
//! ```

use actix_web::{HttpResponse, delete, post, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_recipe_id;

/// Body returned when a recipe lands in the cart.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartEntryResponse {
    /// Recipe now in the cart.
    #[schema(example = 42)]
    pub recipe_id: i64,
}

/// Add a recipe to the authenticated user's cart.
#[utoipa::path(
    post,
    path = "/api/v1/recipes/{id}/shopping_cart",
    params(("id" = i64, Path, description = "Recipe identifier")),
    responses(
        (status = 201, description = "Recipe added", body = CartEntryResponse),
        (status = 400, description = "Already in cart or malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown recipe", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["shopping"],
    operation_id = "addToShoppingCart"
)]
#[post("/recipes/{id}/shopping_cart")]
pub async fn add_to_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let recipe_id = parse_recipe_id(&path)?;
    state.shopping_cart.add_recipe(&user_id, recipe_id).await?;
    Ok(HttpResponse::Created().json(CartEntryResponse {
        recipe_id: recipe_id.get(),
    }))
}

/// Remove a recipe from the authenticated user's cart.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}/shopping_cart",
    params(("id" = i64, Path, description = "Recipe identifier")),
    responses(
        (status = 204, description = "Recipe removed"),
        (status = 400, description = "Not in cart or malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["shopping"],
    operation_id = "removeFromShoppingCart"
)]
#[delete("/recipes/{id}/shopping_cart")]
pub async fn remove_from_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let recipe_id = parse_recipe_id(&path)?;
    state
        .shopping_cart
        .remove_recipe(&user_id, recipe_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Error, RecipeId};
    use crate::inbound::http::test_utils::{
        MockPorts, login_route, session_cookie, test_session_middleware,
    };
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    macro_rules! app_with {
        ($ports:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($ports.into_state()))
                    .wrap(test_session_middleware())
                    .configure(login_route)
                    .service(
                        web::scope("/api/v1")
                            .service(add_to_cart)
                            .service(remove_from_cart),
                    ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn add_returns_created() {
        let mut ports = MockPorts::default();
        ports
            .shopping_cart
            .expect_add_recipe()
            .withf(|_, recipe_id| recipe_id.get() == 5)
            .times(1)
            .return_once(|_, _| Ok(()));
        let app = app_with!(ports);
        let login =
            test::call_service(&app, test::TestRequest::post().uri("/login").to_request()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/recipes/5/shopping_cart")
                .cookie(session_cookie(&login))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({ "recipeId": 5 }));
    }

    #[actix_web::test]
    async fn duplicate_add_is_a_bad_request() {
        let mut ports = MockPorts::default();
        ports.shopping_cart.expect_add_recipe().return_once(|_, _| {
            Err(Error::invalid_request("already there")
                .with_details(json!({ "code": "already_in_cart" })))
        });
        let app = app_with!(ports);
        let login =
            test::call_service(&app, test::TestRequest::post().uri("/login").to_request()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/recipes/5/shopping_cart")
                .cookie(session_cookie(&login))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn remove_returns_no_content() {
        let mut ports = MockPorts::default();
        ports
            .shopping_cart
            .expect_remove_recipe()
            .withf(|_, recipe_id| *recipe_id == RecipeId::new(8).expect("valid recipe id"))
            .return_once(|_, _| Ok(()));
        let app = app_with!(ports);
        let login =
            test::call_service(&app, test::TestRequest::post().uri("/login").to_request()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri("/api/v1/recipes/8/shopping_cart")
                .cookie(session_cookie(&login))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn malformed_id_never_reaches_the_port() {
        let app = app_with!(MockPorts::default());
        let login =
            test::call_service(&app, test::TestRequest::post().uri("/login").to_request()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/recipes/zero/shopping_cart")
                .cookie(session_cookie(&login))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], "invalid_recipe_id");
    }

    #[actix_web::test]
    async fn cart_edits_require_a_session() {
        let app = app_with!(MockPorts::default());
        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri("/api/v1/recipes/8/shopping_cart")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
