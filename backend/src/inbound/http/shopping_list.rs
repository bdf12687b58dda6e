//! Shopping-list HTTP handlers.
//!
//! ```text
//! GET /api/v1/users/me/shopping-list
//! GET /api/v1/recipes/download_shopping_cart
//! ```

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ShoppingList, ShoppingListItem};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Attachment name used by the plain-text export.
pub const SHOPPING_CART_FILENAME: &str = "shopping_cart.txt";

/// One merged row of the shopping list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShoppingListItemResponse {
    /// Ingredient name as written in the recipes.
    #[schema(example = "Sugar")]
    pub name: String,
    /// Measurement unit.
    #[schema(example = "g")]
    pub unit: String,
    /// Exact total across the cart.
    #[schema(example = 250)]
    pub amount: u64,
}

impl From<ShoppingListItem> for ShoppingListItemResponse {
    fn from(item: ShoppingListItem) -> Self {
        Self {
            name: item.name.into(),
            unit: item.unit.into(),
            amount: item.amount.get(),
        }
    }
}

/// Aggregated shopping list sorted by ingredient name then unit.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShoppingListResponse {
    /// Merged rows.
    pub items: Vec<ShoppingListItemResponse>,
}

impl From<ShoppingList> for ShoppingListResponse {
    fn from(list: ShoppingList) -> Self {
        Self {
            items: list.into_items().into_iter().map(Into::into).collect(),
        }
    }
}

/// Fetch the authenticated user's merged shopping list.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/shopping-list",
    description = "Merge the ingredients of every recipe in the cart by name and unit.",
    responses(
        (status = 200, description = "Shopping list", body = ShoppingListResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shopping"],
    operation_id = "getShoppingList"
)]
#[get("/users/me/shopping-list")]
pub async fn get_shopping_list(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let list = state.shopping_list.shopping_list(&user_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(("Cache-Control", "private, no-cache"))
        .json(ShoppingListResponse::from(list)))
}

/// Download the shopping list as a text file.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/download_shopping_cart",
    description = "One line per item formatted as `{name} - {amount} {unit}`.",
    responses(
        (
            status = 200,
            description = "Plain-text shopping list",
            content_type = "text/plain",
            body = String,
            headers(("Content-Disposition" = String, description = "Attachment filename"))
        ),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["shopping"],
    operation_id = "downloadShoppingCart"
)]
#[get("/recipes/download_shopping_cart")]
pub async fn download_shopping_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let list = state.shopping_list.shopping_list(&user_id).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(SHOPPING_CART_FILENAME.to_owned())],
        })
        .body(list.to_text()))
}
