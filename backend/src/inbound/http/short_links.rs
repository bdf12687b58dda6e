//! Recipe short-link HTTP handlers.
//!
//! ```text
//! GET /api/v1/recipes/{id}/get-link
//! GET /s/{code}/
//! ```
//!
//! Both endpoints are public.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

use crate::domain::{Error, ShortCode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_recipe_id;

/// Absolute short URL for a recipe.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShortLinkResponse {
    /// `<base>/s/<code>/`.
    #[serde(rename = "short-link")]
    #[schema(example = "https://foodgram.example/s/aZ3kP9qX/")]
    pub short_link: String,
}

fn request_origin(req: &HttpRequest) -> Result<Url, Error> {
    let info = req.connection_info();
    let raw = format!("{}://{}/", info.scheme(), info.host());
    Url::parse(&raw).map_err(|error| Error::internal(format!("invalid request origin {raw}: {error}")))
}

/// Join `s/{code}/` onto `base`, treating the base path as a directory.
pub(crate) fn short_link_url(base: &Url, code: &ShortCode) -> Result<Url, Error> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let directory = format!("{}/", base.path());
        base.set_path(&directory);
    }
    base.join(&format!("s/{code}/"))
        .map_err(|error| Error::internal(format!("failed to build short link URL: {error}")))
}

/// Issue (or fetch) the short link for a recipe.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}/get-link",
    params(("id" = i64, Path, description = "Recipe identifier")),
    security([]),
    responses(
        (status = 200, description = "Short link", body = ShortLinkResponse),
        (status = 400, description = "Malformed recipe id", body = ErrorSchema),
        (status = 404, description = "Unknown recipe", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Code space exhausted", body = ErrorSchema)
    ),
    tags = ["short-links"],
    operation_id = "getRecipeShortLink"
)]
#[get("/recipes/{id}/get-link")]
pub async fn get_link(
    state: web::Data<HttpState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let recipe_id = parse_recipe_id(&path)?;
    let code = state.short_links.get_or_create(recipe_id).await?;
    let base = match &state.public_base_url {
        Some(base) => base.clone(),
        None => request_origin(&req)?,
    };
    let url = short_link_url(&base, &code)?;
    Ok(HttpResponse::Ok().json(ShortLinkResponse {
        short_link: url.into(),
    }))
}

/// Redirect a short code to its recipe page.
#[utoipa::path(
    get,
    path = "/s/{code}/",
    params(("code" = String, Path, description = "Eight-character short code")),
    security([]),
    responses(
        (
            status = 302,
            description = "Redirect to the recipe page",
            headers(("Location" = String, description = "`/recipes/{id}`"))
        ),
        (status = 404, description = "Unknown code", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["short-links"],
    operation_id = "followShortLink"
)]
#[get("/s/{code}/")]
pub async fn follow_short_link(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let recipe_id = state.short_links_query.resolve(&path).await?;
    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, format!("/recipes/{recipe_id}")))
        .finish())
}
