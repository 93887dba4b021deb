use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::favorites::CreateFavoriteRequest,
    models::Favorite,
    response::{ErrorResponse, HealthStatus, MessageResponse},
    routes::{favorites, health},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        favorites::add_favorite,
        favorites::list_favorites,
        favorites::remove_favorite
    ),
    components(
        schemas(
            Favorite,
            CreateFavoriteRequest,
            HealthStatus,
            MessageResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Favorites", description = "Recipe favorites endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
