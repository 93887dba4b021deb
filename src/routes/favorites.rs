use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{delete, get, post},
};

use crate::{
    dto::favorites::CreateFavoriteRequest,
    error::{AppError, AppResult},
    models::Favorite,
    response::{ErrorResponse, MessageResponse},
    services::favorite_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(add_favorite))
        .route("/{user_id}", get(list_favorites))
        .route("/{user_id}/{recipe_id}", delete(remove_favorite))
}

#[utoipa::path(
    post,
    path = "/api/favorites",
    request_body = CreateFavoriteRequest,
    responses(
        (status = 201, description = "Favorite created", body = Favorite),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    ),
    tag = "Favorites"
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    payload: Result<Json<CreateFavoriteRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Favorite>)> {
    let Json(payload) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let favorite = favorite_service::add_favorite(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

#[utoipa::path(
    get,
    path = "/api/favorites/{user_id}",
    params(
        ("user_id" = String, Path, description = "Owner of the favorites")
    ),
    responses(
        (status = 200, description = "Favorites of the user", body = Vec<Favorite>),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    ),
    tag = "Favorites"
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Favorite>>> {
    let items = favorite_service::list_favorites(&state, &user_id).await?;
    Ok(Json(items))
}

#[utoipa::path(
    delete,
    path = "/api/favorites/{user_id}/{recipe_id}",
    params(
        ("user_id" = String, Path, description = "Owner of the favorite"),
        ("recipe_id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Removed (also when nothing matched)", body = MessageResponse),
        (status = 400, description = "recipe_id is not an integer", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    ),
    tag = "Favorites"
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    Path((user_id, recipe_id)): Path<(String, String)>,
) -> AppResult<Json<MessageResponse>> {
    let body = favorite_service::remove_favorite(&state, &user_id, &recipe_id).await?;
    Ok(Json(body))
}
