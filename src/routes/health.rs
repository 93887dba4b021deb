use axum::Json;

use crate::response::HealthStatus;

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "OK", body = HealthStatus),
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus { success: true })
}
