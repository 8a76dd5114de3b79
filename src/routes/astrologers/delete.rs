use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    routes::{ApiResponse, ErrorResponseBody},
    utils::build_ack_resp,
    AppState,
};

use super::build_service_err_resp;

/// Delete an astrologer by id.
#[utoipa::path(delete, path = "/api/astrologers/{id}", params(
    ("id" = String, Path, description = "Astrologer id")
), responses(
    (status = 200, description = "Astrologer deleted, or no astrologer with this id.", body = AckResponse),
    (status = 500, description = "Internal server error.", body = ErrorResponse)
))]
pub async fn delete_astrologer(
    State(data): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiResponse<ErrorResponseBody>>)> {
    data.service
        .delete(&id)
        .await
        .map_err(build_service_err_resp)?;

    Ok(build_ack_resp(StatusCode::OK, "Astrologer deleted successfully"))
}
