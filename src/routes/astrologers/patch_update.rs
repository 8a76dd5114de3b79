use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    models::AstrologerRequest,
    routes::{ApiResponse, ErrorResponseBody},
    utils::build_ack_resp,
    AppState,
};

use super::{build_service_err_resp, read_astrologer_request};

/// Partially update an astrologer.
///
/// Only fields that are present and non-empty overwrite the stored record;
/// a multipart `profilePic` file is uploaded and replaces the stored URL.
#[utoipa::path(patch, path = "/api/astrologers/{id}", request_body = AstrologerRequest, params(
    ("id" = String, Path, description = "Astrologer id")
), responses(
    (status = 200, description = "Astrologer updated, or no astrologer with this id.", body = AckResponse),
    (status = 400, description = "No updated field was provided.", body = ErrorResponse),
    (status = 500, description = "Internal server error.", body = ErrorResponse)
))]
pub async fn patch_update_astrologer(
    State(data): State<Arc<AppState>>,
    Path(id): Path<String>,
    req: Request<Body>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiResponse<ErrorResponseBody>>)> {
    let (body, image) = read_astrologer_request(req).await?;

    data.service
        .update(&id, body, image)
        .await
        .map_err(build_service_err_resp)?;

    Ok(build_ack_resp(StatusCode::OK, "Astrologer updated successfully"))
}
