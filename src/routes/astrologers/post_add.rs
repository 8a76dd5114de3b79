use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
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

/// Register a new astrologer.
///
/// Accepts a JSON body, or a multipart body whose `profilePic` part may be
/// an image file to host.
#[utoipa::path(post, path = "/api/astrologers", request_body = AstrologerRequest, responses(
    (status = 200, description = "Astrologer added.", body = AckResponse),
    (status = 400, description = "Missing required fields, or the username is taken.", body = ErrorResponse),
    (status = 500, description = "Internal server error.", body = ErrorResponse)
))]
pub async fn post_add_astrologer(
    State(data): State<Arc<AppState>>,
    req: Request<Body>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiResponse<ErrorResponseBody>>)> {
    let (body, image) = read_astrologer_request(req).await?;

    data.service
        .create(body, image)
        .await
        .map_err(build_service_err_resp)?;

    Ok(build_ack_resp(StatusCode::OK, "Astrologer added"))
}
