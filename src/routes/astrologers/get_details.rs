use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    models::Astrologer,
    routes::{ApiResponse, ErrorResponseBody},
    utils::build_resp,
    AppState,
};

use super::build_service_err_resp;

#[derive(Serialize, ToSchema)]
pub struct AstrologerResponseBody {
    /// The requested astrologer.
    pub astrologer: Astrologer,
}

/// Fetch one astrologer by id.
#[utoipa::path(get, path = "/api/astrologers/{id}", params(
    ("id" = String, Path, description = "Astrologer id")
), responses(
    (status = 200, description = "Fetch astrologer successful, or no astrologer with this id.", body = AstrologerResponse),
    (status = 500, description = "Internal server error.", body = ErrorResponse)
))]
pub async fn get_astrologer_details(
    State(data): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiResponse<ErrorResponseBody>>)> {
    let astrologer = data
        .service
        .details(&id)
        .await
        .map_err(build_service_err_resp)?;

    Ok(build_resp(
        StatusCode::OK,
        "Astrologer fetched successfully",
        AstrologerResponseBody { astrologer },
    ))
}
