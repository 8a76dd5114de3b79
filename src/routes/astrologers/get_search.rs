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
    utils::{build_fail_resp, build_resp},
    AppState,
};

use super::build_service_err_resp;

#[derive(Serialize, ToSchema)]
pub struct SearchResponseBody {
    /// Astrologers whose username contains the search text.
    pub astrologers: Vec<Astrologer>,
}

/// Search astrologers by username, case-insensitively.
#[utoipa::path(get, path = "/api/astrologers/search/{search}", params(
    ("search" = String, Path, description = "Username substring to search for")
), responses(
    (status = 200, description = "Search successful, or nothing matched.", body = SearchResponse),
    (status = 500, description = "Internal server error.", body = ErrorResponse)
))]
pub async fn search_astrologers(
    State(data): State<Arc<AppState>>,
    Path(search): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiResponse<ErrorResponseBody>>)> {
    let astrologers = data
        .service
        .search(&search)
        .await
        .map_err(build_service_err_resp)?;

    if astrologers.is_empty() {
        return Err(build_fail_resp(StatusCode::OK, "No astrologers found"));
    }

    Ok(build_resp(
        StatusCode::OK,
        "Astrologers fetched successfully",
        SearchResponseBody { astrologers },
    ))
}
