use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    models::Astrologer,
    routes::{ApiResponse, ErrorResponseBody},
    service::ListAstrologersQuery,
    utils::{build_fail_resp, build_resp},
    AppState,
};

use super::build_service_err_resp;

#[derive(Serialize, ToSchema)]
pub struct AstrologersListResponseBody {
    /// The requested page, without descriptions.
    pub astrologers: Vec<Astrologer>,
    /// Total number of matches, ignoring pagination.
    pub count: u64,
}

/// List astrologers with pagination, sorting and language/expertise filters.
#[utoipa::path(get, path = "/api/astrologers", responses(
    (status = 200, description = "Fetch astrologers successful.", body = AstrologersListResponse),
    (status = 500, description = "Internal server error.", body = ErrorResponse)
))]
pub async fn get_all_astrologers(
    State(data): State<Arc<AppState>>,
    Query(params): Query<ListAstrologersQuery>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiResponse<ErrorResponseBody>>)> {
    let (astrologers, count) = data
        .service
        .list(&params)
        .await
        .map_err(build_service_err_resp)?;

    if astrologers.is_empty() {
        return Err(build_fail_resp(StatusCode::OK, "No astrologers found"));
    }

    Ok(build_resp(
        StatusCode::OK,
        "Astrologers fetched successfully",
        AstrologersListResponseBody { astrologers, count },
    ))
}
