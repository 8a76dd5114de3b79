use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{utils::build_resp, AppState};

#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponseBody {
    pub app_name: String,
    pub server_time: DateTime<Local>,
    pub version: String,
}

/// Server status check.
#[utoipa::path(get, path = "/api/status", responses(
    (status = 200, description = "Status check successful.", body = StatusResponse)
))]
pub async fn get_status(State(data): State<Arc<AppState>>) -> impl IntoResponse {
    build_resp(
        StatusCode::OK,
        "Server is up.",
        StatusResponseBody {
            app_name: data.env.app_name.clone(),
            server_time: chrono::Local::now(),
            version: String::from(env!("CARGO_PKG_VERSION")),
        },
    )
}
