use axum::{http::StatusCode, Json};
use serde::Serialize;

use crate::routes::{ApiResponse, ErrorResponseBody};

pub fn build_resp<T: Serialize>(
    status: StatusCode,
    message: impl Into<String>,
    body: T,
) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        status,
        Json(ApiResponse {
            success: true,
            message: Some(message.into()),
            body: Some(body),
        }),
    )
}

pub fn build_ack_resp(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<ApiResponse<ErrorResponseBody>>) {
    (
        status,
        Json(ApiResponse {
            success: true,
            message: Some(message.into()),
            body: None,
        }),
    )
}

pub fn build_fail_resp(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<ApiResponse<ErrorResponseBody>>) {
    (
        status,
        Json(ApiResponse {
            success: false,
            message: Some(message.into()),
            body: None,
        }),
    )
}
