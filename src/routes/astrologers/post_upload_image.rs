use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    media::UploadSource,
    routes::{ApiResponse, ErrorResponseBody},
    utils::{build_fail_resp, build_resp},
    AppState,
};

use super::build_service_err_resp;

#[derive(Serialize, ToSchema)]
pub struct ImageUploadResponseBody {
    /// Durable URL of the hosted image.
    pub url: String,
}

/// Upload a profile image on its own; the returned URL can be passed as
/// `profilePic` when creating or updating an astrologer.
#[utoipa::path(post, path = "/api/astrologers/upload-image", responses(
    (status = 200, description = "Image uploaded.", body = ImageUploadResponse),
    (status = 400, description = "No image file was provided.", body = ErrorResponse),
    (status = 500, description = "Internal server error.", body = ErrorResponse)
))]
pub async fn post_upload_image(
    State(data): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiResponse<ErrorResponseBody>>)> {
    let mut image = None;

    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| build_fail_resp(StatusCode::BAD_REQUEST, e.to_string()))?;
        let Some(field) = field else { break };

        let is_profile_pic = field.name() == Some("profilePic");
        let file_name = field.file_name().map(str::to_string);

        if let (true, Some(file_name)) = (is_profile_pic, file_name) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| build_fail_resp(StatusCode::BAD_REQUEST, e.to_string()))?;
            image = Some(UploadSource { file_name, bytes: bytes.to_vec() });
            break;
        }
    }

    let Some(image) = image else {
        return Err(build_fail_resp(StatusCode::BAD_REQUEST, "An image file is required"));
    };

    let url = data
        .service
        .upload_image(image)
        .await
        .map_err(build_service_err_resp)?;

    Ok(build_resp(
        StatusCode::OK,
        "Image uploaded successfully",
        ImageUploadResponseBody { url },
    ))
}
