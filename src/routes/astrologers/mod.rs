mod delete;
mod get_all;
mod get_details;
mod get_search;
mod patch_update;
mod post_add;
mod post_upload_image;

pub use delete::delete_astrologer;
pub use get_all::{get_all_astrologers, AstrologersListResponseBody};
pub use get_details::{get_astrologer_details, AstrologerResponseBody};
pub use get_search::{search_astrologers, SearchResponseBody};
pub use patch_update::patch_update_astrologer;
pub use post_add::post_add_astrologer;
pub use post_upload_image::{post_upload_image, ImageUploadResponseBody};

pub use delete::__path_delete_astrologer;
pub use get_all::__path_get_all_astrologers;
pub use get_details::__path_get_astrologer_details;
pub use get_search::__path_search_astrologers;
pub use patch_update::__path_patch_update_astrologer;
pub use post_add::__path_post_add_astrologer;
pub use post_upload_image::__path_post_upload_image;

use axum::body::Body;
use axum::extract::multipart::Field;
use axum::extract::{FromRequest, Multipart};
use axum::http::{header, Request, StatusCode};
use axum::Json;

use crate::media::UploadSource;
use crate::models::AstrologerRequest;
use crate::routes::{ApiResponse, ErrorResponseBody};
use crate::service::ServiceError;
use crate::utils::build_fail_resp;

pub(super) type FailResp = (StatusCode, Json<ApiResponse<ErrorResponseBody>>);

/// Maps service failures onto the response contract: validation failures and
/// username conflicts are 400, a missing record is a logical failure under
/// HTTP 200, store and upload failures are 500 with internals logged but
/// kept out of the body.
pub(super) fn build_service_err_resp(err: ServiceError) -> FailResp {
    match err {
        ServiceError::Validation(message) => build_fail_resp(StatusCode::BAD_REQUEST, message),
        ServiceError::Conflict => {
            build_fail_resp(StatusCode::BAD_REQUEST, "Astrologer already exists")
        }
        ServiceError::NotFound => build_fail_resp(StatusCode::OK, "Astrologer not found"),
        ServiceError::Upload(err) => {
            tracing::error!("image upload failed: {}", err);
            build_fail_resp(StatusCode::INTERNAL_SERVER_ERROR, "Failed to upload image")
        }
        ServiceError::Store(err) => {
            tracing::error!("store failure: {}", err);
            build_fail_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error has occurred.",
            )
        }
    }
}

/// Reads a create/update body. A JSON body carries the fields directly; a
/// multipart body may additionally carry a `profilePic` file, with
/// `language` and `expertise` as comma-separated lists.
pub(super) async fn read_astrologer_request(
    req: Request<Body>,
) -> Result<(AstrologerRequest, Option<UploadSource>), FailResp> {
    let is_multipart = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("multipart/form-data"))
        .unwrap_or(false);

    if !is_multipart {
        let Json(body) = Json::<AstrologerRequest>::from_request(req, &())
            .await
            .map_err(|e| build_fail_resp(StatusCode::BAD_REQUEST, e.to_string()))?;
        return Ok((body, None));
    }

    let mut multipart = Multipart::from_request(req, &())
        .await
        .map_err(|e| build_fail_resp(StatusCode::BAD_REQUEST, e.to_string()))?;

    let mut body = AstrologerRequest::default();
    let mut image = None;

    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| build_fail_resp(StatusCode::BAD_REQUEST, e.to_string()))?;
        let Some(field) = field else { break };

        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);

        match name.as_str() {
            "username" => body.username = Some(field_text(field).await?),
            "language" => body.language = Some(split_list(&field_text(field).await?)),
            "expertise" => body.expertise = Some(split_list(&field_text(field).await?)),
            "experience" => body.experience = field_text(field).await?.trim().parse().ok(),
            "price" => body.price = field_text(field).await?.trim().parse().ok(),
            "description" => body.description = Some(field_text(field).await?),
            "profilePic" => match file_name {
                Some(file_name) => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| build_fail_resp(StatusCode::BAD_REQUEST, e.to_string()))?;
                    image = Some(UploadSource { file_name, bytes: bytes.to_vec() });
                }
                None => body.profile_pic = Some(field_text(field).await?),
            },
            _ => {}
        }
    }

    Ok((body, image))
}

async fn field_text(field: Field<'_>) -> Result<String, FailResp> {
    field
        .text()
        .await
        .map_err(|e| build_fail_resp(StatusCode::BAD_REQUEST, e.to_string()))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}
