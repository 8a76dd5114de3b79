pub mod astrologers;
mod status;

pub use astrologers::{
    delete_astrologer, get_all_astrologers, get_astrologer_details, patch_update_astrologer,
    post_add_astrologer, post_upload_image, search_astrologers, AstrologerResponseBody,
    AstrologersListResponseBody, ImageUploadResponseBody, SearchResponseBody,
};
pub use status::{get_status, StatusResponseBody};

use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::models::{Astrologer, AstrologerRequest};

/// Marker for responses whose payload is the envelope alone.
#[derive(Clone, Deserialize, Serialize, ToSchema, Debug)]
pub struct ErrorResponseBody {}

/// Response envelope shared by every route.
#[derive(Clone, Deserialize, Serialize, ToSchema, Debug)]
#[aliases(
    AckResponse = ApiResponse<ErrorResponseBody>,
    AstrologerResponse = ApiResponse<AstrologerResponseBody>,
    AstrologersListResponse = ApiResponse<AstrologersListResponseBody>,
    ErrorResponse = ApiResponse<ErrorResponseBody>,
    ImageUploadResponse = ApiResponse<ImageUploadResponseBody>,
    SearchResponse = ApiResponse<SearchResponseBody>,
    StatusResponse = ApiResponse<StatusResponseBody>,
)]
pub struct ApiResponse<T> {
    /// Whether the operation logically succeeded.
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(flatten)]
    pub body: Option<T>,
}

#[derive(OpenApi)]
#[openapi(
    info(
        description = "Astrologer directory backend documentation.",
        license(name = "MIT or Apache-2.0"),
    ),
    tags(
        (
            name = "astrologers",
            description = "Registration, listing, search, update, deletion, image upload."
        ),
        (
            name = "utils",
            description = "Server status."
        )
    ),
    paths(
        astrologers::get_all_astrologers,
        astrologers::get_astrologer_details,
        astrologers::search_astrologers,
        astrologers::post_add_astrologer,
        astrologers::patch_update_astrologer,
        astrologers::delete_astrologer,
        astrologers::post_upload_image,
        status::get_status,
    ),
    components(schemas(
        AckResponse,
        Astrologer,
        AstrologerRequest,
        AstrologerResponse,
        AstrologerResponseBody,
        AstrologersListResponse,
        AstrologersListResponseBody,
        ErrorResponse,
        ErrorResponseBody,
        ImageUploadResponse,
        ImageUploadResponseBody,
        SearchResponse,
        SearchResponseBody,
        StatusResponse,
        StatusResponseBody,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_flattens_the_payload() {
        let resp = ApiResponse {
            success: true,
            message: None,
            body: Some(AstrologersListResponseBody { astrologers: vec![], count: 0 }),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": true, "astrologers": [], "count": 0 })
        );
    }

    #[test]
    fn envelope_without_payload_is_success_and_message_alone() {
        let resp: ApiResponse<ErrorResponseBody> = ApiResponse {
            success: false,
            message: Some("Astrologer not found".into()),
            body: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": false, "message": "Astrologer not found" })
        );
    }
}
