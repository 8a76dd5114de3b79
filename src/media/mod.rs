mod cloudinary;

pub use cloudinary::CloudinaryHost;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media host is not configured")]
    Unconfigured,
    #[error("upload request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("media host returned no usable url")]
    MissingUrl,
}

/// An image file received from a client, held in memory for the duration of
/// the request.
#[derive(Debug, Clone)]
pub struct UploadSource {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    pub folder: String,
    pub height: Option<u32>,
    pub quality: Option<u8>,
}

/// Result of a successful upload.
#[derive(Debug, Clone)]
pub struct UploadedMedia {
    pub secure_url: String,
}

/// Third-party host that stores uploaded images and hands back durable URLs.
#[async_trait]
pub trait MediaHost: Send + Sync {
    async fn upload(
        &self,
        file: &UploadSource,
        opts: &UploadOptions,
    ) -> Result<UploadedMedia, MediaError>;
}
