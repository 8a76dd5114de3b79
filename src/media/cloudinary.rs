use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::config::Config;

use super::{MediaError, MediaHost, UploadOptions, UploadSource, UploadedMedia};

/// Unsigned-upload client for a Cloudinary-compatible media API.
pub struct CloudinaryHost {
    cloud_name: Option<String>,
    upload_preset: String,
    api_base: String,
    client: Client,
}

impl CloudinaryHost {
    pub fn new(env: &Config) -> Result<Self, MediaError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(env.media_timeout_secs))
            .build()?;

        Ok(Self {
            cloud_name: env.cloudinary_cloud_name.clone(),
            upload_preset: env.cloudinary_upload_preset.clone(),
            api_base: env.cloudinary_api_base.clone(),
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

#[async_trait]
impl MediaHost for CloudinaryHost {
    async fn upload(
        &self,
        file: &UploadSource,
        opts: &UploadOptions,
    ) -> Result<UploadedMedia, MediaError> {
        let cloud_name = self.cloud_name.as_ref().ok_or(MediaError::Unconfigured)?;
        let url = format!("{}/{}/auto/upload", self.api_base, cloud_name);

        let mut transformations = Vec::new();
        if let Some(height) = opts.height {
            transformations.push(format!("h_{}", height));
        }
        if let Some(quality) = opts.quality {
            transformations.push(format!("q_{}", quality));
        }

        let mut form = Form::new()
            .text("upload_preset", self.upload_preset.clone())
            .text("folder", opts.folder.clone())
            .part(
                "file",
                Part::bytes(file.bytes.clone()).file_name(file.file_name.clone()),
            );
        if !transformations.is_empty() {
            form = form.text("transformation", transformations.join(","));
        }

        tracing::debug!("uploading {} to folder {}", file.file_name, opts.folder);

        let resp = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json::<UploadResponse>()
            .await?;

        match resp.secure_url {
            Some(secure_url) => Ok(UploadedMedia { secure_url }),
            None => Err(MediaError::MissingUrl),
        }
    }
}
