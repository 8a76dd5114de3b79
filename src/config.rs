#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub server_address: String,
    pub server_port: u16,

    pub cloudinary_cloud_name: Option<String>,
    pub cloudinary_upload_preset: String,
    pub cloudinary_api_base: String,
    pub media_timeout_secs: u64,
}

impl Config {
    fn get_env(key: &str, default: Option<&str>) -> String {
        match default {
            Some(val) => std::env::var(key).unwrap_or(val.to_string()),
            None => std::env::var(key).unwrap_or_else(|_| panic!("{} must be set.", key)),
        }
    }

    fn may_get(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|val| !val.is_empty())
    }

    pub fn init() -> Self {
        let app_name = Self::get_env("APP_NAME", Some("Astrologer Directory"));
        let server_address = Self::get_env("SERVER_ADDRESS", Some("127.0.0.1"));
        let server_port = Self::get_env("SERVER_PORT", Some("8000"))
            .parse()
            .unwrap_or(8000);

        let cloudinary_cloud_name = Self::may_get("CLOUDINARY_CLOUD_NAME");
        let cloudinary_upload_preset = Self::get_env("CLOUDINARY_UPLOAD_PRESET", Some(""));
        let cloudinary_api_base = Self::get_env(
            "CLOUDINARY_API_BASE",
            Some("https://api.cloudinary.com/v1_1"),
        );
        let media_timeout_secs = Self::get_env("MEDIA_TIMEOUT_SECS", Some("30"))
            .parse()
            .unwrap_or(30);

        Self {
            app_name,
            server_address,
            server_port,

            cloudinary_cloud_name,
            cloudinary_upload_preset,
            cloudinary_api_base,
            media_timeout_secs,
        }
    }
}
