//! Client for the picsum-compatible image host.
//!
//! Two endpoints are used: `{base}/{size}?random={token}` serves image bytes
//! (only ever handed to the image loader) and `{base}/id/{id}/info` serves the
//! JSON metadata decoded into [`ImageMetadata`].

use shared::ImageMetadata;

use crate::error::FetchError;

pub fn image_url(base: &str, size: u32, token: i64) -> String {
    format!("{base}/{size}?random={token}")
}

pub fn metadata_url(base: &str, id: &str) -> String {
    format!("{base}/id/{id}/info")
}

#[derive(Debug, Clone)]
pub struct PicsumClient {
    http: reqwest::Client,
    base: String,
}

impl PicsumClient {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Fetches metadata for `id`. One request, no timeout, no retry.
    pub async fn image_info(&self, id: &str) -> Result<ImageMetadata, FetchError> {
        let url = metadata_url(&self.base, id);
        tracing::debug!(%url, "fetching image metadata");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_grid_image_url() {
        assert_eq!(
            image_url("https://picsum.photos", 1000, 1_700_000_000_003),
            "https://picsum.photos/1000?random=1700000000003"
        );
    }

    #[test]
    fn builds_metadata_url() {
        assert_eq!(
            metadata_url("https://picsum.photos", "37"),
            "https://picsum.photos/id/37/info"
        );
    }

    #[test]
    fn client_normalizes_base() {
        let client = PicsumClient::new("http://127.0.0.1:9000/");
        assert_eq!(client.base(), "http://127.0.0.1:9000");
    }
}
