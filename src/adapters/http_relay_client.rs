use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::core::interfaces::adapters::RelayClient;
use crate::core::models::{ImageBlob, RelayErrorBody, RelayResult};
use crate::global_constants::{LOG_TAG_CLIENT, RELAY_FIND_PATH, RELAY_IMAGE_FIELD_NAME};

pub struct HttpRelayClient {
    http_client: reqwest::Client,
    relay_url: String,
}

impl HttpRelayClient {
    pub fn new(relay_url: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            relay_url: relay_url.trim_end_matches('/').to_string(),
        }
    }

    fn find_url(&self) -> String {
        format!("{}{}", self.relay_url, RELAY_FIND_PATH)
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn submit_image(&self, image: &ImageBlob) -> Result<RelayResult> {
        log::info!("{} posting image to {}", LOG_TAG_CLIENT, self.find_url());

        let part = reqwest::multipart::Part::bytes(image.bytes().to_vec())
            .file_name(image.file_name().to_string())
            .mime_str(image.mime_type())?;
        let form = reqwest::multipart::Form::new().part(RELAY_IMAGE_FIELD_NAME, part);

        let response = self
            .http_client
            .post(self.find_url())
            .multipart(form)
            .send()
            .await
            .context("Relay is unreachable")?;

        let status = response.status();
        let response_text = response.text().await?;
        log::debug!("{} relay response ({}): {}", LOG_TAG_CLIENT, status, response_text);

        if !status.is_success() {
            let error = serde_json::from_str::<RelayErrorBody>(&response_text)
                .map(|body| body.error)
                .unwrap_or(response_text);
            anyhow::bail!("Relay returned {}: {}", status, error);
        }

        let result: RelayResult =
            serde_json::from_str(&response_text).context("Relay returned an unexpected body")?;
        Ok(result)
    }
}
