use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::core::interfaces::adapters::LookalikeInferenceService;
use crate::core::models::{ImageBlob, RelaySettings};
use crate::global_constants::LOG_TAG_GRADIO;

#[derive(Debug, Deserialize)]
struct CallStarted {
    event_id: String,
}

/// Calls a function hosted in a Gradio app (e.g. a Hugging Face Space) over its
/// upload / call / event-stream HTTP API.
pub struct GradioLookalikeService {
    http_client: reqwest::Client,
    space_url: String,
    api_prefix: String,
    function_name: String,
}

impl GradioLookalikeService {
    pub fn build(settings: &RelaySettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client for the inference service")?;

        Ok(Self {
            http_client,
            space_url: settings.inference_url.trim_end_matches('/').to_string(),
            api_prefix: normalize_api_prefix(&settings.gradio_api_prefix),
            function_name: settings.inference_function_name.trim_matches('/').to_string(),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}/{}", self.space_url, self.api_prefix, path)
    }

    async fn upload_file(&self, image: &ImageBlob) -> Result<String> {
        log::debug!("{} uploading {:?}", LOG_TAG_GRADIO, image);

        let part = reqwest::multipart::Part::bytes(image.bytes().to_vec())
            .file_name(image.file_name().to_string())
            .mime_str(image.mime_type())?;
        let form = reqwest::multipart::Form::new().part("files", part);

        let response = self
            .http_client
            .post(self.api_url("upload"))
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        let uploaded_paths: Vec<String> = response.json().await?;
        uploaded_paths
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Gradio upload returned no file path"))
    }

    async fn start_call(&self, image: &ImageBlob, uploaded_path: &str) -> Result<String> {
        let payload = json!({
            "data": [{
                "path": uploaded_path,
                "orig_name": image.file_name(),
                "mime_type": image.mime_type(),
                "meta": { "_type": "gradio.FileData" }
            }]
        });

        let response = self
            .http_client
            .post(self.api_url(&format!("call/{}", self.function_name)))
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        let call_started: CallStarted = response.json().await?;
        log::debug!("{} call started, event id {}", LOG_TAG_GRADIO, call_started.event_id);
        Ok(call_started.event_id)
    }

    async fn await_call_result(&self, event_id: &str) -> Result<Vec<Value>> {
        let result_url = self.api_url(&format!(
            "call/{}/{}",
            self.function_name,
            urlencoding::encode(event_id)
        ));

        let response = self
            .http_client
            .get(result_url)
            .send()
            .await?
            .error_for_status()?;

        let event_stream = response.text().await?;
        log::debug!("{} event stream: {}", LOG_TAG_GRADIO, event_stream);

        parse_event_stream(&event_stream)
    }
}

#[async_trait]
impl LookalikeInferenceService for GradioLookalikeService {
    async fn find_lookalike(&self, image: &ImageBlob) -> Result<Vec<Value>> {
        log::info!(
            "{} calling /{} on {}",
            LOG_TAG_GRADIO,
            self.function_name,
            self.space_url
        );

        let uploaded_path = self
            .upload_file(image)
            .await
            .context("Failed to upload image to the inference service")?;
        let event_id = self
            .start_call(image, &uploaded_path)
            .await
            .context("Failed to start the remote call")?;
        let output = self
            .await_call_result(&event_id)
            .await
            .context("Failed to read the remote call result")?;

        log::info!("{} received {} output values", LOG_TAG_GRADIO, output.len());
        Ok(output)
    }
}

fn normalize_api_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Picks the output array out of a Gradio server-sent event stream.
pub(crate) fn parse_event_stream(body: &str) -> Result<Vec<Value>> {
    let mut current_event = "";

    for line in body.lines() {
        if let Some(event_name) = line.strip_prefix("event:") {
            current_event = event_name.trim();
        } else if let Some(data) = line.strip_prefix("data:") {
            match current_event {
                "complete" => {
                    return serde_json::from_str::<Vec<Value>>(data.trim())
                        .context("Remote output is not a JSON array");
                }
                "error" => {
                    anyhow::bail!("Remote function reported an error: {}", data.trim());
                }
                _ => {}
            }
        }
    }

    anyhow::bail!("Event stream ended without a result")
}
