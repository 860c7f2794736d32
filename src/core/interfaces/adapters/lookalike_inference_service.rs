use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::core::models::ImageBlob;

/// The hosted `find_lookalike` function. Returns its raw positional output.
#[async_trait]
pub trait LookalikeInferenceService: Send + Sync {
    async fn find_lookalike(&self, image: &ImageBlob) -> Result<Vec<Value>>;
}
