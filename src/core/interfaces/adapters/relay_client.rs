use anyhow::Result;
use async_trait::async_trait;

use crate::core::models::{ImageBlob, RelayResult};

#[async_trait]
pub trait RelayClient: Send + Sync {
    async fn submit_image(&self, image: &ImageBlob) -> Result<RelayResult>;
}
