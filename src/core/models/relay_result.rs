use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResult {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayErrorBody {
    pub error: String,
}

impl RelayErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl RelayResult {
    /// Maps the remote function's positional output: element 0 is the text
    /// message, element 1 (optional) carries the twin image under `url`.
    pub fn from_positional_output(output: &[Value]) -> Result<Self> {
        let message = output
            .first()
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow::anyhow!("Remote output element 0 is not a text message"))?
            .to_string();

        let image_url = output
            .get(1)
            .and_then(|twin_image| twin_image.get("url"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self { message, image_url })
    }
}
