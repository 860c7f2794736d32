use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::global_constants;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaySettings {
    pub bind_address: String,
    pub allowed_origin: String,
    pub inference_url: String,
    #[serde(default = "default_gradio_api_prefix")]
    pub gradio_api_prefix: String,
    #[serde(default = "default_inference_function_name")]
    pub inference_function_name: String,
    #[serde(default = "default_remote_timeout_seconds")]
    pub remote_timeout_seconds: u64,
    #[serde(default)]
    pub remote_max_retries: u32,
    #[serde(default = "default_max_concurrent_calls")]
    pub max_concurrent_calls: usize,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub relay_url: String,
    #[serde(default = "default_camera_device")]
    pub camera_device: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default)]
    pub relay: RelaySettings,
    #[serde(default)]
    pub client: ClientSettings,
}

fn default_gradio_api_prefix() -> String {
    global_constants::DEFAULT_GRADIO_API_PREFIX.to_string()
}

fn default_inference_function_name() -> String {
    global_constants::DEFAULT_INFERENCE_FUNCTION_NAME.to_string()
}

fn default_remote_timeout_seconds() -> u64 {
    global_constants::DEFAULT_REMOTE_TIMEOUT_SECONDS
}

fn default_max_concurrent_calls() -> usize {
    global_constants::DEFAULT_MAX_CONCURRENT_CALLS
}

fn default_max_upload_bytes() -> usize {
    global_constants::DEFAULT_MAX_UPLOAD_BYTES
}

fn default_camera_device() -> String {
    global_constants::DEFAULT_CAMERA_DEVICE.to_string()
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            bind_address: global_constants::DEFAULT_BIND_ADDRESS.to_string(),
            allowed_origin: global_constants::DEFAULT_ALLOWED_ORIGIN.to_string(),
            inference_url: global_constants::DEFAULT_INFERENCE_URL.to_string(),
            gradio_api_prefix: default_gradio_api_prefix(),
            inference_function_name: default_inference_function_name(),
            remote_timeout_seconds: default_remote_timeout_seconds(),
            remote_max_retries: global_constants::DEFAULT_REMOTE_MAX_RETRIES,
            max_concurrent_calls: default_max_concurrent_calls(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            relay_url: global_constants::DEFAULT_RELAY_URL.to_string(),
            camera_device: default_camera_device(),
        }
    }
}

impl RelaySettings {
    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout_seconds)
    }
}

impl UserSettings {
    /// Reads the settings file (writing defaults on first run) and applies
    /// environment overrides. Callers validate once their own overrides are in.
    pub fn load() -> anyhow::Result<Self> {
        let settings_path = Self::get_settings_file_path()?;
        Self::load_from_path(&settings_path, |key| std::env::var(key).ok())
    }

    pub fn load_from_path<F>(settings_path: &Path, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = if settings_path.exists() {
            let contents = std::fs::read_to_string(settings_path)?;
            let settings: UserSettings = serde_json::from_str(&contents)?;
            log::info!(
                "{} Loaded settings from {:?}",
                global_constants::LOG_TAG_SETTINGS,
                settings_path
            );
            settings
        } else {
            log::info!(
                "{} No settings file found, using defaults",
                global_constants::LOG_TAG_SETTINGS
            );
            let default_settings = Self::default();
            if let Err(error) = default_settings.save_to_path(settings_path) {
                log::warn!(
                    "{} Failed to write default settings: {}",
                    global_constants::LOG_TAG_SETTINGS,
                    error
                );
            }
            default_settings
        };

        settings.apply_overrides(lookup)?;

        log::debug!(
            "{} Relay bind address: {}",
            global_constants::LOG_TAG_SETTINGS,
            settings.relay.bind_address
        );
        log::debug!(
            "{} Inference URL: {}",
            global_constants::LOG_TAG_SETTINGS,
            settings.relay.inference_url
        );
        log::debug!(
            "{} Relay URL: {}",
            global_constants::LOG_TAG_SETTINGS,
            settings.client.relay_url
        );

        Ok(settings)
    }

    #[allow(dead_code)]
    pub fn save(&self) -> anyhow::Result<()> {
        let settings_path = Self::get_settings_file_path()?;
        self.save_to_path(&settings_path)
    }

    pub fn save_to_path(&self, settings_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(settings_path, contents)?;

        log::info!(
            "{} Saved settings to {:?}",
            global_constants::LOG_TAG_SETTINGS,
            settings_path
        );
        Ok(())
    }

    /// Environment variables win over the settings file.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(global_constants::ENV_RELAY_URL) {
            self.client.relay_url = value;
        }
        if let Some(value) = lookup(global_constants::ENV_ALLOWED_ORIGIN) {
            self.relay.allowed_origin = value;
        }
        if let Some(value) = lookup(global_constants::ENV_BIND_ADDRESS) {
            self.relay.bind_address = value;
        }
        if let Some(value) = lookup(global_constants::ENV_INFERENCE_URL) {
            self.relay.inference_url = value;
        }
        if let Some(value) = lookup(global_constants::ENV_CAMERA_DEVICE) {
            self.client.camera_device = value;
        }
        if let Some(value) = lookup(global_constants::ENV_REMOTE_TIMEOUT_SECONDS) {
            self.relay.remote_timeout_seconds = parse_number(global_constants::ENV_REMOTE_TIMEOUT_SECONDS, &value)?;
        }
        if let Some(value) = lookup(global_constants::ENV_REMOTE_MAX_RETRIES) {
            self.relay.remote_max_retries = parse_number(global_constants::ENV_REMOTE_MAX_RETRIES, &value)?;
        }
        if let Some(value) = lookup(global_constants::ENV_MAX_CONCURRENT_CALLS) {
            self.relay.max_concurrent_calls = parse_number(global_constants::ENV_MAX_CONCURRENT_CALLS, &value)?;
        }

        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.relay.remote_timeout_seconds == 0 {
            anyhow::bail!("Remote timeout must be at least one second");
        }
        if self.relay.max_concurrent_calls == 0 {
            anyhow::bail!("At least one concurrent remote call must be allowed");
        }
        if self.relay.max_upload_bytes == 0 {
            anyhow::bail!("Upload size limit must be greater than zero");
        }
        if self.relay.allowed_origin.trim().is_empty() {
            anyhow::bail!("Allowed origin must not be empty");
        }
        if self.relay.inference_function_name.trim().is_empty() {
            anyhow::bail!("Inference function name must not be empty");
        }

        reqwest::Url::parse(&self.relay.inference_url)
            .map_err(|error| anyhow::anyhow!("Invalid inference URL '{}': {}", self.relay.inference_url, error))?;
        reqwest::Url::parse(&self.client.relay_url)
            .map_err(|error| anyhow::anyhow!("Invalid relay URL '{}': {}", self.client.relay_url, error))?;

        Ok(())
    }

    fn get_settings_file_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join(global_constants::SETTINGS_DIRECTORY_NAME);

        Ok(config_dir.join(global_constants::SETTINGS_FILE_NAME))
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> anyhow::Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| anyhow::anyhow!("{} must be a non-negative integer, got '{}'", key, value))
}
