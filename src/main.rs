mod adapters;
mod core;
mod global_constants;
mod ports;
mod presentation;
mod relay;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::adapters::{GradioLookalikeService, HttpRelayClient};
use crate::core::models::{ImageBlob, UserSettings, ViewState};
use crate::core::orchestrators::{CameraController, CaptureError, LookalikeFlow, Uploader};
use crate::global_constants::{
    CAMERA_CAPTURE_ATTEMPTS, CAMERA_CAPTURE_RETRY_DELAY_MS, DEFAULT_CAMERA_HEIGHT,
    DEFAULT_CAMERA_WIDTH, LOG_TAG_APP, STARTUP_BANNER,
};
use crate::ports::SystemCameraDevice;

#[derive(Parser)]
#[command(name = "doppelganger", version, about = "Find your anime twin")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the relay that forwards photos to the hosted lookalike model
    Serve {
        /// Address to listen on, e.g. 0.0.0.0:5001
        #[arg(long)]
        bind: Option<String>,

        /// Allowed CORS origin(s); `*` or a comma-separated list
        #[arg(long)]
        allowed_origin: Option<String>,
    },
    /// Submit a photo (or a webcam snapshot) to a relay and print the match
    Find {
        /// Image file to submit
        path: Option<PathBuf>,

        /// Take the photo with the webcam instead of reading a file;
        /// optionally names the device to use
        #[arg(long, conflicts_with = "path")]
        camera: Option<Option<String>>,

        /// Relay base URL
        #[arg(long)]
        relay_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut settings = UserSettings::load().context("Failed to load settings")?;

    match cli.command {
        Command::Serve {
            bind,
            allowed_origin,
        } => {
            if let Some(bind) = bind {
                settings.relay.bind_address = bind;
            }
            if let Some(allowed_origin) = allowed_origin {
                settings.relay.allowed_origin = allowed_origin;
            }
            settings.validate()?;
            run_relay(&settings).await
        }
        Command::Find {
            path,
            camera,
            relay_url,
        } => {
            if let Some(relay_url) = relay_url {
                settings.client.relay_url = relay_url;
            }
            settings.validate()?;
            run_find(&settings, path, camera).await
        }
    }
}

async fn run_relay(settings: &UserSettings) -> Result<()> {
    println!("{}", STARTUP_BANNER);
    log::info!("{} starting relay for {}", LOG_TAG_APP, settings.relay.inference_url);

    let inference_service = Arc::new(GradioLookalikeService::build(&settings.relay)?);
    relay::run(inference_service, &settings.relay).await
}

async fn run_find(
    settings: &UserSettings,
    path: Option<PathBuf>,
    camera: Option<Option<String>>,
) -> Result<()> {
    println!("{}\n", presentation::render_header());

    let mut selected: Option<ImageBlob> = None;
    {
        let mut uploader = Uploader::build(|image| selected = Some(image));

        match camera {
            Some(device_path) => {
                let device_path = device_path.unwrap_or_else(|| settings.client.camera_device.clone());
                take_picture(&mut uploader, &device_path).await?
            }
            None => {
                let file = match path {
                    Some(path) => Some(
                        ImageBlob::load_from_file(&path)
                            .await
                            .with_context(|| format!("Failed to read {}", path.display()))?,
                    ),
                    None => None,
                };
                if let Err(error) = uploader.handle_file_selected(file) {
                    println!("{}", presentation::render_view_state(&ViewState::Idle));
                    return Err(error.into());
                }
            }
        }
    }

    let image = selected.ok_or(CaptureError::NoImageSelected)?;

    let relay_client = Arc::new(HttpRelayClient::new(&settings.client.relay_url));
    let mut flow = LookalikeFlow::build(relay_client);
    println!("{}", presentation::render_view_state(&ViewState::Loading));

    let state = flow.submit(image).await;
    println!("{}", presentation::render_view_state(state));

    match state.error_message() {
        Some(message) => anyhow::bail!("{}", message),
        None => Ok(()),
    }
}

/// Opens the camera and keeps trying until the first frame is ready.
async fn take_picture<F>(uploader: &mut Uploader<F>, device_path: &str) -> Result<()>
where
    F: FnMut(ImageBlob),
{
    let camera_device = Arc::new(SystemCameraDevice::initialize(
        device_path,
        DEFAULT_CAMERA_WIDTH,
        DEFAULT_CAMERA_HEIGHT,
    ));
    let mut camera = CameraController::build(camera_device);

    uploader.handle_open_camera(&mut camera).await.map_err(|error| {
        log::error!("{} {:?}", LOG_TAG_APP, camera.state().last_error());
        error
    })?;

    for attempt in 1..=CAMERA_CAPTURE_ATTEMPTS {
        match uploader.handle_take_picture(&mut camera) {
            Ok(()) => return Ok(()),
            Err(CaptureError::NoImageSelected) => {
                log::debug!(
                    "{} frame not ready (attempt {}/{})",
                    LOG_TAG_APP,
                    attempt,
                    CAMERA_CAPTURE_ATTEMPTS
                );
                tokio::time::sleep(Duration::from_millis(CAMERA_CAPTURE_RETRY_DELAY_MS)).await;
            }
            Err(error) => return Err(error.into()),
        }
    }

    anyhow::bail!("Camera {} never produced a frame", device_path)
}
