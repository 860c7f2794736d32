mod gradio_lookalike_service;
mod http_relay_client;

pub use gradio_lookalike_service::GradioLookalikeService;
pub use http_relay_client::HttpRelayClient;
