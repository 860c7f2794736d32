mod lookalike_inference_service;
mod relay_client;

pub use lookalike_inference_service::LookalikeInferenceService;
pub use relay_client::RelayClient;
