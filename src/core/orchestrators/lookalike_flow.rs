use std::sync::Arc;

use crate::core::interfaces::adapters::RelayClient;
use crate::core::models::{ImageBlob, ResultView, ViewState};
use crate::global_constants::{LOG_TAG_CLIENT, USER_MESSAGE_REQUEST_FAILED};

/// Drives one submission at a time through `Idle -> Loading -> Success | Error`.
pub struct LookalikeFlow {
    relay_client: Arc<dyn RelayClient>,
    state: ViewState,
}

impl LookalikeFlow {
    pub fn build(relay_client: Arc<dyn RelayClient>) -> Self {
        Self {
            relay_client,
            state: ViewState::Idle,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub async fn submit(&mut self, image: ImageBlob) -> &ViewState {
        log::info!("{} submitting {:?}", LOG_TAG_CLIENT, image);
        self.state = ViewState::Loading;

        let response = self.relay_client.submit_image(&image).await;
        self.state = match response {
            Ok(result) => {
                log::info!("{} received result: {:?}", LOG_TAG_CLIENT, result);
                ViewState::Success(ResultView::build(image, result))
            }
            Err(error) => {
                log::error!("{} relay request failed: {:#}", LOG_TAG_CLIENT, error);
                ViewState::Error(USER_MESSAGE_REQUEST_FAILED.to_string())
            }
        };

        &self.state
    }

    #[allow(dead_code)]
    pub fn try_again(&mut self) {
        log::debug!("{} resetting to idle", LOG_TAG_CLIENT);
        self.state = ViewState::Idle;
    }
}
