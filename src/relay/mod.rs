mod error;
mod handlers;
mod remote_call_policy;
mod server;

pub use error::RelayError;
pub use remote_call_policy::{GuardedInferenceService, RemoteCallPolicy};
pub use server::run;
