use pitwall_engine::ApiError;
use thiserror::Error;

use crate::platform::persistence::CredentialError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("credential store: {0}")]
    Credentials(#[from] CredentialError),
    #[error("no API key; run `pitwall login --key <KEY>` or set PITWALL_API_KEY")]
    MissingApiKey,
    #[error("Invalid API key.")]
    InvalidApiKey,
    #[error("{0} already exists")]
    AlreadyExists(&'static str),
    #[error("Something went wrong: {0}")]
    CreateFailed(ApiError),
    #[error("failed to start background runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),
}
