pub mod auth;
pub mod catalog;
pub mod import;

use std::future::Future;
use std::sync::Arc;

use pitwall_engine::{ApiKey, ApiSettings, ReqwestApi};
use tokio::runtime::Runtime;

use crate::error::AppError;

/// What every command gets: the API client, the key resolved at startup and a
/// runtime for one-shot requests.
pub struct Context {
    pub api: Arc<ReqwestApi>,
    key: Option<ApiKey>,
    runtime: Runtime,
}

impl Context {
    pub fn new(settings: ApiSettings, key: Option<ApiKey>) -> Result<Self, AppError> {
        let api = Arc::new(ReqwestApi::new(settings)?);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self { api, key, runtime })
    }

    pub fn key(&self) -> Option<&ApiKey> {
        self.key.as_ref()
    }

    pub fn require_key(&self) -> Result<&ApiKey, AppError> {
        self.key.as_ref().ok_or(AppError::MissingApiKey)
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}
