use std::time::Duration;

use pitwall_core::{ImportRequest, JobSnapshot, SessionId};
use pitwall_logging::{pitwall_debug, pitwall_warn};
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::dto::{ImportRequestBody, ImportResponseDto, ResultsResponseDto};
use crate::{ApiError, ApiFailureKind, ApiKey};

pub const API_KEY_HEADER: &str = "X-API-Key";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Backend operations the import monitor depends on.
#[async_trait::async_trait]
pub trait ImportApi: Send + Sync {
    /// Number of results already stored for the session.
    async fn session_result_count(
        &self,
        key: &ApiKey,
        session_id: SessionId,
    ) -> Result<usize, ApiError>;

    async fn submit_import(
        &self,
        key: &ApiKey,
        request: &ImportRequest,
    ) -> Result<JobSnapshot, ApiError>;

    async fn import_status(&self, key: &ApiKey, import_id: &str) -> Result<JobSnapshot, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(settings.base_url.trim())
            .map_err(|err| ApiError::new(ApiFailureKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::new(
                ApiFailureKind::InvalidUrl,
                format!("{} cannot be used as a base url", settings.base_url),
            ));
        }
        // Joining relative paths needs the trailing slash to keep the last segment.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(ApiFailureKind::Network, err.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Resolves an API path such as `imports/status/7` against the base url.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| ApiError::new(ApiFailureKind::InvalidUrl, err.to_string()))
    }

    pub(crate) fn request(&self, method: Method, url: Url, key: Option<&ApiKey>) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(key) = key {
            builder = builder.header(API_KEY_HEADER, key.as_str());
        }
        builder
    }

    pub(crate) fn with_json_body<T: Serialize>(
        builder: RequestBuilder,
        body: &T,
    ) -> Result<RequestBuilder, ApiError> {
        let bytes = serde_json::to_vec(body)
            .map_err(|err| ApiError::new(ApiFailureKind::Decode, err.to_string()))?;
        Ok(builder
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(bytes))
    }

    /// Sends the request and checks the status, returning the raw body.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let url = response.url().clone();
        if !status.is_success() {
            pitwall_warn!("{} answered {}", url, status);
            return Err(status_error(status));
        }
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        pitwall_debug!("{} answered {} with {} bytes", url, status, body.len());
        Ok(body.to_vec())
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.send(builder).await?;
        decode(&body)
    }
}

#[async_trait::async_trait]
impl ImportApi for ReqwestApi {
    async fn session_result_count(
        &self,
        key: &ApiKey,
        session_id: SessionId,
    ) -> Result<usize, ApiError> {
        let url = self.endpoint(&format!("sessions/{session_id}/results"))?;
        let response: ResultsResponseDto =
            self.send_json(self.request(Method::GET, url, Some(key))).await?;
        Ok(response.results.map_or(0, |results| results.len()))
    }

    async fn submit_import(
        &self,
        key: &ApiKey,
        request: &ImportRequest,
    ) -> Result<JobSnapshot, ApiError> {
        let url = self.endpoint("imports")?;
        let builder = Self::with_json_body(
            self.request(Method::POST, url, Some(key)),
            &ImportRequestBody::from(request),
        )?;
        let response: ImportResponseDto = self.send_json(builder).await?;
        Ok(response.into())
    }

    async fn import_status(&self, key: &ApiKey, import_id: &str) -> Result<JobSnapshot, ApiError> {
        let mut url = self.endpoint("imports/status/")?;
        url.path_segments_mut()
            .map_err(|_| ApiError::new(ApiFailureKind::InvalidUrl, "base url has no path"))?
            .pop_if_empty()
            .push(import_id);
        let response: ImportResponseDto =
            self.send_json(self.request(Method::GET, url, Some(key))).await?;
        Ok(response.into())
    }
}

pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|err| ApiError::new(ApiFailureKind::Decode, err.to_string()))
}

fn status_error(status: reqwest::StatusCode) -> ApiError {
    let kind = match status.as_u16() {
        401 | 403 => ApiFailureKind::Unauthorized,
        409 => ApiFailureKind::Conflict,
        code => ApiFailureKind::HttpStatus(code),
    };
    ApiError::new(kind, status.to_string())
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiFailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return ApiError::new(ApiFailureKind::InvalidUrl, err.to_string());
    }
    ApiError::new(ApiFailureKind::Network, err.to_string())
}
