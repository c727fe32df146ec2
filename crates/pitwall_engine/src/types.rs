use std::fmt;

use pitwall_core::{JobSnapshot, PollSeq, SessionId};

/// Administrator credential sent as `X-API-Key`.
///
/// Loaded once at startup and handed to every request; `Debug` never prints
/// the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            None
        } else {
            Some(Self(key))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ProbeCompleted {
        session_id: SessionId,
        result: Result<usize, ApiError>,
    },
    SubmitCompleted {
        result: Result<JobSnapshot, ApiError>,
    },
    PollCompleted {
        import_id: String,
        seq: PollSeq,
        result: Result<JobSnapshot, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiFailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ApiFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailureKind {
    InvalidUrl,
    /// 401 or 403: missing or rejected API key.
    Unauthorized,
    /// 409: the record already exists.
    Conflict,
    HttpStatus(u16),
    Timeout,
    Decode,
    Network,
}

impl fmt::Display for ApiFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailureKind::InvalidUrl => write!(f, "invalid url"),
            ApiFailureKind::Unauthorized => write!(f, "invalid api key"),
            ApiFailureKind::Conflict => write!(f, "already exists"),
            ApiFailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            ApiFailureKind::Timeout => write!(f, "timeout"),
            ApiFailureKind::Decode => write!(f, "unexpected response body"),
            ApiFailureKind::Network => write!(f, "network error"),
        }
    }
}
