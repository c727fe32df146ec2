use std::fmt;
use std::str::FromStr;

pub type SessionId = i64;

/// Sequence number of a status request issued by a poller, starting at 1.
pub type PollSeq = u64;

/// Results source format understood by the backend parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportType {
    #[default]
    Imsa,
    Wec,
}

impl ImportType {
    pub fn as_str(self) -> &'static str {
        match self {
            ImportType::Imsa => "IMSA",
            ImportType::Wec => "WEC",
        }
    }
}

impl FromStr for ImportType {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IMSA" => Ok(ImportType::Imsa),
            "WEC" => Ok(ImportType::Wec),
            _ => Err(UnknownValue(s.to_string())),
        }
    }
}

impl fmt::Display for ImportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the backend should do with the imported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessType {
    /// Initial import of a session's classification.
    Results,
    /// Supplementary per-lap data for a session that already has results.
    Timecard,
}

impl ProcessType {
    /// Picks the import mode from the number of results the session already has.
    pub fn for_existing_results(count: usize) -> Self {
        if count > 0 {
            ProcessType::Timecard
        } else {
            ProcessType::Results
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProcessType::Results => "RESULTS",
            ProcessType::Timecard => "TIMECARD",
        }
    }
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status reported by the backend for an import job.
///
/// The backend may emit values outside the known set; those are kept verbatim
/// in [`ImportStatus::Unknown`] and count as terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatus {
    Pending,
    InProgress,
    Complete,
    Failed,
    Error,
    Unknown(String),
}

impl ImportStatus {
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "PENDING" => ImportStatus::Pending,
            "IN_PROGRESS" => ImportStatus::InProgress,
            "COMPLETE" => ImportStatus::Complete,
            "FAILED" => ImportStatus::Failed,
            "ERROR" => ImportStatus::Error,
            other => ImportStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ImportStatus::Pending => "PENDING",
            ImportStatus::InProgress => "IN_PROGRESS",
            ImportStatus::Complete => "COMPLETE",
            ImportStatus::Failed => "FAILED",
            ImportStatus::Error => "ERROR",
            ImportStatus::Unknown(raw) => raw,
        }
    }

    /// True only for the two states that keep a poller running.
    pub fn is_pending(&self) -> bool {
        matches!(self, ImportStatus::Pending | ImportStatus::InProgress)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }
}

impl fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownValue(pub String);

impl fmt::Display for UnknownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value {:?}", self.0)
    }
}

impl std::error::Error for UnknownValue {}

/// Parameters of one import submission. Fixed once the request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    pub url: String,
    pub session_id: SessionId,
    pub import_type: ImportType,
    pub process_type: ProcessType,
}

/// Backend view of a job as returned by submission and by each status query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSnapshot {
    pub import_id: String,
    pub status: ImportStatus,
    pub error: Option<String>,
    /// Run duration in milliseconds, set by the backend once terminal.
    pub completion_time_ms: Option<u64>,
}

impl JobSnapshot {
    pub fn new(import_id: impl Into<String>, status: ImportStatus) -> Self {
        Self {
            import_id: import_id.into(),
            status,
            error: None,
            completion_time_ms: None,
        }
    }
}

/// Client-side cached copy of a submitted job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportJob {
    pub import_id: String,
    pub status: ImportStatus,
    pub error: Option<String>,
    pub completion_time_ms: Option<u64>,
    pub request: ImportRequest,
}

impl ImportJob {
    pub fn submitted(request: ImportRequest, snapshot: JobSnapshot) -> Self {
        Self {
            import_id: snapshot.import_id,
            status: snapshot.status,
            error: snapshot.error,
            completion_time_ms: snapshot.completion_time_ms,
            request,
        }
    }

    pub(crate) fn apply(&mut self, snapshot: JobSnapshot) {
        self.status = snapshot.status;
        self.error = snapshot.error;
        self.completion_time_ms = snapshot.completion_time_ms;
    }
}
