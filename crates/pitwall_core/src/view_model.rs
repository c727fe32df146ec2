use crate::{ImportJob, ImportStatus, ImportType, ProcessType, SessionId};

pub const PROBE_FAILED_MESSAGE: &str = "Failed to check session results.";
pub const SUBMIT_FAILED_MESSAGE: &str = "something went wrong";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch import status.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MonitorViewModel {
    pub session_id: Option<SessionId>,
    pub title: String,
    pub mode: Option<ProcessType>,
    pub url_input: String,
    pub import_type: ImportType,
    pub form: FormView,
    pub indicator: StatusIndicator,
    pub import_id: Option<String>,
    pub polling: bool,
    pub can_dismiss: bool,
    pub closed: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormView {
    pub can_submit: bool,
    pub submitting: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusIndicator {
    #[default]
    Idle,
    CheckingSession,
    ProbeFailed {
        message: String,
    },
    AwaitingSubmission,
    Submitting,
    WaitingToBegin,
    Processing,
    Succeeded {
        completion_time_ms: Option<u64>,
    },
    Failed {
        status: String,
        detail: Option<String>,
    },
    Unknown {
        raw: String,
    },
    FetchFailed {
        message: String,
        detail: String,
    },
}

impl StatusIndicator {
    pub(crate) fn for_job(job: &ImportJob) -> Self {
        match &job.status {
            ImportStatus::Pending => StatusIndicator::WaitingToBegin,
            ImportStatus::InProgress => StatusIndicator::Processing,
            ImportStatus::Complete => StatusIndicator::Succeeded {
                completion_time_ms: job.completion_time_ms,
            },
            status @ (ImportStatus::Failed | ImportStatus::Error) => StatusIndicator::Failed {
                status: status.as_str().to_string(),
                detail: job.error.clone(),
            },
            ImportStatus::Unknown(raw) => StatusIndicator::Unknown { raw: raw.clone() },
        }
    }

    pub fn label(&self) -> String {
        match self {
            StatusIndicator::Idle => "Idle".to_string(),
            StatusIndicator::CheckingSession => "Checking session results".to_string(),
            StatusIndicator::ProbeFailed { message } => message.clone(),
            StatusIndicator::AwaitingSubmission => "Ready to import".to_string(),
            StatusIndicator::Submitting => "Submitting import".to_string(),
            StatusIndicator::WaitingToBegin => "Waiting to begin".to_string(),
            StatusIndicator::Processing => "Processing".to_string(),
            StatusIndicator::Succeeded { .. } => "Import complete".to_string(),
            StatusIndicator::Failed { status, .. } => format!("Import {}", status.to_lowercase()),
            StatusIndicator::Unknown { raw } => format!("Unknown status: {raw}"),
            StatusIndicator::FetchFailed { message, .. } => message.clone(),
        }
    }
}
