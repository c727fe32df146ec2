use crate::{ImportType, JobSnapshot, PollSeq, SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The import monitor was opened for a session.
    MonitorOpened { session_id: SessionId },
    /// The results probe answered with the number of existing results.
    ProbeSucceeded { existing_results: usize },
    /// The results probe could not be completed.
    ProbeFailed,
    /// User edited the import URL.
    InputChanged(String),
    /// User picked the results source format.
    ImportTypeSelected(ImportType),
    /// User submitted the import form.
    SubmitClicked,
    /// Backend accepted the import request.
    SubmitSucceeded(JobSnapshot),
    /// Import request failed (network error or non-success status).
    SubmitFailed { message: String },
    /// A status query returned the job's current state.
    PollResponded { seq: PollSeq, snapshot: JobSnapshot },
    /// A status query failed.
    PollFailed { seq: PollSeq, message: String },
    /// User clicked Close.
    DismissClicked,
    /// Hosting view is being torn down regardless of job state.
    ViewClosed,
    /// UI/render tick.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
