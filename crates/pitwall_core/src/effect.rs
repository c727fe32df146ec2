use crate::{ImportRequest, SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Count the results the session already has to pick the import mode.
    ProbeSession { session_id: SessionId },
    SubmitImport(ImportRequest),
    /// Start observing a job: first query immediately, then on a fixed interval.
    StartPolling { import_id: String },
    StopPolling { import_id: String, reason: StopReason },
    CloseMonitor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The backend reported a status outside the pending set.
    Terminal,
    /// A status query failed before reaching the backend job.
    FetchFailed,
    /// The monitor view was torn down while the job was still pending.
    ViewClosed,
}
