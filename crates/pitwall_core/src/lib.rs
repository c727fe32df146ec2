//! Pitwall core: pure import-monitor state machine and view-model helpers.
mod catalog;
mod effect;
mod import;
mod msg;
mod state;
mod update;
mod view_model;

pub use catalog::{filter_rows, Page, PageView, Searchable};
pub use effect::{Effect, StopReason};
pub use import::{
    ImportJob, ImportRequest, ImportStatus, ImportType, JobSnapshot, PollSeq, ProcessType,
    SessionId, UnknownValue,
};
pub use msg::Msg;
pub use state::{AppState, MonitorOutcome, ProbeState};
pub use update::update;
pub use view_model::{
    FormView, MonitorViewModel, StatusIndicator, FETCH_FAILED_MESSAGE, PROBE_FAILED_MESSAGE,
    SUBMIT_FAILED_MESSAGE,
};
