use crate::view_model::{
    FormView, MonitorViewModel, StatusIndicator, FETCH_FAILED_MESSAGE, PROBE_FAILED_MESSAGE,
};
use crate::{ImportJob, ImportRequest, ImportType, JobSnapshot, PollSeq, ProcessType, SessionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeState {
    #[default]
    NotStarted,
    Running,
    Done(ProcessType),
    Failed,
}

/// Final disposition of a monitor, available once it has been closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorOutcome {
    Completed,
    /// Backend reported `FAILED` or `ERROR`.
    JobFailed,
    UnknownStatus,
    /// Polling halted on a transport error; the job's real status is unknown.
    FetchFailed,
    /// View closed while the job was still pending. The backend keeps running it.
    Detached,
    ProbeFailed,
    SubmissionFailed,
    NotSubmitted,
}

/// State of a single import monitor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    session_id: Option<SessionId>,
    probe: ProbeState,
    url_input: String,
    import_type: ImportType,
    in_flight: Option<ImportRequest>,
    submit_error: Option<String>,
    job: Option<ImportJob>,
    polling: bool,
    last_applied_seq: PollSeq,
    fetch_error: Option<String>,
    closed: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> MonitorViewModel {
        MonitorViewModel {
            session_id: self.session_id,
            title: self.title(),
            mode: self.mode(),
            url_input: self.url_input.clone(),
            import_type: self.import_type,
            form: FormView {
                can_submit: self.can_submit(),
                submitting: self.in_flight.is_some(),
                error: self.submit_error.clone(),
            },
            indicator: self.indicator(),
            import_id: self.job.as_ref().map(|job| job.import_id.clone()),
            polling: self.polling,
            can_dismiss: self.can_dismiss(),
            closed: self.closed,
            dirty: self.dirty,
        }
    }

    /// Returns whether state changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn outcome(&self) -> MonitorOutcome {
        let Some(job) = &self.job else {
            return match self.probe {
                ProbeState::Failed => MonitorOutcome::ProbeFailed,
                _ if self.submit_error.is_some() => MonitorOutcome::SubmissionFailed,
                _ => MonitorOutcome::NotSubmitted,
            };
        };
        if self.fetch_error.is_some() {
            return MonitorOutcome::FetchFailed;
        }
        match &job.status {
            status if status.is_pending() => MonitorOutcome::Detached,
            crate::ImportStatus::Complete => MonitorOutcome::Completed,
            crate::ImportStatus::Failed | crate::ImportStatus::Error => MonitorOutcome::JobFailed,
            _ => MonitorOutcome::UnknownStatus,
        }
    }

    pub fn mode(&self) -> Option<ProcessType> {
        match self.probe {
            ProbeState::Done(mode) => Some(mode),
            _ => None,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.closed
            && self.mode().is_some()
            && self.in_flight.is_none()
            && self.job.is_none()
            && !self.url_input.trim().is_empty()
    }

    /// Close is held back while a request is in flight or the job outcome is
    /// still being observed.
    pub fn can_dismiss(&self) -> bool {
        !self.closed && self.in_flight.is_none() && !self.polling
    }

    pub(crate) fn session_id(&self) -> Option<SessionId> {
        self.session_id
    }

    pub(crate) fn probe(&self) -> ProbeState {
        self.probe
    }

    pub(crate) fn is_polling(&self) -> bool {
        self.polling
    }

    pub(crate) fn is_form_editable(&self) -> bool {
        !self.closed && self.in_flight.is_none() && self.job.is_none()
    }

    pub(crate) fn open(&mut self, session_id: SessionId) {
        self.session_id = Some(session_id);
        self.probe = ProbeState::Running;
        self.mark_dirty();
    }

    pub(crate) fn finish_probe(&mut self, probe: ProbeState) {
        self.probe = probe;
        self.mark_dirty();
    }

    pub(crate) fn set_url_input(&mut self, url: String) {
        if self.url_input != url {
            self.url_input = url;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_import_type(&mut self, import_type: ImportType) {
        if self.import_type != import_type {
            self.import_type = import_type;
            self.mark_dirty();
        }
    }

    /// Builds the request from the form and marks it in flight.
    pub(crate) fn begin_submit(&mut self) -> Option<ImportRequest> {
        let (session_id, process_type) = (self.session_id?, self.mode()?);
        let request = ImportRequest {
            url: self.url_input.trim().to_string(),
            session_id,
            import_type: self.import_type,
            process_type,
        };
        self.in_flight = Some(request.clone());
        self.submit_error = None;
        self.mark_dirty();
        Some(request)
    }

    pub(crate) fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Records the accepted job. Returns whether polling should start.
    pub(crate) fn accept_job(&mut self, snapshot: JobSnapshot) -> bool {
        let Some(request) = self.in_flight.take() else {
            return false;
        };
        let job = ImportJob::submitted(request, snapshot);
        self.polling = job.status.is_pending();
        self.job = Some(job);
        self.mark_dirty();
        self.polling
    }

    pub(crate) fn reject_submit(&mut self, message: String) {
        self.in_flight = None;
        self.submit_error = Some(message);
        self.mark_dirty();
    }

    pub(crate) fn import_id(&self) -> Option<&str> {
        self.job.as_ref().map(|job| job.import_id.as_str())
    }

    /// Responses must be newer than the last one applied.
    pub(crate) fn accepts_poll(&self, seq: PollSeq) -> bool {
        self.polling && seq > self.last_applied_seq
    }

    /// Applies a status response. Returns whether polling should stop.
    pub(crate) fn apply_poll(&mut self, seq: PollSeq, snapshot: JobSnapshot) -> bool {
        let Some(job) = self.job.as_mut() else {
            return false;
        };
        job.apply(snapshot);
        self.last_applied_seq = seq;
        self.polling = job.status.is_pending();
        self.mark_dirty();
        !self.polling
    }

    pub(crate) fn fail_poll(&mut self, seq: PollSeq, message: String) {
        self.last_applied_seq = seq;
        self.polling = false;
        self.fetch_error = Some(message);
        self.mark_dirty();
    }

    /// Closes the view. Returns whether a poller was still running.
    pub(crate) fn close(&mut self) -> bool {
        let was_polling = std::mem::take(&mut self.polling);
        self.closed = true;
        self.mark_dirty();
        was_polling
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn title(&self) -> String {
        match self.mode() {
            Some(ProcessType::Results) => "Import Results".to_string(),
            Some(ProcessType::Timecard) => "Import Timecard".to_string(),
            None => "Import".to_string(),
        }
    }

    fn indicator(&self) -> StatusIndicator {
        if let Some(job) = &self.job {
            if let Some(detail) = &self.fetch_error {
                return StatusIndicator::FetchFailed {
                    message: FETCH_FAILED_MESSAGE.to_string(),
                    detail: detail.clone(),
                };
            }
            return StatusIndicator::for_job(job);
        }
        if self.in_flight.is_some() {
            return StatusIndicator::Submitting;
        }
        match self.probe {
            ProbeState::NotStarted => StatusIndicator::Idle,
            ProbeState::Running => StatusIndicator::CheckingSession,
            ProbeState::Failed => StatusIndicator::ProbeFailed {
                message: PROBE_FAILED_MESSAGE.to_string(),
            },
            ProbeState::Done(_) => StatusIndicator::AwaitingSubmission,
        }
    }
}
