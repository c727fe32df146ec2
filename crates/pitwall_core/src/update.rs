use crate::state::ProbeState;
use crate::view_model::SUBMIT_FAILED_MESSAGE;
use crate::{AppState, Effect, Msg, ProcessType, StopReason};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    // A closed monitor never reacts again, including to late responses.
    if state.is_closed() {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::MonitorOpened { session_id } => {
            if state.session_id().is_some() {
                return (state, Vec::new());
            }
            state.open(session_id);
            vec![Effect::ProbeSession { session_id }]
        }
        Msg::ProbeSucceeded { existing_results } => {
            if state.probe() == ProbeState::Running {
                let mode = ProcessType::for_existing_results(existing_results);
                state.finish_probe(ProbeState::Done(mode));
            }
            Vec::new()
        }
        Msg::ProbeFailed => {
            if state.probe() == ProbeState::Running {
                state.finish_probe(ProbeState::Failed);
            }
            Vec::new()
        }
        Msg::InputChanged(url) => {
            if state.is_form_editable() {
                state.set_url_input(url);
            }
            Vec::new()
        }
        Msg::ImportTypeSelected(import_type) => {
            if state.is_form_editable() {
                state.set_import_type(import_type);
            }
            Vec::new()
        }
        Msg::SubmitClicked => {
            if !state.can_submit() {
                return (state, Vec::new());
            }
            match state.begin_submit() {
                Some(request) => vec![Effect::SubmitImport(request)],
                None => Vec::new(),
            }
        }
        Msg::SubmitSucceeded(snapshot) => {
            if !state.is_submitting() {
                return (state, Vec::new());
            }
            let import_id = snapshot.import_id.clone();
            if state.accept_job(snapshot) {
                vec![Effect::StartPolling { import_id }]
            } else {
                Vec::new()
            }
        }
        Msg::SubmitFailed { message: _ } => {
            if state.is_submitting() {
                state.reject_submit(SUBMIT_FAILED_MESSAGE.to_string());
            }
            Vec::new()
        }
        Msg::PollResponded { seq, snapshot } => {
            if !state.accepts_poll(seq) || state.import_id() != Some(snapshot.import_id.as_str())
            {
                return (state, Vec::new());
            }
            let import_id = snapshot.import_id.clone();
            if state.apply_poll(seq, snapshot) {
                vec![Effect::StopPolling {
                    import_id,
                    reason: StopReason::Terminal,
                }]
            } else {
                Vec::new()
            }
        }
        Msg::PollFailed { seq, message } => {
            if !state.accepts_poll(seq) {
                return (state, Vec::new());
            }
            state.fail_poll(seq, message);
            match state.import_id() {
                Some(import_id) => vec![Effect::StopPolling {
                    import_id: import_id.to_string(),
                    reason: StopReason::FetchFailed,
                }],
                None => Vec::new(),
            }
        }
        Msg::DismissClicked => {
            if !state.can_dismiss() {
                return (state, Vec::new());
            }
            state.close();
            vec![Effect::CloseMonitor]
        }
        Msg::ViewClosed => {
            let import_id = state.import_id().map(ToOwned::to_owned);
            let was_polling = state.is_polling();
            state.close();
            let mut effects = Vec::with_capacity(2);
            if let (true, Some(import_id)) = (was_polling, import_id) {
                effects.push(Effect::StopPolling {
                    import_id,
                    reason: StopReason::ViewClosed,
                });
            }
            effects.push(Effect::CloseMonitor);
            effects
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
