use std::sync::Once;

use pitwall_core::{
    update, AppState, Effect, ImportStatus, ImportType, JobSnapshot, MonitorOutcome, Msg,
    StatusIndicator, StopReason, FETCH_FAILED_MESSAGE,
};
use pretty_assertions::assert_eq;

const IMPORT_ID: &str = "314";

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(pitwall_logging::initialize_for_tests);
}

/// Drives a monitor up to the point where the job is accepted and polling.
fn polling_monitor() -> AppState {
    let (state, _) = update(AppState::new(), Msg::MonitorOpened { session_id: 42 });
    let (state, _) = update(state, Msg::InputChanged("http://x/results.html".to_string()));
    let (state, _) = update(state, Msg::ImportTypeSelected(ImportType::Imsa));
    let (state, _) = update(state, Msg::ProbeSucceeded { existing_results: 0 });
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, effects) = update(
        state,
        Msg::SubmitSucceeded(JobSnapshot::new(IMPORT_ID, ImportStatus::Pending)),
    );
    assert_eq!(effects.len(), 1);
    state
}

fn respond(state: AppState, seq: u64, status: ImportStatus) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::PollResponded {
            seq,
            snapshot: JobSnapshot::new(IMPORT_ID, status),
        },
    )
}

fn stop(reason: StopReason) -> Effect {
    Effect::StopPolling {
        import_id: IMPORT_ID.to_string(),
        reason,
    }
}

#[test]
fn pending_to_complete_gates_dismiss_until_terminal() {
    init_logging();
    let script = [
        ImportStatus::Pending,
        ImportStatus::Pending,
        ImportStatus::InProgress,
        ImportStatus::Complete,
    ];
    let mut state = polling_monitor();
    let mut dismiss_history = Vec::new();
    let mut stop_effects = Vec::new();

    for (index, status) in script.into_iter().enumerate() {
        let (next, effects) = respond(state, index as u64 + 1, status);
        state = next;
        dismiss_history.push(state.view().can_dismiss);
        stop_effects.extend(effects);
    }

    assert_eq!(dismiss_history, vec![false, false, false, true]);
    assert_eq!(stop_effects, vec![stop(StopReason::Terminal)]);
    assert_eq!(
        state.view().indicator,
        StatusIndicator::Succeeded {
            completion_time_ms: None
        }
    );
    assert_eq!(state.outcome(), MonitorOutcome::Completed);
}

#[test]
fn in_progress_renders_processing() {
    init_logging();
    let (state, effects) = respond(polling_monitor(), 1, ImportStatus::InProgress);
    assert!(effects.is_empty());
    assert_eq!(state.view().indicator, StatusIndicator::Processing);
    assert!(state.view().polling);
}

#[test]
fn failure_status_shows_backend_detail() {
    init_logging();
    let mut snapshot = JobSnapshot::new(IMPORT_ID, ImportStatus::Failed);
    snapshot.error = Some("no classification table found".to_string());
    let (state, effects) = update(polling_monitor(), Msg::PollResponded { seq: 1, snapshot });

    assert_eq!(effects, vec![stop(StopReason::Terminal)]);
    let view = state.view();
    assert_eq!(
        view.indicator,
        StatusIndicator::Failed {
            status: "FAILED".to_string(),
            detail: Some("no classification table found".to_string()),
        }
    );
    assert!(view.can_dismiss);
    assert_eq!(state.outcome(), MonitorOutcome::JobFailed);
}

#[test]
fn error_status_without_detail_is_a_failure() {
    init_logging();
    let (state, effects) = respond(polling_monitor(), 1, ImportStatus::Error);
    assert_eq!(effects, vec![stop(StopReason::Terminal)]);
    assert_eq!(
        state.view().indicator,
        StatusIndicator::Failed {
            status: "ERROR".to_string(),
            detail: None,
        }
    );
}

#[test]
fn unknown_status_is_terminal_and_neutral() {
    init_logging();
    let (state, effects) = respond(
        polling_monitor(),
        1,
        ImportStatus::from_wire("PARTIALLY_IMPORTED"),
    );

    assert_eq!(effects, vec![stop(StopReason::Terminal)]);
    let view = state.view();
    assert_eq!(
        view.indicator,
        StatusIndicator::Unknown {
            raw: "PARTIALLY_IMPORTED".to_string()
        }
    );
    assert_eq!(view.indicator.label(), "Unknown status: PARTIALLY_IMPORTED");
    assert!(view.can_dismiss);
    assert_eq!(state.outcome(), MonitorOutcome::UnknownStatus);
}

#[test]
fn nothing_is_applied_after_terminal() {
    init_logging();
    let (mut state, _) = respond(polling_monitor(), 1, ImportStatus::Complete);
    assert!(state.consume_dirty());

    let (mut next, effects) = respond(state.clone(), 2, ImportStatus::Pending);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert_eq!(
        next.view().indicator,
        StatusIndicator::Succeeded {
            completion_time_ms: None
        }
    );

    let (next, effects) = update(
        state.clone(),
        Msg::PollFailed {
            seq: 3,
            message: "network error".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(next.outcome(), MonitorOutcome::Completed);
    assert!(!state.consume_dirty());
}

#[test]
fn stale_response_is_discarded() {
    init_logging();
    let (state, _) = respond(polling_monitor(), 2, ImportStatus::InProgress);

    // Response to the first request arrives after the second one.
    let (state, effects) = respond(state, 1, ImportStatus::Pending);
    assert!(effects.is_empty());
    assert_eq!(state.view().indicator, StatusIndicator::Processing);

    let (state, _) = respond(state, 2, ImportStatus::Pending);
    assert_eq!(state.view().indicator, StatusIndicator::Processing);

    let (state, effects) = respond(state, 3, ImportStatus::Complete);
    assert_eq!(effects, vec![stop(StopReason::Terminal)]);
    assert!(state.view().can_dismiss);
}

#[test]
fn response_for_another_job_is_ignored() {
    init_logging();
    let (state, effects) = update(
        polling_monitor(),
        Msg::PollResponded {
            seq: 1,
            snapshot: JobSnapshot::new("999", ImportStatus::Complete),
        },
    );
    assert!(effects.is_empty());
    assert!(state.view().polling);
}

#[test]
fn transport_error_halts_polling_with_distinct_message() {
    init_logging();
    let (state, _) = respond(polling_monitor(), 1, ImportStatus::InProgress);
    let (state, effects) = update(
        state,
        Msg::PollFailed {
            seq: 2,
            message: "http status 502".to_string(),
        },
    );

    assert_eq!(effects, vec![stop(StopReason::FetchFailed)]);
    let view = state.view();
    assert_eq!(
        view.indicator,
        StatusIndicator::FetchFailed {
            message: FETCH_FAILED_MESSAGE.to_string(),
            detail: "http status 502".to_string(),
        }
    );
    assert!(!view.polling);
    assert!(view.can_dismiss);
    assert_eq!(state.outcome(), MonitorOutcome::FetchFailed);

    // A late success for an older request does not revive polling.
    let (state, effects) = respond(state, 1, ImportStatus::Complete);
    assert!(effects.is_empty());
    assert_eq!(state.outcome(), MonitorOutcome::FetchFailed);
}

#[test]
fn dismiss_is_ignored_while_pending() {
    init_logging();
    let (state, effects) = update(polling_monitor(), Msg::DismissClicked);
    assert!(effects.is_empty());
    assert!(!state.is_closed());

    let (state, _) = respond(state, 1, ImportStatus::Complete);
    let (state, effects) = update(state, Msg::DismissClicked);
    assert_eq!(effects, vec![Effect::CloseMonitor]);
    assert!(state.is_closed());
}

#[test]
fn closing_view_while_pending_stops_poller() {
    init_logging();
    let (state, _) = respond(polling_monitor(), 1, ImportStatus::InProgress);
    let (state, effects) = update(state, Msg::ViewClosed);

    assert_eq!(
        effects,
        vec![stop(StopReason::ViewClosed), Effect::CloseMonitor]
    );
    assert!(state.is_closed());
    assert_eq!(state.outcome(), MonitorOutcome::Detached);

    // Responses still in flight after teardown change nothing.
    let (state, effects) = respond(state, 2, ImportStatus::Complete);
    assert!(effects.is_empty());
    assert_eq!(state.outcome(), MonitorOutcome::Detached);
}

#[test]
fn closing_view_after_terminal_only_closes() {
    init_logging();
    let (state, _) = respond(polling_monitor(), 1, ImportStatus::Complete);
    let (_state, effects) = update(state, Msg::ViewClosed);
    assert_eq!(effects, vec![Effect::CloseMonitor]);
}
