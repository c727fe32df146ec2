use std::sync::mpsc;

use pitwall_core::{Effect, Msg};
use pitwall_engine::{EngineEvent, EngineHandle, EventSink};
use pitwall_logging::{pitwall_info, pitwall_warn};

/// Executes core effects against the engine.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ProbeSession { session_id } => {
                    pitwall_info!("Checking existing results for session {}", session_id);
                    self.engine.probe_session(session_id);
                }
                Effect::SubmitImport(request) => {
                    pitwall_info!(
                        "SubmitImport session_id={} type={} process={} url={}",
                        request.session_id,
                        request.import_type,
                        request.process_type,
                        request.url
                    );
                    self.engine.submit(request);
                }
                Effect::StartPolling { import_id } => {
                    self.engine.watch(import_id);
                }
                Effect::StopPolling { import_id, reason } => {
                    pitwall_info!("Stop polling import {} ({:?})", import_id, reason);
                    self.engine.stop_watching(import_id);
                }
                Effect::CloseMonitor => pitwall_info!("Import monitor closed"),
            }
        }
    }
}

/// Feeds engine events back into the app loop as messages.
pub struct MsgSink {
    msg_tx: mpsc::Sender<Msg>,
}

impl MsgSink {
    pub fn new(msg_tx: mpsc::Sender<Msg>) -> Self {
        Self { msg_tx }
    }
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.msg_tx.send(map_event(event));
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ProbeCompleted { session_id, result } => match result {
            Ok(existing_results) => Msg::ProbeSucceeded { existing_results },
            Err(err) => {
                pitwall_warn!("Results probe for session {} failed: {}", session_id, err);
                Msg::ProbeFailed
            }
        },
        EngineEvent::SubmitCompleted { result } => match result {
            Ok(snapshot) => Msg::SubmitSucceeded(snapshot),
            Err(err) => {
                pitwall_warn!("Import submission failed: {}", err);
                Msg::SubmitFailed {
                    message: err.to_string(),
                }
            }
        },
        EngineEvent::PollCompleted {
            import_id: _,
            seq,
            result,
        } => match result {
            Ok(snapshot) => Msg::PollResponded { seq, snapshot },
            Err(err) => Msg::PollFailed {
                seq,
                message: err.to_string(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitwall_core::{ImportStatus, JobSnapshot};
    use pitwall_engine::{ApiError, ApiFailureKind};
    use pretty_assertions::assert_eq;

    fn api_error(kind: ApiFailureKind) -> ApiError {
        ApiError {
            kind,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn probe_results_map_to_probe_messages() {
        let ok = map_event(EngineEvent::ProbeCompleted {
            session_id: 42,
            result: Ok(3),
        });
        assert_eq!(ok, Msg::ProbeSucceeded { existing_results: 3 });

        let failed = map_event(EngineEvent::ProbeCompleted {
            session_id: 42,
            result: Err(api_error(ApiFailureKind::Network)),
        });
        assert_eq!(failed, Msg::ProbeFailed);
    }

    #[test]
    fn poll_results_keep_their_sequence_number() {
        let snapshot = JobSnapshot::new("17", ImportStatus::InProgress);
        let ok = map_event(EngineEvent::PollCompleted {
            import_id: "17".to_string(),
            seq: 4,
            result: Ok(snapshot.clone()),
        });
        assert_eq!(ok, Msg::PollResponded { seq: 4, snapshot });

        let failed = map_event(EngineEvent::PollCompleted {
            import_id: "17".to_string(),
            seq: 5,
            result: Err(api_error(ApiFailureKind::HttpStatus(502))),
        });
        match failed {
            Msg::PollFailed { seq, message } => {
                assert_eq!(seq, 5);
                assert!(message.contains("502"), "{message}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn sink_forwards_to_channel() {
        let (tx, rx) = mpsc::channel();
        let sink = MsgSink::new(tx);
        sink.emit(EngineEvent::SubmitCompleted {
            result: Err(api_error(ApiFailureKind::Unauthorized)),
        });
        assert!(matches!(rx.try_recv(), Ok(Msg::SubmitFailed { .. })));
    }
}
