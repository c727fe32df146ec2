use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use pitwall_core::{ImportRequest, SessionId};
use pitwall_logging::{pitwall_debug, pitwall_info};

use crate::poller::{spawn_status_poller, EventSink, MonitorSettings, PollHandle};
use crate::{ApiKey, EngineEvent, ImportApi};

enum EngineCommand {
    Probe { session_id: SessionId },
    Submit { request: ImportRequest },
    Watch { import_id: String },
    StopWatching { import_id: String },
}

/// Runs backend calls and pollers on a background tokio runtime.
///
/// Results are delivered to the [`EventSink`]. Dropping the handle shuts the
/// runtime down and cancels every poller it started.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        api: Arc<dyn ImportApi>,
        key: ApiKey,
        settings: MonitorSettings,
        sink: Arc<dyn EventSink>,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("pitwall-io")
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("pitwall-engine".to_string())
            .spawn(move || {
                let mut pollers: HashMap<String, PollHandle> = HashMap::new();
                let mut retired: HashSet<String> = HashSet::new();

                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::Watch { import_id } => {
                            // Polling never restarts for a job once it was watched.
                            if pollers.contains_key(&import_id) || retired.contains(&import_id) {
                                pitwall_debug!("Ignoring repeated watch of import {}", import_id);
                                continue;
                            }
                            let _guard = runtime.enter();
                            let handle = spawn_status_poller(
                                api.clone(),
                                key.clone(),
                                import_id.clone(),
                                settings.poll_interval,
                                sink.clone(),
                            );
                            pollers.insert(import_id, handle);
                        }
                        EngineCommand::StopWatching { import_id } => {
                            if let Some(handle) = pollers.remove(&import_id) {
                                handle.cancel();
                            }
                            retired.insert(import_id);
                        }
                        command => {
                            runtime.spawn(handle_command(
                                api.clone(),
                                key.clone(),
                                command,
                                sink.clone(),
                            ));
                        }
                    }
                }

                pitwall_info!("Engine shutting down, cancelling {} pollers", pollers.len());
                pollers.clear();
                runtime.shutdown_timeout(Duration::from_secs(1));
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn probe_session(&self, session_id: SessionId) {
        let _ = self.cmd_tx.send(EngineCommand::Probe { session_id });
    }

    pub fn submit(&self, request: ImportRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit { request });
    }

    pub fn watch(&self, import_id: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Watch {
            import_id: import_id.into(),
        });
    }

    pub fn stop_watching(&self, import_id: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::StopWatching {
            import_id: import_id.into(),
        });
    }
}

async fn handle_command(
    api: Arc<dyn ImportApi>,
    key: ApiKey,
    command: EngineCommand,
    sink: Arc<dyn EventSink>,
) {
    match command {
        EngineCommand::Probe { session_id } => {
            let result = api.session_result_count(&key, session_id).await;
            sink.emit(EngineEvent::ProbeCompleted { session_id, result });
        }
        EngineCommand::Submit { request } => {
            pitwall_info!(
                "Submitting {} {} import for session {}",
                request.import_type,
                request.process_type,
                request.session_id
            );
            let result = api.submit_import(&key, &request).await;
            sink.emit(EngineEvent::SubmitCompleted { result });
        }
        EngineCommand::Watch { .. } | EngineCommand::StopWatching { .. } => {}
    }
}
