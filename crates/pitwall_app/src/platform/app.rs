use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use chrono::Local;
use pitwall_core::{update, AppState, ImportType, MonitorOutcome, Msg, SessionId};
use pitwall_engine::{ApiKey, EngineHandle, ImportApi, MonitorSettings};
use pitwall_logging::pitwall_info;

use super::effects::{EffectRunner, MsgSink};
use super::ui;
use crate::error::AppError;

const TICK: Duration = Duration::from_millis(250);

pub struct MonitorOptions {
    pub session_id: SessionId,
    pub url: String,
    pub import_type: ImportType,
    pub detach_after: Option<Duration>,
}

/// Drives one import monitor to completion and reports how it ended.
///
/// The form is filled from `options` and submitted as soon as the results
/// probe allows it. Ctrl-C closes the monitor, which stops polling without
/// touching the backend job.
pub fn run_monitor(
    api: Arc<dyn ImportApi>,
    key: ApiKey,
    settings: MonitorSettings,
    options: MonitorOptions,
) -> Result<MonitorOutcome, AppError> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();

    let interrupt_tx = msg_tx.clone();
    ctrlc::set_handler(move || {
        let _ = interrupt_tx.send(Msg::ViewClosed);
    })?;

    let engine = EngineHandle::new(api, key, settings, Arc::new(MsgSink::new(msg_tx)))?;
    let mut monitor = Monitor::new(EffectRunner::new(engine));

    monitor.dispatch(Msg::MonitorOpened {
        session_id: options.session_id,
    });
    monitor.dispatch(Msg::InputChanged(options.url));
    monitor.dispatch(Msg::ImportTypeSelected(options.import_type));

    let deadline = options.detach_after.map(|after| Instant::now() + after);

    while !monitor.state.is_closed() {
        let msg = match msg_rx.recv_timeout(TICK) {
            Ok(msg) => msg,
            Err(mpsc::RecvTimeoutError::Timeout) => Msg::Tick,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        };
        monitor.dispatch(msg);

        if deadline.is_some_and(|at| Instant::now() >= at) && !monitor.state.is_closed() {
            pitwall_info!("Detaching from import monitor");
            monitor.dispatch(Msg::ViewClosed);
        }
        monitor.advance();
    }

    Ok(monitor.state.outcome())
}

struct Monitor {
    state: AppState,
    runner: EffectRunner,
    submitted: bool,
    last_frame: Vec<String>,
}

impl Monitor {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
            submitted: false,
            last_frame: Vec::new(),
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);

        if self.state.consume_dirty() {
            self.render();
        }
    }

    /// Presses the buttons a user would: submit once, dismiss when done.
    fn advance(&mut self) {
        if !self.submitted && self.state.can_submit() {
            self.submitted = true;
            self.dispatch(Msg::SubmitClicked);
        }
        if self.state.can_dismiss() && ui::render::is_settled(&self.state.view()) {
            self.dispatch(Msg::DismissClicked);
        }
    }

    fn render(&mut self) {
        let frame = ui::render::render(&self.state.view());
        if frame == self.last_frame {
            return;
        }
        let stamp = Local::now().format("%H:%M:%S");
        for line in frame.iter().filter(|line| !self.last_frame.contains(line)) {
            println!("[{stamp}] {line}");
        }
        self.last_frame = frame;
    }
}
