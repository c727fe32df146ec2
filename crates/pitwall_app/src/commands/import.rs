use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use pitwall_core::MonitorOutcome;
use pitwall_engine::{ImportApi, MonitorSettings};
use pitwall_logging::pitwall_info;

use super::Context;
use crate::cli::ImportArgs;
use crate::error::AppError;
use crate::platform::{run_monitor, MonitorOptions};

pub fn run(ctx: &Context, args: ImportArgs) -> Result<ExitCode, AppError> {
    let key = ctx.require_key()?.clone();
    let settings = MonitorSettings {
        poll_interval: Duration::from_secs(args.poll_interval_secs),
    };
    let api: Arc<dyn ImportApi> = ctx.api.clone();
    let outcome = run_monitor(
        api,
        key,
        settings,
        MonitorOptions {
            session_id: args.session_id,
            url: args.url,
            import_type: args.import_type,
            detach_after: args.detach_after_secs.map(Duration::from_secs),
        },
    )?;
    pitwall_info!("Import monitor finished: {:?}", outcome);
    Ok(ExitCode::from(exit_status(outcome)))
}

/// 0 when the job completed, 2 when the backend reported a failure or an
/// unrecognised status, 3 when its fate is unknown to us.
fn exit_status(outcome: MonitorOutcome) -> u8 {
    match outcome {
        MonitorOutcome::Completed => 0,
        MonitorOutcome::JobFailed | MonitorOutcome::UnknownStatus => 2,
        MonitorOutcome::FetchFailed
        | MonitorOutcome::Detached
        | MonitorOutcome::ProbeFailed
        | MonitorOutcome::SubmissionFailed
        | MonitorOutcome::NotSubmitted => 3,
    }
}
