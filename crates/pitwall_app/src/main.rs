mod cli;
mod commands;
mod error;
mod platform;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pitwall_core::Page;
use pitwall_engine::{ApiKey, ApiSettings, NewCircuit};
use pitwall_logging::{pitwall_debug, LogDestination};

use cli::{CircuitCommand, Cli, Command, SeriesCommand};
use commands::{auth, catalog, import, Context};
use error::AppError;
use platform::persistence::CredentialStore;

fn main() -> ExitCode {
    // Real environment variables win over `.env` entries.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    pitwall_logging::initialize(log_destination(cli.log_file.clone()), cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            pitwall_debug!("Exiting with error: {:?}", err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn log_destination(log_file: Option<PathBuf>) -> LogDestination {
    match log_file {
        Some(path) => LogDestination::Both(path),
        None => LogDestination::Terminal,
    }
}

fn run(cli: Cli) -> Result<ExitCode, AppError> {
    let store = CredentialStore::default_location()?;
    let settings = ApiSettings {
        base_url: cli.api_base_url,
        ..ApiSettings::default()
    };

    let command = match cli.command {
        Command::Login { key } => {
            auth::login(&Context::new(settings, None)?, &store, &key)?;
            return Ok(ExitCode::SUCCESS);
        }
        Command::Logout => {
            auth::logout(&store)?;
            return Ok(ExitCode::SUCCESS);
        }
        command => command,
    };

    let key = match cli.api_key.and_then(ApiKey::new) {
        Some(key) => Some(key),
        None => store.load()?,
    };
    let ctx = Context::new(settings, key)?;

    match command {
        Command::Series(SeriesCommand::List { filter }) => catalog::list_series(&ctx, &filter.filter)?,
        Command::Series(SeriesCommand::Create { name }) => catalog::create_series(&ctx, &name)?,
        Command::Circuits(CircuitCommand::List { filter }) => {
            catalog::list_circuits(&ctx, &filter.filter)?
        }
        Command::Circuits(CircuitCommand::Create {
            name,
            length_meters,
            country,
            description,
        }) => catalog::create_circuit(
            &ctx,
            NewCircuit {
                name,
                length_meters,
                country,
                description,
            },
        )?,
        Command::Events {
            series_id,
            year,
            filter,
        } => catalog::list_events(&ctx, series_id, year, &filter.filter)?,
        Command::Sessions { event_id, filter } => {
            catalog::list_sessions(&ctx, event_id, &filter.filter)?
        }
        Command::Results {
            session_id,
            offset,
            limit,
            filter,
        } => catalog::list_results(&ctx, session_id, Page::new(offset, limit), &filter.filter)?,
        Command::Import(args) => return import::run(&ctx, args),
        Command::Login { .. } | Command::Logout => {}
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_adds_file_output_to_terminal() {
        assert_eq!(log_destination(None), LogDestination::Terminal);
        assert_eq!(
            log_destination(Some(PathBuf::from("pitwall.log"))),
            LogDestination::Both(PathBuf::from("pitwall.log"))
        );
    }
}
