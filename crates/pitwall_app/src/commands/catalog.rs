//! Read-only listings and the admin create commands.

use pitwall_core::{filter_rows, Page, SessionId};
use pitwall_engine::{
    ApiError, ApiFailureKind, CircuitDto, EventDto, NewCircuit, ResultEntryDto, SeriesDto,
    SessionDto,
};

use super::Context;
use crate::error::AppError;
use crate::platform::{cell, Table};

pub fn list_series(ctx: &Context, filter: &str) -> Result<(), AppError> {
    let series = ctx.block_on(ctx.api.list_series(ctx.key()))?;
    print_table(series_table(&filter_rows(&series, filter)));
    Ok(())
}

pub fn create_series(ctx: &Context, name: &str) -> Result<(), AppError> {
    let key = ctx.require_key()?;
    ctx.block_on(ctx.api.create_series(key, name))
        .map_err(|err| creation_error(err, "Series"))?;
    println!("Created series {name:?}");
    Ok(())
}

pub fn list_circuits(ctx: &Context, filter: &str) -> Result<(), AppError> {
    let circuits = ctx.block_on(ctx.api.list_circuits(ctx.key()))?;
    print_table(circuit_table(&filter_rows(&circuits, filter)));
    Ok(())
}

pub fn create_circuit(ctx: &Context, circuit: NewCircuit) -> Result<(), AppError> {
    let key = ctx.require_key()?;
    ctx.block_on(ctx.api.create_circuit(key, &circuit))
        .map_err(|err| creation_error(err, "Circuit"))?;
    println!("Created circuit {:?}", circuit.name);
    Ok(())
}

pub fn list_events(ctx: &Context, series_id: i64, year: i32, filter: &str) -> Result<(), AppError> {
    let events = ctx.block_on(ctx.api.list_events(ctx.key(), series_id, year))?;
    print_table(event_table(&filter_rows(&events, filter)));
    Ok(())
}

pub fn list_sessions(ctx: &Context, event_id: i64, filter: &str) -> Result<(), AppError> {
    let response = ctx.block_on(ctx.api.list_sessions(ctx.key(), event_id))?;
    if !response.event_name.is_empty() {
        println!("{}", response.event_name);
    }
    print_table(session_table(&filter_rows(&response.sessions, filter)));
    Ok(())
}

pub fn list_results(
    ctx: &Context,
    session_id: SessionId,
    page: Page,
    filter: &str,
) -> Result<(), AppError> {
    let view = ctx.block_on(ctx.api.list_results(ctx.key(), session_id, page))?;
    print_table(result_table(&filter_rows(&view.rows, filter)));
    if view.has_more {
        println!("More results: --offset {}", view.page.next().offset);
    }
    Ok(())
}

fn creation_error(err: ApiError, what: &'static str) -> AppError {
    match err.kind {
        ApiFailureKind::Conflict => AppError::AlreadyExists(what),
        ApiFailureKind::Unauthorized => AppError::InvalidApiKey,
        _ => AppError::CreateFailed(err),
    }
}

fn print_table(table: Table) {
    if table.is_empty() {
        println!("No matching rows.");
    } else {
        print!("{}", table.render());
    }
}

fn series_table(rows: &[&SeriesDto]) -> Table {
    let mut table = Table::new(vec!["ID", "NAME", "LATEST YEAR"]);
    for series in rows {
        table.push_row(vec![
            series.id.to_string(),
            series.name.clone(),
            cell(series.latest_year()),
        ]);
    }
    table
}

fn circuit_table(rows: &[&CircuitDto]) -> Table {
    let mut table = Table::new(vec!["ID", "NAME", "COUNTRY", "LENGTH (m)"]);
    for circuit in rows {
        table.push_row(vec![
            circuit.id.to_string(),
            circuit.name.clone(),
            cell(circuit.country.as_deref()),
            cell(circuit.length_meters.map(|m| format!("{m:.0}"))),
        ]);
    }
    table
}

fn event_table(rows: &[&EventDto]) -> Table {
    let mut table = Table::new(vec!["ID", "NAME", "YEAR", "START", "END"]);
    for event in rows {
        table.push_row(vec![
            event.event_id.to_string(),
            event.name.clone(),
            event.year.to_string(),
            cell(event.start_date.as_deref()),
            cell(event.end_date.as_deref()),
        ]);
    }
    table
}

fn session_table(rows: &[&SessionDto]) -> Table {
    let mut table = Table::new(vec!["ID", "NAME", "TYPE", "START"]);
    for session in rows {
        table.push_row(vec![
            session.id.to_string(),
            session.name.clone(),
            cell(session.session_type.as_deref()),
            cell(session.start_datetime.as_deref()),
        ]);
    }
    table
}

fn result_table(rows: &[&ResultEntryDto]) -> Table {
    let mut table = Table::new(vec![
        "POS", "#", "TEAM", "STATUS", "LAPS", "TIME", "GAP", "FASTEST",
    ]);
    for entry in rows {
        table.push_row(vec![
            cell(entry.position),
            cell(entry.car_number.as_deref()),
            entry.team_name().to_string(),
            cell(entry.status.as_deref()),
            cell(entry.laps),
            cell(entry.total_time.as_deref()),
            cell(entry.gap_first.as_deref()),
            cell(entry.fl_time.as_deref()),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn error(kind: ApiFailureKind) -> ApiError {
        ApiError {
            kind,
            message: String::new(),
        }
    }

    #[test]
    fn conflict_reads_as_already_exists() {
        let err = creation_error(error(ApiFailureKind::Conflict), "Series");
        assert_eq!(err.to_string(), "Series already exists");
        let err = creation_error(error(ApiFailureKind::Conflict), "Circuit");
        assert_eq!(err.to_string(), "Circuit already exists");
    }

    #[test]
    fn other_creation_failures_are_generic() {
        let err = creation_error(error(ApiFailureKind::HttpStatus(500)), "Series");
        assert_eq!(err.to_string(), "Something went wrong: http status 500");
        assert!(matches!(
            creation_error(error(ApiFailureKind::Unauthorized), "Series"),
            AppError::InvalidApiKey
        ));
    }

    #[test]
    fn filtered_series_table_keeps_matching_rows() {
        let series = vec![
            SeriesDto {
                id: 1,
                name: "IMSA WeatherTech".to_string(),
                years: vec![2023, 2025, 2024],
            },
            SeriesDto {
                id: 2,
                name: "FIA WEC".to_string(),
                years: Vec::new(),
            },
        ];
        let table = series_table(&filter_rows(&series, "imsa"));
        assert_eq!(
            table.render(),
            "ID  NAME              LATEST YEAR\n--  ----------------  -----------\n1   IMSA WeatherTech  2025\n"
        );
    }

    #[test]
    fn circuit_length_is_rounded() {
        let circuits = vec![CircuitDto {
            id: 3,
            name: "Spa".to_string(),
            length_meters: Some(7004.4),
            country: None,
            description: None,
        }];
        let rendered = circuit_table(&filter_rows(&circuits, "")).render();
        assert!(rendered.ends_with("3   Spa   -        7004\n"), "{rendered}");
    }
}
