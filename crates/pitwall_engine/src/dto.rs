//! JSON shapes exchanged with the results API.
use pitwall_core::{ImportRequest, ImportStatus, JobSnapshot, Searchable, SessionId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequestBody<'a> {
    pub url: &'a str,
    pub session_id: SessionId,
    pub import_type: &'static str,
    pub process_type: &'static str,
}

impl<'a> From<&'a ImportRequest> for ImportRequestBody<'a> {
    fn from(request: &'a ImportRequest) -> Self {
        Self {
            url: &request.url,
            session_id: request.session_id,
            import_type: request.import_type.as_str(),
            process_type: request.process_type.as_str(),
        }
    }
}

/// Submission and status responses share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponseDto {
    pub import_id: String,
    pub status: String,
    #[serde(default)]
    pub completion_time: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub import_type: Option<String>,
    #[serde(default)]
    pub process_type: Option<String>,
    #[serde(default)]
    pub session_id: Option<SessionId>,
}

impl From<ImportResponseDto> for JobSnapshot {
    fn from(dto: ImportResponseDto) -> Self {
        JobSnapshot {
            import_id: dto.import_id,
            status: ImportStatus::from_wire(&dto.status),
            error: dto.error.filter(|e| !e.trim().is_empty()),
            completion_time_ms: dto.completion_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsResponseDto {
    #[serde(default)]
    pub session_id: Option<SessionId>,
    #[serde(default)]
    pub results: Option<Vec<ResultEntryDto>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntryDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub car_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub laps: Option<u32>,
    #[serde(default)]
    pub total_time: Option<String>,
    #[serde(default)]
    pub gap_first: Option<String>,
    #[serde(default)]
    pub fl_time: Option<String>,
    #[serde(default)]
    pub car_entry: Option<CarEntryDto>,
}

impl ResultEntryDto {
    pub fn team_name(&self) -> &str {
        self.car_entry
            .as_ref()
            .and_then(|entry| entry.team_name.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarEntryDto {
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub class_id: Option<i64>,
}

impl Searchable for ResultEntryDto {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.car_number.as_deref().unwrap_or(""),
            self.status.as_deref().unwrap_or(""),
            self.team_name(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub years: Vec<i32>,
}

impl SeriesDto {
    pub fn latest_year(&self) -> Option<i32> {
        self.years.iter().copied().max()
    }
}

impl Searchable for SeriesDto {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSeries<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub length_meters: Option<f64>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Searchable for CircuitDto {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.country.as_deref().unwrap_or(""),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCircuit {
    pub name: String,
    pub length_meters: f64,
    pub country: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub event_id: i64,
    pub series_id: i64,
    pub name: String,
    pub year: i32,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Searchable for EventDto {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.description.as_deref().unwrap_or(""),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionsResponseDto {
    pub event_id: i64,
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub sessions: Vec<SessionDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub id: SessionId,
    pub name: String,
    #[serde(default, rename = "type")]
    pub session_type: Option<String>,
    #[serde(default)]
    pub start_datetime: Option<String>,
    #[serde(default)]
    pub duration_seconds: Option<u64>,
}

impl Searchable for SessionDto {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.session_type.as_deref().unwrap_or(""),
        ]
    }
}
