//! Pitwall engine: results API client, import status poller and effect execution.
mod catalog;
mod client;
mod dto;
mod engine;
mod persist;
mod poller;
mod types;

pub use client::{ApiSettings, ImportApi, ReqwestApi, API_KEY_HEADER, DEFAULT_BASE_URL};
pub use dto::{
    CarEntryDto, CircuitDto, EventDto, ImportRequestBody, ImportResponseDto, NewCircuit,
    NewSeries, ResultEntryDto, ResultsResponseDto, SeriesDto, SessionDto, SessionsResponseDto,
};
pub use engine::EngineHandle;
pub use persist::{ensure_dir, AtomicFileWriter, PersistError};
pub use poller::{
    spawn_status_poller, ChannelEventSink, EventSink, MonitorSettings, PollHandle,
    DEFAULT_POLL_INTERVAL,
};
pub use types::{ApiError, ApiFailureKind, ApiKey, EngineEvent};
