use pitwall_core::{Page, PageView, SessionId};
use pitwall_logging::pitwall_info;
use reqwest::Method;

use crate::dto::{
    CircuitDto, EventDto, NewCircuit, NewSeries, ResultEntryDto, ResultsResponseDto, SeriesDto,
    SessionsResponseDto,
};
use crate::{ApiError, ApiKey, ReqwestApi};

/// Read-only catalogue views and the admin create calls.
impl ReqwestApi {
    /// Succeeds only when the backend accepts `key`.
    pub async fn check_key(&self, key: &ApiKey) -> Result<(), ApiError> {
        let url = self.endpoint("auth/check")?;
        self.send(self.request(Method::GET, url, Some(key))).await?;
        Ok(())
    }

    pub async fn list_series(&self, key: Option<&ApiKey>) -> Result<Vec<SeriesDto>, ApiError> {
        let url = self.endpoint("series")?;
        self.send_json(self.request(Method::GET, url, key)).await
    }

    pub async fn create_series(&self, key: &ApiKey, name: &str) -> Result<(), ApiError> {
        let url = self.endpoint("series")?;
        let builder =
            Self::with_json_body(self.request(Method::POST, url, Some(key)), &NewSeries { name })?;
        self.send(builder).await?;
        pitwall_info!("Created series {:?}", name);
        Ok(())
    }

    pub async fn list_circuits(&self, key: Option<&ApiKey>) -> Result<Vec<CircuitDto>, ApiError> {
        let url = self.endpoint("circuits")?;
        self.send_json(self.request(Method::GET, url, key)).await
    }

    pub async fn create_circuit(&self, key: &ApiKey, circuit: &NewCircuit) -> Result<(), ApiError> {
        let url = self.endpoint("circuits")?;
        let builder = Self::with_json_body(self.request(Method::POST, url, Some(key)), circuit)?;
        self.send(builder).await?;
        pitwall_info!("Created circuit {:?}", circuit.name);
        Ok(())
    }

    pub async fn list_events(
        &self,
        key: Option<&ApiKey>,
        series_id: i64,
        year: i32,
    ) -> Result<Vec<EventDto>, ApiError> {
        let mut url = self.endpoint("events")?;
        url.query_pairs_mut()
            .append_pair("seriesId", &series_id.to_string())
            .append_pair("year", &year.to_string());
        self.send_json(self.request(Method::GET, url, key)).await
    }

    pub async fn list_sessions(
        &self,
        key: Option<&ApiKey>,
        event_id: i64,
    ) -> Result<SessionsResponseDto, ApiError> {
        let url = self.endpoint(&format!("events/{event_id}/sessions"))?;
        self.send_json(self.request(Method::GET, url, key)).await
    }

    pub async fn list_results(
        &self,
        key: Option<&ApiKey>,
        session_id: SessionId,
        page: Page,
    ) -> Result<PageView<ResultEntryDto>, ApiError> {
        let mut url = self.endpoint(&format!("sessions/{session_id}/results"))?;
        url.query_pairs_mut()
            .append_pair("offset", &page.offset.to_string())
            .append_pair("limit", &page.limit.to_string());
        let response: ResultsResponseDto = self.send_json(self.request(Method::GET, url, key)).await?;
        Ok(PageView::from_response(
            response.results.unwrap_or_default(),
            page,
        ))
    }
}
