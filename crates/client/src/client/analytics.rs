//! Video-analytics endpoints.

use serde_json::{Value, json};

use crate::client::{CallOptions, VmsClient};
use crate::error::Result;
use crate::models::{self, AnalyticsConfig, AnalyticsCounter, AnalyticsEvent, EventSearchParams};

/// How many events the recent-events view shows.
const RECENT_EVENT_LIMIT: usize = 10;

impl VmsClient {
    /// Analytics configurations (detection rule sets).
    pub async fn get_analytics_configurations(&self) -> Result<Vec<AnalyticsConfig>> {
        let payload = self
            .call(
                "/Interface/Analytics/GetAnalyticsConfigurations",
                CallOptions::get().data_key("AnalyticsConfigurations"),
            )
            .await?;
        Ok(models::normalize_records(payload))
    }

    /// Analytics counters with their current values.
    pub async fn get_counters(&self) -> Result<Vec<AnalyticsCounter>> {
        let payload = self
            .call(
                "/Interface/Analytics/GetCounters",
                CallOptions::get().data_key("Counters"),
            )
            .await?;
        Ok(models::normalize_records(payload))
    }

    /// Reset a counter to zero. The upstream reply is passed through.
    pub async fn reset_counter(&self, id: &str) -> Result<Value> {
        self.call(
            "/Interface/Analytics/ResetCounter",
            CallOptions::post().body(json!({"counterId": id})),
        )
        .await
    }

    /// Search analytics events with the given filters.
    pub async fn search_events(&self, params: &EventSearchParams) -> Result<Vec<AnalyticsEvent>> {
        let options = CallOptions::get()
            .query_opt("StartDate", params.start_date.as_deref())
            .query_opt("EndDate", params.end_date.as_deref())
            .query_opt("Cameras", params.cameras.as_deref())
            .query_opt("EventTypes", params.event_types.as_deref())
            .data_key("Events");
        let payload = self.call("/Interface/Analytics/Search", options).await?;
        Ok(models::normalize_records(payload))
    }

    /// The most recent events, capped for the dashboard ticker.
    pub async fn recent_events(&self) -> Result<Vec<AnalyticsEvent>> {
        let mut events = self.search_events(&EventSearchParams::default()).await?;
        events.truncate(RECENT_EVENT_LIMIT);
        Ok(events)
    }

    /// Raw chart series for the dashboard. The shape varies per deployment,
    /// so it is not normalized.
    pub async fn chart_data(&self) -> Result<Value> {
        self.call("/Interface/Analytics/Chart", CallOptions::get())
            .await
    }
}
