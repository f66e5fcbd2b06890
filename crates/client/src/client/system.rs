//! Dashboard statistics and system status endpoints.

use crate::client::{CallOptions, VmsClient};
use crate::error::{ClientError, Result};
use crate::models::{self, DashboardStats, SystemStatus};

impl VmsClient {
    /// Aggregated dashboard statistics.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let payload = self
            .call("/Interface/Dashboard/Stats", CallOptions::get())
            .await?;
        models::normalize_record(payload)
            .ok_or_else(|| ClientError::MalformedResponse("unusable stats payload".to_string()))
    }

    /// Upstream server health and resource usage.
    pub async fn system_status(&self) -> Result<SystemStatus> {
        let payload = self
            .call("/Interface/System/Status", CallOptions::get())
            .await?;
        models::normalize_record(payload)
            .ok_or_else(|| ClientError::MalformedResponse("unusable status payload".to_string()))
    }
}
