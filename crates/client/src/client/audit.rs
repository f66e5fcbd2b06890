//! Audit log endpoints.

use crate::client::{CallOptions, VmsClient};
use crate::error::Result;
use crate::models::{self, AuditLog, AuditSearchParams};

impl VmsClient {
    /// Search audit log entries with the given filters.
    pub async fn search_audit_logs(&self, params: &AuditSearchParams) -> Result<Vec<AuditLog>> {
        let options = CallOptions::get()
            .query_opt("StartDate", params.start_date.as_deref())
            .query_opt("EndDate", params.end_date.as_deref())
            .query_opt("Category", params.category.as_deref())
            .query_opt("Keyword", params.keyword.as_deref())
            .data_key("AuditLogs");
        let payload = self.call("/Interface/Audit/Search", options).await?;
        Ok(models::normalize_records(payload))
    }
}
