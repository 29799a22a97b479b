use chrono::NaiveDate;
use serde::Serialize;
use shared::protocol::{PartUsage, RevenueReport, StatusCount};

use crate::{error::ServiceResult, transport::ApiTransport, validation::ValidationError};

/// Inclusive date range sent as `from`/`to` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ReportPeriod {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ValidationError> {
        if from > to {
            return Err(ValidationError::new(
                "from",
                "Start date must not be after end date",
            ));
        }
        Ok(Self { from, to })
    }
}

#[derive(Debug, Clone)]
pub struct ReportService {
    transport: ApiTransport,
}

impl ReportService {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn revenue(&self, period: ReportPeriod) -> ServiceResult<RevenueReport> {
        self.transport
            .get_with_query(
                "/api/reports/revenue",
                &period,
                "Failed to load revenue report",
            )
            .await
    }

    pub async fn parts_usage(&self, period: ReportPeriod) -> ServiceResult<Vec<PartUsage>> {
        self.transport
            .get_with_query(
                "/api/reports/parts-usage",
                &period,
                "Failed to load parts usage report",
            )
            .await
    }

    pub async fn appointments_summary(&self) -> ServiceResult<Vec<StatusCount>> {
        self.transport
            .get(
                "/api/reports/appointments-summary",
                "Failed to load appointment summary",
            )
            .await
    }
}
