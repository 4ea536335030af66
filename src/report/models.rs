use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::student::models::Student;

/// Body of a report generation request.
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a validation error rather than a JSON error.
#[derive(Debug, Deserialize, Serialize, Clone, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    pub student: Option<Student>,
    #[schema(example = "Your Wealth Code\nYou were born to build.\n========================\nYour Path\nKeep going.")]
    pub report_content: Option<String>,
    /// Password the email workflow sends alongside the report.
    #[schema(example = "1990-01-15")]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportResponse {
    pub success: bool,
    #[schema(example = "Report generated and sent")]
    pub message: String,
    #[schema(example = "ISIS-20250701-0001")]
    pub order_number: String,
}

impl GenerateReportResponse {
    pub fn sent(order_number: impl Into<String>) -> Self {
        Self {
            success: true,
            message: "Report generated and sent".to_string(),
            order_number: order_number.into(),
        }
    }
}
