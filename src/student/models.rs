use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Student as sent by the dashboard when a report is requested.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[schema(example = "Ann Lee")]
    pub name: String,
    #[schema(example = "ann@example.com")]
    #[serde(default)]
    pub email: String,
    #[schema(example = "暴富方案一")]
    #[serde(default)]
    pub plan: String,
    #[schema(example = "ISIS-20250701-0001")]
    #[serde(default)]
    pub order_number: String,
    /// Order amount; carried through, not printed.
    #[schema(example = 1999)]
    #[serde(default)]
    pub amount: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, ToSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Pending,
    Sent,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Sent => "sent",
        }
    }
}

/// A paid order whose buyer is waiting for (or has received) a report.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    #[schema(value_type = Object, example = 42)]
    pub id: serde_json::Value,
    #[schema(example = "ISIS-20250701-0001")]
    pub order_number: String,
    #[schema(example = "Ann Lee")]
    pub name: String,
    #[schema(example = "ann@example.com")]
    pub email: String,
    #[schema(example = 1999)]
    pub amount: f64,
    #[schema(example = "暴富方案一")]
    pub plan: String,
    #[schema(example = "1990-01-15")]
    pub birth_date: Option<String>,
    #[schema(example = "2025-07-01T08:00:00+00:00")]
    pub created_at: Option<String>,
    pub report_status: ReportStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentListResponse {
    pub success: bool,
    pub students: Vec<StudentRecord>,
    pub count: usize,
}

impl StudentListResponse {
    pub fn new(students: Vec<StudentRecord>) -> Self {
        Self {
            success: true,
            count: students.len(),
            students,
        }
    }
}
