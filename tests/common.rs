#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use isis_report_server::notifier::{DeliveryNotifier, DeliveryPayload, NotifyError};
use isis_report_server::store::{ReportStore, StoreError};
use isis_report_server::student::models::{ReportStatus, Student, StudentRecord};
use isis_report_server::AppState;
use tokio::sync::Mutex;

/// In-memory report store that records bookkeeping calls.
#[derive(Default)]
pub struct MockReportStore {
    pub students: Vec<StudentRecord>,
    pub fail_fetch: bool,
    pub fail_bookkeeping: bool,
    pub status_updates: Mutex<Vec<(String, ReportStatus)>>,
    pub generation_logs: Mutex<Vec<(String, usize)>>,
}

impl MockReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_students(students: Vec<StudentRecord>) -> Self {
        Self {
            students,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_fetch: true,
            fail_bookkeeping: true,
            ..Self::default()
        }
    }

    pub async fn status_updates(&self) -> Vec<(String, ReportStatus)> {
        self.status_updates.lock().await.clone()
    }

    pub async fn generation_logs(&self) -> Vec<(String, usize)> {
        self.generation_logs.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl ReportStore for MockReportStore {
    async fn fetch_pending_reports(&self) -> Result<Vec<StudentRecord>, StoreError> {
        if self.fail_fetch {
            return Err(StoreError::Request("connection refused".to_string()));
        }
        Ok(self.students.clone())
    }

    async fn update_report_status(
        &self,
        order_number: &str,
        status: ReportStatus,
    ) -> Result<(), StoreError> {
        if self.fail_bookkeeping {
            return Err(StoreError::Status {
                status: 500,
                body: "rpc failed".to_string(),
            });
        }
        self.status_updates
            .lock()
            .await
            .push((order_number.to_string(), status));
        Ok(())
    }

    async fn log_generation(
        &self,
        student: &Student,
        content_length: usize,
    ) -> Result<(), StoreError> {
        if self.fail_bookkeeping {
            return Err(StoreError::Status {
                status: 500,
                body: "insert failed".to_string(),
            });
        }
        self.generation_logs
            .lock()
            .await
            .push((student.order_number.clone(), content_length));
        Ok(())
    }
}

/// Notifier that keeps every payload instead of posting it.
#[derive(Default)]
pub struct MockNotifier {
    pub fail_with_status: Option<u16>,
    pub sent: Mutex<Vec<DeliveryPayload>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::default()
        }
    }

    pub async fn sent(&self) -> Vec<DeliveryPayload> {
        self.sent.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl DeliveryNotifier for MockNotifier {
    async fn send(&self, payload: &DeliveryPayload) -> Result<(), NotifyError> {
        if let Some(status) = self.fail_with_status {
            return Err(NotifyError::Status(status));
        }
        self.sent.lock().await.push(payload.clone());
        Ok(())
    }
}

pub fn app_state(store: Arc<MockReportStore>, notifier: Arc<MockNotifier>) -> web::Data<AppState> {
    web::Data::new(AppState::new_with_services(store, notifier))
}

pub fn student() -> Student {
    Student {
        name: "Ann Lee".to_string(),
        email: "ann@example.com".to_string(),
        plan: "Plan One".to_string(),
        order_number: "ORD-1001".to_string(),
        amount: Some(1999.0),
    }
}

pub fn student_record(order_number: &str, status: ReportStatus) -> StudentRecord {
    StudentRecord {
        id: serde_json::json!(1),
        order_number: order_number.to_string(),
        name: "Ann Lee".to_string(),
        email: "ann@example.com".to_string(),
        amount: 1999.0,
        plan: "Plan One".to_string(),
        birth_date: Some("1990-01-15".to_string()),
        created_at: Some("2025-07-01T08:00:00+00:00".to_string()),
        report_status: status,
    }
}

pub const TWO_SECTIONS: &str = "TitleA\nBodyA\n========================\nTitleB\nBodyB";
