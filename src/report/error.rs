use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::layout::LayoutError;
use crate::notifier::NotifyError;
use crate::store::StoreError;
use crate::ErrorResponse;

/// Request-level failures of the report endpoints.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("failed to render report: {0}")]
    RenderingFailure(String),
    #[error("failed to deliver report: {0}")]
    NotificationFailure(String),
    #[error("failed to load students: {0}")]
    Store(String),
}

impl ReportError {
    pub fn kind(&self) -> &'static str {
        match self {
            ReportError::InvalidInput(_) => "InvalidInput",
            ReportError::RenderingFailure(_) => "RenderingFailure",
            ReportError::NotificationFailure(_) => "NotificationFailure",
            ReportError::Store(_) => "StoreFailure",
        }
    }
}

impl From<LayoutError> for ReportError {
    fn from(e: LayoutError) -> Self {
        match e {
            LayoutError::InvalidInput(msg) => ReportError::InvalidInput(msg),
            other => ReportError::RenderingFailure(other.to_string()),
        }
    }
}

impl From<NotifyError> for ReportError {
    fn from(e: NotifyError) -> Self {
        ReportError::NotificationFailure(e.to_string())
    }
}

impl From<StoreError> for ReportError {
    fn from(e: StoreError) -> Self {
        ReportError::Store(e.to_string())
    }
}

impl ResponseError for ReportError {
    fn status_code(&self) -> StatusCode {
        match self {
            ReportError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ReportError::RenderingFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ReportError::NotificationFailure(_) => StatusCode::BAD_GATEWAY,
            ReportError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(ErrorResponse::new(self.kind(), &self.to_string()))
    }
}
