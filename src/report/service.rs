//! Report generation flow: validate, render, deliver, then bookkeeping.

use actix_web::web;

use super::error::ReportError;
use super::models::{GenerateReportRequest, GenerateReportResponse};
use super::validation::Validator;
use crate::notifier::DeliveryPayload;
use crate::student::models::{ReportStatus, Student};
use crate::AppState;

/// A request that passed validation.
#[derive(Debug, Clone)]
pub struct ReportJob {
    pub student: Student,
    pub content: String,
    pub password: String,
}

impl TryFrom<GenerateReportRequest> for ReportJob {
    type Error = ReportError;

    fn try_from(request: GenerateReportRequest) -> Result<Self, Self::Error> {
        request.validate().map_err(ReportError::InvalidInput)?;
        match request {
            GenerateReportRequest {
                student: Some(student),
                report_content: Some(content),
                password: Some(password),
            } => Ok(Self {
                student,
                content,
                password,
            }),
            _ => Err(ReportError::InvalidInput(
                "student, reportContent and password are required".to_string(),
            )),
        }
    }
}

pub async fn generate_and_deliver(
    state: &AppState,
    request: GenerateReportRequest,
) -> Result<GenerateReportResponse, ReportError> {
    let job = ReportJob::try_from(request)?;
    let order_number = job.student.order_number.clone();
    log::info!(
        "Generating report for order {} ({} chars of content)",
        order_number,
        job.content.chars().count()
    );

    let engine = state.engine.clone();
    let student = job.student.clone();
    let content = job.content.clone();
    let artifact = web::block(move || engine.render(&student, &content))
        .await
        .map_err(|e| ReportError::RenderingFailure(e.to_string()))??;

    let payload = DeliveryPayload {
        order_number: order_number.clone(),
        student_name: job.student.name.clone(),
        student_email: job.student.email.clone(),
        plan_type: job.student.plan.clone(),
        pdf_base64: artifact.pdf_base64,
        password: job.password,
        report_date: chrono::Utc::now().to_rfc3339(),
    };

    if let Err(e) = state.notifier.send(&payload).await {
        log::error!("Report for order {} was not delivered: {}", order_number, e);
        return Err(e.into());
    }
    log::info!(
        "Report for order {} delivered ({} pages)",
        order_number,
        artifact.page_count
    );

    record_delivery(state, &job.student, job.content.chars().count()).await;

    Ok(GenerateReportResponse::sent(order_number))
}

/// Status update and generation log. Failures are logged, never returned.
async fn record_delivery(state: &AppState, student: &Student, content_length: usize) {
    if let Err(e) = state
        .store
        .update_report_status(&student.order_number, ReportStatus::Sent)
        .await
    {
        log::error!(
            "Failed to mark order {} as sent: {}",
            student.order_number,
            e
        );
    }

    if let Err(e) = state.store.log_generation(student, content_length).await {
        log::error!(
            "Failed to log report generation for order {}: {}",
            student.order_number,
            e
        );
    }
}
