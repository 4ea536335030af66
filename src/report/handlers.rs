use actix_web::http::Method;
use actix_web::{web, HttpResponse};

use super::error::ReportError;
use super::models::{GenerateReportRequest, GenerateReportResponse};
use super::service;
use crate::{AppState, ErrorResponse};

/// Route plus the legacy function path kept for existing dashboards.
pub const REPORT_PATHS: [&str; 2] = ["/api/reports", "/generate-isis-report"];

#[utoipa::path(
    post,
    path = "/api/reports",
    tag = "Reports",
    request_body = GenerateReportRequest,
    responses(
        (status = 200, description = "Report generated and handed to the email workflow", body = GenerateReportResponse),
        (status = 400, description = "Missing or invalid input", body = ErrorResponse),
        (status = 500, description = "Report could not be rendered", body = ErrorResponse),
        (status = 502, description = "Email workflow rejected the report", body = ErrorResponse)
    )
)]
pub async fn generate_report(
    state: web::Data<AppState>,
    body: web::Json<GenerateReportRequest>,
) -> Result<HttpResponse, ReportError> {
    let response = service::generate_and_deliver(&state, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Malformed JSON is reported like any other invalid input.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(4 * 1024 * 1024)
        .error_handler(|err, _req| {
            log::warn!("Rejected report request body: {}", err);
            ReportError::InvalidInput(format!("invalid JSON body: {}", err)).into()
        })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    for path in REPORT_PATHS {
        cfg.service(
            web::resource(path)
                .app_data(json_config())
                .route(web::post().to(generate_report))
                .route(web::method(Method::OPTIONS).to(crate::preflight))
                .default_service(web::to(crate::method_not_allowed)),
        );
    }
}
