use actix_web::http::Method;
use actix_web::{web, HttpResponse};

use super::models::StudentListResponse;
use crate::report::ReportError;
use crate::{AppState, ErrorResponse};

pub const STUDENT_PATHS: [&str; 2] = ["/api/students", "/get-students"];

#[utoipa::path(
    get,
    path = "/api/students",
    tag = "Students",
    responses(
        (status = 200, description = "Paid report orders, newest first", body = StudentListResponse),
        (status = 500, description = "Orders could not be loaded", body = ErrorResponse)
    )
)]
pub async fn get_students(state: web::Data<AppState>) -> Result<HttpResponse, ReportError> {
    let students = state.store.fetch_pending_reports().await.map_err(|e| {
        log::error!("Failed to fetch students: {}", e);
        ReportError::from(e)
    })?;

    log::info!("Returning {} students", students.len());
    Ok(HttpResponse::Ok().json(StudentListResponse::new(students)))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    for path in STUDENT_PATHS {
        cfg.service(
            web::resource(path)
                .route(web::get().to(get_students))
                .route(web::method(Method::OPTIONS).to(crate::preflight))
                .default_service(web::to(crate::method_not_allowed)),
        );
    }
}
