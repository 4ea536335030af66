use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpResponse, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod layout;
pub mod notifier;
pub mod report;
pub mod state;
pub mod store;
pub mod student;

pub use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            success: false,
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn method_not_allowed() -> Self {
        Self::new("MethodNotAllowed", "Method not allowed")
    }
}

/// Bare OPTIONS request (no CORS preflight headers).
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ErrorResponse::method_not_allowed())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::student::handlers::get_students,
        crate::report::handlers::generate_report
    ),
    components(
        schemas(
            student::models::Student,
            student::models::StudentRecord,
            student::models::ReportStatus,
            student::models::StudentListResponse,
            report::models::GenerateReportRequest,
            report::models::GenerateReportResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Students", description = "Paid orders waiting for a report."),
        (name = "Reports", description = "Report generation and delivery.")
    ),
    servers(
        (url = "http://127.0.0.1:8080", description = "Local server")
    )
)]
pub struct ApiDoc;

/// Register every report server route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    student::handlers::config(cfg);
    report::handlers::config(cfg);
}

pub async fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match config::AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration, check your .env file: {}", e);
            return Err(e.into());
        }
    };
    let app_state = web::Data::new(AppState::new_with_config(&config)?);

    let prometheus = PrometheusMetricsBuilder::new("isis_report_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create Prometheus metrics middleware: {}", e))?;

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus.clone())
            .wrap(cors)
            .app_data(app_state.clone())
            .configure(configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
