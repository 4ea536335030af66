mod common;

use std::sync::Arc;

use actix_web::{http::StatusCode, test, App};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use isis_report_server::student::models::ReportStatus;
use serde_json::{json, Value};

use common::{MockNotifier, MockReportStore, TWO_SECTIONS};

#[cfg(test)]
mod report_handler_tests {
    use super::*;

    fn body(content: &str) -> Value {
        json!({
            "student": common::student(),
            "reportContent": content,
            "password": "1990-01-15"
        })
    }

    #[actix_web::test]
    async fn test_generate_report_delivers_and_records() {
        let store = Arc::new(MockReportStore::new());
        let notifier = Arc::new(MockNotifier::new());
        let app = test::init_service(
            App::new()
                .app_data(common::app_state(store.clone(), notifier.clone()))
                .configure(isis_report_server::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/reports")
            .set_json(body(TWO_SECTIONS))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let response: Value = test::read_body_json(resp).await;
        assert_eq!(response["success"], true);
        assert_eq!(response["orderNumber"], "ORD-1001");

        let sent = notifier.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].order_number, "ORD-1001");
        assert_eq!(sent[0].student_email, "ann@example.com");
        assert_eq!(sent[0].password, "1990-01-15");
        let pdf = BASE64.decode(&sent[0].pdf_base64).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
        let loaded = lopdf::Document::load_mem(&pdf).unwrap();
        assert_eq!(loaded.get_pages().len(), 2);

        assert_eq!(
            store.status_updates().await,
            vec![("ORD-1001".to_string(), ReportStatus::Sent)]
        );
        assert_eq!(
            store.generation_logs().await,
            vec![("ORD-1001".to_string(), TWO_SECTIONS.chars().count())]
        );
    }

    #[actix_web::test]
    async fn test_legacy_path_is_served() {
        let store = Arc::new(MockReportStore::new());
        let notifier = Arc::new(MockNotifier::new());
        let app = test::init_service(
            App::new()
                .app_data(common::app_state(store, notifier.clone()))
                .configure(isis_report_server::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/generate-isis-report")
            .set_json(body(TWO_SECTIONS))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(notifier.sent().await.len(), 1);
    }

    #[actix_web::test]
    async fn test_missing_student_is_rejected_without_delivery() {
        let store = Arc::new(MockReportStore::new());
        let notifier = Arc::new(MockNotifier::new());
        let app = test::init_service(
            App::new()
                .app_data(common::app_state(store.clone(), notifier.clone()))
                .configure(isis_report_server::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/reports")
            .set_json(json!({"reportContent": TWO_SECTIONS, "password": "pw"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error["success"], false);
        assert_eq!(error["error"], "InvalidInput");
        assert!(error["message"].as_str().unwrap().contains("student"));

        assert!(notifier.sent().await.is_empty());
        assert!(store.status_updates().await.is_empty());
    }

    #[actix_web::test]
    async fn test_missing_content_is_rejected_without_delivery() {
        let store = Arc::new(MockReportStore::new());
        let notifier = Arc::new(MockNotifier::new());
        let app = test::init_service(
            App::new()
                .app_data(common::app_state(store, notifier.clone()))
                .configure(isis_report_server::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/reports")
            .set_json(json!({"student": common::student(), "password": "pw"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(notifier.sent().await.is_empty());
    }

    #[actix_web::test]
    async fn test_malformed_json_is_invalid_input() {
        let store = Arc::new(MockReportStore::new());
        let notifier = Arc::new(MockNotifier::new());
        let app = test::init_service(
            App::new()
                .app_data(common::app_state(store, notifier.clone()))
                .configure(isis_report_server::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/reports")
            .insert_header(("content-type", "application/json"))
            .set_payload("{ malformed json ")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error["error"], "InvalidInput");
        assert!(notifier.sent().await.is_empty());
    }

    #[actix_web::test]
    async fn test_notifier_failure_never_marks_sent() {
        let store = Arc::new(MockReportStore::new());
        let notifier = Arc::new(MockNotifier::rejecting(503));
        let app = test::init_service(
            App::new()
                .app_data(common::app_state(store.clone(), notifier))
                .configure(isis_report_server::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/reports")
            .set_json(body(TWO_SECTIONS))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error["error"], "NotificationFailure");
        assert!(store.status_updates().await.is_empty());
        assert!(store.generation_logs().await.is_empty());
    }

    #[actix_web::test]
    async fn test_bookkeeping_failure_still_succeeds() {
        let store = Arc::new(MockReportStore::failing());
        let notifier = Arc::new(MockNotifier::new());
        let app = test::init_service(
            App::new()
                .app_data(common::app_state(store, notifier.clone()))
                .configure(isis_report_server::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/reports")
            .set_json(body(TWO_SECTIONS))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(notifier.sent().await.len(), 1);
    }

    #[actix_web::test]
    async fn test_options_and_other_methods() {
        let store = Arc::new(MockReportStore::new());
        let notifier = Arc::new(MockNotifier::new());
        let app = test::init_service(
            App::new()
                .app_data(common::app_state(store, notifier))
                .configure(isis_report_server::configure),
        )
        .await;

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/reports")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/reports").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error["success"], false);
        assert_eq!(error["error"], "MethodNotAllowed");
    }
}
