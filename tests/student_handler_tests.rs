mod common;

use std::sync::Arc;

use actix_web::{http::StatusCode, test, App};
use isis_report_server::student::models::ReportStatus;
use serde_json::Value;

use common::{MockNotifier, MockReportStore};

#[cfg(test)]
mod student_handler_tests {
    use super::*;

    #[actix_web::test]
    async fn test_get_students_lists_records() {
        let store = Arc::new(MockReportStore::with_students(vec![
            common::student_record("ORD-2", ReportStatus::Pending),
            common::student_record("ORD-1", ReportStatus::Sent),
        ]));
        let app = test::init_service(
            App::new()
                .app_data(common::app_state(store, Arc::new(MockNotifier::new())))
                .configure(isis_report_server::configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/students").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 2);
        assert_eq!(body["students"][0]["orderNumber"], "ORD-2");
        assert_eq!(body["students"][0]["reportStatus"], "pending");
        assert_eq!(body["students"][1]["reportStatus"], "sent");
        assert_eq!(body["students"][1]["birthDate"], "1990-01-15");
    }

    #[actix_web::test]
    async fn test_legacy_path_and_empty_list() {
        let app = test::init_service(
            App::new()
                .app_data(common::app_state(
                    Arc::new(MockReportStore::new()),
                    Arc::new(MockNotifier::new()),
                ))
                .configure(isis_report_server::configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/get-students").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["count"], 0);
        assert!(body["students"].as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_store_failure_is_server_error() {
        let app = test::init_service(
            App::new()
                .app_data(common::app_state(
                    Arc::new(MockReportStore::failing()),
                    Arc::new(MockNotifier::new()),
                ))
                .configure(isis_report_server::configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/students").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "StoreFailure");
        assert!(body["message"].as_str().unwrap().contains("connection refused"));
    }

    #[actix_web::test]
    async fn test_options_ok_and_put_not_allowed() {
        let app = test::init_service(
            App::new()
                .app_data(common::app_state(
                    Arc::new(MockReportStore::new()),
                    Arc::new(MockNotifier::new()),
                ))
                .configure(isis_report_server::configure),
        )
        .await;

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/get-students")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::put().uri("/api/students").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
