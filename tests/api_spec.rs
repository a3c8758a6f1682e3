use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use retro_board::api::{create_router, ErrorResponse};
use retro_board::db::Database;
use retro_board::models::*;
use retro_board::service::RetrospectiveService;
use serde_json::json;
use uuid::Uuid;

fn setup() -> TestServer {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    let app = create_router(RetrospectiveService::new(Arc::new(db)));
    TestServer::new(app).expect("Failed to create test server")
}

async fn create_sprint(server: &TestServer, name: &str, date: &str) -> RetrospectiveResponse {
    server
        .post("/retrospectives")
        .json(&json!({
            "name": name,
            "date": date,
            "participants": ["A", "B"],
        }))
        .await
        .json::<RetrospectiveResponse>()
}

async fn add_feedback(server: &TestServer, name: &str, body: &str) -> RetrospectiveResponse {
    server
        .post(&format!("/retrospectives/{}/feedback", name))
        .json(&json!({
            "name": "A",
            "body": body,
            "feedback_type": "POSITIVE",
        }))
        .await
        .json::<RetrospectiveResponse>()
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let server = setup();
        let response = server.get("/health").await;

        response.assert_status_ok();
        response.assert_json(&json!({ "status": "ok" }));
    }
}

mod create_retrospective {
    use super::*;

    #[tokio::test]
    async fn returns_created_retrospective() {
        let server = setup();

        let response = server
            .post("/retrospectives")
            .json(&json!({
                "name": "Sprint 1",
                "summary": "First sprint",
                "date": "2024-04-10",
                "participants": ["A", "B"],
                "feedback_items": [
                    { "name": "A", "body": "went well", "feedback_type": "POSITIVE" }
                ],
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let retro: RetrospectiveResponse = response.json();
        assert_eq!(retro.name, "Sprint 1");
        assert_eq!(retro.summary.as_deref(), Some("First sprint"));
        assert_eq!(retro.feedback_items.len(), 1);
        assert!(retro.feedback_items[0].id.is_some());
    }

    #[tokio::test]
    async fn conflicts_on_duplicate_name() {
        let server = setup();
        create_sprint(&server, "Sprint 1", "2024-04-10").await;

        let response = server
            .post("/retrospectives")
            .json(&json!({
                "name": "Sprint 1",
                "date": "2024-04-11",
                "participants": ["C"],
            }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let error: ErrorResponse = response.json();
        assert_eq!(error.status, 409);
        assert!(error.message.contains("Sprint 1"));
    }

    #[tokio::test]
    async fn rejects_empty_participants() {
        let server = setup();

        let response = server
            .post("/retrospectives")
            .json(&json!({
                "name": "Sprint 1",
                "date": "2024-04-10",
                "participants": [],
            }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn rejects_unknown_feedback_type() {
        let server = setup();

        let response = server
            .post("/retrospectives")
            .json(&json!({
                "name": "Sprint 1",
                "date": "2024-04-10",
                "participants": ["A"],
                "feedback_items": [{ "name": "A", "feedback_type": "ECSTATIC" }],
            }))
            .await;

        response.assert_status_bad_request();
        let error: ErrorResponse = response.json();
        assert_eq!(error.status, 400);
        assert!(error.message.contains("ECSTATIC"));
    }

    #[tokio::test]
    async fn rejects_body_missing_required_fields() {
        let server = setup();

        let response = server
            .post("/retrospectives")
            .json(&json!({ "name": "Sprint 1", "date": "2024-04-10" }))
            .await;

        response.assert_status_bad_request();
        let error: ErrorResponse = response.json();
        assert_eq!(error.status, 400);
        assert!(error.message.contains("participants"));
    }

    #[tokio::test]
    async fn rejects_malformed_date() {
        let server = setup();

        let response = server
            .post("/retrospectives")
            .json(&json!({
                "name": "Sprint 1",
                "date": "10/04/2024",
                "participants": ["A"],
            }))
            .await;

        response.assert_status_bad_request();
        let error: ErrorResponse = response.json();
        assert_eq!(error.status, 400);
    }
}

mod feedback_items {
    use super::*;

    #[tokio::test]
    async fn adds_feedback_to_named_retrospective() {
        let server = setup();
        create_sprint(&server, "Sprint 1", "2024-04-10").await;

        let response = server
            .post("/retrospectives/Sprint%201/feedback")
            .json(&json!({
                "name": "A",
                "body": "went well",
                "feedback_type": "POSITIVE",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let retro: RetrospectiveResponse = response.json();
        assert_eq!(retro.feedback_items.len(), 1);
        assert_eq!(retro.feedback_items[0].body.as_deref(), Some("went well"));
        assert!(retro.feedback_items[0].id.is_some());
    }

    #[tokio::test]
    async fn adding_to_unknown_retrospective_is_not_found() {
        let server = setup();

        let response = server
            .post("/retrospectives/Nonexistent/feedback")
            .json(&json!({ "name": "A", "feedback_type": "NEUTRAL" }))
            .await;

        response.assert_status_not_found();
        let error: ErrorResponse = response.json();
        assert_eq!(error.status, 404);
    }

    #[tokio::test]
    async fn updates_only_supplied_fields() {
        let server = setup();
        create_sprint(&server, "Sprint 1", "2024-04-10").await;
        let retro = add_feedback(&server, "Sprint%201", "went well").await;
        let id = retro.feedback_items[0].id.expect("id assigned");

        let response = server
            .put(&format!("/retrospectives/Sprint%201/feedback/{}", id))
            .json(&json!({ "body": "went great" }))
            .await;

        response.assert_status_ok();
        let updated: RetrospectiveResponse = response.json();
        let item = &updated.feedback_items[0];
        assert_eq!(item.id, Some(id));
        assert_eq!(item.name, "A");
        assert_eq!(item.body.as_deref(), Some("went great"));
        assert_eq!(item.feedback_type, FeedbackType::Positive);
    }

    #[tokio::test]
    async fn rejects_unknown_feedback_type_on_add() {
        let server = setup();
        create_sprint(&server, "Sprint 1", "2024-04-10").await;

        let response = server
            .post("/retrospectives/Sprint%201/feedback")
            .json(&json!({ "name": "A", "feedback_type": "GREAT" }))
            .await;

        response.assert_status_bad_request();
        let error: ErrorResponse = response.json();
        assert_eq!(error.status, 400);
    }

    #[tokio::test]
    async fn updating_unknown_item_is_not_found() {
        let server = setup();
        create_sprint(&server, "Sprint 1", "2024-04-10").await;
        add_feedback(&server, "Sprint%201", "went well").await;

        for id in [Uuid::new_v4().to_string(), "bogus".to_string()] {
            let response = server
                .put(&format!("/retrospectives/Sprint%201/feedback/{}", id))
                .json(&json!({ "body": "went great" }))
                .await;

            response.assert_status_not_found();
            let error: ErrorResponse = response.json();
            assert!(error.message.contains(&id));
        }
    }

    #[tokio::test]
    async fn rejects_blank_name_on_update() {
        let server = setup();
        create_sprint(&server, "Sprint 1", "2024-04-10").await;
        let retro = add_feedback(&server, "Sprint%201", "went well").await;
        let id = retro.feedback_items[0].id.expect("id assigned");

        let response = server
            .put(&format!("/retrospectives/Sprint%201/feedback/{}", id))
            .json(&json!({ "name": "  " }))
            .await;

        response.assert_status_bad_request();
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn lists_with_default_pagination() {
        let server = setup();
        for n in 1..=12 {
            create_sprint(&server, &format!("Sprint {}", n), "2024-04-10").await;
        }

        let response = server.get("/retrospectives").await;

        response.assert_status_ok();
        let page: Page<RetrospectiveResponse> = response.json();
        assert_eq!(page.content.len(), 10);
        assert_eq!(page.page, 0);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.total_elements, 12);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn honours_page_parameters() {
        let server = setup();
        for n in 1..=5 {
            create_sprint(&server, &format!("Sprint {}", n), "2024-04-10").await;
        }

        let response = server
            .get("/retrospectives")
            .add_query_param("page", 1)
            .add_query_param("page_size", 3)
            .await;

        response.assert_status_ok();
        let page: Page<RetrospectiveResponse> = response.json();
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.content[0].name, "Sprint 4");
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn rejects_zero_page_size() {
        let server = setup();

        let response = server
            .get("/retrospectives")
            .add_query_param("page_size", 0)
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn searches_by_date() {
        let server = setup();
        create_sprint(&server, "Sprint 1", "2024-04-10").await;
        create_sprint(&server, "Sprint 2", "2024-04-24").await;

        let response = server
            .get("/retrospectives/search")
            .add_query_param("date", "2024-04-24")
            .await;

        response.assert_status_ok();
        let page: Page<RetrospectiveResponse> = response.json();
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content[0].name, "Sprint 2");
    }

    #[tokio::test]
    async fn search_requires_a_valid_date() {
        let server = setup();

        let response = server
            .get("/retrospectives/search")
            .add_query_param("date", "April 10th")
            .await;

        response.assert_status_bad_request();
        let error: ErrorResponse = response.json();
        assert_eq!(error.status, 400);
    }

    #[tokio::test]
    async fn search_without_date_is_bad_request() {
        let server = setup();

        let response = server.get("/retrospectives/search").await;

        response.assert_status_bad_request();
        let error: ErrorResponse = response.json();
        assert_eq!(error.status, 400);
    }

    #[tokio::test]
    async fn rejects_negative_page() {
        let server = setup();

        let response = server
            .get("/retrospectives")
            .add_query_param("page", -1)
            .await;

        response.assert_status_bad_request();
        let error: ErrorResponse = response.json();
        assert_eq!(error.status, 400);
    }
}
