//! API routes.

pub mod health;
pub mod jobs;
pub mod run;

use crate::AppState;
use axum::Router;

/// Build the main API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/jobs", jobs::router())
        .nest("/run-job", run::router())
        .merge(health::router())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use jobrelay_core::SimulatedExecutor;
    use jobrelay_db::MemoryJobStore;
    use jobrelay_notifier::WebhookNotifier;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    /// Webhook target answering 200 to every POST.
    async fn webhook_endpoint() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = Router::new().route(
            "/hook",
            axum::routing::post(|| async { StatusCode::OK }),
        );
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/hook")
    }

    async fn app() -> Router {
        let store = Arc::new(MemoryJobStore::new());
        let executor = Arc::new(SimulatedExecutor::new(Duration::from_millis(5)));
        let notifier = WebhookNotifier::new(webhook_endpoint().await);
        router(AppState::new(store, executor, notifier))
    }

    fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn submit(app: &Router, body: Value) -> (StatusCode, Value) {
        send(app, request(Method::POST, "/jobs", Some(body))).await
    }

    #[tokio::test]
    async fn health_answers_ok() {
        let app = app().await;
        let (status, body) = send(&app, request(Method::GET, "/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn create_job_returns_201_pending() {
        let app = app().await;
        let (status, job) = submit(
            &app,
            json!({
                "taskName": "Send Welcome Email",
                "payload": {"to": "a@b.com"},
                "priority": "high"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(job["status"], "pending");
        assert_eq!(job["priority"], "high");
        assert_eq!(job["task_name"], "Send Welcome Email");
        assert_eq!(job["payload"], json!({"to": "a@b.com"}));
        assert!(job["completed_at"].is_null());
        assert!(job["webhook_response"].is_null());
    }

    #[tokio::test]
    async fn create_job_defaults_priority_and_payload() {
        let app = app().await;
        let (status, job) = submit(&app, json!({"taskName": "cleanup"})).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(job["priority"], "medium");
        assert_eq!(job["payload"], json!({}));
    }

    #[tokio::test]
    async fn create_job_without_task_name_is_400() {
        let app = app().await;
        let (status, body) = submit(&app, json!({"payload": {}})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("taskName"));

        // Nothing was persisted.
        let (_, jobs) = send(&app, request(Method::GET, "/jobs", None)).await;
        assert_eq!(jobs.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn create_job_with_unknown_priority_is_400() {
        let app = app().await;
        let (status, body) = submit(
            &app,
            json!({"taskName": "cleanup", "priority": "urgent"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn list_jobs_filters_and_orders_newest_first() {
        let app = app().await;
        submit(&app, json!({"taskName": "a", "priority": "high"})).await;
        submit(&app, json!({"taskName": "b", "priority": "low"})).await;
        submit(&app, json!({"taskName": "c", "priority": "high"})).await;

        let (status, jobs) =
            send(&app, request(Method::GET, "/jobs?priority=high", None)).await;
        assert_eq!(status, StatusCode::OK);
        let jobs = jobs.as_array().unwrap().clone();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0]["task_name"], "c");
        assert_eq!(jobs[1]["task_name"], "a");

        // The `all` sentinel matches everything, as does omitting filters.
        let (_, all) = send(
            &app,
            request(Method::GET, "/jobs?status=all&priority=all", None),
        )
        .await;
        assert_eq!(all.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn list_jobs_with_unknown_status_is_400() {
        let app = app().await;
        let (status, _) = send(&app, request(Method::GET, "/jobs?status=done", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_job_round_trips() {
        let app = app().await;
        let (_, created) = submit(&app, json!({"taskName": "lookup"})).await;
        let id = created["id"].as_str().unwrap();

        let (status, job) =
            send(&app, request(Method::GET, &format!("/jobs/{id}"), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(job["id"], created["id"]);
    }

    #[tokio::test]
    async fn get_unknown_job_is_404() {
        let app = app().await;
        let id = uuid_like();
        let (status, body) =
            send(&app, request(Method::GET, &format!("/jobs/{id}"), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn get_job_with_malformed_id_is_400() {
        let app = app().await;
        let (status, _) = send(&app, request(Method::GET, "/jobs/not-a-uuid", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn run_job_completes_and_embeds_webhook_outcome() {
        let app = app().await;
        let (_, created) = submit(
            &app,
            json!({
                "taskName": "Send Welcome Email",
                "payload": {"to": "a@b.com"},
                "priority": "high"
            }),
        )
        .await;
        let id = created["id"].as_str().unwrap();

        let (status, body) = send(
            &app,
            request(Method::POST, &format!("/run-job/{id}"), None),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Job completed successfully");
        assert_eq!(body["job"]["status"], "completed");
        assert!(!body["job"]["completed_at"].is_null());
        assert_eq!(body["webhookResponse"]["status"], 200);
        assert_eq!(body["job"]["webhook_response"]["status"], 200);
    }

    #[tokio::test]
    async fn run_unknown_job_is_404() {
        let app = app().await;
        let id = uuid_like();
        let (status, body) = send(
            &app,
            request(Method::POST, &format!("/run-job/{id}"), None),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn run_completed_job_is_409() {
        let app = app().await;
        let (_, created) = submit(&app, json!({"taskName": "once"})).await;
        let id = created["id"].as_str().unwrap();

        let (first, _) = send(
            &app,
            request(Method::POST, &format!("/run-job/{id}"), None),
        )
        .await;
        assert_eq!(first, StatusCode::OK);

        let (second, body) = send(
            &app,
            request(Method::POST, &format!("/run-job/{id}"), None),
        )
        .await;
        assert_eq!(second, StatusCode::CONFLICT);
        assert!(body["error"].as_str().unwrap().contains("completed"));
    }

    #[tokio::test]
    async fn run_job_rejects_wrong_method() {
        let app = app().await;
        let id = uuid_like();
        let (status, _) = send(
            &app,
            request(Method::GET, &format!("/run-job/{id}"), None),
        )
        .await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    fn uuid_like() -> String {
        "00000000-0000-7000-8000-000000000000".to_string()
    }
}
