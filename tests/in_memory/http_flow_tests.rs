//! End-to-end flows through the HTTP router on in-memory adapters.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{TimeDelta, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use taskboard::auth::{Claims, sign_claims};
use taskboard::board::adapters::memory::InMemoryBoardRepository;
use taskboard::notification::adapters::memory::{RecordingCalendar, RecordingMailer};
use taskboard::task::adapters::memory::InMemoryTaskRepository;
use taskboard::web::{AppDependencies, AppSettings, AppState, InMemoryBackend, router};
use tower::ServiceExt;

const SECRET: &str = "integration-secret";

struct Client {
    router: Router,
    token: String,
    mailer: RecordingMailer,
}

impl Client {
    async fn call(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value), eyre::Report> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token));
        let payload = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = self.router.clone().oneshot(builder.body(payload)?).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, value))
    }
}

#[fixture]
fn client() -> Result<Client, eyre::Report> {
    let mailer = RecordingMailer::new();
    let deps = AppDependencies::<InMemoryBackend> {
        tasks: Arc::new(InMemoryTaskRepository::new()),
        boards: Arc::new(InMemoryBoardRepository::new()),
        mailer: Arc::new(mailer.clone()),
        calendar: Some(Arc::new(RecordingCalendar::new())),
        clock: Arc::new(DefaultClock),
    };
    let settings = AppSettings {
        jwt_secret: SECRET.to_owned(),
        cron_secret: None,
        reminder_lease: TimeDelta::minutes(5),
    };
    let state = AppState::new(deps, settings)?;
    let claims = Claims {
        sub: "user_lead".to_owned(),
        email: Some("lead@example.com".to_owned()),
        role: Some("superadmin".to_owned()),
        exp: Utc::now().timestamp() + 600,
    };
    Ok(Client {
        router: router(Arc::new(state)),
        token: sign_claims(&claims, SECRET)?,
        mailer,
    })
}

fn column_id(board: &Value, title: &str) -> Result<String, eyre::Report> {
    board["columns"]
        .as_array()
        .and_then(|columns| {
            columns
                .iter()
                .find(|entry| entry["column"]["title"] == title)
                .and_then(|entry| entry["column"]["id"].as_str())
        })
        .map(str::to_owned)
        .ok_or_else(|| eyre::eyre!("board has no column titled {title}"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_travels_across_the_board(
    client: Result<Client, eyre::Report>,
) -> Result<(), eyre::Report> {
    let api = client?;
    let (status, board) = api
        .call("POST", "/api/boards", Some(json!({ "title": "Launch" })))
        .await?;
    eyre::ensure!(status == StatusCode::CREATED, "board creation returned {status}");
    let board_id = board["board"]["id"]
        .as_str()
        .ok_or_else(|| eyre::eyre!("board id missing"))?
        .to_owned();
    let todo = column_id(&board, "To Do")?;
    let review = column_id(&board, "Review")?;

    let (status, task) = api
        .call(
            "POST",
            &format!("/api/columns/{todo}/tasks"),
            Some(json!({
                "title": "Write announcement",
                "assignee": "writer@example.com",
                "due_date": "2026-11-02",
                "reminder": "1 hour"
            })),
        )
        .await?;
    eyre::ensure!(status == StatusCode::CREATED, "task creation returned {status}");
    eyre::ensure!(api.mailer.sent().len() == 1, "assignment email not sent");
    let task_id = task["id"]
        .as_str()
        .ok_or_else(|| eyre::eyre!("task id missing"))?
        .to_owned();

    let (status, moved) = api
        .call(
            "POST",
            &format!("/api/tasks/{task_id}/move"),
            Some(json!({ "column_id": review, "index": 0 })),
        )
        .await?;
    eyre::ensure!(status == StatusCode::OK, "move returned {status}");
    eyre::ensure!(moved["moved"] == true, "move not persisted: {moved}");
    eyre::ensure!(moved["task"]["next_reminder_at"].is_null());

    let (_, loaded) = api
        .call("GET", &format!("/api/boards/{board_id}"), None)
        .await?;
    let review_titles: Vec<&str> = loaded["columns"]
        .as_array()
        .into_iter()
        .flatten()
        .filter(|entry| entry["column"]["title"] == "Review")
        .flat_map(|entry| entry["tasks"].as_array().into_iter().flatten())
        .filter_map(|task| task["title"].as_str())
        .collect();
    eyre::ensure!(review_titles == ["Write announcement"], "got {review_titles:?}");

    let (_, history) = api
        .call("GET", &format!("/api/tasks/{task_id}/history"), None)
        .await?;
    eyre::ensure!(
        history[0]["description"] == "moved from To Do to Review",
        "unexpected history {history}"
    );
    Ok(())
}
