//! Route tests for task creation, edits, moves and history.

use axum::http::StatusCode;
use rstest::rstest;
use serde_json::{Value, json};

use super::harness::{TestApp, admin_token, column_id, member_token};

async fn board_with_task(app: &TestApp) -> (Value, Value) {
    let token = admin_token();
    let board = app.create_board(&token).await;
    let to_do = column_id(&board, "To Do");
    let task = app
        .create_task(
            &token,
            &to_do,
            json!({
                "title": "Write changelog",
                "assignee": "dev@example.com",
                "due_date": "2026-03-09",
                "priority": "high",
                "reminder": "1 hour"
            }),
        )
        .await;
    (board, task)
}

fn task_uri(task: &Value, suffix: &str) -> String {
    format!(
        "/api/tasks/{}{suffix}",
        task["id"].as_str().expect("task id")
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_schedules_reminder_and_notifies() {
    let app = TestApp::new();

    let (_, task) = board_with_task(&app).await;

    assert_eq!(task["reminder"], "1 hour");
    assert_eq!(task["priority"], "high");
    assert!(task["next_reminder_at"].is_string());
    assert_eq!(app.mailer.sent().len(), 1);
    assert_eq!(app.calendar.events().len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_validates_fields() {
    let app = TestApp::new();
    let token = admin_token();
    let board = app.create_board(&token).await;
    let to_do = column_id(&board, "To Do");

    let (blank, _) = app
        .send(
            "POST",
            &format!("/api/columns/{to_do}/tasks"),
            Some(&token),
            Some(json!({ "title": " " })),
        )
        .await;
    let (bad_email, _) = app
        .send(
            "POST",
            &format!("/api/columns/{to_do}/tasks"),
            Some(&token),
            Some(json!({ "title": "Ok", "assignee": "nobody" })),
        )
        .await;
    let (anonymous, _) = app
        .send(
            "POST",
            &format!("/api/columns/{to_do}/tasks"),
            None,
            Some(json!({ "title": "Ok" })),
        )
        .await;

    assert_eq!(blank, StatusCode::BAD_REQUEST);
    assert_eq!(bad_email, StatusCode::BAD_REQUEST);
    assert_eq!(anonymous, StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case::anonymous(None, StatusCode::UNAUTHORIZED)]
#[case::member(Some(member_token()), StatusCode::FORBIDDEN)]
#[case::admin(Some(admin_token()), StatusCode::OK)]
#[tokio::test(flavor = "multi_thread")]
async fn task_edits_need_an_elevated_role(
    #[case] token: Option<String>,
    #[case] expected: StatusCode,
) {
    let app = TestApp::new();
    let (_, task) = board_with_task(&app).await;

    let (status, _) = app
        .send(
            "PATCH",
            &task_uri(&task, ""),
            token.as_deref(),
            Some(json!({ "priority": "low" })),
        )
        .await;

    assert_eq!(status, expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_task_edit_is_not_found() {
    let app = TestApp::new();

    let (status, _) = app
        .send(
            "PATCH",
            &format!("/api/tasks/{}", uuid::Uuid::new_v4()),
            Some(&admin_token()),
            Some(json!({ "title": "New" })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn null_clears_and_omission_keeps_fields() {
    let app = TestApp::new();
    let (_, task) = board_with_task(&app).await;

    let (status, updated) = app
        .send(
            "PATCH",
            &task_uri(&task, ""),
            Some(&admin_token()),
            Some(json!({ "due_date": null })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(updated["due_date"].is_null());
    assert!(updated["next_reminder_at"].is_null());
    assert_eq!(updated["assignee"], "dev@example.com");
    assert_eq!(updated["title"], "Write changelog");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moves_report_whether_the_store_changed() {
    let app = TestApp::new();
    let token = admin_token();
    let (board, task) = board_with_task(&app).await;
    let done = column_id(&board, "Done");
    let to_do = column_id(&board, "To Do");

    let (status, moved) = app
        .send(
            "POST",
            &task_uri(&task, "/move"),
            Some(&token),
            Some(json!({ "column_id": done, "index": 0 })),
        )
        .await;
    let (_, back) = app
        .send(
            "POST",
            &task_uri(&task, "/move"),
            Some(&token),
            Some(json!({ "column_id": to_do, "index": 0 })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["moved"], true);
    assert!(moved["task"]["next_reminder_at"].is_null());
    assert_eq!(back["moved"], false);
    assert!(back.get("task").is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn history_lists_newest_first() {
    let app = TestApp::new();
    let token = admin_token();
    let (_, task) = board_with_task(&app).await;
    app.send(
        "PATCH",
        &task_uri(&task, ""),
        Some(&token),
        Some(json!({ "title": "Publish changelog" })),
    )
    .await;

    let (status, history) = app
        .send("GET", &task_uri(&task, "/history"), Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    let descriptions: Vec<&str> = history
        .as_array()
        .expect("history should be a list")
        .iter()
        .filter_map(|entry| entry["description"].as_str())
        .collect();
    assert_eq!(descriptions, ["updated title", "created"]);
}

#[rstest]
#[case::missing_title("POST", "tasks", json!({ "description": "x" }))]
#[case::unknown_priority("POST", "tasks", json!({ "title": "Ok", "priority": "urgent" }))]
#[case::mistyped_patch("PATCH", "task", json!({ "priority": 5 }))]
#[case::move_without_index("POST", "move", json!({ "column_id": uuid::Uuid::new_v4() }))]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_task_bodies_are_bad_requests(
    #[case] method: &str,
    #[case] target: &str,
    #[case] body: Value,
) {
    let app = TestApp::new();
    let (board, task) = board_with_task(&app).await;
    let uri = match target {
        "tasks" => format!("/api/columns/{}/tasks", column_id(&board, "To Do")),
        "move" => task_uri(&task, "/move"),
        _ => task_uri(&task, ""),
    };

    let (status, response) = app
        .send(method, &uri, Some(&admin_token()), Some(body))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"].is_string(), "expected JSON error, got {response}");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn caller_is_checked_before_the_body() {
    let app = TestApp::new();
    let (_, task) = board_with_task(&app).await;

    let (status, _) = app
        .send(
            "PATCH",
            &task_uri(&task, ""),
            None,
            Some(json!({ "priority": 5 })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
