//! In-memory integration tests for reminder passes.

use super::helpers::{Workspace, admin, column, workspace};
use chrono::{TimeDelta, Utc};
use rstest::rstest;
use taskboard::task::{
    domain::{ReminderInterval, TaskId},
    services::{CreateTaskRequest, UpdateTaskRequest},
};

async fn make_due(ws: &Workspace, task_id: TaskId) -> Result<(), eyre::Report> {
    let request = UpdateTaskRequest {
        next_reminder_at: Some(Some(Utc::now() - TimeDelta::minutes(1))),
        ..UpdateTaskRequest::default()
    };
    ws.tasks.update(task_id, request, Some(&admin())).await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn due_reminder_is_mailed_and_rescheduled(
    workspace: Result<Workspace, eyre::Report>,
) -> Result<(), eyre::Report> {
    let ws = workspace?;
    let board = ws.board("Ops").await?;
    let task = ws
        .task(
            column(&board, "In Progress")?,
            CreateTaskRequest::new("Rotate keys")
                .with_assignee("dev@example.com")
                .with_reminder(ReminderInterval::FifteenMinutes),
        )
        .await?;
    make_due(&ws, task.id()).await?;

    let before = Utc::now();
    let summary = ws.reminders.run().await?;

    eyre::ensure!(summary.sent == 1, "expected one reminder, got {summary:?}");
    let sent = ws.mailer.sent();
    let subject = sent.first().map(|message| message.subject.as_str());
    eyre::ensure!(subject == Some("Reminder: Rotate keys"), "unexpected subject {subject:?}");
    let stored = ws
        .tasks
        .find(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task missing after reminder pass"))?;
    let next = stored
        .next_reminder_at()
        .ok_or_else(|| eyre::eyre!("reminder should be rescheduled"))?;
    eyre::ensure!(next >= before + TimeDelta::minutes(15), "next reminder too early: {next}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn finished_work_is_not_reminded(
    workspace: Result<Workspace, eyre::Report>,
) -> Result<(), eyre::Report> {
    let ws = workspace?;
    let board = ws.board("Ops").await?;
    let task = ws
        .task(
            column(&board, "Done")?,
            CreateTaskRequest::new("Archive logs")
                .with_assignee("dev@example.com")
                .with_reminder(ReminderInterval::OneHour),
        )
        .await?;
    make_due(&ws, task.id()).await?;

    let summary = ws.reminders.run().await?;

    eyre::ensure!(summary.sent == 0, "done tasks must not be reminded");
    eyre::ensure!(
        summary.message() == "No reminders to send at this time.",
        "unexpected message {}",
        summary.message()
    );
    eyre::ensure!(ws.mailer.sent().is_empty());
    Ok(())
}
