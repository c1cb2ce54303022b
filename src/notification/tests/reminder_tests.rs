//! Tests for the recurring reminder dispatcher.

use std::sync::Arc;

use chrono::{NaiveDate, TimeDelta};
use mockable::Clock;
use rstest::rstest;

use crate::auth::{Actor, EmailAddress, Role};
use crate::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{Column, ColumnId},
    services::{BoardService, CreateBoardRequest},
};
use crate::notification::{
    adapters::memory::RecordingMailer,
    domain::EmailComposer,
    services::{ReminderDispatcher, ReminderSummary},
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{ReminderInterval, Task},
    services::{CreateTaskRequest, TaskLifecycleService},
};
use crate::test_support::FixedClock;

type Dispatcher =
    ReminderDispatcher<InMemoryTaskRepository, InMemoryBoardRepository, RecordingMailer, FixedClock>;

struct Fixture {
    lifecycle: TaskLifecycleService<InMemoryTaskRepository, InMemoryBoardRepository, FixedClock>,
    tasks: Arc<InMemoryTaskRepository>,
    boards: Arc<InMemoryBoardRepository>,
    clock: FixedClock,
    columns: Vec<Column>,
}

impl Fixture {
    async fn new() -> Self {
        let clock = FixedClock::default();
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let boards = Arc::new(InMemoryBoardRepository::new());
        let created = BoardService::new(Arc::clone(&boards), Arc::new(clock.clone()))
            .create_board(CreateBoardRequest::new("owner_1", "Sprint"))
            .await
            .expect("board creation should succeed");
        let lifecycle = TaskLifecycleService::new(
            Arc::clone(&tasks),
            Arc::clone(&boards),
            Arc::new(clock.clone()),
        );
        Self {
            lifecycle,
            tasks,
            boards,
            clock,
            columns: created.columns,
        }
    }

    fn column(&self, title: &str) -> ColumnId {
        self.columns
            .iter()
            .find(|column| column.title().as_str() == title)
            .map(Column::id)
            .expect("default column should exist")
    }

    fn dispatcher(&self, mailer: &RecordingMailer) -> Dispatcher {
        ReminderDispatcher::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.boards),
            Arc::new(mailer.clone()),
            Arc::new(EmailComposer::new().expect("templates should compile")),
            Arc::new(self.clock.clone()),
        )
    }

    async fn add(&self, column: &str, request: CreateTaskRequest) -> Task {
        self.lifecycle
            .create(self.column(column), request, Some(&admin()))
            .await
            .expect("task creation should succeed")
    }

    async fn reload(&self, task: &Task) -> Task {
        self.lifecycle
            .find(task.id())
            .await
            .expect("lookup should succeed")
            .expect("task should exist")
    }
}

fn admin() -> Actor {
    Actor::new(
        "user_admin",
        Some(EmailAddress::new("admin@example.com").expect("valid email")),
        Role::Admin,
    )
}

fn assigned(title: &str, reminder: ReminderInterval) -> CreateTaskRequest {
    CreateTaskRequest::new(title)
        .with_assignee("dev@example.com")
        .with_reminder(reminder)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sends_due_reminder_and_schedules_next() {
    let fixture = Fixture::new().await;
    let mailer = RecordingMailer::new();
    let task = fixture
        .add("To Do", assigned("Write changelog", ReminderInterval::OneHour))
        .await;
    fixture.clock.advance(TimeDelta::minutes(1));

    let summary = fixture.dispatcher(&mailer).run().await.expect("pass should run");

    assert_eq!(
        summary,
        ReminderSummary {
            sent: 1,
            skipped: 0,
            failed: 0
        }
    );
    assert_eq!(summary.message(), "Sent 1 reminders.");
    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent.first().map(|message| message.subject.as_str()),
        Some("Reminder: Write changelog")
    );
    let now = fixture.clock.utc();
    assert_eq!(
        fixture.reload(&task).await.next_reminder_at(),
        Some(now + TimeDelta::hours(1))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn each_due_task_follows_its_own_interval() {
    let fixture = Fixture::new().await;
    let mailer = RecordingMailer::new();
    let quick = fixture
        .add("To Do", assigned("Triage inbox", ReminderInterval::FifteenMinutes))
        .await;
    let slow = fixture
        .add("In Progress", assigned("Port parser", ReminderInterval::OneHour))
        .await;
    fixture.clock.advance(TimeDelta::minutes(1));

    let summary = fixture.dispatcher(&mailer).run().await.expect("pass should run");

    assert_eq!(summary.sent, 2);
    assert_eq!(mailer.sent().len(), 2);
    let quick_next = fixture
        .reload(&quick)
        .await
        .next_reminder_at()
        .expect("quick task rescheduled");
    let slow_next = fixture
        .reload(&slow)
        .await
        .next_reminder_at()
        .expect("slow task rescheduled");
    assert_eq!(slow_next - quick_next, TimeDelta::minutes(45));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn nothing_due_reports_idle_pass() {
    let fixture = Fixture::new().await;
    let mailer = RecordingMailer::new();
    fixture
        .add("To Do", assigned("Write changelog", ReminderInterval::FifteenMinutes))
        .await;

    let summary = fixture.dispatcher(&mailer).run().await.expect("pass should run");

    assert_eq!(summary, ReminderSummary::default());
    assert_eq!(summary.message(), "No reminders to send at this time.");
    assert!(mailer.sent().is_empty());
}

#[rstest]
#[case::review("Review")]
#[case::done("Done")]
#[tokio::test(flavor = "multi_thread")]
async fn inactive_lanes_are_never_reminded(#[case] column: &str) {
    let fixture = Fixture::new().await;
    let mailer = RecordingMailer::new();
    fixture
        .add(column, assigned("Publish notes", ReminderInterval::OneHour))
        .await;
    fixture.clock.advance(TimeDelta::hours(2));

    let summary = fixture.dispatcher(&mailer).run().await.expect("pass should run");

    assert_eq!(summary.sent, 0);
    assert!(mailer.sent().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_tasks_get_overdue_subject() {
    let fixture = Fixture::new().await;
    let mailer = RecordingMailer::new();
    let yesterday = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
    fixture
        .add(
            "In Progress",
            assigned("Renew certificate", ReminderInterval::ThreeHours).with_due_date(yesterday),
        )
        .await;
    fixture.clock.advance(TimeDelta::minutes(5));

    fixture.dispatcher(&mailer).run().await.expect("pass should run");

    let subjects: Vec<String> = mailer.sent().into_iter().map(|message| message.subject).collect();
    assert_eq!(subjects, ["OVERDUE: Renew certificate"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unassigned_tasks_are_rescheduled_without_email() {
    let fixture = Fixture::new().await;
    let mailer = RecordingMailer::new();
    let task = fixture
        .add(
            "To Do",
            CreateTaskRequest::new("Triage inbox").with_reminder(ReminderInterval::FifteenMinutes),
        )
        .await;
    fixture.clock.advance(TimeDelta::minutes(2));

    let summary = fixture.dispatcher(&mailer).run().await.expect("pass should run");

    assert_eq!(summary.skipped, 1);
    assert!(mailer.sent().is_empty());
    let now = fixture.clock.utc();
    assert_eq!(
        fixture.reload(&task).await.next_reminder_at(),
        Some(now + TimeDelta::minutes(15))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_email_keeps_lease_and_other_tasks_proceed() {
    let fixture = Fixture::new().await;
    let mailer =
        RecordingMailer::failing_for([EmailAddress::new("bounce@example.com").expect("valid")]);
    let failing = fixture
        .add(
            "To Do",
            CreateTaskRequest::new("Chase vendor")
                .with_assignee("bounce@example.com")
                .with_reminder(ReminderInterval::OneHour),
        )
        .await;
    fixture
        .add("To Do", assigned("Write changelog", ReminderInterval::OneHour))
        .await;
    fixture.clock.advance(TimeDelta::minutes(1));
    let dispatcher = fixture.dispatcher(&mailer).with_lease(TimeDelta::minutes(10));

    let summary = dispatcher.run().await.expect("pass should run");

    assert_eq!(summary.sent, 1);
    assert_eq!(summary.failed, 1);
    let now = fixture.clock.utc();
    assert_eq!(
        fixture.reload(&failing).await.next_reminder_at(),
        Some(now + TimeDelta::minutes(10))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn claimed_reminders_are_not_sent_twice() {
    let fixture = Fixture::new().await;
    let mailer = RecordingMailer::new();
    fixture
        .add("To Do", assigned("Write changelog", ReminderInterval::OneHour))
        .await;
    fixture.clock.advance(TimeDelta::minutes(1));
    let dispatcher = fixture.dispatcher(&mailer);

    dispatcher.run().await.expect("first pass should run");
    let second = dispatcher.run().await.expect("second pass should run");

    assert_eq!(second.sent, 0);
    assert_eq!(mailer.sent().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn disabled_reminders_are_ignored() {
    let fixture = Fixture::new().await;
    let mailer = RecordingMailer::new();
    let task = fixture
        .add("To Do", assigned("Quiet task", ReminderInterval::None))
        .await;
    fixture.clock.advance(TimeDelta::days(1));

    let summary = fixture.dispatcher(&mailer).run().await.expect("pass should run");

    assert_eq!(summary, ReminderSummary::default());
    assert_eq!(fixture.reload(&task).await.next_reminder_at(), None);
}
