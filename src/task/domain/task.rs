//! Task aggregate root, creation fields and partial updates.

use super::{Priority, ReminderInterval, TaskId, TaskTitle};
use crate::auth::EmailAddress;
use crate::board::domain::ColumnId;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Delay before the first reminder of a newly scheduled task.
pub const FIRST_REMINDER_DELAY: TimeDelta = TimeDelta::minutes(1);

/// Validated fields of a task being created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: TaskTitle,
    /// Free-form description.
    pub description: Option<String>,
    /// Assignee email address.
    pub assignee: Option<EmailAddress>,
    /// Calendar due date.
    pub due_date: Option<NaiveDate>,
    /// Task priority.
    pub priority: Priority,
    /// Reminder interval.
    pub reminder: ReminderInterval,
}

impl NewTask {
    /// Creates fields with only a title; everything else takes defaults.
    #[must_use]
    pub fn titled(title: TaskTitle) -> Self {
        Self {
            title,
            description: None,
            assignee: None,
            due_date: None,
            priority: Priority::default(),
            reminder: ReminderInterval::default(),
        }
    }
}

/// Partial update of a task.
///
/// Outer `None` leaves a field untouched; for nullable fields `Some(None)`
/// clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<TaskTitle>,
    /// New or cleared description.
    pub description: Option<Option<String>>,
    /// New or cleared assignee.
    pub assignee: Option<Option<EmailAddress>>,
    /// New or cleared due date.
    pub due_date: Option<Option<NaiveDate>>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New reminder interval.
    pub reminder: Option<ReminderInterval>,
    /// Explicit next reminder time, applied after the other fields.
    pub next_reminder_at: Option<Option<DateTime<Utc>>>,
}

impl TaskPatch {
    /// Returns whether the patch names no field at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.assignee.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.reminder.is_none()
            && self.next_reminder_at.is_none()
    }
}

/// Task field names recorded in history entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    /// Title.
    Title,
    /// Description.
    Description,
    /// Assignee.
    Assignee,
    /// Due date.
    DueDate,
    /// Priority.
    Priority,
    /// Reminder interval.
    Reminder,
    /// Next reminder time.
    NextReminder,
}

impl TaskField {
    /// Returns the human-readable field label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Assignee => "assignee",
            Self::DueDate => "due date",
            Self::Priority => "priority",
            Self::Reminder => "reminder",
            Self::NextReminder => "next reminder",
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    column_id: ColumnId,
    title: TaskTitle,
    description: Option<String>,
    assignee: Option<EmailAddress>,
    due_date: Option<NaiveDate>,
    priority: Priority,
    reminder: ReminderInterval,
    next_reminder_at: Option<DateTime<Utc>>,
    sort_order: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning column.
    pub column_id: ColumnId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted assignee.
    pub assignee: Option<EmailAddress>,
    /// Persisted due date.
    pub due_date: Option<NaiveDate>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted reminder interval.
    pub reminder: ReminderInterval,
    /// Persisted next reminder time.
    pub next_reminder_at: Option<DateTime<Utc>>,
    /// Position within the column.
    pub sort_order: u32,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest edit timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task at `sort_order` in `column_id`.
    ///
    /// When reminders are enabled the first one is due
    /// [`FIRST_REMINDER_DELAY`] from now.
    #[must_use]
    pub fn new(column_id: ColumnId, fields: NewTask, sort_order: u32, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let next_reminder_at = fields
            .reminder
            .is_enabled()
            .then(|| timestamp + FIRST_REMINDER_DELAY);
        Self {
            id: TaskId::new(),
            column_id,
            title: fields.title,
            description: fields.description,
            assignee: fields.assignee,
            due_date: fields.due_date,
            priority: fields.priority,
            reminder: fields.reminder,
            next_reminder_at,
            sort_order,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            column_id: data.column_id,
            title: data.title,
            description: data.description,
            assignee: data.assignee,
            due_date: data.due_date,
            priority: data.priority,
            reminder: data.reminder,
            next_reminder_at: data.next_reminder_at,
            sort_order: data.sort_order,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning column.
    #[must_use]
    pub const fn column_id(&self) -> ColumnId {
        self.column_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&EmailAddress> {
        self.assignee.as_ref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the reminder interval.
    #[must_use]
    pub const fn reminder(&self) -> ReminderInterval {
        self.reminder
    }

    /// Returns when the next reminder is due, if scheduled.
    #[must_use]
    pub const fn next_reminder_at(&self) -> Option<DateTime<Utc>> {
        self.next_reminder_at
    }

    /// Returns the position within the column.
    #[must_use]
    pub const fn sort_order(&self) -> u32 {
        self.sort_order
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest edit timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the due date has passed, that is `now` is later than
    /// midnight UTC at the start of the due date.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .is_some_and(|midnight| now > midnight.and_utc())
    }

    /// Applies a partial update and returns the fields that changed.
    ///
    /// Changing the due date or reminder interval clears the schedule. An
    /// explicit `next_reminder_at` is applied last and ignored while
    /// reminders are disabled.
    pub fn apply_patch(&mut self, patch: TaskPatch, clock: &impl Clock) -> Vec<TaskField> {
        let mut changed = Vec::new();
        if let Some(title) = patch.title.filter(|value| *value != self.title) {
            self.title = title;
            changed.push(TaskField::Title);
        }
        if let Some(description) = patch.description.filter(|value| *value != self.description) {
            self.description = description;
            changed.push(TaskField::Description);
        }
        if let Some(assignee) = patch.assignee.filter(|value| *value != self.assignee) {
            self.assignee = assignee;
            changed.push(TaskField::Assignee);
        }
        if let Some(due_date) = patch.due_date.filter(|value| *value != self.due_date) {
            self.due_date = due_date;
            changed.push(TaskField::DueDate);
        }
        if let Some(priority) = patch.priority.filter(|value| *value != self.priority) {
            self.priority = priority;
            changed.push(TaskField::Priority);
        }
        if let Some(reminder) = patch.reminder.filter(|value| *value != self.reminder) {
            self.reminder = reminder;
            changed.push(TaskField::Reminder);
        }

        let schedule_reset =
            changed.contains(&TaskField::DueDate) || changed.contains(&TaskField::Reminder);
        if schedule_reset {
            self.next_reminder_at = None;
        }
        if let Some(requested) = patch.next_reminder_at {
            let effective = requested.filter(|_| self.reminder.is_enabled());
            if effective != self.next_reminder_at {
                self.next_reminder_at = effective;
                changed.push(TaskField::NextReminder);
            }
        }

        if !changed.is_empty() {
            self.updated_at = clock.utc();
        }
        changed
    }

    /// Moves the task to `column_id` at `sort_order`.
    pub const fn relocate(&mut self, column_id: ColumnId, sort_order: u32) {
        self.column_id = column_id;
        self.sort_order = sort_order;
    }

    /// Sets the position within the current column.
    pub const fn set_sort_order(&mut self, sort_order: u32) {
        self.sort_order = sort_order;
    }

    /// Restarts reminders so the next one fires shortly. No effect while
    /// reminders are disabled.
    pub fn restart_reminders(&mut self, clock: &impl Clock) {
        if self.reminder.is_enabled() {
            let now = clock.utc();
            self.next_reminder_at = Some(now + FIRST_REMINDER_DELAY);
            self.updated_at = now;
        }
    }

    /// Stops reminders until they are restarted.
    pub fn stop_reminders(&mut self, clock: &impl Clock) {
        if self.next_reminder_at.is_some() {
            self.next_reminder_at = None;
            self.updated_at = clock.utc();
        }
    }

    /// Overwrites the reminder schedule as stored, dropping it while
    /// reminders are disabled.
    pub fn set_next_reminder(&mut self, next_reminder_at: Option<DateTime<Utc>>) {
        self.next_reminder_at = next_reminder_at.filter(|_| self.reminder.is_enabled());
    }

    /// Holds the reminder until `until` while a dispatcher processes it.
    pub const fn lease_reminder(&mut self, until: DateTime<Utc>) {
        self.next_reminder_at = Some(until);
    }

    /// Schedules the reminder after the one fired at `now`.
    pub fn reschedule_after(&mut self, now: DateTime<Utc>) {
        self.next_reminder_at = self.reminder.offset().map(|offset| now + offset);
    }
}
