//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning column.
        column_id -> Uuid,
        /// Task title.
        #[max_length = 500]
        title -> Varchar,
        /// Free-form description.
        description -> Nullable<Text>,
        /// Assignee email address.
        #[max_length = 320]
        assignee -> Nullable<Varchar>,
        /// Calendar due date.
        due_date -> Nullable<Date>,
        /// Priority: `low`, `medium` or `high`.
        #[max_length = 16]
        priority -> Varchar,
        /// Reminder interval label.
        #[max_length = 16]
        reminder -> Varchar,
        /// Next reminder time.
        next_reminder_at -> Nullable<Timestamptz>,
        /// Position within the column.
        sort_order -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last edit timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only task history.
    task_history (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Task the entry belongs to.
        task_id -> Uuid,
        /// Change description.
        description -> Text,
        /// Who made the change.
        #[max_length = 320]
        actor -> Varchar,
        /// When the change was made.
        changed_at -> Timestamptz,
    }
}

diesel::joinable!(task_history -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, task_history);
