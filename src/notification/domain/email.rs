//! Email messages and their HTML templates.

use crate::auth::EmailAddress;
use crate::task::domain::Task;
use chrono::{DateTime, NaiveDate, Utc};
use minijinja::Environment;
use serde::Serialize;

const ASSIGNMENT_TEMPLATE: &str = "assignment.html";
const REMINDER_TEMPLATE: &str = "reminder.html";
const OVERDUE_TEMPLATE: &str = "overdue.html";

const LAYOUT_SOURCE: &str = r#"<div style="font-family: Poppins, sans-serif; padding: 20px;">
  {% block content %}{% endblock %}
  <p><strong>Description:</strong> {{ description or "No description provided" }}</p>
</div>"#;

const ASSIGNMENT_SOURCE: &str = r#"{% extends "layout.html" %}
{% block content %}<h2 style="color: #007BFF;">You've been assigned a new task!</h2>
  <p><strong>Task:</strong> {{ title }}</p>
  <p><strong>Due Date:</strong> {{ due_date or "No due date" }}</p>{% endblock %}"#;

const REMINDER_SOURCE: &str = r#"{% extends "layout.html" %}
{% block content %}<h2>Task Reminder</h2>
  <p>This is your recurring reminder for the task: "<strong>{{ title }}</strong>".</p>{% endblock %}"#;

const OVERDUE_SOURCE: &str = r#"{% extends "layout.html" %}
{% block content %}<h2>Task Reminder</h2>
  <p>This is a reminder that your task "<strong>{{ title }}</strong>" is PAST its due date of {{ due_date }}. Please update its status.</p>{% endblock %}"#;

/// A rendered HTML email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient.
    pub to: EmailAddress,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Details of a one-shot assignment email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentDetails {
    /// Recipient of the email.
    pub recipient: EmailAddress,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: Option<String>,
    /// Task due date.
    pub due_date: Option<NaiveDate>,
}

impl AssignmentDetails {
    /// Extracts assignment details from a task with an assignee.
    #[must_use]
    pub fn from_task(task: &Task) -> Option<Self> {
        task.assignee().map(|recipient| Self {
            recipient: recipient.clone(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            due_date: task.due_date(),
        })
    }
}

#[derive(Serialize)]
struct EmailContext<'a> {
    title: &'a str,
    description: Option<&'a str>,
    due_date: Option<String>,
}

/// Renders notification emails from built-in templates.
///
/// Values are HTML-escaped when rendered.
#[derive(Debug)]
pub struct EmailComposer {
    environment: Environment<'static>,
}

impl EmailComposer {
    /// Builds the composer and compiles its templates.
    ///
    /// # Errors
    ///
    /// Returns [`minijinja::Error`] when a template fails to compile.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut environment = Environment::new();
        environment.add_template("layout.html", LAYOUT_SOURCE)?;
        environment.add_template(ASSIGNMENT_TEMPLATE, ASSIGNMENT_SOURCE)?;
        environment.add_template(REMINDER_TEMPLATE, REMINDER_SOURCE)?;
        environment.add_template(OVERDUE_TEMPLATE, OVERDUE_SOURCE)?;
        Ok(Self { environment })
    }

    /// Renders the assignment email.
    ///
    /// # Errors
    ///
    /// Returns [`minijinja::Error`] when rendering fails.
    pub fn assignment(&self, details: &AssignmentDetails) -> Result<EmailMessage, minijinja::Error> {
        let html = self.render(
            ASSIGNMENT_TEMPLATE,
            &EmailContext {
                title: &details.title,
                description: details.description.as_deref(),
                due_date: details.due_date.map(format_date),
            },
        )?;
        Ok(EmailMessage {
            to: details.recipient.clone(),
            subject: format!("New Task Assigned: {}", details.title),
            html,
        })
    }

    /// Renders the reminder for `task` at `now`, or `None` when the task has
    /// no assignee.
    ///
    /// The overdue variant is used once `now` is past the start of the due
    /// date.
    ///
    /// # Errors
    ///
    /// Returns [`minijinja::Error`] when rendering fails.
    pub fn reminder(
        &self,
        task: &Task,
        now: DateTime<Utc>,
    ) -> Result<Option<EmailMessage>, minijinja::Error> {
        let Some(recipient) = task.assignee() else {
            return Ok(None);
        };
        let title = task.title().as_str();
        let overdue = task.is_overdue(now);
        let context = EmailContext {
            title,
            description: task.description(),
            due_date: task.due_date().map(format_date),
        };
        let (template, subject) = if overdue {
            (OVERDUE_TEMPLATE, format!("OVERDUE: {title}"))
        } else {
            (REMINDER_TEMPLATE, format!("Reminder: {title}"))
        };
        let html = self.render(template, &context)?;
        Ok(Some(EmailMessage {
            to: recipient.clone(),
            subject,
            html,
        }))
    }

    fn render(&self, name: &str, context: &EmailContext<'_>) -> Result<String, minijinja::Error> {
        self.environment
            .get_template(name)?
            .render(context)
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
