//! Validated task field values: title, priority and reminder interval.

use super::TaskDomainError;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty, trimmed task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskTitle> for String {
    fn from(value: TaskTitle) -> Self {
        value.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority.
    #[default]
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(TaskDomainError::UnknownPriority(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recurrence period of reminder emails.
///
/// Stored and serialized as the exact strings `none`, `15 min`, `1 hour`
/// and `3 hour`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderInterval {
    /// Reminders are disabled.
    #[default]
    #[serde(rename = "none")]
    None,
    /// Every fifteen minutes.
    #[serde(rename = "15 min")]
    FifteenMinutes,
    /// Every hour.
    #[serde(rename = "1 hour")]
    OneHour,
    /// Every three hours.
    #[serde(rename = "3 hour")]
    ThreeHours,
}

impl ReminderInterval {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::FifteenMinutes => "15 min",
            Self::OneHour => "1 hour",
            Self::ThreeHours => "3 hour",
        }
    }

    /// Returns whether reminders fire at all.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Returns the time between two reminders, or `None` when disabled.
    #[must_use]
    pub const fn offset(self) -> Option<TimeDelta> {
        match self {
            Self::None => None,
            Self::FifteenMinutes => Some(TimeDelta::minutes(15)),
            Self::OneHour => Some(TimeDelta::hours(1)),
            Self::ThreeHours => Some(TimeDelta::hours(3)),
        }
    }
}

impl TryFrom<&str> for ReminderInterval {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "none" => Ok(Self::None),
            "15 min" => Ok(Self::FifteenMinutes),
            "1 hour" => Ok(Self::OneHour),
            "3 hour" => Ok(Self::ThreeHours),
            _ => Err(TaskDomainError::UnknownReminder(value.to_owned())),
        }
    }
}

impl fmt::Display for ReminderInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
