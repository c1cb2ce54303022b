//! Board aggregate and validated board values.

use super::{BoardDomainError, BoardId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty, trimmed board title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardTitle(String);

impl BoardTitle {
    /// Creates a validated board title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyBoardTitle`] when the title is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyBoardTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoardTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// CSS color token used to render the board, such as `bg-blue-500`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardColor(String);

impl BoardColor {
    /// Color applied when the creator does not pick one.
    pub const DEFAULT: &'static str = "bg-blue-500";

    /// Creates a validated color token.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidColor`] when the token is empty or
    /// contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(BoardDomainError::InvalidColor(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the color token as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BoardColor {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

/// Board aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    id: BoardId,
    title: BoardTitle,
    color: BoardColor,
    owner_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBoardData {
    /// Persisted board identifier.
    pub id: BoardId,
    /// Persisted title.
    pub title: BoardTitle,
    /// Persisted color token.
    pub color: BoardColor,
    /// Identity-provider id of the owner.
    pub owner_id: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest edit timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Creates a new board owned by `owner_id`.
    #[must_use]
    pub fn new(
        title: BoardTitle,
        color: BoardColor,
        owner_id: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: BoardId::new(),
            title,
            color,
            owner_id: owner_id.into(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a board from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBoardData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            color: data.color,
            owner_id: data.owner_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn id(&self) -> BoardId {
        self.id
    }

    /// Returns the board title.
    #[must_use]
    pub const fn title(&self) -> &BoardTitle {
        &self.title
    }

    /// Returns the board color token.
    #[must_use]
    pub const fn color(&self) -> &BoardColor {
        &self.color
    }

    /// Returns the owner identifier.
    #[must_use]
    pub fn owner_id(&self) -> &str {
        &self.owner_id
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

    /// Applies a title and/or color edit.
    pub fn edit(&mut self, title: Option<BoardTitle>, color: Option<BoardColor>, clock: &impl Clock) {
        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_color) = color {
            self.color = new_color;
        }
        self.updated_at = clock.utc();
    }
}
