//! Authenticated actor, role and email address values.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when an email address fails validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid email address: '{0}'")]
pub struct InvalidEmailAddress(pub String);

/// Validated email address in `local@domain` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Surrounding whitespace is trimmed. The value must contain exactly one
    /// `@` with a non-empty local part and a domain containing a dot.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidEmailAddress`] when the value is not an address.
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidEmailAddress> {
        let raw = value.into();
        let normalized = raw.trim();
        let mut parts = normalized.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let is_valid = !local.is_empty()
            && parts.next().is_none()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(InvalidEmailAddress(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = InvalidEmailAddress;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Board role granted by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular board member.
    Member,
    /// Administrator allowed to edit tasks.
    Admin,
    /// Super administrator allowed to edit tasks.
    Superadmin,
}

impl Role {
    /// Parses the role claim. Unknown or missing roles map to
    /// [`Role::Member`].
    #[must_use]
    pub fn from_claim(value: Option<&str>) -> Self {
        match value.map(|raw| raw.trim().to_ascii_lowercase()).as_deref() {
            Some("admin") => Self::Admin,
            Some("superadmin") => Self::Superadmin,
            _ => Self::Member,
        }
    }

    /// Returns the canonical claim representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
            Self::Superadmin => "superadmin",
        }
    }

    /// Returns whether the role may edit existing tasks.
    #[must_use]
    pub const fn can_edit_tasks(self) -> bool {
        matches!(self, Self::Admin | Self::Superadmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated caller of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    user_id: String,
    email: Option<EmailAddress>,
    role: Role,
}

impl Actor {
    /// Creates an actor from identity-provider claims.
    #[must_use]
    pub fn new(user_id: impl Into<String>, email: Option<EmailAddress>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            email,
            role,
        }
    }

    /// Returns the identity-provider user identifier.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the primary email address, if the provider supplied one.
    #[must_use]
    pub const fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }

    /// Returns the actor role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Label recorded in task history: the email when known, otherwise the
    /// user identifier.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.email
            .as_ref()
            .map_or(self.user_id.as_str(), EmailAddress::as_str)
    }
}
