//! Caller identity for board operations.
//!
//! Identity and session management belong to the external identity
//! provider. This module only verifies the bearer tokens it issues and maps
//! their claims onto an [`Actor`] with a [`Role`].

mod actor;
mod token;

pub use actor::{Actor, EmailAddress, InvalidEmailAddress, Role};
pub use token::{Claims, TokenError, TokenVerifier, sign_claims};
