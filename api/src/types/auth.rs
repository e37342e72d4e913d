//! Authentication payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of an authenticated user
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Student or guest attending events
    Participant,
    /// Creates and manages events
    Organizer,
    /// Validates payments and manages the platform
    Admin,
}

impl UserRole {
    /// Whether this role may validate payment proofs and check tickets in
    #[must_use]
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Organizer | Self::Admin)
    }
}

/// An authenticated user
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User id
    pub id: String,
    /// Display name
    pub name: String,
    /// Login e-mail
    pub email: String,
    /// Role
    pub role: UserRole,
    /// Avatar image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Account creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// `POST /auth/login` body
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Login e-mail
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// `POST /auth/register` body
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name
    pub name: String,
    /// Login e-mail
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// Response of login and registration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Bearer token for subsequent calls
    pub token: String,
    /// The authenticated user
    pub user: User,
}
