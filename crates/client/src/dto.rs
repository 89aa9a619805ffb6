//! Wire DTOs for the TeachPortal backend
//!
//! Student and teacher records are opaque pass-through data; only the
//! fields the views display are modeled. Everything is camelCase on the
//! wire.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A student record as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Payload for creating a student.
///
/// The `validator` constraints mirror the inline field checks; the client
/// rejects locally before any network I/O.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    #[validate(length(min = 2, max = 50))]
    pub first_name: String,
    #[validate(length(min = 2, max = 50))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
}

impl From<NewStudent> for Student {
    fn from(new: NewStudent) -> Self {
        Student {
            id: None,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
        }
    }
}

/// A teacher row from `GET /teacher`.
///
/// Backends have drifted on field names over time, so identity and display
/// fields are all optional and resolved through helpers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub teacher_id: Option<i64>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub student_count: u64,
}

impl Teacher {
    /// Display name: explicit `name`, else "first last", else username
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        let full = full.trim();
        if !full.is_empty() {
            return full.to_string();
        }
        self.user_name
            .clone()
            .unwrap_or_else(|| "Teacher".to_string())
    }

    /// Numeric identifier, whichever field the backend populated
    pub fn teacher_id(&self) -> Option<i64> {
        self.id.or(self.teacher_id)
    }
}

/// Payload for `POST /auth/signup`.
///
/// `passwordHash` carries the plain password; the server hashes it. The
/// misleading field name is the wire contract.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 3, max = 30))]
    pub user_name: String,
    #[validate(length(min = 2, max = 50))]
    pub first_name: String,
    #[validate(length(min = 2, max = 50))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password_hash: String,
}
