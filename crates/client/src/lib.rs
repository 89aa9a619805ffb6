//! TeachPortal API client
//!
//! Wraps all outbound HTTP calls to the TeachPortal backend:
//! - attaches `Authorization: Bearer <token>` from the session on every call
//! - recovers from 401/403 by clearing the session and notifying the shell
//! - exposes typed endpoint wrappers behind the [`PortalApi`] trait
//! - provides a mock implementation for headless view tests

pub mod client;
pub mod dto;
pub mod mock;

use std::sync::Arc;

use async_trait::async_trait;
use teachportal_common::Result;

pub use client::PortalClient;
pub use dto::{NewStudent, SignupRequest, Student, Teacher};
pub use mock::MockPortalApi;

/// Callback invoked after a 401/403 response has cleared the session.
///
/// The hosting shell subscribes and performs navigation back to the login
/// view; the client itself stays navigation-agnostic.
pub type AuthFailureHandler = Arc<dyn Fn() + Send + Sync>;

/// Outbound API surface of the TeachPortal backend.
///
/// Views depend on this trait so they can run against [`MockPortalApi`]
/// in tests and [`PortalClient`] in production.
#[async_trait]
pub trait PortalApi: Send + Sync {
    /// Exchange credentials for a token. Stores the token on success.
    async fn login(&self, username: &str, password: &str) -> Result<String>;

    /// Create a teacher account
    async fn signup(&self, request: SignupRequest) -> Result<()>;

    /// List students belonging to the acting teacher
    async fn list_students(&self) -> Result<Vec<Student>>;

    /// Create a student for the acting teacher
    async fn create_student(&self, new: NewStudent) -> Result<Student>;

    /// List all teachers with their student counts
    async fn list_teachers(&self) -> Result<Vec<Teacher>>;

    /// List the students of one teacher
    async fn teacher_students(&self, teacher_id: i64) -> Result<Vec<Student>>;
}
