//! Headless view models for the TeachPortal client
//!
//! Each view owns purely local UI state (form fields, search, sort, page)
//! and drives all network work through the `PortalApi` trait, so every view
//! runs unchanged against the mock API in tests. Navigation is owned by the
//! hosting shell.

pub mod dashboard;
pub mod login;
pub mod overview;
pub mod signup;
pub mod table;

pub use dashboard::DashboardView;
pub use login::LoginView;
pub use overview::TeacherOverviewView;
pub use signup::SignupView;
pub use table::{SortDirection, SortValue, TableRow, TableState};
