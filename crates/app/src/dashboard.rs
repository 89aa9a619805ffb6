//! Dashboard view model: the acting teacher's student roster
//!
//! Owns the add-student form and the roster table state. Rendering is
//! gated on authentication by the shell via [`DashboardView::authorized`].

use std::sync::Arc;

use teachportal_client::{NewStudent, PortalApi, Student};
use teachportal_common::{validate_email, validate_length, FieldErrors};
use teachportal_session::SessionManager;

use crate::table::TableState;

const DEFAULT_PAGE_SIZE: usize = 10;

pub struct DashboardView {
    api: Arc<dyn PortalApi>,
    session: SessionManager,
    pub table: TableState<Student>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub errors: FieldErrors,
    pub error: String,
    pub loading: bool,
    pub saving: bool,
}

impl DashboardView {
    pub fn new(api: Arc<dyn PortalApi>, session: SessionManager) -> Self {
        Self {
            api,
            session,
            table: TableState::new("firstName", DEFAULT_PAGE_SIZE),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            errors: FieldErrors::new(),
            error: String::new(),
            loading: false,
            saving: false,
        }
    }

    /// Whether the view may render; the shell redirects to login when false
    pub fn authorized(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Load the roster from the backend
    pub async fn refresh(&mut self) {
        self.loading = true;
        match self.api.list_students().await {
            Ok(students) => {
                self.table.set_rows(students);
                self.error.clear();
            }
            Err(e) => {
                tracing::debug!(error = %e, "Failed to load students");
                self.error = "Could not load students. Please try again.".to_string();
            }
        }
        self.loading = false;
    }

    fn validate_form(&mut self) -> bool {
        let mut errors = FieldErrors::new();
        errors.set("firstName", validate_length(&self.first_name, 2, 50));
        errors.set("lastName", validate_length(&self.last_name, 2, 50));
        errors.set("email", validate_email(&self.email));
        self.errors = errors;
        self.errors.is_valid()
    }

    /// Submit the add-student form. Returns true when a student was created.
    ///
    /// The acting teacher's id must resolve from the session claims before
    /// any request is sent. The created student is prepended to the roster
    /// and the form cleared.
    pub async fn add_student(&mut self) -> bool {
        if self.saving || !self.validate_form() {
            return false;
        }

        if self
            .session
            .subject_id()
            .and_then(|id| id.parse::<i64>().ok())
            .is_none()
        {
            self.error =
                "Could not determine teacher ID from your login. Please sign in again.".to_string();
            return false;
        }

        let new = NewStudent {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
        };

        self.saving = true;
        let result = self.api.create_student(new).await;
        self.saving = false;

        match result {
            Ok(created) => {
                self.table.prepend_row(created);
                self.clear_form();
                self.error.clear();
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "Failed to create student");
                self.error = "Could not add student. Please try again.".to_string();
                false
            }
        }
    }

    pub fn clear_form(&mut self) {
        self.first_name.clear();
        self.last_name.clear();
        self.email.clear();
        self.errors = FieldErrors::new();
    }
}
