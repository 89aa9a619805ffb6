//! Signup view model

use std::sync::Arc;

use teachportal_client::{PortalApi, SignupRequest};
use teachportal_common::{validate_email, validate_length, Error, FieldErrors};

/// Local state of the teacher signup form
pub struct SignupView {
    api: Arc<dyn PortalApi>,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
    pub errors: FieldErrors,
    pub error: String,
    pub loading: bool,
    pub succeeded: bool,
}

impl SignupView {
    pub fn new(api: Arc<dyn PortalApi>) -> Self {
        Self {
            api,
            user_name: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            password: String::new(),
            confirm: String::new(),
            errors: FieldErrors::new(),
            error: String::new(),
            loading: false,
            succeeded: false,
        }
    }

    /// Run every field check and keep the per-field messages around
    pub fn validate(&mut self) -> bool {
        let mut errors = FieldErrors::new();
        errors.set("userName", validate_length(&self.user_name, 3, 30));
        errors.set("firstName", validate_length(&self.first_name, 2, 50));
        errors.set("lastName", validate_length(&self.last_name, 2, 50));
        errors.set("email", validate_email(&self.email));
        errors.set(
            "password",
            if self.password.len() < 6 {
                "Use at least 6 characters.".to_string()
            } else {
                String::new()
            },
        );
        errors.set(
            "confirm",
            if self.password != self.confirm {
                "Passwords do not match.".to_string()
            } else {
                String::new()
            },
        );
        self.errors = errors;
        self.errors.is_valid()
    }

    /// Submit the form. Validation failures block the request entirely.
    pub async fn submit(&mut self) -> bool {
        if self.loading || !self.validate() {
            return false;
        }

        let request = SignupRequest {
            user_name: self.user_name.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password_hash: self.password.clone(),
        };

        self.loading = true;
        self.error.clear();
        let result = self.api.signup(request).await;
        self.loading = false;

        match result {
            Ok(()) => {
                self.succeeded = true;
                self.password.clear();
                self.confirm.clear();
                true
            }
            Err(Error::Authentication(message)) => {
                self.error = message;
                false
            }
            Err(e) => {
                tracing::debug!(error = %e, "Signup request failed");
                self.error = "Could not create the account. Please try again.".to_string();
                false
            }
        }
    }
}
