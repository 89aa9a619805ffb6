//! Login view model

use std::sync::Arc;

use teachportal_client::PortalApi;
use teachportal_common::{Error, FieldErrors};

/// Local state of the login form
pub struct LoginView {
    api: Arc<dyn PortalApi>,
    pub username: String,
    pub password: String,
    pub errors: FieldErrors,
    pub error: String,
    pub loading: bool,
    pub succeeded: bool,
}

impl LoginView {
    pub fn new(api: Arc<dyn PortalApi>) -> Self {
        Self {
            api,
            username: String::new(),
            password: String::new(),
            errors: FieldErrors::new(),
            error: String::new(),
            loading: false,
            succeeded: false,
        }
    }

    /// Pre-submit checks; cheaper than the signup form on purpose
    fn validate(&mut self) -> bool {
        let mut errors = FieldErrors::new();
        errors.set(
            "username",
            if self.username.trim().len() < 3 {
                "Username must be at least 3 characters.".to_string()
            } else {
                String::new()
            },
        );
        errors.set(
            "password",
            if self.password.len() < 6 {
                "Use at least 6 characters.".to_string()
            } else {
                String::new()
            },
        );
        self.errors = errors;
        self.errors.is_valid()
    }

    /// Submit the form. Returns true on success.
    ///
    /// A server rejection surfaces a generic message; the credentials are
    /// never echoed back. Repeat submissions while a request is in flight
    /// are ignored.
    pub async fn submit(&mut self) -> bool {
        if self.loading || !self.validate() {
            return false;
        }

        self.loading = true;
        self.error.clear();

        let result = self.api.login(self.username.trim(), &self.password).await;
        self.loading = false;

        match result {
            Ok(_) => {
                self.succeeded = true;
                self.password.clear();
                true
            }
            Err(Error::Authentication(message)) => {
                self.error = message;
                false
            }
            Err(e) => {
                tracing::debug!(error = %e, "Login request failed");
                self.error = "Could not sign in. Please try again.".to_string();
                false
            }
        }
    }
}
