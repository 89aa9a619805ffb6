//! Mock API implementation
//!
//! Serves canned rosters from memory and records mutating calls for test
//! assertions. Thread-safe via `Mutex`.

use std::sync::Mutex;

use async_trait::async_trait;

use teachportal_common::{Error, Result};
use teachportal_session::SessionManager;

use crate::dto::{NewStudent, SignupRequest, Student, Teacher};
use crate::PortalApi;

/// Mock TeachPortal API for headless view tests
#[derive(Default)]
pub struct MockPortalApi {
    students: Mutex<Vec<Student>>,
    teachers: Mutex<Vec<Teacher>>,
    signups: Mutex<Vec<SignupRequest>>,
    login_token: Mutex<Option<String>>,
    next_error: Mutex<Option<Error>>,
    session: Option<SessionManager>,
}

impl MockPortalApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store successful logins into `session`, like the real client does
    pub fn with_session(session: SessionManager) -> Self {
        Self {
            session: Some(session),
            ..Self::default()
        }
    }

    /// Token returned by the next successful login; `None` rejects logins
    pub fn set_login_token(&self, token: impl Into<String>) {
        *self.login_token.lock().expect("login_token lock poisoned") = Some(token.into());
    }

    pub fn set_students(&self, students: Vec<Student>) {
        *self.students.lock().expect("students lock poisoned") = students;
    }

    pub fn set_teachers(&self, teachers: Vec<Teacher>) {
        *self.teachers.lock().expect("teachers lock poisoned") = teachers;
    }

    /// Fail the next call with `error`, whatever it is
    pub fn fail_next(&self, error: Error) {
        *self.next_error.lock().expect("next_error lock poisoned") = Some(error);
    }

    /// Signup requests accepted so far
    pub fn recorded_signups(&self) -> Vec<SignupRequest> {
        self.signups.lock().expect("signups lock poisoned").clone()
    }

    fn take_scripted_error(&self) -> Option<Error> {
        self.next_error
            .lock()
            .expect("next_error lock poisoned")
            .take()
    }
}

#[async_trait]
impl PortalApi for MockPortalApi {
    async fn login(&self, username: &str, _password: &str) -> Result<String> {
        if let Some(error) = self.take_scripted_error() {
            return Err(error);
        }
        let token = self
            .login_token
            .lock()
            .expect("login_token lock poisoned")
            .clone()
            .ok_or_else(|| Error::Authentication("Invalid username or password.".to_string()))?;

        tracing::debug!(username, "Mock login accepted");
        if let Some(session) = &self.session {
            session
                .store_token(&token)
                .map_err(|e| Error::Session(e.to_string()))?;
        }
        Ok(token)
    }

    async fn signup(&self, request: SignupRequest) -> Result<()> {
        if let Some(error) = self.take_scripted_error() {
            return Err(error);
        }
        self.signups
            .lock()
            .expect("signups lock poisoned")
            .push(request);
        Ok(())
    }

    async fn list_students(&self) -> Result<Vec<Student>> {
        if let Some(error) = self.take_scripted_error() {
            return Err(error);
        }
        Ok(self.students.lock().expect("students lock poisoned").clone())
    }

    async fn create_student(&self, new: NewStudent) -> Result<Student> {
        if let Some(error) = self.take_scripted_error() {
            return Err(error);
        }
        let mut students = self.students.lock().expect("students lock poisoned");
        let created = Student {
            id: Some(students.len() as i64 + 1),
            ..Student::from(new)
        };
        students.push(created.clone());
        Ok(created)
    }

    async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        if let Some(error) = self.take_scripted_error() {
            return Err(error);
        }
        Ok(self.teachers.lock().expect("teachers lock poisoned").clone())
    }

    async fn teacher_students(&self, teacher_id: i64) -> Result<Vec<Student>> {
        if let Some(error) = self.take_scripted_error() {
            return Err(error);
        }
        // One shared roster is enough for view tests; filter by nothing
        tracing::debug!(teacher_id, "Mock teacher_students");
        Ok(self.students.lock().expect("students lock poisoned").clone())
    }
}
