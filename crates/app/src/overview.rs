//! Teacher overview view model: read-only roster of all teachers
//!
//! Search and sort over the teacher list, plus a drill-down into one
//! teacher's students.

use std::sync::Arc;

use teachportal_client::{PortalApi, Student, Teacher};

use crate::table::TableState;

const TEACHER_PAGE_SIZE: usize = 20;

pub struct TeacherOverviewView {
    api: Arc<dyn PortalApi>,
    pub teachers: TableState<Teacher>,
    pub selected: Option<Teacher>,
    pub students: Vec<Student>,
    pub error: String,
    pub student_error: String,
    pub loading: bool,
    pub students_loading: bool,
}

impl TeacherOverviewView {
    pub fn new(api: Arc<dyn PortalApi>) -> Self {
        Self {
            api,
            teachers: TableState::new("name", TEACHER_PAGE_SIZE),
            selected: None,
            students: Vec::new(),
            error: String::new(),
            student_error: String::new(),
            loading: false,
            students_loading: false,
        }
    }

    /// Load the teacher roster
    pub async fn refresh(&mut self) {
        self.loading = true;
        match self.api.list_teachers().await {
            Ok(teachers) => {
                self.teachers.set_rows(teachers);
                self.error.clear();
            }
            Err(e) => {
                tracing::debug!(error = %e, "Failed to load teachers");
                self.error = "Could not load teachers. Please try again.".to_string();
            }
        }
        self.loading = false;
    }

    /// Teacher count and summed student counts over the filtered rows
    pub fn totals(&self) -> (usize, u64) {
        let rows = self.teachers.filtered_sorted();
        let students = rows.iter().map(|t| t.student_count).sum();
        (rows.len(), students)
    }

    /// Drill into one teacher's students.
    ///
    /// A teacher row without a resolvable id is a view-level error; no
    /// request is sent.
    pub async fn select_teacher(&mut self, teacher: Teacher) {
        let Some(id) = teacher.teacher_id() else {
            self.student_error =
                "Selected teacher has no id (expected id/teacherId).".to_string();
            self.students.clear();
            self.selected = Some(teacher);
            return;
        };

        self.selected = Some(teacher);
        self.students_loading = true;
        match self.api.teacher_students(id).await {
            Ok(students) => {
                self.students = students;
                self.student_error.clear();
            }
            Err(e) => {
                tracing::debug!(error = %e, teacher_id = id, "Failed to load teacher's students");
                self.student_error = "Could not load students for this teacher.".to_string();
                self.students.clear();
            }
        }
        self.students_loading = false;
    }
}
