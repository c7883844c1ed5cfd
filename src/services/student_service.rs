use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::models::{CreateStudent, Student};
use crate::store::Store;

#[derive(Clone)]
pub struct StudentService {
    store: Arc<dyn Store>,
}

impl StudentService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create_student(&self, student_data: CreateStudent) -> AppResult<Student> {
        if student_data.name.trim().is_empty() {
            return Err(AppError::Validation("Student name cannot be blank".to_string()));
        }

        let student = self.store.insert_student(student_data).await?;
        tracing::info!(student_id = student.id, "Created student");

        Ok(student)
    }

    pub async fn list_students(&self) -> AppResult<Vec<Student>> {
        Ok(self.store.list_students().await?)
    }
}
