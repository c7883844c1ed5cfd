use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::models::{
    validate_course_name, validate_enrollment, Course, CourseFilter, CreateCourse, UpdateCourse,
};
use crate::store::Store;

#[derive(Clone)]
pub struct CourseService {
    store: Arc<dyn Store>,
    max_students_per_course: usize,
}

impl CourseService {
    pub fn new(store: Arc<dyn Store>, max_students_per_course: usize) -> Self {
        Self {
            store,
            max_students_per_course,
        }
    }

    pub async fn list_courses(&self, filter: &CourseFilter) -> AppResult<Vec<Course>> {
        let courses = self.store.list_courses(filter).await?;
        tracing::debug!(count = courses.len(), ?filter, "Listed courses");
        Ok(courses)
    }

    pub async fn get_course(&self, id: i64) -> AppResult<Course> {
        self.store
            .get_course(id)
            .await?
            .ok_or_else(|| AppError::course_not_found(id))
    }

    pub async fn create_course(&self, course_data: CreateCourse) -> AppResult<Course> {
        validate_course_name(&course_data.name).map_err(AppError::validation)?;
        self.check_enrollment(&course_data.students).await?;

        let course = self.store.insert_course(course_data).await?;
        tracing::info!(course_id = course.id, "Created course");

        Ok(course)
    }

    pub async fn update_course(&self, id: i64, changes: UpdateCourse) -> AppResult<Course> {
        if let Some(name) = &changes.name {
            validate_course_name(name).map_err(AppError::validation)?;
        }
        if let Some(students) = &changes.students {
            self.check_enrollment(students).await?;
        }

        let course = self
            .store
            .update_course(id, changes)
            .await?
            .ok_or_else(|| AppError::course_not_found(id))?;
        tracing::info!(course_id = course.id, "Updated course");

        Ok(course)
    }

    pub async fn delete_course(&self, id: i64) -> AppResult<()> {
        if !self.store.delete_course(id).await? {
            return Err(AppError::course_not_found(id));
        }

        tracing::info!(course_id = id, "Deleted course");
        Ok(())
    }

    pub async fn count_courses(&self) -> AppResult<i64> {
        Ok(self.store.count_courses().await?)
    }

    async fn check_enrollment(&self, students: &[i64]) -> AppResult<()> {
        validate_enrollment(students, self.max_students_per_course)
            .map_err(AppError::validation)?;

        let missing = self.store.missing_students(students).await?;
        if !missing.is_empty() {
            let ids: Vec<String> = missing.iter().map(ToString::to_string).collect();
            return Err(AppError::Validation(format!(
                "Unknown student id(s): {}",
                ids.join(", ")
            )));
        }

        Ok(())
    }
}
