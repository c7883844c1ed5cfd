use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{Store, StoreResult};
use crate::models::{Course, CourseFilter, CreateCourse, CreateStudent, Student, UpdateCourse};

#[derive(Debug, Default)]
struct Tables {
    courses: BTreeMap<i64, Course>,
    students: BTreeMap<i64, Student>,
    last_course_id: i64,
    last_student_id: i64,
}

/// Process-local store. Ids start at 1 and are never reused, like a database sequence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn normalized(mut students: Vec<i64>) -> Vec<i64> {
    students.sort_unstable();
    students.dedup();
    students
}

#[async_trait]
impl Store for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn list_courses(&self, filter: &CourseFilter) -> StoreResult<Vec<Course>> {
        let tables = self.tables.read().await;
        Ok(tables
            .courses
            .values()
            .filter(|course| filter.matches(course))
            .cloned()
            .collect())
    }

    async fn get_course(&self, id: i64) -> StoreResult<Option<Course>> {
        Ok(self.tables.read().await.courses.get(&id).cloned())
    }

    async fn insert_course(&self, course: CreateCourse) -> StoreResult<Course> {
        let mut tables = self.tables.write().await;
        tables.last_course_id += 1;

        let created = Course {
            id: tables.last_course_id,
            name: course.name,
            students: normalized(course.students),
        };
        tables.courses.insert(created.id, created.clone());

        Ok(created)
    }

    async fn update_course(&self, id: i64, changes: UpdateCourse) -> StoreResult<Option<Course>> {
        let mut tables = self.tables.write().await;
        let Some(course) = tables.courses.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            course.name = name;
        }
        if let Some(students) = changes.students {
            course.students = normalized(students);
        }

        Ok(Some(course.clone()))
    }

    async fn delete_course(&self, id: i64) -> StoreResult<bool> {
        Ok(self.tables.write().await.courses.remove(&id).is_some())
    }

    async fn count_courses(&self) -> StoreResult<i64> {
        Ok(self.tables.read().await.courses.len() as i64)
    }

    async fn insert_student(&self, student: CreateStudent) -> StoreResult<Student> {
        let mut tables = self.tables.write().await;
        tables.last_student_id += 1;

        let created = Student {
            id: tables.last_student_id,
            name: student.name,
            birth_date: student.birth_date,
        };
        tables.students.insert(created.id, created.clone());

        Ok(created)
    }

    async fn list_students(&self) -> StoreResult<Vec<Student>> {
        Ok(self.tables.read().await.students.values().cloned().collect())
    }

    async fn missing_students(&self, ids: &[i64]) -> StoreResult<Vec<i64>> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .copied()
            .filter(|id| !tables.students.contains_key(id))
            .collect())
    }
}
