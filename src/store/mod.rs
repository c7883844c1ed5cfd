//! Persistence backends for courses and students.
//!
//! Handlers never talk to a database directly; they go through [`Store`], which has a
//! Postgres implementation for deployments and an in-memory one for tests and local runs.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Course, CourseFilter, CreateCourse, CreateStudent, Student, UpdateCourse};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Store: Send + Sync {
    fn backend_name(&self) -> &'static str;

    /// Courses matching `filter`, ordered by id.
    async fn list_courses(&self, filter: &CourseFilter) -> StoreResult<Vec<Course>>;

    async fn get_course(&self, id: i64) -> StoreResult<Option<Course>>;

    async fn insert_course(&self, course: CreateCourse) -> StoreResult<Course>;

    /// Returns `None` when no course has the given id.
    async fn update_course(&self, id: i64, changes: UpdateCourse) -> StoreResult<Option<Course>>;

    /// Returns `false` when no course has the given id.
    async fn delete_course(&self, id: i64) -> StoreResult<bool>;

    async fn count_courses(&self) -> StoreResult<i64>;

    async fn insert_student(&self, student: CreateStudent) -> StoreResult<Student>;

    async fn list_students(&self) -> StoreResult<Vec<Student>>;

    /// The subset of `ids` that has no matching student, in input order.
    async fn missing_students(&self, ids: &[i64]) -> StoreResult<Vec<i64>>;
}
