use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::models::{CreateCourse, CreateStudent};
use crate::services::{CourseService, StudentService};
use crate::store::Store;

pub struct DatabaseSeeder {
    course_service: CourseService,
    student_service: StudentService,
}

impl DatabaseSeeder {
    pub fn new(store: Arc<dyn Store>, max_students_per_course: usize) -> Self {
        Self {
            course_service: CourseService::new(store.clone(), max_students_per_course),
            student_service: StudentService::new(store),
        }
    }

    /// Inserts demo students and courses into an empty store. Returns whether anything was written.
    pub async fn seed_all(&self) -> Result<bool> {
        if self.course_service.count_courses().await? > 0 {
            tracing::info!("Courses already present, skipping seeding");
            return Ok(false);
        }

        tracing::info!("Starting database seeding...");

        let student_ids = self.seed_students().await?;
        self.seed_courses(&student_ids).await?;

        tracing::info!("Database seeding completed!");
        Ok(true)
    }

    async fn seed_students(&self) -> Result<Vec<i64>> {
        let demo_students = [
            ("Alice Johnson", NaiveDate::from_ymd_opt(2001, 3, 14)),
            ("Boris Petrov", NaiveDate::from_ymd_opt(2000, 11, 2)),
            ("Chen Wei", None),
        ];

        let mut ids = Vec::with_capacity(demo_students.len());
        for (name, birth_date) in demo_students {
            let student = self
                .student_service
                .create_student(CreateStudent {
                    name: name.to_string(),
                    birth_date,
                })
                .await?;
            ids.push(student.id);
        }

        tracing::info!(count = ids.len(), "Created demo students");
        Ok(ids)
    }

    async fn seed_courses(&self, student_ids: &[i64]) -> Result<()> {
        let demo_courses = [
            ("Python Basics", student_ids.to_vec()),
            ("Web Development", student_ids.iter().take(2).copied().collect()),
            ("Databases", Vec::new()),
        ];

        for (name, students) in demo_courses {
            self.course_service
                .create_course(CreateCourse {
                    name: name.to_string(),
                    students,
                })
                .await?;
        }

        tracing::info!(count = 3, "Created demo courses");
        Ok(())
    }
}
