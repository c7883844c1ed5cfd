use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use super::{Store, StoreResult};
use crate::models::{Course, CourseFilter, CreateCourse, CreateStudent, Student, UpdateCourse};

const COURSE_SELECT: &str = r#"
    SELECT c.id, c.name,
           COALESCE(array_agg(cs.student_id ORDER BY cs.student_id)
                    FILTER (WHERE cs.student_id IS NOT NULL), '{}') AS students
    FROM courses c
    LEFT JOIN course_students cs ON cs.course_id = c.id
"#;

const COURSE_GROUPING: &str = " GROUP BY c.id, c.name";

#[derive(Debug, Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub fn pool(&self) -> &PgPool {
        &self.db
    }

    pub async fn run_migrations(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.db).await?;
        Ok(())
    }

    async fn replace_enrollment(
        tx: &mut Transaction<'_, Postgres>,
        course_id: i64,
        students: Vec<i64>,
    ) -> StoreResult<()> {
        sqlx::query("DELETE FROM course_students WHERE course_id = $1")
            .bind(course_id)
            .execute(&mut **tx)
            .await?;

        if !students.is_empty() {
            sqlx::query(
                "INSERT INTO course_students (course_id, student_id) \
                 SELECT $1, student_id FROM unnest($2::bigint[]) AS student_id \
                 ON CONFLICT DO NOTHING",
            )
            .bind(course_id)
            .bind(students)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn list_courses(&self, filter: &CourseFilter) -> StoreResult<Vec<Course>> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(COURSE_SELECT);
        query.push(" WHERE TRUE");

        if let Some(id) = filter.id {
            query.push(" AND c.id = ").push_bind(id);
        }
        if let Some(name) = &filter.name {
            query.push(" AND c.name = ").push_bind(name.clone());
        }

        query.push(COURSE_GROUPING).push(" ORDER BY c.id");

        let courses = query.build_query_as::<Course>().fetch_all(&self.db).await?;

        Ok(courses)
    }

    async fn get_course(&self, id: i64) -> StoreResult<Option<Course>> {
        let sql = format!("{COURSE_SELECT} WHERE c.id = $1{COURSE_GROUPING}");
        let course = sqlx::query_as::<_, Course>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(course)
    }

    async fn insert_course(&self, course: CreateCourse) -> StoreResult<Course> {
        let mut tx = self.db.begin().await?;

        let id = sqlx::query_scalar::<_, i64>("INSERT INTO courses (name) VALUES ($1) RETURNING id")
            .bind(&course.name)
            .fetch_one(&mut *tx)
            .await?;

        let mut students = course.students;
        students.sort_unstable();
        students.dedup();
        Self::replace_enrollment(&mut tx, id, students.clone()).await?;

        tx.commit().await?;

        Ok(Course {
            id,
            name: course.name,
            students,
        })
    }

    async fn update_course(&self, id: i64, changes: UpdateCourse) -> StoreResult<Option<Course>> {
        let mut tx = self.db.begin().await?;

        let updated = sqlx::query_scalar::<_, i64>(
            "UPDATE courses SET name = COALESCE($2, name) WHERE id = $1 RETURNING id",
        )
        .bind(id)
        .bind(changes.name)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        if let Some(students) = changes.students {
            Self::replace_enrollment(&mut tx, id, students).await?;
        }

        tx.commit().await?;

        self.get_course(id).await
    }

    async fn delete_course(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_courses(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses")
            .fetch_one(&self.db)
            .await?;

        Ok(count)
    }

    async fn insert_student(&self, student: CreateStudent) -> StoreResult<Student> {
        let created = sqlx::query_as::<_, Student>(
            "INSERT INTO students (name, birth_date) VALUES ($1, $2) RETURNING id, name, birth_date",
        )
        .bind(student.name)
        .bind(student.birth_date)
        .fetch_one(&self.db)
        .await?;

        Ok(created)
    }

    async fn list_students(&self) -> StoreResult<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>(
            "SELECT id, name, birth_date FROM students ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(students)
    }

    async fn missing_students(&self, ids: &[i64]) -> StoreResult<Vec<i64>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let found = sqlx::query_scalar::<_, i64>("SELECT id FROM students WHERE id = ANY($1)")
            .bind(ids.to_vec())
            .fetch_all(&self.db)
            .await?;

        Ok(ids
            .iter()
            .copied()
            .filter(|id| !found.contains(id))
            .collect())
    }
}
