use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, MethodRouter},
    Router,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use tracing::instrument;

use super::extractors::JsonOrForm;
use crate::errors::{AppError, AppResult};
use crate::models::{parse_optional_id, Course, CourseFilter, CreateCourse, UpdateCourse};
use crate::services::CourseService;

/// Raw list query. Values stay strings so that empty parameters can be ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CourseQuery {
    /// Exact course id
    pub id: Option<String>,
    /// Exact, case-sensitive course name
    pub name: Option<String>,
}

impl CourseQuery {
    pub fn into_filter(self) -> AppResult<CourseFilter> {
        let id = parse_optional_id(self.id.as_deref(), "id").map_err(AppError::validation)?;
        let name = self.name.filter(|name| !name.is_empty());

        Ok(CourseFilter { id, name })
    }
}

#[derive(Clone)]
pub struct CoursesAppState {
    pub course_service: CourseService,
}

pub fn course_routes(course_service: CourseService) -> Router {
    let shared_state = CoursesAppState { course_service };

    let collection: MethodRouter<CoursesAppState> = get(list_courses).post(create_course);
    let item: MethodRouter<CoursesAppState> = get(get_course)
        .patch(update_course)
        .put(replace_course)
        .delete(delete_course);

    Router::new()
        .route("/courses/", collection.clone())
        .route("/courses", collection)
        .route("/courses/:course_id/", item.clone())
        .route("/courses/:course_id", item)
        .with_state(shared_state)
}

/// List courses, optionally filtered by exact id and/or name
#[instrument(skip_all)]
pub async fn list_courses(
    State(state): State<CoursesAppState>,
    WithRejection(Query(query), _): WithRejection<Query<CourseQuery>, AppError>,
) -> AppResult<Json<Vec<Course>>> {
    let filter = query.into_filter()?;
    let courses = state.course_service.list_courses(&filter).await?;

    Ok(Json(courses))
}

/// Retrieve a single course
#[instrument(skip_all, fields(course_id = course_id))]
pub async fn get_course(
    State(state): State<CoursesAppState>,
    WithRejection(Path(course_id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<Course>> {
    let course = state.course_service.get_course(course_id).await?;

    Ok(Json(course))
}

/// Create a course
#[instrument(skip_all)]
pub async fn create_course(
    State(state): State<CoursesAppState>,
    JsonOrForm(payload): JsonOrForm<CreateCourse>,
) -> AppResult<(StatusCode, Json<Course>)> {
    let course = state.course_service.create_course(payload).await?;

    Ok((StatusCode::CREATED, Json(course)))
}

/// Partially update a course; omitted fields are left untouched
#[instrument(skip_all, fields(course_id = course_id))]
pub async fn update_course(
    State(state): State<CoursesAppState>,
    WithRejection(Path(course_id), _): WithRejection<Path<i64>, AppError>,
    JsonOrForm(payload): JsonOrForm<UpdateCourse>,
) -> AppResult<Json<Course>> {
    let course = state.course_service.update_course(course_id, payload).await?;

    Ok(Json(course))
}

/// Replace every writable field of a course
#[instrument(skip_all, fields(course_id = course_id))]
pub async fn replace_course(
    State(state): State<CoursesAppState>,
    WithRejection(Path(course_id), _): WithRejection<Path<i64>, AppError>,
    JsonOrForm(payload): JsonOrForm<CreateCourse>,
) -> AppResult<Json<Course>> {
    let course = state
        .course_service
        .update_course(course_id, payload.into())
        .await?;

    Ok(Json(course))
}

/// Delete a course
#[instrument(skip_all, fields(course_id = course_id))]
pub async fn delete_course(
    State(state): State<CoursesAppState>,
    WithRejection(Path(course_id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<StatusCode> {
    state.course_service.delete_course(course_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
