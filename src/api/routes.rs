use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::courses::course_routes;
use super::health::health_check;
use crate::config::AppConfig;
use crate::services::CourseService;
use crate::store::Store;

pub fn create_routes(store: Arc<dyn Store>, config: &AppConfig) -> Router {
    let course_service = CourseService::new(store, config.max_students_per_course);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", course_routes(course_service))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
