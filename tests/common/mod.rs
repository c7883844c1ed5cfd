#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, NaiveDate};
use fake::faker::lorem::en::Word;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use tower::ServiceExt;

use courses_api::api::routes::create_routes;
use courses_api::config::AppConfig;
use courses_api::models::{Course, CreateCourse, CreateStudent, Student};
use courses_api::store::{MemoryStore, Store};

static INIT: Once = Once::new();

/// Initialize test logging
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("courses_api=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Application wired to a fresh in-memory store, so every test starts from an empty database.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<dyn Store>,
    pub courses: CourseFactory,
    pub students: StudentFactory,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        init_test_logging();

        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        Self::with_store(store, &config)
    }

    pub fn with_store(store: Arc<dyn Store>, config: &AppConfig) -> Self {
        Self {
            router: create_routes(store.clone(), config),
            courses: CourseFactory::new(store.clone()),
            students: StudentFactory::new(store.clone()),
            store,
        }
    }

    /// Send a request through the router and decode the JSON body (`Null` when empty).
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = self.request_raw(method, uri, body).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body is not JSON")
        };

        (status, json)
    }

    pub async fn request_raw(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);

        let request = match body {
            Some(body_data) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body_data.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    /// Send an urlencoded form body, the way browser forms and many API clients do.
    pub async fn request_form(&self, method: Method, uri: &str, form: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();

        let (status, bytes) = self.send(request).await;
        (status, serde_json::from_slice(&bytes).expect("response body is not JSON"))
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, bytes.to_vec())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn course_count(&self) -> i64 {
        self.store.count_courses().await.unwrap()
    }
}

/// Persists courses straight into the store, bypassing the HTTP layer.
pub struct CourseFactory {
    store: Arc<dyn Store>,
    sequence: AtomicUsize,
}

impl CourseFactory {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            sequence: AtomicUsize::new(0),
        }
    }

    /// A random name, unique within this factory.
    pub fn name(&self) -> String {
        let n = self.sequence.fetch_add(1, Ordering::SeqCst);
        format!("{} {}", Word().fake::<String>(), n)
    }

    pub async fn make(&self) -> Course {
        let name = self.name();
        self.make_with(&name, Vec::new()).await
    }

    pub async fn make_with(&self, name: &str, students: Vec<i64>) -> Course {
        self.store
            .insert_course(CreateCourse {
                name: name.to_string(),
                students,
            })
            .await
            .expect("Failed to insert course")
    }

    pub async fn make_many(&self, quantity: usize) -> Vec<Course> {
        let mut courses = Vec::with_capacity(quantity);
        for _ in 0..quantity {
            courses.push(self.make().await);
        }
        courses
    }
}

pub struct StudentFactory {
    store: Arc<dyn Store>,
}

impl StudentFactory {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn make(&self) -> Student {
        let birth_date = NaiveDate::from_ymd_opt(1995, 1, 1)
            .map(|date| date + Duration::days((0..3650).fake::<i64>()));

        self.store
            .insert_student(CreateStudent {
                name: Name().fake(),
                birth_date,
            })
            .await
            .expect("Failed to insert student")
    }

    pub async fn make_many(&self, quantity: usize) -> Vec<Student> {
        let mut students = Vec::with_capacity(quantity);
        for _ in 0..quantity {
            students.push(self.make().await);
        }
        students
    }
}
