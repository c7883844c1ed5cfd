// API routes and handlers

pub mod courses;
pub mod extractors;
pub mod health;
pub mod routes;
