use anyhow::{bail, Result};
use std::env;
use std::str::FromStr;

use super::parse_var;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => bail!("Unknown storage backend '{}', expected postgres or memory", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
    pub storage_backend: StorageBackend,
    pub max_students_per_course: usize,
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            storage_backend: StorageBackend::Postgres,
            max_students_per_course: 20,
            seed_demo_data: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = parse_var(&lookup, "PORT", defaults.port)?;
        let environment = lookup("ENVIRONMENT").unwrap_or(defaults.environment);
        let log_level = lookup("LOG_LEVEL").unwrap_or(defaults.log_level);
        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(backend) => backend.parse()?,
            None => defaults.storage_backend,
        };
        let max_students_per_course = parse_var(
            &lookup,
            "MAX_STUDENTS_PER_COURSE",
            defaults.max_students_per_course,
        )?;
        let seed_demo_data = lookup("SEED_DEMO_DATA")
            .map(|value| parse_flag(&value))
            .unwrap_or(defaults.seed_demo_data);

        Ok(AppConfig {
            host,
            port,
            environment,
            log_level,
            storage_backend,
            max_students_per_course,
            seed_demo_data,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
