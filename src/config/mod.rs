// Environment-driven configuration and startup data

pub mod app;
pub mod database;
pub mod seeding;

use anyhow::{Context, Result};
use std::str::FromStr;

pub use app::{AppConfig, StorageBackend};
pub use database::DatabaseConfig;
pub use seeding::DatabaseSeeder;

/// Parse variable `name` through `lookup`, falling back to `default` when it is unset.
/// A value that is present but malformed is an error.
pub(crate) fn parse_var<T, F>(lookup: &F, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {} '{}'", name, value)),
        None => Ok(default),
    }
}
