use anyhow::{anyhow, Result};
use std::collections::HashSet;

pub const COURSE_NAME_MAX_LEN: usize = 256;

/// Course name validation
pub fn validate_course_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(anyhow!("Course name cannot be blank"));
    }

    if name.chars().count() > COURSE_NAME_MAX_LEN {
        return Err(anyhow!(
            "Course name cannot be longer than {} characters",
            COURSE_NAME_MAX_LEN
        ));
    }

    Ok(())
}

/// Enrollment list validation. Existence of the ids is checked against the store separately.
pub fn validate_enrollment(students: &[i64], max_students: usize) -> Result<()> {
    if students.len() > max_students {
        return Err(anyhow!(
            "A course cannot have more than {} students",
            max_students
        ));
    }

    let mut seen = HashSet::with_capacity(students.len());
    for id in students {
        if !seen.insert(id) {
            return Err(anyhow!("Student {} is listed more than once", id));
        }
    }

    Ok(())
}

/// Parse an optional integer query parameter; empty values are treated as absent.
pub fn parse_optional_id(raw: Option<&str>, field_name: &str) -> Result<Option<i64>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| anyhow!("{} must be a whole number", field_name)),
    }
}
