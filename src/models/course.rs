use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub students: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCourse {
    pub name: String,
    #[serde(default)]
    pub students: Vec<i64>,
}

/// Partial update; fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCourse {
    pub name: Option<String>,
    pub students: Option<Vec<i64>>,
}

impl From<CreateCourse> for UpdateCourse {
    fn from(course: CreateCourse) -> Self {
        Self {
            name: Some(course.name),
            students: Some(course.students),
        }
    }
}

/// Exact-match filters applied when listing courses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl CourseFilter {
    pub fn matches(&self, course: &Course) -> bool {
        self.id.map_or(true, |id| course.id == id)
            && self.name.as_deref().map_or(true, |name| course.name == name)
    }
}
