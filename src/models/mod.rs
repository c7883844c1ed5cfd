// Data models shared by the API, services and stores

pub mod course;
pub mod student;
pub mod validation;

pub use course::*;
pub use student::*;
pub use validation::*;
