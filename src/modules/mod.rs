pub mod auth;
pub mod classes;
pub mod courses;
pub mod levels;
pub mod schools;
pub mod stats;
pub mod students;
pub mod system;
pub mod teachers;
