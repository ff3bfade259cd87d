use chrono::{DateTime, Utc};
use schoolmis_core::normalize::{Normalize, trim_opt, upper_opt};
use schoolmis_db::{Collection, Resource};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Always upper case
    #[serde(default)]
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub school: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Course {
    const COLLECTION: Collection = Collection::Courses;
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCourseDto {
    #[validate(
        required(message = "\"name\" is required"),
        length(min = 1, message = "\"name\" is not allowed to be empty")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "\"code\" is required"),
        length(min = 1, message = "\"code\" is not allowed to be empty")
    )]
    #[schema(example = "MATH101")]
    pub code: Option<String>,
    pub description: Option<String>,
    #[validate(
        required(message = "\"level\" is required"),
        length(min = 1, message = "\"level\" is not allowed to be empty")
    )]
    pub level: Option<String>,
    #[validate(
        required(message = "\"school\" is required"),
        length(min = 1, message = "\"school\" is not allowed to be empty")
    )]
    pub school: Option<String>,
    pub teacher: Option<String>,
    #[validate(range(min = 1, max = 10, message = "\"credits\" must be between 1 and 10"))]
    pub credits: Option<i64>,
}

impl Normalize for CreateCourseDto {
    fn normalize(&mut self) {
        trim_opt(&mut self.name);
        upper_opt(&mut self.code);
        trim_opt(&mut self.description);
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCourseDto {
    #[validate(length(min = 1, message = "\"name\" is not allowed to be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "\"code\" is not allowed to be empty"))]
    pub code: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "\"level\" is not allowed to be empty"))]
    pub level: Option<String>,
    #[validate(length(min = 1, message = "\"school\" is not allowed to be empty"))]
    pub school: Option<String>,
    pub teacher: Option<String>,
    #[validate(range(min = 1, max = 10, message = "\"credits\" must be between 1 and 10"))]
    pub credits: Option<i64>,
}

impl Normalize for UpdateCourseDto {
    fn normalize(&mut self) {
        trim_opt(&mut self.name);
        upper_opt(&mut self.code);
        trim_opt(&mut self.description);
    }
}
