use chrono::{DateTime, Utc};
use schoolmis_core::normalize::{Normalize, trim_opt};
use schoolmis_db::{Collection, Resource};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A class (stream) within a level of a school.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchoolClass {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub school: String,
    /// Teacher reference, empty when unassigned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_teacher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for SchoolClass {
    const COLLECTION: Collection = Collection::Classes;
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateClassDto {
    #[validate(
        required(message = "\"name\" is required"),
        length(min = 1, message = "\"name\" is not allowed to be empty")
    )]
    pub name: Option<String>,
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
    pub class_teacher: Option<String>,
    #[validate(range(
        min = 1,
        max = 200,
        message = "\"capacity\" must be between 1 and 200"
    ))]
    pub capacity: Option<i64>,
}

impl Normalize for CreateClassDto {
    fn normalize(&mut self) {
        trim_opt(&mut self.name);
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateClassDto {
    #[validate(length(min = 1, message = "\"name\" is not allowed to be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "\"level\" is not allowed to be empty"))]
    pub level: Option<String>,
    #[validate(length(min = 1, message = "\"school\" is not allowed to be empty"))]
    pub school: Option<String>,
    pub class_teacher: Option<String>,
    #[validate(range(
        min = 1,
        max = 200,
        message = "\"capacity\" must be between 1 and 200"
    ))]
    pub capacity: Option<i64>,
}

impl Normalize for UpdateClassDto {
    fn normalize(&mut self) {
        trim_opt(&mut self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_bounds() {
        for (capacity, ok) in [(1, true), (200, true), (0, false), (201, false)] {
            let dto = UpdateClassDto {
                capacity: Some(capacity),
                ..Default::default()
            };
            assert_eq!(dto.validate().is_ok(), ok, "capacity {capacity}");
        }
    }

    #[test]
    fn test_class_teacher_may_be_empty() {
        let dto: CreateClassDto = serde_json::from_str(
            r#"{"name":"S4 East","level":"l1","school":"s1","classTeacher":"","capacity":40}"#,
        )
        .unwrap();
        assert!(dto.validate().is_ok());
    }
}
