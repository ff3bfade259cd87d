use chrono::{DateTime, Utc};
use schoolmis_core::normalize::{Normalize, trim_opt};
use schoolmis_db::{Collection, Resource};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A year group. Only the three senior levels exist.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub school: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Level {
    const COLLECTION: Collection = Collection::Levels;
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateLevelDto {
    #[validate(
        required(message = "\"name\" is required"),
        custom(function = "crate::rules::level_name")
    )]
    #[schema(example = "Senior 4")]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(
        required(message = "\"school\" is required"),
        length(min = 1, message = "\"school\" is not allowed to be empty")
    )]
    pub school: Option<String>,
}

impl Normalize for CreateLevelDto {
    fn normalize(&mut self) {
        trim_opt(&mut self.description);
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateLevelDto {
    #[validate(custom(function = "crate::rules::level_name"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "\"school\" is not allowed to be empty"))]
    pub school: Option<String>,
}

impl Normalize for UpdateLevelDto {
    fn normalize(&mut self) {
        trim_opt(&mut self.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_senior_levels_are_accepted() {
        for name in ["Senior 4", "Senior 5", "Senior 6"] {
            let dto = CreateLevelDto {
                name: Some(name.into()),
                school: Some("s1".into()),
                ..Default::default()
            };
            assert!(dto.validate().is_ok(), "{name}");
        }

        let dto = CreateLevelDto {
            name: Some("Senior 1".into()),
            school: Some("s1".into()),
            ..Default::default()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_name_is_not_trimmed_into_validity() {
        let mut dto = UpdateLevelDto {
            name: Some(" Senior 4".into()),
            ..Default::default()
        };
        dto.normalize();
        assert!(dto.validate().is_err());
    }
}
