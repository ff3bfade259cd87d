//! School records and DTOs.

use chrono::{DateTime, Utc};
use schoolmis_core::normalize::{Normalize, trim_opt};
use schoolmis_db::{Collection, Resource};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A school. Every other record points at one through its `school` field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct School {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub established_year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for School {
    const COLLECTION: Collection = Collection::Schools;
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateSchoolDto {
    #[validate(
        required(message = "\"name\" is required"),
        length(min = 1, message = "\"name\" is not allowed to be empty")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "\"address\" is required"),
        length(min = 1, message = "\"address\" is not allowed to be empty")
    )]
    pub address: Option<String>,
    pub phone: Option<String>,
    #[validate(custom(function = "crate::rules::optional_email"))]
    pub email: Option<String>,
    pub principal_name: Option<String>,
    #[validate(custom(function = "crate::rules::established_year"))]
    pub established_year: Option<i64>,
}

impl Normalize for CreateSchoolDto {
    fn normalize(&mut self) {
        trim_opt(&mut self.name);
        trim_opt(&mut self.address);
        trim_opt(&mut self.phone);
        trim_opt(&mut self.email);
        trim_opt(&mut self.principal_name);
    }
}

/// Partial update; only the fields sent are changed.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateSchoolDto {
    #[validate(length(min = 1, message = "\"name\" is not allowed to be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "\"address\" is not allowed to be empty"))]
    pub address: Option<String>,
    pub phone: Option<String>,
    #[validate(custom(function = "crate::rules::optional_email"))]
    pub email: Option<String>,
    pub principal_name: Option<String>,
    #[validate(custom(function = "crate::rules::established_year"))]
    pub established_year: Option<i64>,
}

impl Normalize for UpdateSchoolDto {
    fn normalize(&mut self) {
        for field in [
            &mut self.name,
            &mut self.address,
            &mut self.phone,
            &mut self.email,
            &mut self.principal_name,
        ] {
            trim_opt(field);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolmis_core::errors::field_errors;

    fn invalid_fields<T: Validate>(dto: &T) -> Vec<String> {
        match dto.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => field_errors(&errors).into_iter().map(|e| e.field).collect(),
        }
    }

    #[test]
    fn test_create_requires_name_and_address() {
        let dto = CreateSchoolDto::default();
        assert_eq!(invalid_fields(&dto), ["address", "name"]);
    }

    #[test]
    fn test_whitespace_name_is_empty_after_normalize() {
        let mut dto = CreateSchoolDto {
            name: Some("   ".into()),
            address: Some(" 1 Main St ".into()),
            ..Default::default()
        };
        dto.normalize();
        assert_eq!(dto.address.as_deref(), Some("1 Main St"));
        assert_eq!(invalid_fields(&dto), ["name"]);
    }

    #[test]
    fn test_optional_fields_accept_empty_strings() {
        let dto = CreateSchoolDto {
            name: Some("Lincoln High".into()),
            address: Some("1 Main St".into()),
            phone: Some(String::new()),
            email: Some(String::new()),
            principal_name: Some(String::new()),
            established_year: Some(1995),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_established_year_out_of_range() {
        let dto = UpdateSchoolDto {
            established_year: Some(1850),
            email: Some("nope".into()),
            ..Default::default()
        };
        assert_eq!(invalid_fields(&dto), ["email", "establishedYear"]);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = serde_json::from_str::<CreateSchoolDto>(
            r#"{"name":"x","address":"y","motto":"z"}"#,
        );
        assert!(result.unwrap_err().to_string().contains("unknown field `motto`"));
    }

    #[test]
    fn test_record_serialises_with_underscore_id() {
        let school: School = serde_json::from_value(serde_json::json!({
            "_id": "mem-1-1",
            "name": "Lincoln High",
            "address": "1 Main St",
            "createdAt": "2024-01-02T10:00:00Z",
            "__v": 0
        }))
        .unwrap();
        let value = serde_json::to_value(&school).unwrap();
        assert_eq!(value["_id"], "mem-1-1");
        assert!(value.get("phone").is_none());
        assert!(value.get("__v").is_none());
    }
}
