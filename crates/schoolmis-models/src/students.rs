//! Student records and DTOs.
//!
//! Two naming schemes reach this API: a single `name` with an
//! `admissionNumber`, or `firstName`/`lastName` with a `studentId`. Both are
//! stored as sent. On create a missing `name` is composed from the two name
//! parts so listings always have something to show.

use chrono::{DateTime, Utc};
use schoolmis_core::normalize::{Normalize, lower_opt, trim_opt};
use schoolmis_core::serde::deserialize_optional_datetime;
use schoolmis_db::{Collection, Resource};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Class reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Level reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// School reference
    #[serde(default)]
    pub school: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Student {
    const COLLECTION: Collection = Collection::Students;
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

fn has_name(dto: &CreateStudentDto) -> Result<(), ValidationError> {
    if present(&dto.name) || (present(&dto.first_name) && present(&dto.last_name)) {
        Ok(())
    } else {
        Err(ValidationError::new("name").with_message("\"name\" is required".into()))
    }
}

fn has_identifier(dto: &CreateStudentDto) -> Result<(), ValidationError> {
    if present(&dto.admission_number) || present(&dto.student_id) {
        Ok(())
    } else {
        Err(ValidationError::new("admissionNumber")
            .with_message("\"admissionNumber\" is required".into()))
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "has_name", skip_on_field_errors = false))]
#[validate(schema(function = "has_identifier", skip_on_field_errors = false))]
pub struct CreateStudentDto {
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub admission_number: Option<String>,
    pub student_id: Option<String>,
    #[validate(custom(function = "crate::rules::optional_email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    #[validate(custom(function = "crate::rules::not_in_future"))]
    pub date_of_birth: Option<DateTime<Utc>>,
    #[validate(custom(function = "crate::rules::gender"))]
    pub gender: Option<String>,
    pub address: Option<String>,
    pub class: Option<String>,
    pub level: Option<String>,
    #[validate(
        required(message = "\"school\" is required"),
        length(min = 1, message = "\"school\" is not allowed to be empty")
    )]
    pub school: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub enrollment_date: Option<DateTime<Utc>>,
}

impl Normalize for CreateStudentDto {
    fn normalize(&mut self) {
        for field in [
            &mut self.name,
            &mut self.first_name,
            &mut self.last_name,
            &mut self.admission_number,
            &mut self.student_id,
            &mut self.phone,
            &mut self.address,
        ] {
            trim_opt(field);
        }
        lower_opt(&mut self.email);

        if !present(&self.name) && present(&self.first_name) && present(&self.last_name) {
            self.name = Some(format!(
                "{} {}",
                self.first_name.as_deref().unwrap_or_default(),
                self.last_name.as_deref().unwrap_or_default()
            ));
        }
        self.enrollment_date.get_or_insert_with(Utc::now);
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, message = "\"name\" is not allowed to be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "\"firstName\" is not allowed to be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "\"lastName\" is not allowed to be empty"))]
    pub last_name: Option<String>,
    #[validate(length(
        min = 1,
        message = "\"admissionNumber\" is not allowed to be empty"
    ))]
    pub admission_number: Option<String>,
    #[validate(length(min = 1, message = "\"studentId\" is not allowed to be empty"))]
    pub student_id: Option<String>,
    #[validate(custom(function = "crate::rules::optional_email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    #[validate(custom(function = "crate::rules::not_in_future"))]
    pub date_of_birth: Option<DateTime<Utc>>,
    #[validate(custom(function = "crate::rules::gender"))]
    pub gender: Option<String>,
    pub address: Option<String>,
    pub class: Option<String>,
    pub level: Option<String>,
    #[validate(length(min = 1, message = "\"school\" is not allowed to be empty"))]
    pub school: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub enrollment_date: Option<DateTime<Utc>>,
}

impl Normalize for UpdateStudentDto {
    fn normalize(&mut self) {
        for field in [
            &mut self.name,
            &mut self.first_name,
            &mut self.last_name,
            &mut self.admission_number,
            &mut self.student_id,
            &mut self.phone,
            &mut self.address,
        ] {
            trim_opt(field);
        }
        lower_opt(&mut self.email);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use schoolmis_core::errors::field_errors;

    fn invalid_fields<T: Validate>(dto: &T) -> Vec<String> {
        match dto.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => field_errors(&errors).into_iter().map(|e| e.field).collect(),
        }
    }

    fn parse(json: &str) -> CreateStudentDto {
        let mut dto: CreateStudentDto = serde_json::from_str(json).unwrap();
        dto.normalize();
        dto
    }

    #[test]
    fn test_name_and_admission_number_scheme() {
        let dto = parse(r#"{"name":" Ada Lovelace ","admissionNumber":"A-1","school":"s1"}"#);
        assert!(dto.validate().is_ok());
        assert_eq!(dto.name.as_deref(), Some("Ada Lovelace"));
        assert!(dto.enrollment_date.is_some());
    }

    #[test]
    fn test_first_last_and_student_id_scheme_composes_name() {
        let dto = parse(
            r#"{"firstName":"Grace","lastName":"Hopper","studentId":"S-9","school":"s1","class":"c1","level":"l1"}"#,
        );
        assert!(dto.validate().is_ok());
        assert_eq!(dto.name.as_deref(), Some("Grace Hopper"));
    }

    #[test]
    fn test_every_violation_is_reported() {
        let dto = parse(r#"{"firstName":"Grace","gender":"unknown","email":"bad"}"#);
        assert_eq!(
            invalid_fields(&dto),
            ["admissionNumber", "email", "gender", "name", "school"]
        );
    }

    #[test]
    fn test_email_is_lower_cased() {
        let dto = parse(
            r#"{"name":"Ada","admissionNumber":"A-1","school":"s1","email":" Ada@Example.COM"}"#,
        );
        assert_eq!(dto.email.as_deref(), Some("ada@example.com"));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_date_of_birth_accepts_plain_dates_but_not_the_future() {
        let dto = parse(
            r#"{"name":"Ada","admissionNumber":"A-1","school":"s1","dateOfBirth":"2008-03-14"}"#,
        );
        assert!(dto.validate().is_ok());

        let dto = UpdateStudentDto {
            date_of_birth: Some(Utc::now() + Duration::days(30)),
            ..Default::default()
        };
        assert_eq!(invalid_fields(&dto), ["dateOfBirth"]);
    }

    #[test]
    fn test_update_accepts_any_subset() {
        assert!(UpdateStudentDto::default().validate().is_ok());
        let dto = UpdateStudentDto {
            gender: Some(String::new()),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
    }
}
