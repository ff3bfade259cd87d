use chrono::{DateTime, Utc};
use schoolmis_core::normalize::{Normalize, trim_opt};
use schoolmis_db::{Collection, Resource};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub employee_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualification: Option<String>,
    #[serde(default)]
    pub school: String,
    /// Course references
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Teacher {
    const COLLECTION: Collection = Collection::Teachers;
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTeacherDto {
    #[validate(
        required(message = "\"firstName\" is required"),
        length(min = 1, message = "\"firstName\" is not allowed to be empty")
    )]
    pub first_name: Option<String>,
    #[validate(
        required(message = "\"lastName\" is required"),
        length(min = 1, message = "\"lastName\" is not allowed to be empty")
    )]
    pub last_name: Option<String>,
    #[validate(
        required(message = "\"email\" is required"),
        email(message = "\"email\" must be a valid email")
    )]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(
        required(message = "\"employeeId\" is required"),
        length(min = 1, message = "\"employeeId\" is not allowed to be empty")
    )]
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub qualification: Option<String>,
    #[validate(
        required(message = "\"school\" is required"),
        length(min = 1, message = "\"school\" is not allowed to be empty")
    )]
    pub school: Option<String>,
    pub courses: Option<Vec<String>>,
}

impl Normalize for CreateTeacherDto {
    fn normalize(&mut self) {
        for field in [
            &mut self.first_name,
            &mut self.last_name,
            &mut self.phone,
            &mut self.employee_id,
            &mut self.department,
            &mut self.qualification,
        ] {
            trim_opt(field);
        }
        trim_opt(&mut self.email);
        self.courses.get_or_insert_with(Vec::new);
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTeacherDto {
    #[validate(length(min = 1, message = "\"firstName\" is not allowed to be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "\"lastName\" is not allowed to be empty"))]
    pub last_name: Option<String>,
    #[validate(email(message = "\"email\" must be a valid email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "\"employeeId\" is not allowed to be empty"))]
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub qualification: Option<String>,
    #[validate(length(min = 1, message = "\"school\" is not allowed to be empty"))]
    pub school: Option<String>,
    pub courses: Option<Vec<String>>,
}

impl Normalize for UpdateTeacherDto {
    fn normalize(&mut self) {
        for field in [
            &mut self.first_name,
            &mut self.last_name,
            &mut self.phone,
            &mut self.employee_id,
            &mut self.department,
            &mut self.qualification,
        ] {
            trim_opt(field);
        }
        trim_opt(&mut self.email);
    }
}
