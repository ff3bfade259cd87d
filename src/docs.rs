use schoolmis_core::FieldError;
use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use schoolmis_models::auth::{AuthenticatedUser, LoginRequest, LoginResponse, LogoutResponse};
use schoolmis_models::classes::{CreateClassDto, SchoolClass, UpdateClassDto};
use schoolmis_models::common::DeleteResponse;
use schoolmis_models::courses::{Course, CreateCourseDto, UpdateCourseDto};
use schoolmis_models::levels::{CreateLevelDto, Level, UpdateLevelDto};
use schoolmis_models::schools::{CreateSchoolDto, School, UpdateSchoolDto};
use schoolmis_models::students::{CreateStudentDto, Student, UpdateStudentDto};
use schoolmis_models::system::{
    ConnectionInfo, DebugResponse, DemoCredentials, HealthResponse, MemoryCounts, MongoHealth,
    RootResponse, StatsResponse,
};
use schoolmis_models::teachers::{CreateTeacherDto, Teacher, UpdateTeacherDto};

/// Body of every non-2xx response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Present on validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::schools::controller::get_schools,
        crate::modules::schools::controller::create_school,
        crate::modules::schools::controller::get_school,
        crate::modules::schools::controller::update_school,
        crate::modules::schools::controller::delete_school,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::classes::controller::get_classes,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::get_class,
        crate::modules::classes::controller::update_class,
        crate::modules::classes::controller::delete_class,
        crate::modules::levels::controller::get_levels,
        crate::modules::levels::controller::create_level,
        crate::modules::levels::controller::get_level,
        crate::modules::levels::controller::update_level,
        crate::modules::levels::controller::delete_level,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::stats::controller::get_stats,
        crate::modules::system::controller::root,
        crate::modules::system::controller::health,
        crate::modules::system::controller::debug,
    ),
    components(
        schemas(
            ErrorResponse,
            FieldError,
            DeleteResponse,
            LoginRequest,
            LoginResponse,
            LogoutResponse,
            AuthenticatedUser,
            School,
            CreateSchoolDto,
            UpdateSchoolDto,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            Teacher,
            CreateTeacherDto,
            UpdateTeacherDto,
            SchoolClass,
            CreateClassDto,
            UpdateClassDto,
            Level,
            CreateLevelDto,
            UpdateLevelDto,
            Course,
            CreateCourseDto,
            UpdateCourseDto,
            StatsResponse,
            HealthResponse,
            MongoHealth,
            MemoryCounts,
            DebugResponse,
            ConnectionInfo,
            RootResponse,
            DemoCredentials,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and logout"),
        (name = "Schools", description = "School records"),
        (name = "Students", description = "Student records"),
        (name = "Teachers", description = "Teacher records"),
        (name = "Classes", description = "Class records"),
        (name = "Levels", description = "Education levels"),
        (name = "Courses", description = "Course records"),
        (name = "Stats", description = "Record totals"),
        (name = "System", description = "Banner, health and diagnostics")
    ),
    info(
        title = "School MIS API",
        version = "1.0.0",
        description = "School management REST API backed by MongoDB, with an in-memory fallback when the database is unreachable.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            )
        }
    }
}
