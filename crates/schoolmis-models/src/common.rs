use schoolmis_db::Filter;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Body returned by every `DELETE /:id`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteResponse {
    pub fn for_entity(entity: &str) -> Self {
        Self {
            success: true,
            message: format!("{} deleted successfully", entity),
        }
    }
}

/// Query parameters for listing school-scoped records.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SchoolScope {
    /// Only records whose `school` reference equals this id
    pub school_id: Option<String>,
}

impl SchoolScope {
    pub fn filter(&self) -> Filter {
        Filter::new().eq_opt("school", self.school_id.as_deref())
    }
}

/// Query parameters for listing records that belong to a school and a level.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LevelScope {
    /// Only records whose `school` reference equals this id
    pub school_id: Option<String>,
    /// Only records whose `level` reference equals this id
    pub level_id: Option<String>,
}

impl LevelScope {
    pub fn filter(&self) -> Filter {
        Filter::new()
            .eq_opt("school", self.school_id.as_deref())
            .eq_opt("level", self.level_id.as_deref())
    }
}
