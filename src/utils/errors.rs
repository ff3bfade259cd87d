//! Mapping from persistence failures to HTTP errors.

use anyhow::anyhow;
use schoolmis_core::AppError;
use schoolmis_db::StoreError;

/// `NotFound` answers 404 and `Duplicate` 409. Everything else is a 500
/// carrying the backend's own message.
pub fn store_error(err: StoreError) -> AppError {
    match err {
        StoreError::NotFound(_) => AppError::not_found(anyhow!(err.to_string())),
        StoreError::Duplicate { .. } => AppError::conflict(anyhow!(err.to_string())),
        other => AppError::internal(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            store_error(StoreError::NotFound("School")).status,
            StatusCode::NOT_FOUND
        );

        let duplicate = store_error(StoreError::Duplicate {
            entity: "Student",
            field: "admissionNumber".into(),
        });
        assert_eq!(duplicate.status, StatusCode::CONFLICT);
        assert_eq!(
            duplicate.error.to_string(),
            "Student with this admissionNumber already exists"
        );

        let backend = store_error(StoreError::Backend("E11000 duplicate key".into()));
        assert_eq!(backend.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(backend.error.to_string(), "E11000 duplicate key");
    }
}
