use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use schoolmis_core::{AppError, FieldError, Normalize};
use serde::de::DeserializeOwned;
use validator::Validate;

const DATA_ERROR_PREFIX: &str = "Failed to deserialize the JSON body into the target type: ";

fn between<'a>(text: &'a str, start: &str, end: char) -> Option<&'a str> {
    text.split(start).nth(1).and_then(|s| s.split(end).next())
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(anyhow!(
            "Missing 'Content-Type: application/json' header"
        ));
    }

    let text = rejection.body_text();

    if let Some(field) = between(&text, "unknown field `", '`') {
        return AppError::validation(vec![FieldError {
            field: field.to_string(),
            message: format!("\"{}\" is not allowed", field),
        }]);
    }

    if let Some(field) = between(&text, "missing field `", '`') {
        return AppError::validation(vec![FieldError {
            field: field.to_string(),
            message: format!("\"{}\" is required", field),
        }]);
    }

    if matches!(rejection, JsonRejection::JsonDataError(_)) {
        let detail = text.strip_prefix(DATA_ERROR_PREFIX).unwrap_or(&text);
        if let Some((field, reason)) = detail.split_once(": ") {
            let reason = reason.split(" at line").next().unwrap_or(reason);
            return AppError::validation(vec![FieldError {
                field: field.to_string(),
                message: format!("\"{}\" is invalid: {}", field, reason),
            }]);
        }
        return AppError::bad_request(anyhow!("Invalid field type in request"));
    }

    AppError::bad_request(anyhow!("Invalid request body"))
}

/// JSON body that has been normalised and then validated.
///
/// Every violated rule comes back in one 400 response.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Normalize,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(mut value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value.normalize();
        value
            .validate()
            .map_err(|errors| AppError::from_validation(&errors))?;

        Ok(ValidatedJson(value))
    }
}
