//! Request extractors that reject with [`AppError`] instead of axum's
//! plain-text rejections.

use axum::extract::{FromRequest, Request};
use axum::Json;
use places_core::error::CoreError;
use places_core::types::{parse_id, DbId};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

/// Prefix shared by every input validation failure.
const INVALID_INPUT: &str = "Invalid inputs passed, please check your data";

/// JSON body that has been deserialized and then checked against its
/// `validator` rules.
///
/// Malformed JSON, a wrong content type and rule violations all become
/// [`CoreError::Validation`] (422).
///
/// ```ignore
/// async fn create(ValidatedJson(input): ValidatedJson<CreatePlaceRequest>) -> AppResult<..> { .. }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            AppError::Core(CoreError::Validation(format!(
                "{INVALID_INPUT}: {}",
                rejection.body_text()
            )))
        })?;

        value
            .validate()
            .map_err(|errors| AppError::Core(CoreError::Validation(describe(&errors))))?;

        Ok(Self(value))
    }
}

/// Summarize failing fields, sorted for stable output.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();
    format!("{INVALID_INPUT} (invalid: {}).", fields.join(", "))
}

/// Parse a path id, treating a malformed value like an unknown one.
pub fn path_id(raw: &str, entity: &'static str) -> Result<DbId, AppError> {
    parse_id(raw).ok_or_else(|| {
        AppError::NotFound(format!("Could not find {entity} for the provided id."))
    })
}
