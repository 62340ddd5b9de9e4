//! Body and query extractors that run `validator` rules.
//!
//! Deserialization failures and rule violations both become
//! `400 VALIDATION_FAILED` with per-field issues, so handlers only ever see
//! well-formed, in-range values.

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{AppError, ValidationIssue};

/// JSON body deserialized into `T` and validated.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

/// Query string deserialized into `T` and validated.
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::ValidationFailed {
                message: rejection.body_text(),
                issues: Vec::new(),
            })?;
        value.validate().map_err(validation_failed)?;
        Ok(ValidatedJson(value))
    }
}

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::ValidationFailed {
                message: rejection.body_text(),
                issues: Vec::new(),
            })?;
        value.validate().map_err(validation_failed)?;
        Ok(ValidatedQuery(value))
    }
}

/// `lockdown_minutes` -> `lockdownMinutes`, matching the wire names.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn describe(field: &str, err: &ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }
    let bound = |key: &str| err.params.get(key).map(|v| v.to_string());
    match (&*err.code, bound("min"), bound("max")) {
        ("range", Some(min), Some(max)) => format!("{field} must be between {min} and {max}"),
        ("length", Some(min), Some(max)) => {
            format!("{field} must be between {min} and {max} characters long")
        }
        _ => format!("{field} is invalid"),
    }
}

/// Flatten `validator` errors into the response's issue list.
pub fn validation_failed(errors: ValidationErrors) -> AppError {
    let mut issues: Vec<ValidationIssue> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let raw: &str = field.as_ref();
            let name = if raw == "__all__" {
                "request".to_string()
            } else {
                camel_case(raw)
            };
            errs.iter()
                .map(|e| ValidationIssue {
                    field: name.clone(),
                    message: describe(&name, e),
                })
                .collect::<Vec<_>>()
        })
        .collect();
    issues.sort_by(|a, b| a.field.cmp(&b.field));

    let message = issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");

    AppError::ValidationFailed { message, issues }
}
