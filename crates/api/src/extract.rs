//! JSON body extractor that reports bad fields in the API error shape.
//!
//! axum's [`Json`] rejects missing or mistyped fields with a `422` and a
//! plain-text body. [`JsonBody`] parses the body the same way but turns
//! deserialization failures into a `400 VALIDATION_ERROR` naming the field.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppError;

/// Drop-in replacement for [`axum::Json`] as a handler argument.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(reject)?;

        decode(value)
            .map(JsonBody)
            .map_err(IntoResponse::into_response)
    }
}

/// Syntax and content-type problems keep the API error shape; body-limit
/// rejections pass through with their own status.
fn reject(rejection: JsonRejection) -> Response {
    match rejection {
        JsonRejection::JsonSyntaxError(_) | JsonRejection::MissingJsonContentType(_) => {
            AppError::BadRequest(rejection.body_text()).into_response()
        }
        other => other.into_response(),
    }
}

/// Deserialize `value` into `T`, naming the first field that fails.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    serde_path_to_error::deserialize(value).map_err(|err| {
        let path = err.path().to_string();
        let message = err.inner().to_string();
        match field_of(&path, &message) {
            Some(field) => AppError::InvalidField {
                field,
                message: field_message(&message),
            },
            None => AppError::BadRequest(message),
        }
    })
}

/// A missing field sits at the parent path; serde names it in the message.
fn field_of(path: &str, message: &str) -> Option<String> {
    if let Some(name) = missing_field(message) {
        return Some(match path {
            "." => name.to_string(),
            parent => format!("{parent}.{name}"),
        });
    }
    (path != ".").then(|| path.to_string())
}

fn missing_field(message: &str) -> Option<&str> {
    message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next())
}

fn field_message(message: &str) -> String {
    if missing_field(message).is_some() {
        "This field is required.".to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        pet_id: i64,
        message: Option<String>,
    }

    #[test]
    fn missing_field_is_named() {
        let err = decode::<Body>(json!({ "message": "hi" })).unwrap_err();
        assert_matches!(
            err,
            AppError::InvalidField { field, message }
                if field == "pet_id" && message == "This field is required."
        );
    }

    #[test]
    fn mistyped_field_is_named() {
        let err = decode::<Body>(json!({ "pet_id": "abc" })).unwrap_err();
        assert_matches!(err, AppError::InvalidField { field, .. } if field == "pet_id");
    }

    #[test]
    fn non_object_body_has_no_field() {
        let err = decode::<Body>(json!([1, 2])).unwrap_err();
        assert_matches!(err, AppError::BadRequest(_));
    }

    #[test]
    fn valid_body_decodes() {
        let body = decode::<Body>(json!({ "pet_id": 3 })).unwrap();
        assert_eq!(body.pet_id, 3);
        assert!(body.message.is_none());
    }
}
