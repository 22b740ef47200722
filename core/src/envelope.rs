//! The `{success, data|error, status}` response envelope.
//!
//! # Design
//! Every client method returns an `ApiResponse`. The two variants make the
//! "exactly one of data/error" rule a type-level fact; the hand-written
//! `Serialize` impl flattens them back into the JSON shape consumers expect.

use serde::{Serialize, Serializer};

use crate::error::ApiError;

/// Result envelope returned by every `BibliotecaApi` method.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Success { data: T, status: u16 },
    Failure { error: String, status: u16 },
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, status: u16) -> Self {
        ApiResponse::Success { data, status }
    }

    pub fn failure(error: impl Into<String>, status: u16) -> Self {
        ApiResponse::Failure {
            error: error.into(),
            status,
        }
    }

    pub fn from_error(error: &ApiError) -> Self {
        ApiResponse::failure(error.to_string(), error.status())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success { .. })
    }

    pub fn status(&self) -> u16 {
        match self {
            ApiResponse::Success { status, .. } | ApiResponse::Failure { status, .. } => *status,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ApiResponse::Success { data, .. } => Some(data),
            ApiResponse::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ApiResponse::Success { .. } => None,
            ApiResponse::Failure { error, .. } => Some(error),
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            ApiResponse::Success { data, .. } => Some(data),
            ApiResponse::Failure { .. } => None,
        }
    }

    /// Transform the success payload, leaving failures untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        match self {
            ApiResponse::Success { data, status } => ApiResponse::Success {
                data: f(data),
                status,
            },
            ApiResponse::Failure { error, status } => ApiResponse::Failure { error, status },
        }
    }
}

#[derive(Serialize)]
struct Repr<'a, T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    status: u16,
}

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Repr {
            success: self.is_success(),
            data: self.data(),
            error: self.error(),
            status: self.status(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_serializes_without_error_field() {
        let envelope = ApiResponse::success(json!([1, 2]), 200);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"success": true, "data": [1, 2], "status": 200}));
    }

    #[test]
    fn failure_serializes_without_data_field() {
        let envelope: ApiResponse<serde_json::Value> = ApiResponse::failure("boom", 503);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"success": false, "error": "boom", "status": 503}));
    }

    #[test]
    fn from_error_uses_error_status() {
        let envelope: ApiResponse<()> =
            ApiResponse::from_error(&ApiError::MissingField("preco".to_string()));
        assert_eq!(envelope.status(), 400);
        assert_eq!(envelope.error(), Some("missing required field: preco"));
    }

    #[test]
    fn map_only_touches_success() {
        let ok = ApiResponse::success(vec![1, 2, 3], 200).map(|v| v.len());
        assert_eq!(ok, ApiResponse::success(3, 200));

        let failed: ApiResponse<Vec<i32>> = ApiResponse::failure("nope", 404);
        assert_eq!(failed.map(|v| v.len()), ApiResponse::failure("nope", 404));
    }
}
