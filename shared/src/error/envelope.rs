//! API 响应信封 `{ code, message, data, details }`

use super::app_error::AppError;
use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Response envelope shared by the product API and its clients
///
/// `code` is absent or `0` on success. Failures carry the numeric
/// [`ErrorCode`] and the error's details; `data` is only present on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.code, None | Some(0))
    }

    /// Rebuild the [`AppError`] a failed envelope was made from
    ///
    /// Codes this build does not know map to [`ErrorCode::Unknown`].
    pub fn to_error(&self) -> Option<AppError> {
        if self.is_success() {
            return None;
        }
        let code = self
            .code
            .and_then(|c| ErrorCode::try_from(c).ok())
            .unwrap_or(ErrorCode::Unknown);
        Some(AppError {
            code,
            message: self.message.clone(),
            details: self.details.clone(),
        })
    }

    /// Payload on success, the carried error otherwise
    pub fn into_result(self) -> Result<Option<T>, AppError> {
        match self.to_error() {
            Some(err) => Err(err),
            None => Ok(self.data),
        }
    }
}

impl ApiResponse<()> {
    /// Success without payload (deletes)
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: None,
            details: None,
        }
    }

    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message,
            data: None,
            details: err.details,
        }
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        let status = match self.to_error() {
            None => http::StatusCode::OK,
            Some(err) => err.http_status(),
        };
        (status, axum::Json(self)).into_response()
    }
}
