use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use serde_derive::Serialize;
use std::error::Error;
use std::fmt;
use tracing::Level;
use utoipa::ToSchema;

use crate::store::ports::PoolUnavailable;

pub type HandlerResponse<T> = Result<T, CodeErrorResp>;

pub struct CodeError {
    pub success: bool,
    pub error_code: u16,
    pub http_status_code: StatusCode,
    pub message: &'static str,
    pub log_level: Level,
}

impl CodeError {
    pub const POOL_ERROR: CodeError = CodeError {
        success: false,
        error_code: 0,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Could not get conn out of pool!",
        log_level: Level::ERROR,
    };
    pub const DB_QUERY_ERROR: CodeError = CodeError {
        success: false,
        error_code: 1,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Database query failed!",
        log_level: Level::ERROR,
    };
    pub const DB_DELETION_ERROR: CodeError = CodeError {
        success: false,
        error_code: 2,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Database deletion failed!",
        log_level: Level::ERROR,
    };
    pub const UNAUTHORIZED_ACCESS: CodeError = CodeError {
        success: false,
        error_code: 3,
        http_status_code: StatusCode::UNAUTHORIZED,
        message: "Unauthorized access!",
        log_level: Level::INFO,
    };
    pub const FORBIDDEN_DELETION: CodeError = CodeError {
        success: false,
        error_code: 4,
        http_status_code: StatusCode::FORBIDDEN,
        message: "Not allowed to delete this comment!",
        log_level: Level::WARN,
    };
    pub const INVALID_PAGINATION: CodeError = CodeError {
        success: false,
        error_code: 5,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Invalid pagination parameters!",
        log_level: Level::INFO,
    };
}

pub fn code_err(cerr: CodeError, e: impl fmt::Display) -> CodeErrorResp {
    CodeErrorResp {
        success: cerr.success,
        error_code: cerr.error_code,
        http_status_code: cerr.http_status_code,
        message: cerr.message.to_string(),
        error_message: e.to_string(),
        log_level: cerr.log_level,
    }
}

/// Like `code_err`, but a failed pool checkout always maps to `POOL_ERROR`.
pub fn store_err(cerr: CodeError, e: anyhow::Error) -> CodeErrorResp {
    if e.is::<PoolUnavailable>() {
        code_err(CodeError::POOL_ERROR, e)
    } else {
        code_err(cerr, e)
    }
}

impl From<CodeError> for CodeErrorResp {
    fn from(cerr: CodeError) -> Self {
        CodeErrorResp {
            success: cerr.success,
            error_code: cerr.error_code,
            http_status_code: cerr.http_status_code,
            message: cerr.message.to_string(),
            error_message: String::new(),
            log_level: cerr.log_level,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct CodeErrorResp {
    pub success: bool,
    pub error_code: u16,
    #[serde(serialize_with = "serialize_status_code")]
    #[schema(value_type = u16)]
    pub http_status_code: StatusCode,
    pub message: String,
    pub error_message: String,
    #[serde(skip)]
    pub log_level: Level,
}

fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

impl fmt::Display for CodeErrorResp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message, self.error_message)
    }
}

impl Error for CodeErrorResp {}

// Details travel to the logging middleware as x-error-* headers, which it strips.
impl IntoResponse for CodeErrorResp {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::to_string(&self).unwrap_or_else(|_| "{}".to_string());
        let mut response = (
            self.http_status_code,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response();

        let headers = response.headers_mut();
        headers.insert(
            "x-error-log-level",
            HeaderValue::from_static(self.log_level.as_str()),
        );
        headers.insert(
            "x-error-status-code",
            HeaderValue::from(self.http_status_code.as_u16()),
        );
        headers.insert("x-error-code", HeaderValue::from(self.error_code));
        if let Ok(message) = HeaderValue::from_str(&self.message) {
            headers.insert("x-error-message", message);
        }
        if let Ok(detail) = HeaderValue::from_str(&self.error_message) {
            headers.insert("x-error-detail", detail);
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_carries_status_and_log_headers() {
        let response =
            code_err(CodeError::FORBIDDEN_DELETION, "user is not the seller").into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let headers = response.headers();
        assert_eq!(headers.get("x-error-log-level").unwrap(), "WARN");
        assert_eq!(headers.get("x-error-code").unwrap(), "4");
        assert_eq!(
            headers.get("x-error-detail").unwrap(),
            "user is not the seller"
        );
    }

    #[test]
    fn display_joins_message_and_detail() {
        let err = code_err(CodeError::DB_QUERY_ERROR, "connection reset");
        assert_eq!(err.to_string(), "Database query failed!: connection reset");
    }

    #[test]
    fn pool_checkout_failures_keep_their_own_code() {
        let checkout = anyhow::Error::new(PoolUnavailable("Timed out in bb8".to_string()));
        let err = store_err(CodeError::DB_QUERY_ERROR, checkout);
        assert_eq!(err.error_code, CodeError::POOL_ERROR.error_code);
        assert_eq!(err.error_message, "Timed out in bb8");

        let query = anyhow::anyhow!("relation \"comments\" does not exist");
        let err = store_err(CodeError::DB_DELETION_ERROR, query);
        assert_eq!(err.error_code, CodeError::DB_DELETION_ERROR.error_code);
    }
}
