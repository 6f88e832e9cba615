// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-todolist project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! JSON response envelope
//!
//! Every API answer, successful or not, has the same shape:
//!
//! ```json
//! { "code": 200, "message": "Operation successful", "data": {...}, "timestamp": "..." }
//! ```
//!
//! The HTTP status always equals `code`. Domain errors are turned into
//! [`ApiError`]s through the `From` implementations below, which is where
//! the error-to-status mapping lives.

use chrono::{DateTime, Utc};
use log::error;
use rocket::http::Status;
use rocket::response::{self, status, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use serde::Serialize;

use crate::auth::AuthError;
use crate::todos::ResourceError;
use crate::users::AccountError;

/// Successful API answer
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    fn with_status(status: Status, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            code: status.code,
            message: message.into(),
            data,
            timestamp: Utc::now(),
        }
    }

    /// `200 OK` carrying `data`
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::with_status(Status::Ok, message, Some(data))
    }

    /// `201 Created` carrying `data`
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::with_status(Status::Created, message, Some(data))
    }
}

impl ApiResponse<()> {
    /// `200 OK` without data
    pub fn message(message: impl Into<String>) -> Self {
        Self::with_status(Status::Ok, message, None)
    }
}

impl<'r, T: Serialize> Responder<'r, 'static> for ApiResponse<T> {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = Status::from_code(self.code).unwrap_or(Status::Ok);
        status::Custom(status, Json(self)).respond_to(request)
    }
}

/// Failed API answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: Status,
    pub message: String,
}

impl ApiError {
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(Status::BadRequest, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(Status::Unauthorized, message)
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let body = ApiResponse::<()>::with_status(self.status, self.message, None);
        status::Custom(self.status, Json(body)).respond_to(request)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let status = match &err {
            AuthError::InvalidSignature
            | AuthError::MalformedToken(_)
            | AuthError::ExpiredToken
            | AuthError::WrongTokenKind { .. }
            | AuthError::NotAuthenticated => Status::Unauthorized,
            AuthError::Forbidden => Status::Forbidden,
            AuthError::NotFound => Status::NotFound,
            AuthError::TokenEncoding(_) => {
                error!("Token encoding failed: {}", err);
                return Self::new(Status::InternalServerError, "Internal server error");
            }
        };
        Self::new(status, err.to_string())
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        let status = match &err {
            AccountError::Auth(auth) => return auth.clone().into(),
            AccountError::InvalidInput(_) => Status::BadRequest,
            AccountError::UsernameTaken => Status::Conflict,
            AccountError::InvalidCredentials => Status::Unauthorized,
            AccountError::AccountLocked => Status::Forbidden,
            AccountError::UserNotFound => Status::NotFound,
            AccountError::Hashing(_) => {
                error!("{}", err);
                return Self::new(Status::InternalServerError, "Internal server error");
            }
        };
        Self::new(status, err.to_string())
    }
}

impl From<ResourceError> for ApiError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::Auth(auth) => auth.into(),
            ResourceError::InvalidInput(message) => Self::new(Status::BadRequest, message),
            ResourceError::Conflict(message) => Self::new(Status::Conflict, message),
        }
    }
}

/// Result type of every API handler
pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenKind;

    #[test]
    fn test_auth_error_statuses() {
        assert_eq!(ApiError::from(AuthError::ExpiredToken).status, Status::Unauthorized);
        assert_eq!(
            ApiError::from(AuthError::WrongTokenKind {
                expected: TokenKind::Access,
                found: TokenKind::Refresh
            })
            .status,
            Status::Unauthorized
        );
        assert_eq!(ApiError::from(AuthError::Forbidden).status, Status::Forbidden);
        assert_eq!(ApiError::from(AuthError::NotFound).status, Status::NotFound);

        let internal = ApiError::from(AuthError::TokenEncoding("boom".to_string()));
        assert_eq!(internal.status, Status::InternalServerError);
        assert!(!internal.message.contains("boom"));
    }

    #[test]
    fn test_account_error_statuses() {
        let unauthorized = ApiError::from(AccountError::InvalidCredentials);
        assert_eq!(unauthorized.status, Status::Unauthorized);
        assert_eq!(unauthorized.message, "Invalid username or password");
        assert_eq!(ApiError::from(AccountError::UsernameTaken).status, Status::Conflict);
        assert_eq!(ApiError::from(AccountError::AccountLocked).status, Status::Forbidden);
        assert_eq!(
            ApiError::from(AccountError::Auth(AuthError::NotAuthenticated)).message,
            "User not authenticated"
        );
    }

    #[test]
    fn test_resource_error_statuses() {
        assert_eq!(
            ApiError::from(ResourceError::Conflict("taken".to_string())).status,
            Status::Conflict
        );
        assert_eq!(
            ApiError::from(ResourceError::InvalidInput("bad".to_string())).status,
            Status::BadRequest
        );
        assert_eq!(
            ApiError::from(ResourceError::Auth(AuthError::Forbidden)).status,
            Status::Forbidden
        );
    }

    #[test]
    fn test_envelope_shape() {
        let response = ApiResponse::created("Registration successful", 7);
        assert_eq!(response.code, 201);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["data"], 7);
        assert!(json["timestamp"].is_string());

        let empty = serde_json::to_value(ApiResponse::message("Logout successful")).unwrap();
        assert!(empty["data"].is_null());
    }
}
