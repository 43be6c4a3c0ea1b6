//! Response envelope and API errors.
//!
//! Every JSON response of the release routes is wrapped as
//! `{"response": {"status": {...}, "release": ...}}`. Errors carry the same
//! envelope without the `release` key.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

pub const API_VERSION: &str = "1.0";

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub response: ApiResponseInner<T>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponseInner<T> {
    pub status: ApiStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<T>,
}

#[derive(Debug, Serialize)]
pub struct ApiStatus {
    pub code: u32,
    pub message: String,
    pub version: &'static str,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(release: T) -> Self {
        ApiResponse {
            response: ApiResponseInner {
                status: ApiStatus {
                    code: 0,
                    message: "success".to_string(),
                    version: API_VERSION,
                },
                release: Some(release),
            },
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),

    #[error("release not found")]
    NotFound,

    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn code(&self) -> u32 {
        match self {
            ApiError::MissingParameter(_) => 1,
            ApiError::NotFound => 2,
            ApiError::InvalidParameter(_) => 3,
            ApiError::Internal(_) => 4,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_) | ApiError::InvalidParameter(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            error!("Internal error: {:#}", err);
        }
        let body: ApiResponse<()> = ApiResponse {
            response: ApiResponseInner {
                status: ApiStatus {
                    code: self.code(),
                    message: self.to_string(),
                    version: API_VERSION,
                },
                release: None,
            },
        };
        (self.status_code(), Json(body)).into_response()
    }
}
