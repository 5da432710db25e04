//! Standardized responses: page views, errors and health.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shop_core::{ApiResponse, Error};
use telemetry::ComponentHealthReport;

/// How a page shell rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageState {
    /// Content fetched successfully
    Ready,
    /// The commerce API answered `ok: 0`
    Empty,
    /// Unknown id or slug
    NotFound,
    /// The commerce API could not be reached
    Error,
    /// Feature not built yet
    Placeholder,
}

impl PageState {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Ready | Self::Empty | Self::Placeholder => StatusCode::OK,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Error => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// A rendered page shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageView {
    pub route: String,
    pub state: PageState,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PageView {
    fn new(route: impl Into<String>, state: PageState, title: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            state,
            title: title.into(),
            data: None,
            notice: None,
            message: None,
        }
    }

    pub fn ready(route: impl Into<String>, title: impl Into<String>, data: Value) -> Self {
        Self {
            data: Some(data),
            ..Self::new(route, PageState::Ready, title)
        }
    }

    /// Fixed notice for a route whose feature is not built yet.
    pub fn placeholder(route: impl Into<String>, title: impl Into<String>, feature: &str) -> Self {
        Self {
            notice: Some(format!("💡 이 영역에서 {} 기능을 개발해주세요", feature)),
            ..Self::new(route, PageState::Placeholder, title)
        }
    }

    pub fn not_found(route: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            message: Some("페이지를 찾을 수 없습니다.".to_string()),
            ..Self::new(route, PageState::NotFound, title)
        }
    }

    /// Render a commerce API envelope: `ok: 1` is ready, `ok: 0` is empty.
    pub fn from_envelope<T: Serialize>(
        route: impl Into<String>,
        title: impl Into<String>,
        envelope: &ApiResponse<T>,
    ) -> Self {
        if !envelope.is_ok() {
            return Self {
                message: envelope.message.clone(),
                ..Self::new(route, PageState::Empty, title)
            };
        }

        match serde_json::to_value(envelope) {
            Ok(data) => Self::ready(route, title, data),
            Err(e) => Self {
                message: Some(e.to_string()),
                ..Self::new(route, PageState::Error, title)
            },
        }
    }

    /// Degrade to an error state with the user-facing message.
    pub fn from_error(route: impl Into<String>, title: impl Into<String>, err: &Error) -> Self {
        let state = match err {
            Error::NotFound(_) => PageState::NotFound,
            _ => PageState::Error,
        };
        Self {
            message: Some(err.to_string()),
            ..Self::new(route, state, title)
        }
    }

    /// Only successfully fetched pages are worth caching.
    pub fn is_cacheable(&self) -> bool {
        self.state == PageState::Ready
    }
}

impl IntoResponse for PageView {
    fn into_response(self) -> Response {
        (self.state.status_code(), Json(self)).into_response()
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub commerce_api_connected: bool,
    pub active_sessions: u64,
    pub checked_at: i64,
    pub components: Vec<ComponentHealthReport>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = Some(details);
        self
    }
}

/// API error type with error codes.
pub struct ApiError {
    pub status: StatusCode,
    pub response: ErrorResponse,
}

impl ApiError {
    pub fn with_code(status: StatusCode, code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            status,
            response: ErrorResponse::new(msg, code),
        }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::with_code(StatusCode::UNAUTHORIZED, "AUTH_001", msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_code(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", msg)
    }

    pub fn validation(errors: Vec<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            response: ErrorResponse::new("Validation failed", "VALID_001").with_details(errors),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match &err {
            Error::SignInRequired => ApiError::unauthorized(err.to_string()),
            Error::Validation(msg) => ApiError::validation(vec![msg.clone()]),
            Error::Network { .. } | Error::NotFound(_) | Error::Serialization(_) => {
                let status = StatusCode::from_u16(err.http_status())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                ApiError::with_code(status, err.error_code(), err.to_string())
            }
            Error::Config(_) | Error::Internal(_) => ApiError::internal(err.to_string()),
        }
    }
}
