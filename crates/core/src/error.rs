//! Unified error types for the shop backend.
//!
//! Error codes:
//! - AUTH_001: Sign-in required
//! - VALID_001: Invalid request payload
//! - NET_001: Commerce API unreachable
//! - NOT_FOUND: Unknown resource
//! - INTERNAL: Anything else

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Resources fetched or changed through the commerce API.
///
/// Each one carries the fixed user-facing message shown when the API
/// cannot be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Magazine,
    Curation,
    CommunityPosts,
    Post,
    Product,
    Bookmarks,
}

impl Resource {
    /// Short name used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Magazine => "magazine",
            Self::Curation => "curation",
            Self::CommunityPosts => "community_posts",
            Self::Post => "post",
            Self::Product => "product",
            Self::Bookmarks => "bookmarks",
        }
    }

    /// User-facing message for a transient network failure.
    pub fn network_message(&self) -> &'static str {
        match self {
            Self::Magazine => "일시적인 네트워크 오류로 매거진을 불러올 수 없습니다.",
            Self::Curation => "일시적인 네트워크 오류로 큐레이션을 불러올 수 없습니다.",
            Self::CommunityPosts => "일시적인 네트워크 오류로 게시글 목록을 불러올 수 없습니다.",
            Self::Post => "일시적인 네트워크 오류로 게시글을 등록할 수 없습니다.",
            Self::Product => "일시적인 네트워크 오류로 상품 정보를 불러올 수 없습니다.",
            Self::Bookmarks => "일시적인 네트워크 오류로 북마크를 처리할 수 없습니다.",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for the shop backend.
#[derive(Debug, Error)]
pub enum Error {
    /// The commerce API could not be reached. The message is user-facing;
    /// transport detail is logged where the failure happens, never stored.
    #[error("{message}")]
    Network {
        resource: Resource,
        message: &'static str,
    },

    #[error("로그인이 필요합니다.")]
    SignInRequired,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a transient network error for a resource.
    pub fn network(resource: Resource) -> Self {
        Self::Network {
            resource,
            message: resource.network_message(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Network { .. } => 503,
            Self::SignInRequired => 401,
            Self::Validation(_) => 400,
            Self::Serialization(_) => 400,
            Self::NotFound(_) => 404,
            Self::Config(_) => 500,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Network { .. } => "NET_001",
            Self::SignInRequired => "AUTH_001",
            Self::Validation(_) | Self::Serialization(_) => "VALID_001",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Config(_) | Self::Internal(_) => "INTERNAL",
        }
    }

    /// Whether this is a transient network failure.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}
