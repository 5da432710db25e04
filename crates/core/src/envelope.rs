//! The `{ ok, item, message }` response envelope of the commerce API.

use serde::{Deserialize, Serialize};

/// Pagination block sent with list responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// Response envelope returned by the commerce API.
///
/// `ok == 1` carries an `item`; `ok == 0` carries a `message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub ok: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    pub fn success(item: T) -> Self {
        Self {
            ok: 1,
            item: Some(item),
            message: None,
            pagination: None,
        }
    }

    /// A rejection envelope (`ok: 0`) with a message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            ok: 0,
            item: None,
            message: Some(message.into()),
            pagination: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.ok == 1
    }

    /// Enforce the envelope invariant.
    ///
    /// With `require_item`, `ok: 1` without an item becomes a rejection.
    /// Unknown `ok` values become rejections, and rejections without a
    /// message get a generic one. Deletions answer `{ ok: 1 }` with no
    /// item, so they normalize without `require_item`.
    pub fn normalize(mut self, require_item: bool) -> Self {
        match (self.ok, self.item.is_some()) {
            (1, true) => self,
            (1, false) if !require_item => self,
            (1, false) => Self::rejected("응답에 데이터가 없습니다."),
            _ => {
                self.ok = 0;
                self.item = None;
                if self.message.is_none() {
                    self.message = Some("요청을 처리할 수 없습니다.".to_string());
                }
                self
            }
        }
    }

    /// The item when `ok == 1`, else the rejection message.
    pub fn into_result(self) -> Result<T, String> {
        match self.item {
            Some(item) if self.ok == 1 => Ok(item),
            _ => Err(self
                .message
                .unwrap_or_else(|| "요청을 처리할 수 없습니다.".to_string())),
        }
    }
}
