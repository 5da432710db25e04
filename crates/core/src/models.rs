//! Content records exchanged with the commerce API.
//!
//! Records type the fields the pages read and keep everything else in
//! `extra`, so a record re-serializes to what the API sent.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use validator::{Validate, ValidationError};

use crate::error::{Error, Result};
use crate::limits::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

/// A community, magazine or curation post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: u64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub post_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A plant product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A bookmark owned by the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    #[serde(rename = "_id")]
    pub id: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// What a bookmark points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkKind {
    Product,
    Post,
}

impl BookmarkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Post => "post",
        }
    }
}

/// A bookmark toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkTarget {
    #[serde(rename = "type")]
    pub kind: BookmarkKind,
    pub target_id: u64,
}

impl BookmarkTarget {
    /// Page paths whose cached content shows this bookmark.
    pub fn affected_paths(&self) -> Vec<String> {
        let mut paths = match self.kind {
            BookmarkKind::Product => vec![format!("/shop/products/{}", self.target_id)],
            BookmarkKind::Post => vec![
                format!("/magazine/{}", self.target_id),
                format!("/curation/{}", self.target_id),
            ],
        };
        paths.push("/my-page".to_string());
        paths
    }
}

fn not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// A community post submitted by a signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewPost {
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub title: String,
    #[validate(length(min = 1, max = 10000), custom(function = "not_blank"))]
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl NewPost {
    /// Validate and build the commerce API request body.
    pub fn into_payload(self) -> Result<Value> {
        self.validate()
            .map_err(|e| Error::validation(format!("{}", e)))?;

        let mut body = json!({
            "type": "community",
            "title": self.title.trim(),
            "content": self.content,
        });
        if let Some(category) = self.category.filter(|c| !c.trim().is_empty()) {
            body["extra"] = json!({ "category": category });
        }
        Ok(body)
    }
}

/// Listing parameters for community posts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostQuery {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub category: Option<String>,
}

impl PostQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT)
    }

    /// Query pairs forwarded to `GET /posts`.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("type", "community".to_string()),
            ("page", self.page().to_string()),
            ("limit", self.limit().to_string()),
        ];
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            query.push(("custom", json!({ "extra.category": category }).to_string()));
        }
        query
    }
}
