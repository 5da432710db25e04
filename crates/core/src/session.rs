//! Session handling: the signed-in user carried by the `user-auth` cookie.
//!
//! The cookie holds the browser auth store serialized as JSON:
//! `{ "state": { "user": { ... } }, "version": 0 }`. Anything that does not
//! match that shape means "signed out"; reading a session never fails.

use serde::{Deserialize, Deserializer, Serialize};

/// Access and refresh tokens issued by the commerce API at sign-in.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken").finish_non_exhaustive()
    }
}

/// The signed-in user.
///
/// Only `id` is required. The commerce API sends a numeric `_id`; the
/// browser store may hold either that or a string `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id", deserialize_with = "deserialize_user_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<AuthToken>,
}

impl User {
    /// Bearer token for authenticated commerce API calls.
    pub fn access_token(&self) -> Option<&str> {
        self.token
            .as_ref()
            .map(|t| t.access_token.as_str())
            .filter(|t| !t.is_empty())
    }

    /// Key identifying this sign-in.
    ///
    /// A fresh sign-in issues a fresh access token, so keying on the token
    /// separates consecutive sessions of the same user.
    pub fn session_key(&self) -> &str {
        self.access_token().unwrap_or(&self.id)
    }

    /// Whether the user has the admin role.
    pub fn is_admin(&self) -> bool {
        self.user_type.as_deref() == Some("admin")
    }
}

fn deserialize_user_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

#[derive(Deserialize)]
struct StoredAuth {
    #[serde(default)]
    state: Option<StoredState>,
}

#[derive(Deserialize)]
struct StoredState {
    #[serde(default)]
    user: Option<User>,
}

/// Find a cookie's raw value in a `Cookie` request header.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key.trim() == name).then(|| value.trim())
    })
}

/// Read the signed-in user from the raw `user-auth` cookie value.
///
/// Missing cookie, malformed JSON, a missing `state.user` or a user
/// without an id all yield `None`.
pub fn read_session(cookie_value: Option<&str>) -> Option<User> {
    let raw = cookie_value?.trim();
    if raw.is_empty() {
        return None;
    }

    let stored: StoredAuth = serde_json::from_str(raw).ok()?;
    stored
        .state?
        .user
        .filter(|user| !user.id.trim().is_empty())
}
