//! Request extractors.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use shop_core::{cookie_value, limits::SESSION_COOKIE, read_session, Error, User};
use std::borrow::Cow;
use tracing::debug;
use url::form_urlencoded;

use crate::response::ApiError;
use crate::state::AppState;

/// `Set-Cookie` value that removes the session cookie.
pub const CLEAR_SESSION_COOKIE: &str = "user-auth=; Path=/; Max-Age=0";

/// The signed-in user, if any.
///
/// Reads the `user-auth` cookie. Missing, malformed and logged-out
/// sessions all come out as `None`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser(signed_in_user(state, &parts.headers).await))
    }
}

/// A signed-in user; rejects with `AUTH_001` otherwise.
#[derive(Debug, Clone)]
pub struct SignedIn(pub User);

#[async_trait]
impl FromRequestParts<AppState> for SignedIn {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        signed_in_user(state, &parts.headers)
            .await
            .map(SignedIn)
            .ok_or_else(|| Error::SignInRequired.into())
    }
}

/// The user behind the request's session cookie, unless logged out.
pub async fn signed_in_user(state: &AppState, headers: &HeaderMap) -> Option<User> {
    let raw = session_cookie(headers);
    let user = read_session(raw.as_deref())?;

    if state.sessions.is_revoked(user.session_key()).await {
        debug!(user_id = %user.id, "Ignoring logged-out session");
        return None;
    }
    Some(user)
}

/// The decoded `user-auth` cookie value across all `Cookie` headers.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .find_map(|h| cookie_value(h, SESSION_COOKIE))
        .map(|raw| decode_cookie(raw).into_owned())
}

/// Undo `encodeURIComponent`, leaving plain values untouched.
///
/// Only an encoded JSON object (`%7B…`) is decoded. `+` is kept literal,
/// the way `decodeURIComponent` reads it.
fn decode_cookie(raw: &str) -> Cow<'_, str> {
    let encoded = raw
        .get(..3)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("%7B"));
    if !encoded {
        return Cow::Borrowed(raw);
    }

    let escaped = raw.replace('+', "%2B");
    form_urlencoded::parse(escaped.as_bytes())
        .next()
        .map(|(decoded, _)| Cow::Owned(decoded.into_owned()))
        .unwrap_or(Cow::Borrowed(raw))
}
