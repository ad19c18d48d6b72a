//! Implicit-grant login.
//!
//! The user is sent to the authorization page; the token comes back in the
//! fragment of the redirect URL and is kept in the key-value store under
//! [`keys::ACCESS_TOKEN`], [`keys::TOKEN_TYPE`] and [`keys::EXPIRES_IN`].

use crate::error::{ApiClientError, Result};
use deck_core::storage::{keys, KeyValueStore};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};
use url::Url;

/// Authorization endpoint.
pub const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";

/// Token type assumed when the redirect does not name one.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// Scopes the dashboard asks for.
pub const DEFAULT_SCOPES: &str =
    "user-top-read user-follow-read playlist-read-private user-library-read";

/// Token captured from the redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: u64,
}

/// Token loaded from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    /// Absolute expiry, epoch milliseconds
    pub expires_at_ms: u64,
}

impl Session {
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at_ms
    }

    /// Value for an `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

/// Build the URL of the authorization page.
pub fn authorize_url(client_id: &str, redirect_uri: &str, scopes: &str) -> Result<Url> {
    Url::parse_with_params(
        AUTHORIZE_URL,
        &[
            ("client_id", client_id),
            ("response_type", "token"),
            ("redirect_uri", redirect_uri),
            ("scope", scopes),
            ("show_dialog", "true"),
        ],
    )
    .map_err(|e| ApiClientError::InvalidUrl(e.to_string()))
}

/// Extract the token from a redirect.
///
/// `input` is either the full redirect URL or just its fragment.
///
/// # Returns
/// * `Ok(Some(grant))` - The fragment carries an access token
/// * `Ok(None)` - No token and no error (the login window was just opened)
/// * `Err(AuthFailed)` - The authorization server reported an error
pub fn parse_redirect(input: &str) -> Result<Option<TokenGrant>> {
    let input = input.trim();
    let (query, fragment) = match Url::parse(input) {
        Ok(url) => (
            url.query().unwrap_or_default().to_string(),
            url.fragment().unwrap_or_default().to_string(),
        ),
        Err(_) => (String::new(), input.trim_start_matches('#').to_string()),
    };

    let query_pairs = url::form_urlencoded::parse(query.as_bytes());
    let fragment_pairs = url::form_urlencoded::parse(fragment.as_bytes());
    if let Some((_, reason)) = query_pairs
        .chain(fragment_pairs.clone())
        .find(|(key, _)| key == "error")
    {
        warn!(%reason, "Authorization failed");
        return Err(ApiClientError::AuthFailed(reason.into_owned()));
    }

    let mut access_token = None;
    let mut token_type = None;
    let mut expires_in = None;
    for (key, value) in fragment_pairs {
        match &*key {
            "access_token" if !value.is_empty() => access_token = Some(value.into_owned()),
            "token_type" => token_type = Some(value.into_owned()),
            "expires_in" => expires_in = Some(value.into_owned()),
            _ => {}
        }
    }

    let Some(access_token) = access_token else {
        debug!("Redirect carries no token");
        return Ok(None);
    };

    let expires_in = match expires_in {
        Some(raw) => raw
            .parse()
            .map_err(|_| ApiClientError::ParseError(format!("invalid expires_in: {raw}")))?,
        None => 3600,
    };

    Ok(Some(TokenGrant {
        access_token,
        token_type: token_type.unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_string()),
        expires_in,
    }))
}

/// Persist `grant`, computing its absolute expiry from `now_ms`.
pub fn store_grant<K>(store: &mut K, grant: &TokenGrant, now_ms: u64) -> Result<Session>
where
    K: KeyValueStore + ?Sized,
{
    let expires_at_ms = now_ms.saturating_add(grant.expires_in.saturating_mul(1000));
    store.set(keys::ACCESS_TOKEN, &grant.access_token)?;
    store.set(keys::TOKEN_TYPE, &grant.token_type)?;
    store.set(keys::EXPIRES_IN, &expires_at_ms.to_string())?;

    info!(expires_at_ms, "Stored access token");
    Ok(Session {
        access_token: grant.access_token.clone(),
        token_type: grant.token_type.clone(),
        expires_at_ms,
    })
}

/// Read the stored session, if any.
///
/// An unreadable expiry is treated as already expired.
pub fn load_session<K>(store: &K) -> Result<Option<Session>>
where
    K: KeyValueStore + ?Sized,
{
    let Some(access_token) = store.get(keys::ACCESS_TOKEN)?.filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    let token_type = store
        .get(keys::TOKEN_TYPE)?
        .unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_string());
    let expires_at_ms = store
        .get(keys::EXPIRES_IN)?
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0);

    Ok(Some(Session {
        access_token,
        token_type,
        expires_at_ms,
    }))
}

/// Forget the stored token.
pub fn logout<K>(store: &mut K) -> Result<()>
where
    K: KeyValueStore + ?Sized,
{
    store.remove(keys::ACCESS_TOKEN)?;
    store.remove(keys::EXPIRES_IN)?;
    store.remove(keys::TOKEN_TYPE)?;
    info!("Logged out");
    Ok(())
}

/// Current time in epoch milliseconds.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
