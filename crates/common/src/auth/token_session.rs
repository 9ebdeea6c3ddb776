//! Token session with single-flight refresh
//!
//! Holds the current access/refresh token pair and its expiry:
//! - `authorize` stores tokens, swaps the transport's bearer header and
//!   notifies subscribers
//! - `refresh_if_needed` runs a caller-supplied refresh at most once per
//!   expiry, however many callers observe the expired token concurrently

use std::fmt;
use std::future::Future;

use chrono::{DateTime, Duration, Utc};
use harvest_domain::constants::DEFAULT_TOKEN_TYPE;
use harvest_domain::{HarvestError, Result};
use parking_lot::RwLock;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info};

use super::types::AuthResult;
use crate::http::HttpClient;

const EVENT_CAPACITY: usize = 16;

/// Broadcast after every successful `authorize`, so the caller can persist
/// the new tokens.
#[derive(Clone)]
pub struct TokenRefreshed {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for TokenRefreshed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRefreshed")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Clone)]
struct SessionTokens {
    access_token: String,
    refresh_token: Option<String>,
    expires_at: DateTime<Utc>,
}

/// Current credentials of a client.
///
/// Created empty; only [`TokenSession::authorize`] mutates it.
pub struct TokenSession {
    tokens: RwLock<Option<SessionTokens>>,
    transport: HttpClient,
    refresh_guard: Mutex<()>,
    events: broadcast::Sender<TokenRefreshed>,
}

impl TokenSession {
    /// Create an empty session that authorizes `transport`.
    #[must_use]
    pub fn new(transport: HttpClient) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { tokens: RwLock::new(None), transport, refresh_guard: Mutex::new(()), events }
    }

    /// Install a new token pair.
    ///
    /// `expires_in_seconds` of 0 yields an already-expired session, which
    /// is how tokens of unknown lifetime are stored.
    ///
    /// # Errors
    /// Returns [`HarvestError::InvalidArgument`] for an empty access token, a
    /// negative lifetime, or a lifetime whose expiry is past the largest
    /// representable timestamp. The session is left untouched in that case.
    pub fn authorize(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
        expires_in_seconds: i64,
    ) -> Result<()> {
        if access_token.is_empty() {
            return Err(HarvestError::InvalidArgument("access token must not be empty".into()));
        }
        if expires_in_seconds < 0 {
            return Err(HarvestError::InvalidArgument(format!(
                "expires_in must not be negative, got {expires_in_seconds}"
            )));
        }

        let expires_at = Duration::try_seconds(expires_in_seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                HarvestError::InvalidArgument(format!(
                    "expires_in out of range, got {expires_in_seconds}"
                ))
            })?;

        self.transport.set_authorization(DEFAULT_TOKEN_TYPE, access_token)?;

        let tokens = SessionTokens {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.filter(|t| !t.is_empty()).map(str::to_string),
            expires_at,
        };
        let event = TokenRefreshed {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            expires_at,
        };
        *self.tokens.write() = Some(tokens);

        info!(expires_in = expires_in_seconds, "session authorized");
        // No subscribers is not an error.
        let _ = self.events.send(event);
        Ok(())
    }

    /// [`TokenSession::authorize`] from a grant result.
    pub fn authorize_with(&self, result: &AuthResult) -> Result<()> {
        self.authorize(&result.access_token, result.refresh_token.as_deref(), result.expires_in)
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.read().is_some()
    }

    /// `true` once `now >= expiry`. An empty session is not expired.
    pub fn is_expired(&self) -> bool {
        self.tokens.read().as_ref().is_some_and(|tokens| Utc::now() >= tokens.expires_at)
    }

    /// Expired and holding a refresh token.
    pub fn needs_refresh(&self) -> bool {
        self.tokens
            .read()
            .as_ref()
            .is_some_and(|tokens| tokens.refresh_token.is_some() && Utc::now() >= tokens.expires_at)
    }

    pub fn access_token(&self) -> Option<String> {
        self.tokens.read().as_ref().map(|tokens| tokens.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.tokens.read().as_ref().and_then(|tokens| tokens.refresh_token.clone())
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.tokens.read().as_ref().map(|tokens| tokens.expires_at)
    }

    pub fn seconds_until_expiry(&self) -> Option<i64> {
        self.expires_at().map(|expires_at| (expires_at - Utc::now()).num_seconds())
    }

    /// Receiver for [`TokenRefreshed`] events.
    pub fn subscribe(&self) -> broadcast::Receiver<TokenRefreshed> {
        self.events.subscribe()
    }

    /// Run `refresh` if the token has expired and a refresh token is held.
    ///
    /// Concurrent callers queue on an async mutex; whoever acquires it
    /// re-checks, so callers that waited on an in-flight refresh see the new
    /// expiry and return without refreshing again. `refresh` is expected to
    /// call [`TokenSession::authorize`]. Expired without a refresh token
    /// proceeds silently.
    ///
    /// Returns whether this call ran the refresh.
    pub async fn refresh_if_needed<F, Fut>(&self, refresh: F) -> Result<bool>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        if !self.needs_refresh() {
            return Ok(false);
        }

        let _guard = self.refresh_guard.lock().await;
        if !self.needs_refresh() {
            debug!("token refreshed by a concurrent caller");
            return Ok(false);
        }

        debug!("access token expired, refreshing");
        refresh().await?;
        Ok(true)
    }
}

impl fmt::Debug for TokenSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSession")
            .field("authenticated", &self.is_authenticated())
            .field("expires_at", &self.expires_at())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    fn session() -> TokenSession {
        TokenSession::new(HttpClient::new().expect("http client"))
    }

    #[test]
    fn test_authorize_rejects_empty_token() {
        let session = session();
        let err = session.authorize("", Some("r"), 3600).unwrap_err();
        assert!(matches!(err, HarvestError::InvalidArgument(_)));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_zero_lifetime_is_immediately_expired() {
        let session = session();
        session.authorize("tok", None, 0).unwrap();
        assert!(session.is_authenticated());
        assert!(session.is_expired());
        assert!(!session.needs_refresh());
    }

    #[test]
    fn test_positive_lifetime_expires_in_future() {
        let session = session();
        session.authorize("tok", Some("ref"), 3600).unwrap();
        assert!(!session.is_expired());
        let remaining = session.seconds_until_expiry().unwrap();
        assert!(remaining > 3590 && remaining <= 3600);
        assert_eq!(session.access_token().as_deref(), Some("tok"));
        assert_eq!(session.refresh_token().as_deref(), Some("ref"));
    }

    #[test]
    fn test_authorize_sets_transport_header() {
        let transport = HttpClient::new().expect("http client");
        let session = TokenSession::new(transport.clone());
        session.authorize("tok", None, 60).unwrap();
        assert!(transport.has_authorization());
    }

    #[test]
    fn test_authorize_rejects_unrepresentable_lifetime() {
        let transport = HttpClient::new().expect("http client");
        let session = TokenSession::new(transport.clone());

        for lifetime in [i64::MAX, 10_i64.pow(13)] {
            let err = session.authorize("tok", Some("ref"), lifetime).unwrap_err();
            assert!(matches!(err, HarvestError::InvalidArgument(_)), "lifetime {lifetime}");
        }
        assert!(!session.is_authenticated());
        assert!(!transport.has_authorization());

        session.authorize("tok", Some("ref"), 1_209_600).unwrap();
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_authorize_notifies_subscribers() {
        let session = session();
        let mut events = session.subscribe();
        session.authorize("tok", Some("ref"), 60).unwrap();

        let event = events.recv().await.unwrap();
        assert_eq!(event.access_token, "tok");
        assert_eq!(event.refresh_token.as_deref(), Some("ref"));
        assert!(!format!("{event:?}").contains("tok"));
    }

    #[tokio::test]
    async fn test_refresh_skipped_while_valid() {
        let session = session();
        session.authorize("tok", Some("ref"), 3600).unwrap();

        let calls = AtomicUsize::new(0);
        let refreshed = session
            .refresh_if_needed(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .await
            .unwrap();

        assert!(!refreshed);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_refresh_runs_once_when_expired() {
        let session = session();
        session.authorize("old", Some("ref"), 0).unwrap();

        let calls = AtomicUsize::new(0);
        let refreshed = session
            .refresh_if_needed(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                session.authorize("new", Some("ref2"), 3600)
            })
            .await
            .unwrap();

        assert!(refreshed);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.access_token().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_expired_without_refresh_token_proceeds() {
        let session = session();
        session.authorize("tok", None, 0).unwrap();

        let calls = AtomicUsize::new(0);
        let refreshed = session
            .refresh_if_needed(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .await
            .unwrap();
        assert!(!refreshed);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_refresh_errors_propagate() {
        let session = session();
        session.authorize("tok", Some("ref"), 0).unwrap();

        let err = session
            .refresh_if_needed(|| async {
                Err(HarvestError::Http { status: 401, reason: "Unauthorized".into() })
            })
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
        assert!(session.needs_refresh());
    }

    #[tokio::test]
    async fn test_concurrent_callers_refresh_once() {
        let session = Arc::new(session());
        session.authorize("old", Some("ref"), 0).unwrap();
        let calls = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let session = Arc::clone(&session);
                let calls = Arc::clone(&calls);
                tokio::spawn(async move {
                    let inner = Arc::clone(&session);
                    session
                        .refresh_if_needed(|| async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                            inner.authorize("new", Some("ref2"), 3600)
                        })
                        .await
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.access_token().as_deref(), Some("new"));
    }
}
