use api_types::{
    auth::{LoginRequest, RegisterRequest},
    user::User,
};
use chrono::Utc;

use crate::{
    client::{Client, ClientError},
    error::AppError,
    session_store::{Session, SessionStore},
    token,
};

/// Failure of a session operation: either the API rejected it or the local
/// store could not be written.
#[derive(Debug)]
pub enum SessionError {
    Api(ClientError),
    Store(AppError),
}

impl From<ClientError> for SessionError {
    fn from(err: ClientError) -> Self {
        Self::Api(err)
    }
}

impl From<AppError> for SessionError {
    fn from(err: AppError) -> Self {
        Self::Store(err)
    }
}

/// Owns the current-user identity for the lifetime of the app.
///
/// State changes are all-or-nothing: the in-memory session and the persisted
/// one are only touched after a successful API response, and a failed
/// operation leaves whatever session existed before untouched.
#[derive(Debug)]
pub struct SessionManager {
    store: SessionStore,
    session: Option<Session>,
}

impl SessionManager {
    pub fn new(session_path: &str) -> Self {
        Self {
            store: SessionStore::new(session_path),
            session: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// Restores a persisted session at startup. Returns whether the app
    /// starts authenticated.
    ///
    /// With `verify` set, a stored token is only trusted after its expiry
    /// claim checks out locally and the protected endpoint accepts it; the
    /// user record is then refreshed from the server's response. Any
    /// rejection discards the stored session. Without `verify`, a present
    /// token+user pair is trusted as-is.
    pub async fn restore(&mut self, client: &Client, verify: bool) -> crate::error::Result<bool> {
        let stored = match self.store.load() {
            Ok(stored) => stored,
            Err(AppError::Json(err)) => {
                tracing::warn!("discarding unreadable session file: {err}");
                self.store.clear()?;
                None
            }
            Err(err) => return Err(err),
        };

        let Some(stored) = stored else {
            return Ok(false);
        };

        if !verify {
            self.session = Some(stored);
            return Ok(true);
        }

        if token::is_expired(&stored.token, Utc::now()) {
            tracing::info!("stored token is past its expiry claim, discarding");
            self.store.clear()?;
            return Ok(false);
        }

        match client.verify(&stored.token).await {
            Ok(response) => {
                let session = Session {
                    token: stored.token,
                    user: response.user,
                };
                self.store.save(&session)?;
                self.session = Some(session);
                Ok(true)
            }
            Err(err) => {
                tracing::warn!("stored token failed verification, discarding: {err:?}");
                self.store.clear()?;
                Ok(false)
            }
        }
    }

    pub async fn register(
        &mut self,
        client: &Client,
        payload: RegisterRequest,
    ) -> Result<(), SessionError> {
        let response = client.register(&payload).await?;
        let session = Session {
            token: response.token,
            user: response.user,
        };
        self.store.save(&session)?;
        self.session = Some(session);
        Ok(())
    }

    pub async fn login(
        &mut self,
        client: &Client,
        payload: LoginRequest,
    ) -> Result<(), SessionError> {
        let response = client.login(&payload).await?;
        let session = Session {
            token: response.token,
            user: response.user,
        };
        self.store.save(&session)?;
        self.session = Some(session);
        Ok(())
    }

    /// Clears the in-memory session and the persisted one. Purely local.
    pub fn logout(&mut self) -> crate::error::Result<()> {
        self.session = None;
        self.store.clear()
    }

    /// Drops the in-memory and persisted session after the server rejected
    /// the token mid-flight.
    pub fn force_logout(&mut self) -> crate::error::Result<()> {
        tracing::info!("session rejected by server, logging out");
        self.logout()
    }
}
