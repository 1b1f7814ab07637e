// src/core/state/session/state.rs
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{error, instrument, warn};

use crate::core::api::{ApiRequest, Endpoints, HttpClient};
use crate::core::state::session::types::{
    LoginRequest, LoginResponse, RegisterRequest, Session, SessionUser, TOKEN_STORAGE_KEY,
    USER_STORAGE_KEY,
};
use crate::core::storage::KeyValueStore;
use crate::debug_log;
use crate::error::ClientError;

/// Owns the auth token and the signed-in user, mirrored into a
/// [`KeyValueStore`] on every change.
///
/// Cloning is cheap and every clone observes the same session. No lock is
/// held across a request, so actions may be awaited or spawned freely.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    session: RwLock<Session>,
    storage: Arc<dyn KeyValueStore>,
    http: Arc<dyn HttpClient>,
    endpoints: Endpoints,
}

impl SessionStore {
    /// Restores whatever session the storage holds. Never fails: unreadable
    /// or malformed entries count as absent.
    pub fn new(
        http: Arc<dyn HttpClient>,
        storage: Arc<dyn KeyValueStore>,
        endpoints: Endpoints,
    ) -> Self {
        let session = restore_session(storage.as_ref());
        debug_log!(
            "Restored session: authenticated={}, user={:?}",
            session.is_authenticated(),
            session.user.as_ref().map(|u| &u.username)
        );

        Self {
            inner: Arc::new(SessionInner {
                session: RwLock::new(session),
                storage,
                http,
                endpoints,
            }),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.read(Session::is_authenticated)
    }

    pub fn token(&self) -> String {
        self.read(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.read(|s| s.user.clone())
    }

    pub fn snapshot(&self) -> Session {
        self.read(Session::clone)
    }

    pub async fn login(&self, email: &str, password: &str) -> bool {
        self.try_login(email, password).await.is_ok()
    }

    /// On failure the previous session is left exactly as it was.
    #[instrument(name = "session_login", skip(self, password))]
    pub async fn try_login(&self, email: &str, password: &str) -> Result<SessionUser, ClientError> {
        let result = async {
            let request = ApiRequest::post(
                self.inner.endpoints.login(),
                &LoginRequest { email, password },
            )?;
            let body = self.inner.http.send(request).await?;
            Ok::<_, ClientError>(serde_json::from_value::<LoginResponse>(body)?)
        }
        .await;

        let response = result.map_err(|err| {
            error!(kind = %err.kind(), "Login failed: {err}");
            err
        })?;

        let session = response.into_session();
        let user = session.user.clone().ok_or_else(|| {
            ClientError::Decode("login response carried no user".to_string())
        })?;

        self.write(|s| *s = session.clone());
        self.persist(&session);

        debug_log!("Signed in as {} ({})", user.username, user.id);
        Ok(user)
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> bool {
        self.try_register(username, email, password).await.is_ok()
    }

    /// Registration does not sign the user in.
    #[instrument(name = "session_register", skip(self, password))]
    pub async fn try_register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        let result = async {
            let request = ApiRequest::post(
                self.inner.endpoints.register(),
                &RegisterRequest {
                    username,
                    email,
                    password,
                },
            )?;
            self.inner.http.send(request).await.map(|_| ())
        }
        .await;

        result.map_err(|err| {
            error!(kind = %err.kind(), "Registration failed: {err}");
            err
        })
    }

    pub fn logout(&self) {
        self.write(|s| *s = Session::default());

        for key in [TOKEN_STORAGE_KEY, USER_STORAGE_KEY] {
            if let Err(err) = self.inner.storage.remove(key) {
                warn!("Failed to remove {key} from storage: {err}");
            }
        }

        debug_log!("Signed out");
    }

    fn persist(&self, session: &Session) {
        if let Err(err) = self.inner.storage.set(TOKEN_STORAGE_KEY, &session.token) {
            warn!("Failed to persist {TOKEN_STORAGE_KEY}: {err}");
        }

        let user = match session.user.as_ref().map(serde_json::to_string).transpose() {
            Ok(user) => user,
            Err(err) => {
                warn!("Failed to encode {USER_STORAGE_KEY}: {err}");
                return;
            }
        };

        let written = match user {
            Some(encoded) => self.inner.storage.set(USER_STORAGE_KEY, &encoded),
            None => self.inner.storage.remove(USER_STORAGE_KEY),
        };
        if let Err(err) = written {
            warn!("Failed to persist {USER_STORAGE_KEY}: {err}");
        }
    }

    fn read<T>(&self, f: impl FnOnce(&Session) -> T) -> T {
        let guard = self
            .inner
            .session
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write(&self, f: impl FnOnce(&mut Session)) {
        let mut guard = self
            .inner
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }
}

fn restore_session(storage: &dyn KeyValueStore) -> Session {
    let token = storage.get(TOKEN_STORAGE_KEY).unwrap_or_else(|err| {
        warn!("Could not read {TOKEN_STORAGE_KEY} from storage: {err}");
        None
    });

    let user = storage
        .get(USER_STORAGE_KEY)
        .unwrap_or_else(|err| {
            warn!("Could not read {USER_STORAGE_KEY} from storage: {err}");
            None
        })
        .and_then(|raw| match serde_json::from_str::<Option<SessionUser>>(&raw) {
            Ok(user) => user,
            Err(err) => {
                warn!("Ignoring malformed {USER_STORAGE_KEY} entry: {err}");
                None
            }
        });

    Session {
        token: token.unwrap_or_default(),
        user,
    }
}
