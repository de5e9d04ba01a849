//! Client session context.
//!
//! A [`Session`] is populated at login and cleared at logout. Tokens live in
//! a [`TokenStore`] so they survive restarts; the profile is kept in memory
//! only and refetched on startup.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use crate::model::{AuthTokens, Role, User};
use crate::traits::TokenStore;

pub const TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const LAST_SHOWN_LEVEL_KEY: &str = "lastShownLevel";

/// In-memory [`TokenStore`], used by tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    fn values(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(|poisoned| {
            tracing::error!("token store mutex poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.values().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.values().remove(key);
        Ok(())
    }
}

/// What the route guard needs to know about the current visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub authenticated: bool,
    pub role: Role,
    pub verified: bool,
}

impl Viewer {
    pub const GUEST: Viewer = Viewer {
        authenticated: false,
        role: Role::User,
        verified: false,
    };
}

/// Process-wide session state, shared by every API call.
pub struct Session {
    store: Arc<dyn TokenStore>,
    user: RwLock<Option<User>>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            store,
            user: RwLock::new(None),
        }
    }

    /// Session backed by a fresh [`MemoryTokenStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::default()))
    }

    pub fn store(&self) -> &dyn TokenStore {
        self.store.as_ref()
    }

    /// The bearer token, if signed in. Storage failures read as signed out.
    pub fn token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("failed to read token: {e:#}");
                None
            }
        }
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.store
            .get(REFRESH_TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Persist the tokens of a successful login.
    pub fn store_tokens(&self, tokens: &AuthTokens) -> anyhow::Result<()> {
        self.store.set(TOKEN_KEY, &tokens.token)?;
        match &tokens.refresh_token {
            Some(refresh) => self.store.set(REFRESH_TOKEN_KEY, refresh)?,
            None => self.store.remove(REFRESH_TOKEN_KEY)?,
        }
        Ok(())
    }

    pub fn set_user(&self, user: User) {
        *self.user.write().unwrap_or_else(|p| p.into_inner()) = Some(user);
    }

    pub fn user(&self) -> Option<User> {
        self.user.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    /// Drop tokens and profile. The last celebrated level is kept.
    pub fn clear(&self) -> anyhow::Result<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(REFRESH_TOKEN_KEY)?;
        *self.user.write().unwrap_or_else(|p| p.into_inner()) = None;
        Ok(())
    }

    pub fn viewer(&self) -> Viewer {
        if !self.is_authenticated() {
            return Viewer::GUEST;
        }
        match self.user() {
            Some(user) => Viewer {
                authenticated: true,
                role: user.role(),
                verified: user.is_verified,
            },
            // Profile not loaded: no staff rights, and not known to be verified.
            None => Viewer {
                authenticated: true,
                role: Role::User,
                verified: false,
            },
        }
    }
}
