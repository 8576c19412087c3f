// core/src/auth/mod.rs

//! Bearer-token session handling.
//!
//! The token issued by the backend at sign-in is the only durable auth state
//! the storefront keeps. Protected requests must call `require_token` first;
//! when it fails the caller redirects to the login route instead of
//! attempting the request.

use crate::error::{StorefrontError, StorefrontResult};
use anyhow::Context as AnyhowContext;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
  pub token: String,
  /// Display name cached for the header greeting; refreshed from the
  /// profile endpoint, never authoritative.
  #[serde(default)]
  pub display_name: Option<String>,
}

pub trait TokenRepository: Send + Sync {
  fn load(&self) -> Option<AuthSession>;
  fn save(&self, session: &AuthSession) -> StorefrontResult<()>;
  fn clear(&self) -> StorefrontResult<()>;
}

/// File-backed session store, same pattern as the cart store.
pub struct JsonFileTokenRepository {
  path: PathBuf,
}

impl JsonFileTokenRepository {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }
}

impl TokenRepository for JsonFileTokenRepository {
  fn load(&self) -> Option<AuthSession> {
    let raw = fs::read_to_string(&self.path).ok()?;
    match serde_json::from_str(&raw) {
      Ok(session) => Some(session),
      Err(e) => {
        warn!(path = %self.path.display(), error = %e, "Auth store is corrupt; treating as signed out.");
        None
      }
    }
  }

  fn save(&self, session: &AuthSession) -> StorefrontResult<()> {
    if let Some(parent) = self.path.parent() {
      if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)
          .with_context(|| format!("creating auth store directory {}", parent.display()))
          .map_err(|source| StorefrontError::Storage { source })?;
      }
    }
    let json = serde_json::to_string(session)?;
    fs::write(&self.path, json)
      .with_context(|| format!("writing auth store {}", self.path.display()))
      .map_err(|source| StorefrontError::Storage { source })?;
    Ok(())
  }

  fn clear(&self) -> StorefrontResult<()> {
    match fs::remove_file(&self.path) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(StorefrontError::Storage {
        source: anyhow::Error::new(e).context(format!("removing auth store {}", self.path.display())),
      }),
    }
  }
}

#[derive(Default)]
pub struct InMemoryTokenRepository {
  session: RwLock<Option<AuthSession>>,
}

impl InMemoryTokenRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

impl TokenRepository for InMemoryTokenRepository {
  fn load(&self) -> Option<AuthSession> {
    self.session.read().clone()
  }

  fn save(&self, session: &AuthSession) -> StorefrontResult<()> {
    *self.session.write() = Some(session.clone());
    Ok(())
  }

  fn clear(&self) -> StorefrontResult<()> {
    *self.session.write() = None;
    Ok(())
  }
}

/// Process-wide auth state, injected alongside the cart context.
pub struct AuthContext {
  session: RwLock<Option<AuthSession>>,
  repo: Arc<dyn TokenRepository>,
}

impl AuthContext {
  pub fn new(repo: Arc<dyn TokenRepository>) -> Self {
    let session = repo.load();
    debug!(signed_in = session.is_some(), "Auth context initialized from store.");
    Self {
      session: RwLock::new(session),
      repo,
    }
  }

  pub fn sign_in(&self, session: AuthSession) {
    if let Err(e) = self.repo.save(&session) {
      warn!(error = %e, "Persisting auth session failed; in-memory session retained.");
    }
    *self.session.write() = Some(session);
  }

  pub fn sign_out(&self) {
    if let Err(e) = self.repo.clear() {
      warn!(error = %e, "Clearing persisted auth session failed.");
    }
    *self.session.write() = None;
  }

  pub fn is_signed_in(&self) -> bool {
    self.session.read().is_some()
  }

  pub fn token(&self) -> Option<String> {
    self.session.read().as_ref().map(|s| s.token.clone())
  }

  /// Token for a protected request, or `MissingToken` so the caller can
  /// redirect to login without ever issuing the request.
  pub fn require_token(&self) -> StorefrontResult<String> {
    self.token().ok_or(StorefrontError::MissingToken)
  }
}
