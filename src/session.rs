// src/session.rs

//! Access-token session and its on-disk store.
//!
//! The token is opaque to this crate. It is read from a small JSON file
//! (`{"accessToken": "..."}`) and handed to every service call explicitly.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};

/// Credential context passed to every authenticated call.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// Session holding `token`; blank tokens count as absent.
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: (!token.trim().is_empty()).then_some(token),
        }
    }

    /// Session without a credential.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The bearer token, or `Unauthenticated`.
    pub fn credential(&self) -> Result<&str> {
        self.token.as_deref().ok_or(AppError::Unauthenticated)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    #[serde(rename = "accessToken", default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
}

/// File-backed session persistence.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session; a missing file is an anonymous session.
    pub async fn load(&self) -> Result<Session> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No session file at {}", self.path.display());
                return Ok(Session::anonymous());
            }
            Err(e) => return Err(AppError::Io(e)),
        };

        let file: SessionFile = serde_json::from_slice(&bytes)?;
        Ok(file.access_token.map(Session::new).unwrap_or_default())
    }

    /// Persist `token` atomically (write to temp, then rename).
    pub async fn save(&self, token: &str) -> Result<Session> {
        let session = Session::new(token);
        if !session.is_authenticated() {
            return Err(AppError::validation("access token is empty"));
        }

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let file = SessionFile {
            access_token: Some(token.to_string()),
        };
        let bytes = serde_json::to_vec_pretty(&file)?;

        let tmp = self.path.with_extension("tmp");
        let mut handle = tokio::fs::File::create(&tmp).await?;
        handle.write_all(&bytes).await?;
        handle.flush().await?;
        drop(handle);

        tokio::fs::rename(&tmp, &self.path).await?;
        log::info!("Session saved to {}", self.path.display());
        Ok(session)
    }

    /// Forget the stored token.
    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                log::info!("Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}
