//! Distance-matrix API key management.
//!
//! [`CredentialFile`] reads the key from a sectioned INI file.
//! [`resolve_api_key`] applies the environment override and is what the CLI
//! calls once at start-up.

mod config;

pub use config::CredentialFile;

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, TravelTimeError};

/// Environment variable that takes precedence over the credential file.
pub const API_KEY_ENV: &str = "DISTANCE_MATRIX_API_KEY";

/// A non-blank API key. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(TravelTimeError::credential("API key is blank"));
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Resolves the API key from `DISTANCE_MATRIX_API_KEY`, falling back to
/// `section.key` in the credential file at `path`.
pub fn resolve_api_key(path: impl AsRef<Path>, section: &str) -> Result<ApiKey> {
    resolve_with_override(std::env::var(API_KEY_ENV).ok(), path.as_ref(), section)
}

fn resolve_with_override(env_key: Option<String>, path: &Path, section: &str) -> Result<ApiKey> {
    if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
        debug!(source = API_KEY_ENV, "Using API key from environment");
        return ApiKey::new(key);
    }

    debug!(path = %path.display(), section, "Reading API key from credential file");
    CredentialFile::load(path)?.api_key(section)
}
