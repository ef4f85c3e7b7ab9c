//! Secret resolution with memory-safe handling and masking capabilities
//!
//! This module provides credential lookup for the upload stage, using the
//! `secrecy` crate to prevent accidental exposure in logs or memory dumps.
//! The store is built once at startup and injected into consumers; nothing
//! reads ambient process state per request.

use crate::core::error::PublishError;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::env;

/// Secret name used when the broadcast config does not name one
pub const DEFAULT_PASSWORD_SECRET_KEY: &str = "RADIO_FTP_PASSWORD";

/// Placeholder substituted for a credential in any diagnostic string
pub const CREDENTIAL_PLACEHOLDER: &str = "***";

/// Read-only, process-wide secret store
///
/// # Examples
///
/// ```
/// use broadcast_publisher::security::SecretStore;
/// use std::collections::HashMap;
///
/// let store = SecretStore::new(HashMap::from([(
///     "RADIO_FTP_PASSWORD".to_string(),
///     "hunter2-hunter2".to_string(),
/// )]));
/// assert!(store.has_secret("RADIO_FTP_PASSWORD"));
/// ```
#[derive(Default)]
pub struct SecretStore {
    secrets: HashMap<String, SecretString>,
}

impl SecretStore {
    /// Create a store from an explicit name/value map
    pub fn new(secrets: HashMap<String, String>) -> Self {
        let secrets = secrets
            .into_iter()
            .map(|(name, value)| (name, SecretString::new(value.into())))
            .collect();

        Self { secrets }
    }

    /// Snapshot the process environment at startup.
    ///
    /// The snapshot is immutable afterwards; later environment changes are
    /// not observed by the pipeline.
    pub fn from_env() -> Self {
        Self::new(env::vars().collect())
    }

    /// Resolve a named credential.
    ///
    /// Fails closed: an absent or empty value is an error, never a silently
    /// empty credential.
    pub fn resolve(&self, key_name: &str) -> Result<SecretString, PublishError> {
        match self.secrets.get(key_name) {
            Some(secret) if !secret.expose_secret().is_empty() => {
                Ok(SecretString::new(secret.expose_secret().into()))
            }
            _ => Err(PublishError::SecretMissing {
                key_name: key_name.to_string(),
            }),
        }
    }

    /// Check whether a non-empty credential exists under the given name
    pub fn has_secret(&self, key_name: &str) -> bool {
        self.resolve(key_name).is_ok()
    }

    /// Mask a secret value for safe display.
    ///
    /// Shows only the first 3 and last 3 characters for identification.
    /// Values shorter than 10 characters are fully masked as "****".
    ///
    /// # Examples
    ///
    /// ```
    /// use broadcast_publisher::security::SecretStore;
    ///
    /// assert_eq!(SecretStore::mask_secret("abcdef123456"), "abc...456");
    /// assert_eq!(SecretStore::mask_secret("short"), "****");
    /// ```
    pub fn mask_secret(secret: &str) -> String {
        if secret.is_empty() || secret.len() < 10 {
            return "****".to_string();
        }

        let prefix = &secret[..3];
        let suffix = &secret[secret.len() - 3..];
        format!("{}...{}", prefix, suffix)
    }
}

/// Replace every occurrence of the credential in a string with the fixed
/// placeholder.
///
/// Applied to transport diagnostics before they reach the audit logger, so
/// library error messages that embed the connection target cannot leak the
/// credential.
pub fn redact_credential(text: &str, credential: &SecretString) -> String {
    let literal = credential.expose_secret();
    if literal.is_empty() {
        return text.to_string();
    }

    match Regex::new(&regex::escape(literal)) {
        Ok(re) => re.replace_all(text, CREDENTIAL_PLACEHOLDER).to_string(),
        Err(_) => text.to_string(),
    }
}
