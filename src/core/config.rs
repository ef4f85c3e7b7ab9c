//! Configuration structures and types for broadcast-publisher
//!
//! This module provides type-safe configuration management with serde support.

use serde::{Deserialize, Serialize};

/// Root broadcast configuration object
///
/// One active record per deployment, owned by configuration administration.
/// The pipeline treats it as a read-only snapshot for the duration of one
/// invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct BroadcastConfig {
    /// File-transfer upload settings (optional; absent means uploads disabled)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ftp: Option<FtpConfig>,
}

impl BroadcastConfig {
    /// True when an upload may be attempted at all
    pub fn ftp_enabled(&self) -> bool {
        self.ftp.as_ref().map(|f| f.enabled).unwrap_or(false)
    }
}

/// File-transfer connection settings for the streaming provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FtpConfig {
    /// Enable uploads (default: false)
    #[serde(default)]
    pub enabled: bool,

    /// Remote server hostname
    pub host: String,

    /// Explicit port; overrides the protocol default when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Login username
    pub username: String,

    /// Name of the credential in the secret store
    /// (falls back to a well-known default name when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_secret_key: Option<String>,

    /// Remote folder the audio files are written into.
    /// No slash normalization is performed; supply a clean folder name.
    pub remote_folder: String,

    /// Transfer protocol variant (default: plain ftp)
    #[serde(default)]
    pub encryption: EncryptionMode,
}

/// Transfer protocol variant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EncryptionMode {
    #[default]
    Ftp,
    Ftps,
    Sftp,
}

impl EncryptionMode {
    /// Get string representation of the protocol variant
    pub fn as_str(&self) -> &'static str {
        match self {
            EncryptionMode::Ftp => "ftp",
            EncryptionMode::Ftps => "ftps",
            EncryptionMode::Sftp => "sftp",
        }
    }
}
