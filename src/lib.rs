pub mod core;
pub mod orchestration;
pub mod security;
pub mod transport;

pub use crate::core::*;
pub use orchestration::{
    AudioPublisher, AuditLog, AuditLogEntry, AuditQueryOptions, LogType, PIPELINE_MODULE,
};
pub use security::{
    CREDENTIAL_PLACEHOLDER, DEFAULT_PASSWORD_SECRET_KEY, SecretStore, redact_credential,
};
pub use transport::{
    FtpTransportClient, TransportClient, TransportError, UploadEndpoint, resolve_public_url,
};
