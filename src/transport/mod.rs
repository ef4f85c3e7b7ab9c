//! Transport layer for publishing audio to the broadcast server
//!
//! This module provides the file-transfer upload client and the public URL
//! heuristic for uploaded assets.

use async_trait::async_trait;
use secrecy::SecretString;

pub mod ftp_client;
pub mod public_url;

pub use ftp_client::{
    DEFAULT_FTP_PORT, DEFAULT_SFTP_PORT, FtpTransportClient, TransportError, UPLOAD_TIMEOUT,
    UploadEndpoint,
};
pub use public_url::resolve_public_url;

/// Seam between the orchestrator and the wire-level upload client
///
/// Implementations perform one binary write of the full audio buffer to the
/// remote path described by the endpoint. No retries happen at this layer.
#[async_trait]
pub trait TransportClient: Send + Sync {
    /// Upload the audio buffer to the remote path
    async fn upload(
        &self,
        audio: &[u8],
        endpoint: &UploadEndpoint,
        credential: &SecretString,
    ) -> Result<(), TransportError>;
}
