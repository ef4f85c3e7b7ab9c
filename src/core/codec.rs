//! Binary codec for transport-encoded audio payloads
//!
//! The upstream speech synthesis stage hands audio over as standard base64
//! text; only decoding is part of the pipeline surface.

use crate::core::error::PublishError;
use base64::{Engine as _, engine::general_purpose};

/// Decode a text-encoded audio payload into its raw byte buffer.
///
/// Malformed input is rejected with the underlying cause; the decoder never
/// produces truncated or corrupted bytes.
pub fn decode_audio_payload(payload: &str) -> Result<Vec<u8>, PublishError> {
    general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| PublishError::DecodeFailed {
            message: e.to_string(),
        })
}
