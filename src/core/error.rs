//! Error handling for the audio publishing pipeline
//!
//! This module provides comprehensive error types with recovery guidance
//! using the thiserror crate for ergonomic error handling.

use thiserror::Error;

/// Remediation hints returned to the caller on every failed invocation.
///
/// The list is the same for every failure kind; the hints are advisory,
/// not diagnostic.
const TROUBLESHOOTING_HINTS: &[&str] = &[
    "ホスト名が正しいか確認してください",
    "シークレットストアのパスワード値を確認してください",
    "リモートフォルダの書き込み権限を確認してください",
    "ポート番号を確認してください（FTP: 21 / SFTP: 22）",
    "ローカルテストサーバーが起動しているか確認してください",
];

/// Main error type for audio publishing operations
#[derive(Error, Debug)]
pub enum PublishError {
    // Authorization errors
    #[error("このロールには公開権限がありません: {role}")]
    Unauthorized { role: String },

    // Validation errors
    #[error("必須フィールドが不足しています: {field}")]
    MissingField { field: String },

    // Configuration errors
    #[error("FTPアップロードが無効または未設定です")]
    FtpNotConfigured,

    #[error("設定ファイルの読み込みに失敗しました: {message}")]
    ConfigLoadFailed { message: String },

    // Secret errors
    #[error("シークレット '{key_name}' が見つかりません")]
    SecretMissing { key_name: String },

    // Decoding errors
    #[error("音声ペイロードのデコードに失敗しました: {message}")]
    DecodeFailed { message: String },

    // Transport errors
    #[error("アップロードが拒否されました: {status} {status_text}")]
    UploadRejected { status: u16, status_text: String },

    #[error("アップロード接続エラー: {message}")]
    UploadConnection { message: String },

    // Anything that escaped the expected failure modes above
    #[error("予期しないエラーが発生しました: {message}")]
    Unhandled { message: String },
}

impl PublishError {
    /// Get the pipeline stage this error belongs to
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "auth",
            Self::MissingField { .. } => "validation",
            Self::FtpNotConfigured | Self::ConfigLoadFailed { .. } => "config",
            Self::SecretMissing { .. } => "secret",
            Self::DecodeFailed { .. } => "decode",
            Self::UploadRejected { .. } | Self::UploadConnection { .. } => "upload",
            Self::Unhandled { .. } => "unhandled",
        }
    }

    /// Get error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::MissingField { .. } => "MISSING_FIELDS",
            Self::FtpNotConfigured => "FTP_NOT_CONFIGURED",
            Self::ConfigLoadFailed { .. } => "CONFIG_LOAD_FAILED",
            Self::SecretMissing { .. } => "SECRET_MISSING",
            Self::DecodeFailed { .. } => "DECODING_ERROR",
            Self::UploadRejected { .. } | Self::UploadConnection { .. } => "TRANSPORT_ERROR",
            Self::Unhandled { .. } => "UNHANDLED_ERROR",
        }
    }

    /// Protocol status code, when the remote server produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UploadRejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if re-invoking the pipeline might succeed without operator action
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UploadRejected { .. } | Self::UploadConnection { .. } | Self::Unhandled { .. }
        )
    }

    /// Get suggested remediation hints for this error
    pub fn troubleshooting(&self) -> Vec<&'static str> {
        TROUBLESHOOTING_HINTS.to_vec()
    }
}
