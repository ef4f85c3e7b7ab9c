//! Configuration file loader for broadcast-publisher
//!
//! This module provides configuration loading, validation, and sample-file
//! generation for the CLI.

use crate::core::config::BroadcastConfig;
use crate::core::error::PublishError;
use lazy_static::lazy_static;
use regex::Regex;
use std::env;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Configuration file names, in lookup order
const CONFIG_FILENAME_TOML: &str = "broadcast.toml";
const CONFIG_FILENAME_JSON: &str = "broadcast.json";

/// Environment variable pattern (${VAR_NAME})
const ENV_VAR_PATTERN: &str = r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}";

lazy_static! {
    static ref ENV_VAR_RE: Regex = Regex::new(ENV_VAR_PATTERN).unwrap();
}

/// Configuration validation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationResult {
    /// Is configuration valid?
    pub valid: bool,

    /// Validation errors
    pub errors: Vec<ConfigValidationError>,

    /// Validation warnings
    pub warnings: Vec<ConfigValidationWarning>,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Field path (e.g., "ftp.host")
    pub field: String,

    /// Error message
    pub message: String,
}

/// Configuration validation warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationWarning {
    /// Field path
    pub field: String,

    /// Warning message
    pub message: String,
}

/// Configuration file loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the project configuration, if one exists.
    ///
    /// Looks for `broadcast.toml` first, then `broadcast.json`, inside the
    /// project directory. Returns `Ok(None)` when neither file is present;
    /// the pipeline then reports the feature as not configured.
    pub async fn load_project<P: AsRef<Path>>(
        project_path: P,
    ) -> Result<Option<BroadcastConfig>, PublishError> {
        for name in [CONFIG_FILENAME_TOML, CONFIG_FILENAME_JSON] {
            let candidate = project_path.as_ref().join(name);
            if fs::metadata(&candidate).await.is_ok() {
                return Ok(Some(Self::load_file(&candidate).await?));
            }
        }

        Ok(None)
    }

    /// Load a configuration file by explicit path.
    ///
    /// The format is chosen by extension (`.json` is JSON, anything else is
    /// TOML). `${VAR}` references in string fields are expanded from the
    /// process environment after parsing.
    pub async fn load_file(path: &Path) -> Result<BroadcastConfig, PublishError> {
        let content =
            fs::read_to_string(path)
                .await
                .map_err(|e| PublishError::ConfigLoadFailed {
                    message: format!("{}: {}", path.display(), e),
                })?;

        let config: BroadcastConfig = if path.extension().map(|e| e == "json").unwrap_or(false) {
            serde_json::from_str(&content).map_err(|e| PublishError::ConfigLoadFailed {
                message: e.to_string(),
            })?
        } else {
            toml::from_str(&content).map_err(|e| PublishError::ConfigLoadFailed {
                message: e.to_string(),
            })?
        };

        Ok(Self::expand_env(config))
    }

    /// Expand `${VAR}` references in all user-supplied string fields
    fn expand_env(mut config: BroadcastConfig) -> BroadcastConfig {
        if let Some(ftp) = config.ftp.as_mut() {
            ftp.host = Self::expand_str(&ftp.host);
            ftp.username = Self::expand_str(&ftp.username);
            ftp.remote_folder = Self::expand_str(&ftp.remote_folder);
            if let Some(key) = ftp.password_secret_key.as_ref() {
                ftp.password_secret_key = Some(Self::expand_str(key));
            }
        }

        config
    }

    /// Replace `${VAR}` with the variable's value; unset variables are left
    /// as-is so validation can point at them
    fn expand_str(value: &str) -> String {
        ENV_VAR_RE
            .replace_all(value, |caps: &regex::Captures| {
                env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
            })
            .to_string()
    }

    /// Validate a loaded configuration for the `check` command
    pub fn validate(config: &BroadcastConfig) -> ConfigValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        match &config.ftp {
            None => {
                warnings.push(ConfigValidationWarning {
                    field: "ftp".to_string(),
                    message: "FTP設定が定義されていません（アップロードは無効です）".to_string(),
                });
            }
            Some(ftp) => {
                if !ftp.enabled {
                    warnings.push(ConfigValidationWarning {
                        field: "ftp.enabled".to_string(),
                        message: "FTPアップロードが無効になっています".to_string(),
                    });
                }

                if ftp.host.trim().is_empty() {
                    errors.push(ConfigValidationError {
                        field: "ftp.host".to_string(),
                        message: "ホスト名が設定されていません".to_string(),
                    });
                }

                if ftp.username.trim().is_empty() {
                    errors.push(ConfigValidationError {
                        field: "ftp.username".to_string(),
                        message: "ユーザー名が設定されていません".to_string(),
                    });
                }

                if ftp.remote_folder.trim().is_empty() {
                    errors.push(ConfigValidationError {
                        field: "ftp.remote_folder".to_string(),
                        message: "リモートフォルダが設定されていません".to_string(),
                    });
                } else if ftp.remote_folder.starts_with('/') || ftp.remote_folder.ends_with('/') {
                    warnings.push(ConfigValidationWarning {
                        field: "ftp.remote_folder".to_string(),
                        message: "スラッシュは正規化されません（例: \"dj\"）".to_string(),
                    });
                }

                if ftp.port == Some(0) {
                    errors.push(ConfigValidationError {
                        field: "ftp.port".to_string(),
                        message: "ポート番号が無効です".to_string(),
                    });
                }

                if ftp.password_secret_key.is_none() {
                    warnings.push(ConfigValidationWarning {
                        field: "ftp.password_secret_key".to_string(),
                        message: "未設定のためデフォルトのシークレット名を使用します".to_string(),
                    });
                }
            }
        }

        ConfigValidationResult {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Write a commented sample configuration for the `init` command
    pub async fn write_sample<P: AsRef<Path>>(
        project_path: P,
        force: bool,
    ) -> anyhow::Result<PathBuf> {
        let target = project_path.as_ref().join(CONFIG_FILENAME_TOML);

        if fs::metadata(&target).await.is_ok() && !force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                target.display()
            );
        }

        let sample = r#"# broadcast-publisher configuration

[ftp]
enabled = true
host = "cloud.radioboss.fm"
# port = 21
username = "${RADIO_FTP_USERNAME}"
# Name of the credential in the secret store
password_secret_key = "RADIO_FTP_PASSWORD"
remote_folder = "dj"
# One of: ftp, ftps, sftp
encryption = "ftp"
"#;

        fs::write(&target, sample).await?;
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{EncryptionMode, FtpConfig};
    use tempfile::TempDir;

    fn enabled_ftp() -> FtpConfig {
        FtpConfig {
            enabled: true,
            host: "cloud.radioboss.fm".to_string(),
            port: None,
            username: "station".to_string(),
            password_secret_key: Some("RADIO_FTP_PASSWORD".to_string()),
            remote_folder: "dj".to_string(),
            encryption: EncryptionMode::Ftp,
        }
    }

    #[tokio::test]
    async fn test_load_project_returns_none_without_config() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = ConfigLoader::load_project(temp_dir.path()).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_load_project_prefers_toml() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILENAME_TOML),
            "[ftp]\nenabled = true\nhost = \"a.example\"\nusername = \"u\"\nremote_folder = \"dj\"\n",
        )
        .unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILENAME_JSON),
            r#"{"ftp": {"enabled": false, "host": "b.example", "username": "u", "remote_folder": "dj"}}"#,
        )
        .unwrap();

        let loaded = ConfigLoader::load_project(temp_dir.path())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.ftp.unwrap().host, "a.example");
    }

    #[tokio::test]
    async fn test_load_file_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broadcast.json");
        std::fs::write(
            &path,
            r#"{"ftp": {"enabled": true, "host": "h", "username": "u", "remote_folder": "dj", "encryption": "sftp"}}"#,
        )
        .unwrap();

        let loaded = ConfigLoader::load_file(&path).await.unwrap();
        assert_eq!(loaded.ftp.unwrap().encryption, EncryptionMode::Sftp);
    }

    #[tokio::test]
    async fn test_load_file_rejects_malformed_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME_TOML);
        std::fs::write(&path, "[ftp\nenabled =").unwrap();

        let result = ConfigLoader::load_file(&path).await;
        assert!(matches!(
            result,
            Err(PublishError::ConfigLoadFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_env_var_expansion() {
        unsafe {
            env::set_var("BROADCAST_TEST_HOST", "expanded.example.com");
        }

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME_TOML);
        std::fs::write(
            &path,
            "[ftp]\nenabled = true\nhost = \"${BROADCAST_TEST_HOST}\"\nusername = \"u\"\nremote_folder = \"dj\"\n",
        )
        .unwrap();

        let loaded = ConfigLoader::load_file(&path).await.unwrap();
        assert_eq!(loaded.ftp.unwrap().host, "expanded.example.com");

        unsafe {
            env::remove_var("BROADCAST_TEST_HOST");
        }
    }

    #[test]
    fn test_unset_env_var_is_left_verbatim() {
        assert_eq!(
            ConfigLoader::expand_str("${BROADCAST_TEST_UNSET_VAR}"),
            "${BROADCAST_TEST_UNSET_VAR}"
        );
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        let config = BroadcastConfig {
            ftp: Some(enabled_ftp()),
        };

        let result = ConfigLoader::validate(&config);
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_validate_flags_missing_host() {
        let config = BroadcastConfig {
            ftp: Some(FtpConfig {
                host: String::new(),
                ..enabled_ftp()
            }),
        };

        let result = ConfigLoader::validate(&config);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.field == "ftp.host"));
    }

    #[test]
    fn test_validate_warns_on_trailing_slash() {
        let config = BroadcastConfig {
            ftp: Some(FtpConfig {
                remote_folder: "dj/".to_string(),
                ..enabled_ftp()
            }),
        };

        let result = ConfigLoader::validate(&config);
        assert!(result.valid);
        assert!(
            result
                .warnings
                .iter()
                .any(|w| w.field == "ftp.remote_folder")
        );
    }

    #[test]
    fn test_validate_warns_without_ftp_section() {
        let result = ConfigLoader::validate(&BroadcastConfig::default());
        assert!(result.valid);
        assert!(result.warnings.iter().any(|w| w.field == "ftp"));
    }

    #[tokio::test]
    async fn test_write_sample_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();

        let written = ConfigLoader::write_sample(temp_dir.path(), false)
            .await
            .unwrap();
        assert!(written.exists());

        // Second write without force fails, with force succeeds
        assert!(ConfigLoader::write_sample(temp_dir.path(), false)
            .await
            .is_err());
        assert!(ConfigLoader::write_sample(temp_dir.path(), true)
            .await
            .is_ok());

        // The sample parses back into a valid config
        let loaded = ConfigLoader::load_file(&written).await.unwrap();
        assert!(loaded.ftp_enabled());
    }
}
