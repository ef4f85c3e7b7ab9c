//! Audit log - durable record of every pipeline outcome
//!
//! Features:
//! - Append-only, structured, leveled event records
//! - Best-effort persistence: a logging failure never reaches the caller
//! - Filter and query records for the CLI `logs` command
//!
//! Entries are stored as JSON lines so concurrent invocations can append
//! without clobbering each other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Module name recorded by the audio publishing pipeline
pub const PIPELINE_MODULE: &str = "audio_publisher";

/// Data directory and log file name
const AUDIT_DIR: &str = ".broadcast-publisher";
const AUDIT_FILENAME: &str = "audit-log.jsonl";

/// Event severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    Info,
    Success,
    Warning,
    Error,
    Critical,
}

impl LogType {
    /// Get string representation of the severity
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::Info => "info",
            LogType::Success => "success",
            LogType::Warning => "warning",
            LogType::Error => "error",
            LogType::Critical => "critical",
        }
    }
}

/// One durable audit record; created once, never mutated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: String,
    pub log_type: LogType,
    pub module: String,
    pub message: String,
    #[serde(default)]
    pub details: HashMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntry {
    /// Create a new entry
    pub fn new(log_type: LogType, module: &str, message: impl Into<String>) -> Self {
        Self {
            id: format!("{}-{}", Utc::now().timestamp_millis(), uuid::Uuid::new_v4()),
            log_type,
            module: module.to_string(),
            message: message.into(),
            details: HashMap::new(),
            stack_trace: None,
            created_at: Utc::now(),
        }
    }

    /// Attach a structured detail value
    pub fn with_detail(mut self, key: &str, value: Value) -> Self {
        self.details.insert(key.to_string(), value);
        self
    }

    /// Attach a stack trace for advisory debugging
    pub fn with_stack_trace(mut self, trace: impl Into<String>) -> Self {
        self.stack_trace = Some(trace.into());
        self
    }
}

/// Options for filtering audit records
#[derive(Debug, Clone, Default)]
pub struct AuditQueryOptions {
    pub log_type: Option<LogType>,
    pub module: Option<String>,
    pub errors_only: bool,
    pub limit: Option<usize>,
}

/// Append-only audit log store
#[derive(Debug, Clone)]
pub struct AuditLog {
    log_path: PathBuf,
}

impl AuditLog {
    /// Create an audit log rooted in the given project directory
    pub fn new<P: Into<PathBuf>>(project_path: P) -> Self {
        let log_path = project_path.into().join(AUDIT_DIR).join(AUDIT_FILENAME);

        Self { log_path }
    }

    /// Path of the underlying log file
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Append an entry, best-effort.
    ///
    /// A persistence failure is reported on stderr only; it never changes
    /// the pipeline response or reaches the caller.
    pub async fn record(&self, entry: AuditLogEntry) {
        if let Err(e) = self.try_record(&entry).await {
            eprintln!("⚠️  Failed to record audit entry: {}", e);
        }
    }

    async fn try_record(&self, entry: &AuditLogEntry) -> anyhow::Result<()> {
        if let Some(dir) = self.log_path.parent() {
            fs::create_dir_all(dir).await?;
        }

        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    /// Load all persisted entries.
    ///
    /// Unparseable lines are skipped; a partially written trailing line must
    /// not make the whole history unreadable.
    pub async fn load(&self) -> anyhow::Result<Vec<AuditLogEntry>> {
        if fs::metadata(&self.log_path).await.is_err() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.log_path).await?;
        let entries = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect();

        Ok(entries)
    }

    /// Filter and sort records, most recent first
    pub fn filter(entries: &[AuditLogEntry], options: &AuditQueryOptions) -> Vec<AuditLogEntry> {
        let mut filtered: Vec<_> = entries
            .iter()
            .filter(|e| {
                if let Some(log_type) = options.log_type
                    && e.log_type != log_type
                {
                    return false;
                }

                if let Some(ref module) = options.module
                    && &e.module != module
                {
                    return false;
                }

                if options.errors_only
                    && !matches!(e.log_type, LogType::Error | LogType::Critical)
                {
                    return false;
                }

                true
            })
            .cloned()
            .collect();

        filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        if let Some(limit) = options.limit {
            filtered.truncate(limit);
        }

        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_record_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let audit = AuditLog::new(temp_dir.path());

        let entry = AuditLogEntry::new(LogType::Success, PIPELINE_MODULE, "audio published")
            .with_detail("filename", json!("seg1.mp3"))
            .with_detail("size_bytes", json!(2048));
        audit.record(entry).await;

        let loaded = audit.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].log_type, LogType::Success);
        assert_eq!(loaded[0].module, PIPELINE_MODULE);
        assert_eq!(loaded[0].details["filename"], json!("seg1.mp3"));
        assert!(loaded[0].stack_trace.is_none());
    }

    #[tokio::test]
    async fn test_entries_append_without_rewriting() {
        let temp_dir = TempDir::new().unwrap();
        let audit = AuditLog::new(temp_dir.path());

        audit
            .record(AuditLogEntry::new(LogType::Error, PIPELINE_MODULE, "first"))
            .await;
        audit
            .record(AuditLogEntry::new(LogType::Success, PIPELINE_MODULE, "second"))
            .await;

        let loaded = audit.load().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].message, "first");
        assert_eq!(loaded[1].message, "second");
    }

    #[tokio::test]
    async fn test_record_is_best_effort() {
        let temp_dir = TempDir::new().unwrap();

        // Occupy the data directory path with a plain file so the append
        // cannot succeed
        std::fs::write(temp_dir.path().join(AUDIT_DIR), b"not a directory").unwrap();

        let audit = AuditLog::new(temp_dir.path());
        audit
            .record(AuditLogEntry::new(LogType::Error, PIPELINE_MODULE, "lost"))
            .await;

        // Nothing persisted, nothing propagated
        assert!(audit.load().await.is_err() || audit.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_skips_malformed_lines() {
        let temp_dir = TempDir::new().unwrap();
        let audit = AuditLog::new(temp_dir.path());

        audit
            .record(AuditLogEntry::new(LogType::Info, PIPELINE_MODULE, "kept"))
            .await;

        // Simulate a partially written trailing line
        use std::io::Write;
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(audit.log_path())
            .unwrap();
        write!(file, "{{\"id\": \"trunc").unwrap();

        let loaded = audit.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].message, "kept");
    }

    #[tokio::test]
    async fn test_load_empty_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let audit = AuditLog::new(temp_dir.path());

        assert!(audit.load().await.unwrap().is_empty());
    }

    #[test]
    fn test_filter_by_severity_and_limit() {
        let mut entries = Vec::new();
        for i in 0..4 {
            let log_type = if i % 2 == 0 {
                LogType::Error
            } else {
                LogType::Success
            };
            entries.push(AuditLogEntry::new(
                log_type,
                PIPELINE_MODULE,
                format!("entry {}", i),
            ));
        }
        entries.push(AuditLogEntry::new(LogType::Critical, "other_module", "crash"));

        let errors = AuditLog::filter(
            &entries,
            &AuditQueryOptions {
                errors_only: true,
                ..Default::default()
            },
        );
        assert_eq!(errors.len(), 3);

        let limited = AuditLog::filter(
            &entries,
            &AuditQueryOptions {
                limit: Some(2),
                ..Default::default()
            },
        );
        assert_eq!(limited.len(), 2);

        let by_module = AuditLog::filter(
            &entries,
            &AuditQueryOptions {
                module: Some("other_module".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(by_module.len(), 1);
        assert_eq!(by_module[0].log_type, LogType::Critical);
    }

    #[test]
    fn test_log_type_serialization() {
        let json = serde_json::to_string(&LogType::Critical).unwrap();
        assert_eq!(json, r#""critical""#);
        assert_eq!(LogType::Critical.as_str(), "critical");
    }
}
