//! Orchestration layer for audio publishing
//!
//! This module provides the top-level pipeline orchestrator and the durable
//! audit log it reports into.

pub mod audit;
pub mod publisher;

// Re-export main types for convenience
pub use audit::{AuditLog, AuditLogEntry, AuditQueryOptions, LogType, PIPELINE_MODULE};
pub use publisher::AudioPublisher;
