//! State machine for tracking one audio publish invocation
//!
//! Each invocation is stateless and independent, so the machine is purely
//! in-memory; the timestamped transition history is surfaced in the audit
//! log details for diagnostics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pipeline invocation state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineState {
    Received,
    Authorized,
    Validated,
    ConfigLoaded,
    CredentialResolved,
    Decoded,
    Uploaded,
    Published,
    Failed,
}

impl PipelineState {
    /// Terminal states end the invocation
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Published | PipelineState::Failed)
    }
}

/// State transition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateTransition {
    /// From state
    pub from: PipelineState,

    /// To state
    pub to: PipelineState,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

/// State machine for tracking one publish invocation
#[derive(Debug, Clone)]
pub struct PipelineStateMachine {
    current_state: PipelineState,
    transitions: Vec<StateTransition>,
}

impl Default for PipelineStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStateMachine {
    /// Create a new state machine in the `Received` state
    pub fn new() -> Self {
        Self {
            current_state: PipelineState::Received,
            transitions: Vec::new(),
        }
    }

    /// Transition to a new state
    pub fn transition(&mut self, to: PipelineState) {
        self.transitions.push(StateTransition {
            from: self.current_state,
            to,
            timestamp: Utc::now(),
        });
        self.current_state = to;
    }

    /// Transition into the terminal `Failed` state
    pub fn fail(&mut self) {
        self.transition(PipelineState::Failed);
    }

    /// Get current state
    pub fn current(&self) -> PipelineState {
        self.current_state
    }

    /// Get transition history as human-readable entries
    pub fn history(&self) -> Vec<String> {
        self.transitions
            .iter()
            .map(|t| format!("{:?} → {:?}", t.from, t.to))
            .collect()
    }

    /// Get elapsed time between the first and last transition, in milliseconds
    pub fn elapsed_ms(&self) -> i64 {
        match (self.transitions.first(), self.transitions.last()) {
            (Some(first), Some(last)) => {
                (last.timestamp - first.timestamp).num_milliseconds()
            }
            _ => 0,
        }
    }
}
