// Copyright 2025 Cowboy AI, LLC.

//! State machine primitives for externally driven lifecycles
//!
//! Job statuses are reported by the pipeline runner rather than computed
//! here, so the machine records transitions instead of guarding them.
//! Every applied status report produces a [`StateTransition`] that callers
//! can log or inspect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for types that can be used as states in a state machine
pub trait State: Debug + Clone + PartialEq + Eq + Send + Sync {
    /// Get the name of this state for logging/debugging
    fn name(&self) -> &'static str;

    /// Check if this is a terminal state
    fn is_terminal(&self) -> bool {
        false
    }
}

/// Record of a state transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransition<S> {
    /// The state before the transition
    pub from: S,
    /// The state after the transition
    pub to: S,
    /// When the transition was reported
    pub timestamp: DateTime<Utc>,
}

impl<S: State> StateTransition<S> {
    /// Record a transition reported at `timestamp`
    pub fn new(from: S, to: S, timestamp: DateTime<Utc>) -> Self {
        Self { from, to, timestamp }
    }

    /// True when the reported state equals the previous one
    pub fn is_repeat(&self) -> bool {
        self.from == self.to
    }

    /// True when the transition leaves a terminal state
    ///
    /// The runner is allowed to do this (e.g. a retried publish), it is only
    /// worth a log line.
    pub fn reopens_terminal(&self) -> bool {
        self.from.is_terminal() && !self.is_repeat()
    }
}
