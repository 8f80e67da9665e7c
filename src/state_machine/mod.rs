// Copyright (c) 2025 - Cowboy AI, Inc.
//! Finite State Machine Abstractions
//!
//! Generic state machine trait for modeling domain lifecycles. Transitions
//! are deterministic functions with no side effects.
//!
//! # Mealy Machine
//!
//! Output depends on both current state and input:
//! ```text
//! (State, Input) → (State, Output)
//! ```
//!
//! # Example
//!
//! ```rust
//! use pokemon_aggregate::state_machine::{CatchInput, CatchStatus, StateMachine};
//!
//! let (status, _) = CatchStatus::Wild
//!     .transition(&CatchInput::Throw { success: false })
//!     .unwrap();
//! assert_eq!(status, CatchStatus::Escaped);
//!
//! let (status, _) = status.transition(&CatchInput::Throw { success: true }).unwrap();
//! assert!(status.is_terminal());
//! ```

pub mod catch_lifecycle;

pub use catch_lifecycle::{CatchInput, CatchStatus};

/// Result of a state transition
pub type TransitionResult<S> = Result<S, TransitionError>;

/// Errors that can occur during state transitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// Current state accepts no further input of this kind
    #[error("State {0} is terminal")]
    Terminal(String),
}

/// Trait for finite state machines
///
/// Implement this trait to define a state machine with typed states,
/// inputs, and outputs.
pub trait StateMachine: Sized + Clone {
    /// Input type that triggers transitions
    type Input;

    /// Output type produced by transitions (use () if none)
    type Output;

    /// Attempt to transition to a new state given an input
    ///
    /// # Returns
    /// - Ok((new_state, output)) if transition is valid
    /// - Err(TransitionError) if transition is invalid
    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)>;

    /// Check if a transition is valid without performing it
    fn can_transition(&self, input: &Self::Input) -> bool {
        self.transition(input).is_ok()
    }

    /// Whether the machine has reached a state it never leaves on its own
    fn is_terminal(&self) -> bool {
        false
    }

    /// Get all valid inputs from current state (if enumerable)
    fn valid_inputs(&self) -> Vec<Self::Input>
    where
        Self::Input: Clone,
    {
        Vec::new()
    }
}
