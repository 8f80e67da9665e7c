// Copyright (c) 2025 - Cowboy AI, Inc.
//! Catch Lifecycle State Machine
//!
//! FSM for a Pokemon's catch status, derived from its catch history.
//!
//! # States
//!
//! - Wild: no throw recorded since hatching (initial)
//! - Escaped: every recorded throw failed
//! - Caught: a throw succeeded (terminal for throws)
//!
//! # Inputs
//!
//! - Throw { success }: Wild/Escaped → Caught or Escaped
//! - Hatch: any → Wild (a hatch replaces the whole Pokemon, history included)

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{StateMachine, TransitionError, TransitionResult};

/// Catch status of one Pokemon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatchStatus {
    /// No throw recorded
    Wild,

    /// At least one throw recorded, none successful
    Escaped,

    /// A throw succeeded
    Caught,
}

impl fmt::Display for CatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatchStatus::Wild => write!(f, "wild"),
            CatchStatus::Escaped => write!(f, "escaped"),
            CatchStatus::Caught => write!(f, "caught"),
        }
    }
}

/// Lifecycle input (FSM input)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatchInput {
    /// A pokeball throw with its drawn outcome
    Throw { success: bool },

    /// The Pokemon was (re)hatched
    Hatch,
}

impl StateMachine for CatchStatus {
    type Input = CatchInput;
    type Output = ();

    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)> {
        use CatchInput::*;
        use CatchStatus::*;

        match (self, input) {
            (_, Hatch) => Ok((Wild, ())),
            (Caught, Throw { .. }) => Err(TransitionError::Terminal(self.to_string())),
            (Wild | Escaped, Throw { success: true }) => Ok((Caught, ())),
            (Wild | Escaped, Throw { success: false }) => Ok((Escaped, ())),
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, CatchStatus::Caught)
    }

    fn valid_inputs(&self) -> Vec<Self::Input> {
        use CatchInput::*;

        match self {
            CatchStatus::Caught => vec![Hatch],
            CatchStatus::Wild | CatchStatus::Escaped => vec![
                Throw { success: true },
                Throw { success: false },
                Hatch,
            ],
        }
    }
}

impl CatchStatus {
    /// Replay a sequence of throw outcomes from `Wild`
    ///
    /// Throws recorded after the Pokemon was caught (possible only when a
    /// hatch payload carries such a history) leave the status `Caught`.
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = bool>) -> Self {
        outcomes.into_iter().fold(CatchStatus::Wild, |status, success| {
            status
                .transition(&CatchInput::Throw { success })
                .map(|(next, ())| next)
                .unwrap_or(status)
        })
    }
}
