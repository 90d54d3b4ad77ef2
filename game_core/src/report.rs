//! End-of-match reporting seam.
//!
//! The navigation shell injects both collaborators at match
//! construction; the core never reaches into ambient global state to
//! find them. Submission is fire-and-forget: a failed report is logged
//! and dropped, it never re-enters the match state machine.

use thiserror::Error;

use crate::config::GameKind;

/// Final score tuple handed to the results collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub game_type: GameKind,
    /// (display name, final score) per participant, slot order
    pub scores: Vec<(String, u8)>,
    pub winner: String,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("result endpoint rejected the submission: {0}")]
    Rejected(String),
    #[error("transport failure: {0}")]
    Transport(String),
}

/// "Is my session still valid" check that gates result submission
pub trait SessionValidator {
    fn session_is_valid(&self) -> bool;
}

/// Outbound match-result collaborator (POST-shaped, bearer-authorized;
/// the transport lives outside the core)
pub trait ResultsReporter {
    fn submit(&self, outcome: &MatchOutcome) -> Result<(), ReportError>;
}

/// Validator for contexts with no session concept (local play, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysValid;

impl SessionValidator for AlwaysValid {
    fn session_is_valid(&self) -> bool {
        true
    }
}
