//! Wire format for outbound match-result submissions.
//!
//! This crate only shapes the payload and the request envelope; it has
//! no transport of its own. Whatever HTTP stack the embedding client
//! carries takes a [`SubmissionRequest`] and sends it verbatim.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const RESULTS_PATH: &str = "/api/game/results";

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("a result needs at least two participants, got {0}")]
    TooFewPlayers(usize),
    #[error("winner {0:?} is not among the participants")]
    UnknownWinner(String),
    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// One participant's line in the final score tuple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub name: String,
    pub score: u8,
}

/// JSON body POSTed to the results endpoint when a match ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSubmission {
    /// Variant label, e.g. "pong-1v1"
    pub game_type: String,
    /// Slot order, same as on the scoreboard
    pub scores: Vec<PlayerScore>,
    pub winner: String,
}

impl ResultSubmission {
    /// Validate and assemble a submission from raw score lines.
    pub fn new(
        game_type: impl Into<String>,
        scores: Vec<PlayerScore>,
        winner: impl Into<String>,
    ) -> Result<Self, PayloadError> {
        let winner = winner.into();
        if scores.len() < 2 {
            return Err(PayloadError::TooFewPlayers(scores.len()));
        }
        if !scores.iter().any(|s| s.name == winner) {
            return Err(PayloadError::UnknownWinner(winner));
        }
        Ok(Self {
            game_type: game_type.into(),
            scores,
            winner,
        })
    }

    pub fn to_json(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(body: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(body)?)
    }
}

/// A ready-to-send request: relative path, bearer token, JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub path: &'static str,
    pub bearer_token: String,
    pub body: String,
}

impl SubmissionRequest {
    pub fn new(token: impl Into<String>, payload: &ResultSubmission) -> Result<Self, PayloadError> {
        Ok(Self {
            path: RESULTS_PATH,
            bearer_token: token.into(),
            body: payload.to_json()?,
        })
    }

    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.bearer_token)
    }
}
