//! Local results collaborator. There is no backend in a terminal
//! session, so the submission is assembled exactly as it would go over
//! the wire and then logged instead of POSTed.

use game_core::{MatchOutcome, ReportError, ResultsReporter};
use match_report::{PlayerScore, ResultSubmission, SubmissionRequest};
use tracing::info;

pub struct LoggingReporter {
    token: String,
}

impl LoggingReporter {
    pub fn from_env() -> Self {
        Self {
            token: std::env::var("PONG_SESSION_TOKEN").unwrap_or_else(|_| "local".to_string()),
        }
    }
}

impl ResultsReporter for LoggingReporter {
    fn submit(&self, outcome: &MatchOutcome) -> Result<(), ReportError> {
        let scores = outcome
            .scores
            .iter()
            .map(|(name, score)| PlayerScore {
                name: name.clone(),
                score: *score,
            })
            .collect();
        let payload =
            ResultSubmission::new(outcome.game_type.label(), scores, outcome.winner.clone())
                .map_err(|e| ReportError::Rejected(e.to_string()))?;
        let request = SubmissionRequest::new(self.token.clone(), &payload)
            .map_err(|e| ReportError::Rejected(e.to_string()))?;
        info!(path = request.path, body = %request.body, "match result");
        Ok(())
    }
}
