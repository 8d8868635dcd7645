//! Error taxonomy for the odds pipeline.
//!
//! Query signals (no games on a date, malformed date) are not errors and
//! live in [`crate::BestOdds`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OddsError {
    #[error("odds request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("odds provider returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("malformed odds payload: {0}")]
    Payload(#[source] serde_json::Error),

    #[error("event {index}: {reason}")]
    Parse { index: usize, reason: String },

    #[error("data integrity violated: {0}")]
    DataIntegrity(String),

    #[error("unknown bookmaker: {0}")]
    UnknownBookmaker(String),
}

impl OddsError {
    /// True for failures that originate at the odds provider rather than in
    /// the pipeline itself.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            OddsError::Request(_) | OddsError::UpstreamStatus { .. } | OddsError::Payload(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, OddsError>;
