use thiserror::Error;

/// Failures the run loop needs to tell apart.
///
/// Only `MissingDate` is recoverable: the essay is skipped and the run
/// continues. The rest abort the run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EssayError {
    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("no content region matching {rule} in {url}")]
    MissingContent { url: String, rule: String },

    #[error("could not find a date for '{title}'")]
    MissingDate { title: String },
}

impl EssayError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EssayError::MissingDate { .. })
    }
}
