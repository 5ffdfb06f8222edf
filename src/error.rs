//! NNTP error types

use thiserror::Error;

/// Errors raised while serving an NNTP session
///
/// Only [`NntpError::Io`] ends a session.
/// Every other variant is raised after the matching status line has already
/// been written, so the command loop logs it and keeps reading.
#[derive(Error, Debug)]
pub enum NntpError {
    /// IO error during network operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No such newsgroup
    #[error("No such newsgroup: {0}")]
    NoSuchGroup(String),

    /// No newsgroup selected
    #[error("No newsgroup selected")]
    NoGroupSelected,

    /// No article with that number in the selected group
    #[error("No such article: {0}")]
    NoSuchArticle(u64),

    /// Argument is not a valid article number or range
    #[error("Invalid article number: {0}")]
    InvalidArticleNumber(String),

    /// Command was sent without its required argument
    #[error("Missing argument for {0}")]
    MissingArgument(&'static str),
}

impl NntpError {
    /// Whether the error is fatal to the session that raised it
    pub fn is_transport(&self) -> bool {
        matches!(self, NntpError::Io(_))
    }
}

/// Result type alias using NntpError
pub type Result<T> = std::result::Result<T, NntpError>;
