//! Errors raised while reading files the services depend on.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure to read or accept a file-backed resource.
#[derive(Error, Debug)]
pub enum Error {
    /// The file parsed but its content is not acceptable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Any of the above, prefixed with what was being attempted
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Innermost error, past any context layers.
    pub fn root(&self) -> &Error {
        match self {
            Self::WithContext { source, .. } => source.root(),
            other => other,
        }
    }

    /// True when the underlying file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

/// `context` for any result whose error converts into [`Error`].
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }
}
