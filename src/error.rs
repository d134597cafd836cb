//! Unified error type.

use std::fmt;

/// The error type returned by [`Server::run`](crate::Server::run).
///
/// Application-level errors (a missing user, a bad payload) are HTTP
/// [`Response`](crate::Response) values the handler produces, never `Error`s.
/// The only thing this layer can fail at is the listener itself.
#[derive(Debug)]
pub struct Error(std::io::Error);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener: {}", self.0)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self(e)
    }
}
