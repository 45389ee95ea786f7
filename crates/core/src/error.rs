//! Unified error types for lantern.

use tokio_rusqlite::rusqlite;

/// Unified error types for the offline cache router.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty URL).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Database operation failed.
    #[error("CACHE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("CACHE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// Invalid URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// Network-level fetch failure.
    #[error("NETWORK_ERROR: {0}")]
    Network(String),

    /// Install-time cache population failed; nothing was written.
    #[error("INSTALL_FAILED: {0}")]
    InstallFailed(String),

    /// Request exhausted every fallback a strategy defines.
    #[error("ROUTE_EXHAUSTED: {0}")]
    RouteExhausted(String),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InstallFailed("/app.js: status 500".to_string());
        assert!(err.to_string().contains("INSTALL_FAILED"));
        assert!(err.to_string().contains("/app.js"));
    }

    #[test]
    fn test_network_error_display() {
        let err = Error::Network("connection refused".to_string());
        assert!(err.to_string().starts_with("NETWORK_ERROR"));
    }
}
