use thiserror::Error;

/// Errors surfaced by the client library.
///
/// Daemon statuses returned by [`crate::session::SearchSession::run_queries`]
/// are deliberately NOT converted into this type; batch callers inspect each
/// result set's status themselves.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The transport could not reach the daemon at the configured address.
    #[error("failed to connect to searchd at {0}")]
    Connection(String),

    /// A malformed mode or argument was passed to a setter.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The daemon returned a non-OK status for a `search` call.
    #[error("searching index \"{index}\" for \"{query}\" failed with error \"{message}\"")]
    Search {
        index: String,
        query: String,
        message: String,
    },

    /// Transport-level I/O failure while a query or batch was in flight.
    #[error("transport error: {0}")]
    Transport(String),
}
