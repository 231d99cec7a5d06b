//! Contract for the protocol driver that carries queries to the daemon.
//!
//! The binary frame layout (pack/unpack over TCP or a Unix domain socket)
//! belongs to the driver behind [`Transport`]; this crate only builds requests
//! and normalizes responses on top of it. Implementations carry the
//! [`SessionState`](crate::types::SessionState) bundle between calls: the
//! setter methods mutate it and `query`/`add_query` read whatever is active
//! at that moment.

use std::fmt;
use std::path::PathBuf;

use crate::error::ClientError;
use crate::types::{MatchMode, RawQueryResult, ResultSet, SortMode};

/// Where the daemon listens. A configured Unix socket path takes precedence
/// over host/port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerAddr {
    Tcp { host: String, port: u16 },
    Unix(PathBuf),
}

impl ServerAddr {
    pub fn from_parts(host: impl Into<String>, port: u16, socket_path: Option<PathBuf>) -> Self {
        match socket_path {
            Some(path) => Self::Unix(path),
            None => Self::Tcp {
                host: host.into(),
                port,
            },
        }
    }
}

impl fmt::Display for ServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp { host, port } => write!(f, "{host}:{port}"),
            Self::Unix(path) => write!(f, "unix://{}", path.display()),
        }
    }
}

/// Characters the daemon's query parser treats as operators.
const SPECIAL_CHARS: &[char] = &[
    '\\', '(', ')', '|', '-', '!', '@', '~', '"', '&', '/', '^', '$', '=', '<',
];

/// Escape daemon query syntax in `raw` so it is matched literally.
///
/// This is the canonical escaping rule; driver implementations may delegate
/// their [`Transport::escape`] to it.
pub fn escape_query(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if SPECIAL_CHARS.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Low-level protocol driver the session talks through.
///
/// Setter calls are cheap local mutations of the driver's pending search
/// state; only `query` and `run_queries` perform network round trips. The
/// driver owns the pending multi-query batch and clears it once
/// `run_queries` returns.
pub trait Transport {
    /// Establish the connection. Returns `ClientError::Connection` when the
    /// daemon is unreachable.
    fn connect(&mut self, addr: &ServerAddr) -> Result<(), ClientError>;

    /// Apply the daemon's escaping rules to a raw query string.
    fn escape(&self, raw: &str) -> String {
        escape_query(raw)
    }

    fn set_match_mode(&mut self, mode: MatchMode);

    fn set_sort_mode(&mut self, mode: SortMode, sort_by: &str);

    fn set_filter(&mut self, attribute: &str, values: &[i64], exclude: bool);

    fn reset_filters(&mut self);

    fn set_limits(&mut self, offset: u32, limit: u32, max_matches: u32);

    fn set_field_weights(&mut self, weights: &[(String, i32)]);

    /// Execute one query against the space-joined index names, blocking until
    /// the daemon responds.
    fn query(&mut self, text: &str, index_names: &str) -> Result<RawQueryResult, ClientError>;

    /// Stage a query plus the currently active search state into the pending
    /// batch. No network I/O.
    fn add_query(&mut self, text: &str, index_names: &str);

    /// Execute every staged query in one round trip, in submission order.
    /// The staged batch is cleared whether or not the call succeeds.
    fn run_queries(&mut self) -> Result<Vec<ResultSet>, ClientError>;

    /// Most recent daemon-reported error message, empty when none.
    fn last_error(&self) -> String;
}
