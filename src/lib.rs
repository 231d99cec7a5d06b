//! Client library for a searchd-style full-text search daemon.
//!
//! The crate sits on top of a low-level protocol driver (the [`Transport`]
//! trait): it maps caller-facing index labels to daemon index names, builds
//! single queries and multi-query batches against the driver's search state,
//! and normalizes responses — surfacing non-OK statuses as errors and
//! collapsing single-index results to a flat result set.
//!
//! ```no_run
//! use searchd_client::{IndexRegistry, SearchOptions, SearchSession, SessionConfig};
//! # fn demo<T: searchd_client::Transport>(driver: T) -> Result<(), searchd_client::ClientError> {
//! let config = SessionConfig::default()
//!     .with_indexes(IndexRegistry::new().with_index("Articles", "idx_articles"));
//! let mut session = SearchSession::connect(config, driver)?;
//!
//! let results = session.search(
//!     "rust daemon",
//!     &[("Articles", SearchOptions::new().paginate(0, 20))],
//! )?;
//! # let _ = results; Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod normalize;
pub mod registry;
pub mod session;
pub mod transport;
pub mod types;

pub use config::SessionConfig;
pub use error::ClientError;
pub use registry::IndexRegistry;
pub use session::{MAX_MATCHES, SearchSession};
pub use transport::{ServerAddr, Transport, escape_query};
pub use types::{
    Filter, Limits, Match, MatchMode, QueryStatus, RawQueryResult, ResultSet, SearchOptions,
    SearchResults, SessionState, SortMode, WordStats,
};
