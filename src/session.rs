//! Connected search session: per-query construction, multi-query batching
//! and response normalization over a [`Transport`].

use tracing::debug;

use crate::config::SessionConfig;
use crate::error::ClientError;
use crate::normalize::normalize;
use crate::registry::IndexRegistry;
use crate::transport::Transport;
use crate::types::{
    Filter, Limits, MatchMode, ResultSet, SearchOptions, SearchResults, SessionState, SortMode,
};

/// Fixed upper bound on matches the daemon keeps per paginated query.
pub const MAX_MATCHES: u32 = 20_000;

/// A connected client session for one search daemon.
///
/// The session owns the search state read by the next query: match mode,
/// sort mode, filters, limits and field weights. Setters mutate that state in
/// place and nothing resets it between `search` calls — filters in particular
/// persist until [`reset_filters`](Self::reset_filters). Every operation takes
/// `&mut self`, so a session is single-owner by construction; share one across
/// tasks only behind external synchronization.
#[derive(Debug)]
pub struct SearchSession<T: Transport> {
    transport: T,
    registry: IndexRegistry,
    state: SessionState,
}

impl<T: Transport> SearchSession<T> {
    /// Connect `transport` to the address in `config` and wrap it in a
    /// session using the config's index registry.
    pub fn connect(config: SessionConfig, mut transport: T) -> Result<Self, ClientError> {
        let addr = config.server_addr();
        transport.connect(&addr)?;
        debug!(addr = %addr, indexes = config.indexes.len(), "connected to searchd");
        Ok(Self {
            transport,
            registry: config.indexes,
            state: SessionState::default(),
        })
    }

    /// The search state the next query will run under.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The underlying driver, for inspection.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Escape daemon query syntax in `raw`. No session-state side effect.
    pub fn escape_string(&self, raw: &str) -> String {
        self.transport.escape(raw)
    }

    pub fn set_match_mode(&mut self, mode: MatchMode) {
        self.state.match_mode = mode;
        self.transport.set_match_mode(mode);
    }

    /// Set the sort mode for subsequent queries.
    ///
    /// Every mode except relevance sorts by an attribute or expression, so
    /// `sort_by` must be non-empty for those; the daemon would reject the
    /// query otherwise, and this surfaces the mistake at the setter instead.
    pub fn set_sort_mode(&mut self, mode: SortMode, sort_by: &str) -> Result<(), ClientError> {
        if mode.requires_sort_by() && sort_by.is_empty() {
            return Err(ClientError::InvalidArgument(format!(
                "sort mode {mode:?} requires a sort-by clause"
            )));
        }
        self.state.sort_mode = mode;
        self.state.sort_by = sort_by.to_string();
        self.transport.set_sort_mode(mode, sort_by);
        Ok(())
    }

    /// Add an attribute filter. Filters accumulate and persist across
    /// `search` calls until [`reset_filters`](Self::reset_filters).
    pub fn set_filter(
        &mut self,
        attribute: &str,
        values: &[i64],
        exclude: bool,
    ) -> Result<(), ClientError> {
        if values.is_empty() {
            return Err(ClientError::InvalidArgument(format!(
                "filter on \"{attribute}\" has no values"
            )));
        }
        self.state.filters.push(Filter {
            attribute: attribute.to_string(),
            values: values.to_vec(),
            exclude,
        });
        self.transport.set_filter(attribute, values, exclude);
        Ok(())
    }

    /// Clear every previously set filter.
    pub fn reset_filters(&mut self) {
        self.state.filters.clear();
        self.transport.reset_filters();
    }

    /// Search the given labeled indexes, escaping the query first.
    ///
    /// See [`search_unescaped`](Self::search_unescaped) to pass raw daemon
    /// query syntax through untouched.
    pub fn search(
        &mut self,
        query: &str,
        indexes: &[(&str, SearchOptions)],
    ) -> Result<SearchResults, ClientError> {
        self.search_inner(query, indexes, true)
    }

    /// Search without escaping the query string.
    pub fn search_unescaped(
        &mut self,
        query: &str,
        indexes: &[(&str, SearchOptions)],
    ) -> Result<SearchResults, ClientError> {
        self.search_inner(query, indexes, false)
    }

    fn search_inner(
        &mut self,
        query: &str,
        indexes: &[(&str, SearchOptions)],
        escape: bool,
    ) -> Result<SearchResults, ClientError> {
        let text = if escape {
            self.transport.escape(query)
        } else {
            query.to_string()
        };

        let mut names = String::new();
        for (label, options) in indexes {
            let Some(resolved) = self.registry.resolve(label) else {
                debug!(label = %label, "unknown index label, skipping");
                continue;
            };

            // Pagination applies only when offset and limit arrive together.
            if let (Some(offset), Some(limit)) = (options.result_offset, options.result_limit) {
                self.state.limits = Some(Limits {
                    offset,
                    limit,
                    max_matches: MAX_MATCHES,
                });
                self.transport.set_limits(offset, limit, MAX_MATCHES);
            }

            if let Some(weights) = &options.field_weights {
                self.state.field_weights = weights.clone();
                self.transport.set_field_weights(weights);
            }

            if !names.is_empty() {
                names.push(' ');
            }
            names.push_str(resolved);
        }

        debug!(query = %text, indexes = %names, "dispatching search");
        let raw = self.transport.query(&text, &names)?;
        let daemon_message = self.transport.last_error();
        normalize(raw, indexes.len(), &names, &text, &daemon_message)
    }

    /// Stage a query against the given labels into the pending multi-query
    /// batch, under whatever search state is active right now. No network
    /// I/O and no change to the current settings.
    pub fn add_query(&mut self, query: &str, labels: &[&str]) {
        let mut names = String::new();
        for label in labels {
            match self.registry.resolve(label) {
                Some(resolved) => {
                    // Trailing space after every name, kept for wire
                    // compatibility with existing callers.
                    names.push_str(resolved);
                    names.push(' ');
                }
                None => debug!(label = %label, "unknown index label, skipping"),
            }
        }
        debug!(query, indexes = %names, "staging batch query");
        self.transport.add_query(query, &names);
    }

    /// Execute the staged batch in one round trip.
    ///
    /// Results come back in submission order, one per staged query, and the
    /// batch is cleared by the driver whether the call succeeds or fails.
    /// Unlike [`search`](Self::search), per-query daemon statuses are NOT
    /// turned into errors here; inspect each [`ResultSet::status`]
    /// individually.
    pub fn run_queries(&mut self) -> Result<Vec<ResultSet>, ClientError> {
        let results = self.transport.run_queries()?;
        debug!(count = results.len(), "batch executed");
        Ok(results)
    }
}
