//! Shared test driver: an in-memory `Transport` that records every call and
//! replays scripted responses.

#![allow(dead_code)]

use std::collections::VecDeque;

use searchd_client::{
    ClientError, Filter, Limits, Match, MatchMode, QueryStatus, RawQueryResult, ResultSet,
    ServerAddr, SessionState, SortMode, Transport, WordStats,
};
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber for the test binary; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One recorded call against the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Connect(String),
    SetMatchMode(MatchMode),
    SetSortMode(SortMode, String),
    SetFilter {
        attribute: String,
        values: Vec<i64>,
        exclude: bool,
    },
    ResetFilters,
    SetLimits {
        offset: u32,
        limit: u32,
        max_matches: u32,
    },
    SetFieldWeights(Vec<(String, i32)>),
    /// Includes a snapshot of the search state active at dispatch time.
    Query {
        text: String,
        index_names: String,
        state: SessionState,
    },
    /// Includes a snapshot of the search state active when the query was
    /// staged.
    AddQuery {
        text: String,
        index_names: String,
        state: SessionState,
    },
    RunQueries {
        staged: usize,
    },
}

/// In-memory stand-in for the protocol driver.
///
/// Responses for `query` come from `responses`; when the script is empty an
/// empty-but-OK payload is returned. `run_queries` replays `batch_responses`
/// if scripted, otherwise it fabricates one OK result set per staged query
/// whose `words` entry carries the query text, so ordering is observable.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    pub calls: Vec<Call>,
    pub responses: VecDeque<RawQueryResult>,
    pub batch_responses: VecDeque<Vec<ResultSet>>,
    pub last_error: String,
    pub refuse_connect: bool,
    pub fail_batch: bool,
    pub state: SessionState,
    pub staged: Vec<(String, String)>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(mut self, raw: RawQueryResult) -> Self {
        self.responses.push_back(raw);
        self
    }

    pub fn with_last_error(mut self, message: &str) -> Self {
        self.last_error = message.to_string();
        self
    }

    pub fn queries(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Query { .. }))
            .collect()
    }

    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }
}

impl Transport for ScriptedTransport {
    fn connect(&mut self, addr: &ServerAddr) -> Result<(), ClientError> {
        self.calls.push(Call::Connect(addr.to_string()));
        if self.refuse_connect {
            return Err(ClientError::Connection(addr.to_string()));
        }
        Ok(())
    }

    fn set_match_mode(&mut self, mode: MatchMode) {
        self.state.match_mode = mode;
        self.calls.push(Call::SetMatchMode(mode));
    }

    fn set_sort_mode(&mut self, mode: SortMode, sort_by: &str) {
        self.state.sort_mode = mode;
        self.state.sort_by = sort_by.to_string();
        self.calls.push(Call::SetSortMode(mode, sort_by.to_string()));
    }

    fn set_filter(&mut self, attribute: &str, values: &[i64], exclude: bool) {
        self.state.filters.push(Filter {
            attribute: attribute.to_string(),
            values: values.to_vec(),
            exclude,
        });
        self.calls.push(Call::SetFilter {
            attribute: attribute.to_string(),
            values: values.to_vec(),
            exclude,
        });
    }

    fn reset_filters(&mut self) {
        self.state.filters.clear();
        self.calls.push(Call::ResetFilters);
    }

    fn set_limits(&mut self, offset: u32, limit: u32, max_matches: u32) {
        self.state.limits = Some(Limits {
            offset,
            limit,
            max_matches,
        });
        self.calls.push(Call::SetLimits {
            offset,
            limit,
            max_matches,
        });
    }

    fn set_field_weights(&mut self, weights: &[(String, i32)]) {
        self.state.field_weights = weights.to_vec();
        self.calls.push(Call::SetFieldWeights(weights.to_vec()));
    }

    fn query(&mut self, text: &str, index_names: &str) -> Result<RawQueryResult, ClientError> {
        self.calls.push(Call::Query {
            text: text.to_string(),
            index_names: index_names.to_string(),
            state: self.state.clone(),
        });
        Ok(self.responses.pop_front().unwrap_or(RawQueryResult {
            status: QueryStatus::Ok,
            groups: vec![],
        }))
    }

    fn add_query(&mut self, text: &str, index_names: &str) {
        self.staged
            .push((text.to_string(), index_names.to_string()));
        self.calls.push(Call::AddQuery {
            text: text.to_string(),
            index_names: index_names.to_string(),
            state: self.state.clone(),
        });
    }

    fn run_queries(&mut self) -> Result<Vec<ResultSet>, ClientError> {
        self.calls.push(Call::RunQueries {
            staged: self.staged.len(),
        });
        let staged = std::mem::take(&mut self.staged);
        if self.fail_batch {
            return Err(ClientError::Transport("connection reset".to_string()));
        }
        if let Some(scripted) = self.batch_responses.pop_front() {
            return Ok(scripted);
        }
        Ok(staged
            .into_iter()
            .map(|(text, _)| ResultSet {
                words: vec![(text, WordStats { docs: 1, hits: 1 })],
                ..ok_set(1)
            })
            .collect())
    }

    fn last_error(&self) -> String {
        self.last_error.clone()
    }
}

/// An OK result set with `total_found` synthetic matches.
pub fn ok_set(total_found: u64) -> ResultSet {
    ResultSet {
        status: QueryStatus::Ok,
        matches: (0..total_found)
            .map(|i| Match {
                doc_id: i + 1,
                weight: 100 - i as i32,
                attrs: Default::default(),
            })
            .collect(),
        total: total_found,
        total_found,
        time_ms: 2,
        words: vec![],
        error: None,
        warning: None,
    }
}

pub fn ok_raw(groups: Vec<ResultSet>) -> RawQueryResult {
    RawQueryResult {
        status: QueryStatus::Ok,
        groups,
    }
}

pub fn error_raw() -> RawQueryResult {
    RawQueryResult {
        status: QueryStatus::Error,
        groups: vec![],
    }
}
