//! Core protocol-facing types: match/sort modes, filters, per-query options
//! and the result-set shapes returned by the daemon driver.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// How query terms are matched against indexed text.
///
/// Numeric values follow the daemon API constants so drivers can put them on
/// the wire unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[repr(u32)]
pub enum MatchMode {
    #[default]
    All = 0,
    Any = 1,
    Phrase = 2,
    Boolean = 3,
    Extended = 4,
    FullScan = 5,
    Extended2 = 6,
}

impl TryFrom<u32> for MatchMode {
    type Error = ClientError;

    fn try_from(value: u32) -> Result<Self, ClientError> {
        match value {
            0 => Ok(Self::All),
            1 => Ok(Self::Any),
            2 => Ok(Self::Phrase),
            3 => Ok(Self::Boolean),
            4 => Ok(Self::Extended),
            5 => Ok(Self::FullScan),
            6 => Ok(Self::Extended2),
            other => Err(ClientError::InvalidArgument(format!(
                "unknown match mode {other}"
            ))),
        }
    }
}

/// How the daemon orders matches before returning them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[repr(u32)]
pub enum SortMode {
    /// Best matches first.
    #[default]
    Relevance = 0,
    /// Bigger attribute values first.
    AttrDesc = 1,
    /// Smaller attribute values first.
    AttrAsc = 2,
    /// Last hour/day/week/month buckets, then relevance.
    TimeSegments = 3,
    /// SQL-like combination of columns in ASC/DESC order.
    Extended = 4,
    /// Arithmetic expression over attributes.
    Expr = 5,
}

impl SortMode {
    /// Whether this mode needs a non-empty sort-by clause (attribute name or
    /// expression). Relevance sorting needs none.
    pub fn requires_sort_by(self) -> bool {
        !matches!(self, Self::Relevance)
    }
}

impl TryFrom<u32> for SortMode {
    type Error = ClientError;

    fn try_from(value: u32) -> Result<Self, ClientError> {
        match value {
            0 => Ok(Self::Relevance),
            1 => Ok(Self::AttrDesc),
            2 => Ok(Self::AttrAsc),
            3 => Ok(Self::TimeSegments),
            4 => Ok(Self::Extended),
            5 => Ok(Self::Expr),
            other => Err(ClientError::InvalidArgument(format!(
                "unknown sort mode {other}"
            ))),
        }
    }
}

/// Per-query status reported by the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum QueryStatus {
    Ok = 0,
    Error = 1,
    Retry = 2,
    Warning = 3,
}

impl TryFrom<u32> for QueryStatus {
    type Error = ClientError;

    fn try_from(value: u32) -> Result<Self, ClientError> {
        match value {
            0 => Ok(QueryStatus::Ok),
            1 => Ok(QueryStatus::Error),
            2 => Ok(QueryStatus::Retry),
            3 => Ok(QueryStatus::Warning),
            other => Err(ClientError::InvalidArgument(format!(
                "unknown query status {other}"
            ))),
        }
    }
}

/// An attribute filter restricting which documents match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub attribute: String,
    pub values: Vec<i64>,
    /// When set, documents matching `values` are dropped instead of kept.
    pub exclude: bool,
}

/// Per-label options supplied to a `search` call.
///
/// `result_offset` and `result_limit` only take effect when both are present;
/// one without the other leaves pagination untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub result_offset: Option<u32>,
    pub result_limit: Option<u32>,
    pub field_weights: Option<Vec<(String, i32)>>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a page of results.
    pub fn paginate(mut self, offset: u32, limit: u32) -> Self {
        self.result_offset = Some(offset);
        self.result_limit = Some(limit);
        self
    }

    /// Add a relevance multiplier for a field.
    pub fn weight(mut self, field: impl Into<String>, weight: i32) -> Self {
        self.field_weights
            .get_or_insert_with(Vec::new)
            .push((field.into(), weight));
        self
    }
}

/// Pagination limits as the daemon sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    pub offset: u32,
    pub limit: u32,
    /// Upper bound on matches the daemon keeps in memory for this query.
    pub max_matches: u32,
}

/// The settable search state a connected client carries between calls.
///
/// Setters mutate this in place and the next query reads it; nothing resets
/// it implicitly. Filters in particular persist across `search` calls until
/// `reset_filters` is invoked.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub match_mode: MatchMode,
    pub sort_mode: SortMode,
    pub sort_by: String,
    pub filters: Vec<Filter>,
    pub limits: Option<Limits>,
    pub field_weights: Vec<(String, i32)>,
}

/// Per-word statistics attached to a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordStats {
    pub docs: u64,
    pub hits: u64,
}

/// One matched document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub doc_id: u64,
    pub weight: i32,
    #[serde(default)]
    pub attrs: HashMap<String, serde_json::Value>,
}

/// One result set, as returned per executed query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub status: QueryStatus,
    pub matches: Vec<Match>,
    pub total: u64,
    pub total_found: u64,
    pub time_ms: u64,
    pub words: Vec<(String, WordStats)>,
    pub error: Option<String>,
    pub warning: Option<String>,
}

impl ResultSet {
    pub fn is_ok(&self) -> bool {
        self.status == QueryStatus::Ok
    }
}

/// Raw payload of a single `query` round trip: an overall status plus one
/// result set per index group. The driver always wraps, even when only one
/// index was searched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawQueryResult {
    pub status: QueryStatus,
    pub groups: Vec<ResultSet>,
}

/// Normalized outcome of a `search` call.
///
/// Searching exactly one label collapses to [`SearchResults::Flat`] when the
/// raw container holds exactly one group; everything else stays grouped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchResults {
    Flat(ResultSet),
    Grouped(Vec<ResultSet>),
}

impl SearchResults {
    /// All result sets, flat or not, in daemon order.
    pub fn result_sets(&self) -> &[ResultSet] {
        match self {
            Self::Flat(set) => std::slice::from_ref(set),
            Self::Grouped(sets) => sets,
        }
    }

    pub fn into_flat(self) -> Option<ResultSet> {
        match self {
            Self::Flat(set) => Some(set),
            Self::Grouped(_) => None,
        }
    }
}
