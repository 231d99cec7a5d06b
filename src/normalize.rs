//! Response normalization: error surfacing and the single-index unwrap.

use crate::error::ClientError;
use crate::types::{QueryStatus, RawQueryResult, SearchResults};

/// Normalize one raw query response.
///
/// Pure with respect to session state. A non-OK status becomes
/// [`ClientError::Search`] carrying the searched index names, the query and
/// the daemon's message. An OK response collapses to [`SearchResults::Flat`]
/// only when the caller requested exactly one label AND the raw container
/// holds exactly one group; both counts must agree, so a multi-label search
/// whose groups happen to merge into one entry stays [`SearchResults::Grouped`].
///
/// An empty-but-OK response is passed through unchanged, never treated as an
/// error.
pub fn normalize(
    raw: RawQueryResult,
    requested_labels: usize,
    index_names: &str,
    query: &str,
    daemon_message: &str,
) -> Result<SearchResults, ClientError> {
    if raw.status != QueryStatus::Ok {
        return Err(ClientError::Search {
            index: index_names.to_string(),
            query: query.to_string(),
            message: daemon_message.to_string(),
        });
    }

    let mut groups = raw.groups;
    if requested_labels == 1 && groups.len() == 1 {
        return Ok(SearchResults::Flat(groups.remove(0)));
    }

    Ok(SearchResults::Grouped(groups))
}
