//! Mapping from caller-facing index labels to daemon-side index names.

use serde::{Deserialize, Serialize};

/// Insertion-ordered, immutable-after-construction label map.
///
/// Labels are unique; inserting a duplicate keeps the first binding. Looking
/// up an undefined label yields `None`, and the query builders treat that as
/// "skip this entry" rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRegistry {
    entries: Vec<(String, String)>,
}

impl IndexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `label` to a daemon index name. First binding wins.
    pub fn with_index(mut self, label: impl Into<String>, name: impl Into<String>) -> Self {
        let label = label.into();
        if self.resolve(&label).is_none() {
            self.entries.push((label, name.into()));
        }
        self
    }

    pub fn from_pairs<L, N>(pairs: impl IntoIterator<Item = (L, N)>) -> Self
    where
        L: Into<String>,
        N: Into<String>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |reg, (label, name)| reg.with_index(label, name))
    }

    /// Daemon index name for `label`, if the label is defined.
    pub fn resolve(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, name)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, n)| (l.as_str(), n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
