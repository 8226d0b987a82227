//! Target name list loading.
//!
//! A list file holds one plain file name per line. Surrounding whitespace is
//! dropped and blank lines are ignored.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::Path;

use super::error::SweepError;

/// Immutable set of base names eligible for deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSet {
    names: HashSet<String>,
}

impl TargetSet {
    /// Build a set from list file contents.
    pub fn parse(content: &str) -> Self {
        let names = content
            .split('\n')
            .map(|line| line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}'))
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        Self { names }
    }

    /// Read and parse a list file.
    ///
    /// Invalid UTF-8 is decoded lossily. A missing or unreadable file is an
    /// error; there is no fallback list.
    pub async fn load(path: &Path) -> Result<Self, SweepError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| SweepError::from_list_io(e, path))?;

        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    /// Exact, case-sensitive match on a base name.
    pub fn contains(&self, file_name: &OsStr) -> bool {
        file_name
            .to_str()
            .map(|name| self.names.contains(name))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TargetSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
