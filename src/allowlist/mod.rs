//! The set of JSON-RPC method names the proxy will forward.
//!
//! # Design Decisions
//! - Built once at startup, read-only for the process lifetime, so it can be
//!   shared across request handlers without synchronization
//! - Membership is exact string equality; no wildcards or prefixes
//! - A missing or empty allow-list is a startup error: the proxy must never
//!   run in a state where it would forward nothing or everything by accident

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for allow-list loading.
#[derive(Debug, Error)]
pub enum AllowListError {
    #[error("failed to read allow-list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("allow-list {path} contains no method names")]
    Empty { path: PathBuf },
}

/// Immutable set of permitted JSON-RPC method names.
#[derive(Debug, Clone)]
pub struct AllowList {
    methods: HashSet<String>,
}

impl AllowList {
    /// Load an allow-list from a file with one method name per line.
    ///
    /// Trailing whitespace is stripped and blank lines are skipped.
    pub fn from_file(path: &Path) -> Result<Self, AllowListError> {
        let content = fs::read_to_string(path).map_err(|source| AllowListError::Io {
            path: path.to_owned(),
            source,
        })?;

        let methods: HashSet<String> = content
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();

        if methods.is_empty() {
            return Err(AllowListError::Empty {
                path: path.to_owned(),
            });
        }

        Ok(Self { methods })
    }

    /// Exact-match membership test.
    pub fn contains(&self, method: &str) -> bool {
        self.methods.contains(method)
    }

    /// Number of permitted methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for AllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            methods: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_list(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_one_method_per_line() {
        let file = write_list("getBalance\ngetBlock\n\nsendRawTransaction\n");
        let list = AllowList::from_file(file.path()).unwrap();
        assert_eq!(list.len(), 3);
        assert!(list.contains("getBalance"));
        assert!(list.contains("sendRawTransaction"));
        assert!(!list.contains("deleteAll"));
    }

    #[test]
    fn strips_trailing_whitespace_only() {
        let file = write_list("getBalance  \r\n");
        let list = AllowList::from_file(file.path()).unwrap();
        assert!(list.contains("getBalance"));
        // No normalization beyond the trailing trim: lookups are exact.
        assert!(!list.contains("getbalance"));
        assert!(!list.contains("getBalance "));
    }

    #[test]
    fn empty_file_fails_to_load() {
        let file = write_list("\n\n");
        assert!(matches!(
            AllowList::from_file(file.path()),
            Err(AllowListError::Empty { .. })
        ));
    }

    #[test]
    fn missing_file_fails_to_load() {
        assert!(matches!(
            AllowList::from_file(Path::new("/nonexistent/whitelist.txt")),
            Err(AllowListError::Io { .. })
        ));
    }
}
