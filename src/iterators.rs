//! Iterators over trees from several sources
//!
//! Provides one collection interface for:
//! - Iterating over trees from a string, file, or glob pattern
//! - Choosing between skipping bad input and stopping on it

use crate::conllu::{CoNLLUReader, ReadError};
use crate::schema::ReaderConfig;
use crate::tree::Tree;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Error while reading a treebank
#[derive(Debug, Error)]
pub enum TreebankError {
    #[error("failed to open {}: {source}", .path.display())]
    FileOpen { path: PathBuf, source: io::Error },

    #[error("{}: {source}", .path.display())]
    Read { path: PathBuf, source: ReadError },

    #[error("in-memory treebank: {0}")]
    Parse(#[from] ReadError),

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// Source of trees for a collection
#[derive(Debug, Clone)]
enum TreeSource {
    /// In-memory CoNLL-U text
    String(String),
    /// Single file path
    File(PathBuf),
    /// Multiple file paths (from glob or explicit paths)
    Files(Vec<PathBuf>),
}

/// Collection of trees from a string, file, or glob pattern
///
/// Files are read one after another, each with its own reader sharing the
/// same [`ReaderConfig`]. Iterating with `into_iter` logs and skips
/// unreadable files and malformed sentences; `try_iter` reports them.
///
/// # Examples
///
/// ```no_run
/// use udtrees::Treebank;
///
/// let trees = Treebank::from_file("data.conllu");
/// for tree in trees {
///     println!("Tree with {} words", tree.len());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Treebank {
    source: TreeSource,
    config: ReaderConfig,
}

impl Treebank {
    /// Create from an in-memory CoNLL-U string
    pub fn from_string(text: &str) -> Self {
        Self::new(TreeSource::String(text.to_string()))
    }

    /// Create from a single file path
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self::new(TreeSource::File(path.as_ref().to_path_buf()))
    }

    /// Create from a glob pattern
    ///
    /// Files are processed in sorted order for deterministic results.
    pub fn from_glob(pattern: &str) -> Result<Self, TreebankError> {
        let mut file_paths: Vec<PathBuf> = glob::glob(pattern)?.filter_map(Result::ok).collect();
        file_paths.sort();
        Ok(Self::from_paths(file_paths))
    }

    /// Create from explicit file paths
    pub fn from_paths(file_paths: Vec<PathBuf>) -> Self {
        Self::new(TreeSource::Files(file_paths))
    }

    fn new(source: TreeSource) -> Self {
        Self {
            source,
            config: ReaderConfig::default(),
        }
    }

    /// Use `config` for every reader opened by this treebank
    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = Tree>> {
        self.clone().into_iter()
    }

    /// Iterate over trees, reporting every error
    ///
    /// A file that cannot be opened yields one error and is skipped; reading
    /// continues with the next file.
    pub fn try_iter(&self) -> Box<dyn Iterator<Item = Result<Tree, TreebankError>>> {
        let config = self.config.clone();
        match self.source.clone() {
            TreeSource::String(text) => Box::new(
                CoNLLUReader::from_string_with(&text, config).map(|r| r.map_err(TreebankError::from)),
            ),
            TreeSource::File(path) => open_file_trees(path, config),
            TreeSource::Files(paths) => Box::new(
                paths
                    .into_iter()
                    .flat_map(move |path| open_file_trees(path, config.clone())),
            ),
        }
    }
}

impl IntoIterator for Treebank {
    type Item = Tree;
    type IntoIter = Box<dyn Iterator<Item = Self::Item>>;

    fn into_iter(self) -> Self::IntoIter {
        let iter = self.try_iter().filter_map(|result| match result {
            Ok(tree) => Some(tree),
            Err(e) => {
                warn!(error = %e, "skipping unreadable input");
                None
            }
        });
        Box::new(iter)
    }
}

/// Helper: Open a file and return an iterator over its trees
fn open_file_trees(
    path: PathBuf,
    config: ReaderConfig,
) -> Box<dyn Iterator<Item = Result<Tree, TreebankError>>> {
    match CoNLLUReader::from_file_with(&path, config) {
        Ok(reader) => Box::new(reader.map(move |result| {
            result.map_err(|source| TreebankError::Read {
                path: path.clone(),
                source,
            })
        })),
        Err(source) => Box::new(std::iter::once(Err(TreebankError::FileOpen { path, source }))),
    }
}
