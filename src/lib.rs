//! udtrees: streaming CoNLL-U reading into dependency trees
//!
//! Reads line-oriented, tab-separated sentence records one sentence at a
//! time, so arbitrarily large corpora never need to be held in memory.

pub mod block; // Processing units fed tree by tree
pub mod bytes; // Field splitting and index parsing
pub mod comment; // sent_id / text / free comment lines
pub mod conllu; // CoNLL-U reader: decoding and tree assembly
pub mod iterators; // Multi-file tree collections
pub mod schema; // Column schema and reader configuration
pub mod tree; // Tree data structures

// Re-exports for convenience
pub use block::{Block, BlockError, run_block};
pub use conllu::{CoNLLUReader, ReadError};
pub use iterators::{Treebank, TreebankError};
pub use schema::{Column, ReaderConfig, Schema};
pub use tree::{Head, MultiwordToken, Node, NodeId, Tree};
