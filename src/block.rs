//! Processing blocks
//!
//! A block is the smallest processing unit of a pipeline. It is handed every
//! tree of a stream in order; by default a tree is processed word by word.

use crate::conllu::ReadError;
use crate::tree::{NodeId, Tree};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum BlockError {
    #[error("no processing activity defined in block {block}")]
    NoActivity { block: String },

    #[error(transparent)]
    Read(#[from] ReadError),
}

pub trait Block {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Called once before the first tree
    fn process_start(&mut self) {}

    /// Called once after the last tree
    fn process_end(&mut self) {}

    fn process_node(&mut self, _tree: &Tree, _id: NodeId) -> Result<(), BlockError> {
        Err(BlockError::NoActivity {
            block: self.name().to_string(),
        })
    }

    fn process_tree(&mut self, tree: &Tree) -> Result<(), BlockError> {
        for id in 0..tree.len() {
            self.process_node(tree, id)?;
        }
        Ok(())
    }
}

/// Feed every tree to `block`, returning how many were processed
///
/// The first read or processing error stops the run; `process_end` is then
/// not called.
pub fn run_block<B, I>(block: &mut B, trees: I) -> Result<usize, BlockError>
where
    B: Block + ?Sized,
    I: IntoIterator<Item = Result<Tree, ReadError>>,
{
    block.process_start();
    let mut count = 0;
    for tree in trees {
        let tree = tree?;
        count += 1;
        debug!(
            block = block.name(),
            tree_no = count,
            sent_id = ?tree.sent_id,
            "processing tree"
        );
        block.process_tree(&tree)?;
    }
    block.process_end();
    Ok(count)
}
