use std::sync::{Arc, RwLock};

use super::Block;

/// In-memory, append-only chain of blocks.
///
/// Readers get an `Arc` snapshot that never changes underneath them; appends
/// copy-on-write and replacements swap the whole `Arc` under the write lock.
#[derive(Debug)]
pub struct BlockStore {
    chain: RwLock<Arc<Vec<Block>>>,
}

impl BlockStore {
    /// Initialize a new store holding only the genesis block.
    pub fn new() -> Self {
        Self {
            chain: RwLock::new(Arc::new(vec![Block::genesis()])),
        }
    }

    /// Immutable snapshot of the current chain.
    pub fn snapshot(&self) -> Arc<Vec<Block>> {
        self.chain.read().expect("chain lock poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.chain.read().expect("chain lock poisoned").len()
    }

    /// Run `f` against the last block while appends and replacements are held off.
    pub fn with_tip<R>(&self, f: impl FnOnce(&Block) -> R) -> R {
        let chain = self.chain.read().expect("chain lock poisoned");
        f(last_of(&chain))
    }

    /// Build the next block from the current tip and append it, atomically.
    /// Nothing is appended if `build` fails.
    pub fn append_with<E>(&self, build: impl FnOnce(&Block) -> Result<Block, E>) -> Result<Block, E> {
        let mut chain = self.chain.write().expect("chain lock poisoned");
        let block = build(last_of(&chain))?;
        Arc::make_mut(&mut *chain).push(block.clone());
        Ok(block)
    }

    /// Swap in `candidate` if it is strictly longer than the current chain.
    /// `on_replace` runs while the write lock is still held.
    pub fn replace_if_longer(&self, candidate: Vec<Block>, on_replace: impl FnOnce()) -> bool {
        let mut chain = self.chain.write().expect("chain lock poisoned");
        if candidate.len() <= chain.len() {
            return false;
        }
        *chain = Arc::new(candidate);
        on_replace();
        true
    }
}

impl Default for BlockStore {
    fn default() -> Self {
        Self::new()
    }
}

fn last_of(chain: &[Block]) -> &Block {
    chain
        .last()
        .expect("Blockchain should always have at least the genesis block")
}
