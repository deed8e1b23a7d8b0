use log::debug;

use super::pow::{Difficulty, valid_proof};
use super::{Block, GENESIS_PREVIOUS_HASH, GENESIS_PROOF};

/// True if `block` could be a genesis block: index 1, sentinel
/// `previous_hash` and the fixed genesis proof. Timestamp and payload are
/// not checked, so each node's own genesis passes.
pub fn has_genesis_shape(block: &Block) -> bool {
    block.index == 1
        && block.previous_hash == GENESIS_PREVIOUS_HASH
        && block.proof == GENESIS_PROOF
}

/// Check linkage, proof and index continuity for every adjacent pair.
///
/// Pure: used on untrusted peer data before anything is accepted. The first
/// block is taken as given; chains of length 0 or 1 are trivially valid.
pub fn is_valid_chain(chain: &[Block], difficulty: Difficulty) -> bool {
    for pair in chain.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);

        if curr.previous_hash != prev.hash() {
            debug!("VALIDATE - block #{} does not link to #{}", curr.index, prev.index);
            return false;
        }

        if !valid_proof(prev.proof, curr.proof, difficulty) {
            debug!("VALIDATE - block #{} carries an invalid proof", curr.index);
            return false;
        }

        if curr.index != prev.index + 1 {
            debug!(
                "VALIDATE - index gap: #{} follows #{}",
                curr.index, prev.index
            );
            return false;
        }
    }

    true
}
