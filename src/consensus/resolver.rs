//! Longest-valid-chain conflict resolution.
//!
//! Only chain length is compared, not accumulated work. Difficulty is assumed
//! constant across the network; under that assumption length is a proxy for
//! effort, otherwise a longer easy chain beats a shorter hard one.

use futures::future::join_all;
use log::{debug, info, warn};

use super::PeerClient;
use crate::blockchain::validator::{has_genesis_shape, is_valid_chain};
use crate::blockchain::{Block, Difficulty};

/// Ask every peer for its chain and pick the longest valid one that is
/// strictly longer than `local_len`.
///
/// Peers are queried concurrently but judged in the order given, so among
/// equally long winners the first peer listed is kept. Unreachable or
/// misbehaving peers are skipped.
pub async fn longest_valid_chain<C>(
    client: &C,
    peers: &[String],
    local_len: usize,
    difficulty: Difficulty,
) -> Option<Vec<Block>>
where
    C: PeerClient + ?Sized,
{
    let fetches = peers.iter().map(|node| async move {
        let result = client.fetch_chain(node).await;
        (node, result)
    });
    let responses = join_all(fetches).await;

    let mut max_length = local_len;
    let mut best = None;

    for (node, result) in responses {
        let chain = match result {
            Ok(chain) => chain,
            Err(e) => {
                warn!("CONSENSUS - skipping peer {node}: {e}");
                continue;
            }
        };

        if chain.len() <= max_length {
            debug!(
                "CONSENSUS - {node} has {} blocks, need more than {max_length}",
                chain.len()
            );
            continue;
        }
        if !chain.first().is_some_and(has_genesis_shape) {
            warn!("CONSENSUS - {node} sent a chain that does not start at genesis");
            continue;
        }
        if !is_valid_chain(&chain, difficulty) {
            warn!("CONSENSUS - {node} sent an invalid chain of {} blocks", chain.len());
            continue;
        }

        info!("CONSENSUS - {node} leads with {} blocks", chain.len());
        max_length = chain.len();
        best = Some(chain);
    }

    best
}
