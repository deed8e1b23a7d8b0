use std::sync::{Arc, Mutex};
use std::time::Instant;

use log::{debug, info};

use crate::blockchain::pow::find_proof;
use crate::blockchain::validator::is_valid_chain;
use crate::blockchain::{Block, BlockStore, CancelToken, Difficulty};
use crate::consensus::{NodeRegistry, PeerClient, longest_valid_chain};
use crate::error::LedgerError;
use crate::transaction::{PendingPool, Transaction};

/// Read-only view of the chain at one point in time.
#[derive(Debug, Clone)]
pub struct ChainView {
    pub chain: Arc<Vec<Block>>,
    pub length: usize,
}

/// Outcome of a conflict resolution round.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub replaced: bool,
    pub chain: Arc<Vec<Block>>,
}

/// Single owner of the chain, the pending pool and the node registry.
///
/// Lock order is always chain first, then the pending pool or the in-flight
/// token.
#[derive(Debug)]
pub struct Ledger {
    node_id: String,
    difficulty: Difficulty,
    store: BlockStore,
    pending: PendingPool,
    nodes: NodeRegistry,
    mining: Mutex<()>,
    in_flight: Mutex<Option<CancelToken>>,
}

impl Ledger {
    pub fn new(node_id: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            node_id: node_id.into(),
            difficulty,
            store: BlockStore::new(),
            pending: PendingPool::new(),
            nodes: NodeRegistry::new(),
            mining: Mutex::new(()),
            in_flight: Mutex::new(None),
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Find a proof against the current tip and seal the pending pool, plus
    /// this node's reward, into a new block.
    ///
    /// Blocks the calling thread until a proof is found. Only one search runs
    /// at a time. If the chain is replaced meanwhile the proof is thrown away
    /// and the pending pool is left as it was.
    pub fn mine(&self) -> Result<Block, LedgerError> {
        let _serial = self.mining.lock().expect("mutex poisoned");

        let (last_block, cancel) = self.store.with_tip(|tip| {
            let token = CancelToken::default();
            *self.in_flight.lock().expect("mutex poisoned") = Some(token.clone());
            (tip.clone(), token)
        });

        let t0 = Instant::now();
        debug!(
            "MINER - searching proof for #{} (last_proof={}, difficulty={})",
            last_block.index + 1,
            last_block.proof,
            self.difficulty.leading_zeros()
        );
        let found = find_proof(last_block.proof, self.difficulty, &cancel);
        self.in_flight.lock().expect("mutex poisoned").take();

        let proof = found.ok_or_else(|| {
            info!("MINER - search for #{} cancelled", last_block.index + 1);
            LedgerError::MiningCancelled
        })?;
        debug!(
            "MINER - proof {} found in {} ms",
            proof,
            t0.elapsed().as_millis()
        );

        let block = self.seal(&last_block, proof)?;

        info!(
            "MINER - sealed block #{} (proof={}, txs={})",
            block.index,
            block.proof,
            block.transactions.len()
        );
        Ok(block)
    }

    /// Append a block carrying `proof` on top of `last_block`, draining the
    /// pending pool plus the reward into it. Fails with `StaleProof` if the
    /// tip is no longer `last_block`.
    fn seal(&self, last_block: &Block, proof: u64) -> Result<Block, LedgerError> {
        let previous_hash = last_block.hash();
        self.store.append_with(|tip| {
            if tip.index != last_block.index || tip.hash() != previous_hash {
                return Err(LedgerError::StaleProof);
            }
            self.pending.push(Transaction::reward(&self.node_id));
            let transactions = self.pending.drain();
            Ok(Block::new(
                tip.index + 1,
                transactions,
                proof,
                previous_hash.clone(),
            ))
        })
    }

    /// Queue a transaction. Returns the index of the block that will hold it.
    pub fn submit_transaction(
        &self,
        sender: &str,
        recipient: &str,
        amount: i64,
    ) -> Result<u64, LedgerError> {
        if sender.trim().is_empty() {
            return Err(LedgerError::InvalidTransaction("sender must not be empty"));
        }
        if recipient.trim().is_empty() {
            return Err(LedgerError::InvalidTransaction("recipient must not be empty"));
        }

        let tx = Transaction::new(sender, recipient, amount);
        // Under the chain lock so no block is sealed between push and index.
        let index = self.store.with_tip(|tip| {
            self.pending.push(tx);
            tip.index + 1
        });
        debug!("TX - {sender} -> {recipient} ({amount}) queued for block #{index}");
        Ok(index)
    }

    pub fn get_chain(&self) -> ChainView {
        let chain = self.store.snapshot();
        ChainView {
            length: chain.len(),
            chain,
        }
    }

    pub fn pending_transactions(&self) -> Vec<Transaction> {
        self.pending.snapshot()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Add a peer. Idempotent; returns the normalized `host[:port]`.
    pub fn register_node(&self, address: &str) -> Result<String, LedgerError> {
        let node = self.nodes.register(address)?;
        debug!("NODES - registered {node}");
        Ok(node)
    }

    pub fn nodes(&self) -> Vec<String> {
        self.nodes.list()
    }

    pub fn peer_count(&self) -> usize {
        self.nodes.len()
    }

    /// Validate the local chain with the same rules applied to peers.
    pub fn is_chain_valid(&self) -> bool {
        is_valid_chain(&self.store.snapshot(), self.difficulty)
    }

    pub fn is_mining(&self) -> bool {
        self.in_flight.lock().expect("mutex poisoned").is_some()
    }

    /// Replace the local chain with the longest valid peer chain, if any is
    /// strictly longer. Aborts an in-flight proof search on replacement.
    pub async fn resolve_conflicts<C>(&self, client: &C) -> Resolution
    where
        C: PeerClient + ?Sized,
    {
        let peers = self.nodes.list();
        let local_len = self.store.len();
        let candidate = longest_valid_chain(client, &peers, local_len, self.difficulty).await;

        let replaced = match candidate {
            Some(chain) => {
                let new_len = chain.len();
                let swapped = self
                    .store
                    .replace_if_longer(chain, || self.cancel_in_flight());
                if swapped {
                    info!("CONSENSUS - local chain replaced ({local_len} -> {new_len} blocks)");
                } else {
                    debug!("CONSENSUS - local chain grew past the candidate, keeping it");
                }
                swapped
            }
            None => false,
        };

        Resolution {
            replaced,
            chain: self.store.snapshot(),
        }
    }

    fn cancel_in_flight(&self) {
        if let Some(token) = self.in_flight.lock().expect("mutex poisoned").as_ref() {
            token.cancel();
        }
    }
}
