use thiserror::Error;

/// Failures reported by the ledger to its callers. Chain state is unchanged
/// whenever one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("invalid transaction: {0}")]
    InvalidTransaction(&'static str),

    #[error("invalid node address: {0:?}")]
    InvalidNodeAddress(String),

    #[error("mining aborted: the chain was replaced during the proof search")]
    MiningCancelled,

    #[error("proof discarded: the chain tip moved before the block was sealed")]
    StaleProof,
}

/// Why a single peer's chain could not be used during conflict resolution.
#[derive(Debug, Error)]
pub enum PeerError {
    #[error("request to {node} failed: {source}")]
    Request {
        node: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{node} answered with HTTP {status}")]
    Status { node: String, status: u16 },

    #[error("{node} reported length {reported} but sent {actual} blocks")]
    LengthMismatch {
        node: String,
        reported: usize,
        actual: usize,
    },
}
