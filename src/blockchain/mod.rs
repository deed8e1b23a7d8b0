pub mod block;
pub mod hasher;
pub mod pow;
pub mod store;
pub mod validator;

pub use block::Block;
pub use pow::{CancelToken, Difficulty};
pub use store::BlockStore;

/// Default Proof-of-Work difficulty (number of leading zero hex digits).
pub const DEFAULT_DIFFICULTY: usize = 4;

/// Difficulty bounds accepted from configuration (keep low in dev to avoid long waits)
pub const DIFF_MIN: usize = 1;
pub const DIFF_MAX: usize = 8;

/// Proof stored in the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// `previous_hash` of the genesis block. A fixed marker, not a real digest.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Sender of the reward transaction added to every mined block.
pub const REWARD_SENDER: &str = "0";

/// Amount credited to the miner per block.
pub const MINING_REWARD: i64 = 1;
