use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{DEFAULT_DIFFICULTY, hasher};

/// Number of leading zero hex digits a proof digest must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Difficulty(usize);

impl Difficulty {
    pub const fn new(leading_zeros: usize) -> Self {
        Self(leading_zeros)
    }

    pub fn leading_zeros(&self) -> usize {
        self.0
    }

    /// True if `digest_hex` starts with the required number of `'0'` digits.
    pub fn is_met_by(&self, digest_hex: &str) -> bool {
        digest_hex.len() >= self.0 && digest_hex.bytes().take(self.0).all(|c| c == b'0')
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(DEFAULT_DIFFICULTY)
    }
}

/// Shared flag used to abort a running proof search.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Does hash(`last_proof` ++ `proof`) meet `difficulty`?
/// Both proofs are written in decimal with no separator.
pub fn valid_proof(last_proof: u64, proof: u64, difficulty: Difficulty) -> bool {
    let guess = format!("{last_proof}{proof}");
    difficulty.is_met_by(&hasher::sha256_hex(guess.as_bytes()))
}

/// Brute-force the smallest proof valid against `last_proof`, counting up from 0.
/// Returns `None` once `cancel` is set.
pub fn find_proof(last_proof: u64, difficulty: Difficulty, cancel: &CancelToken) -> Option<u64> {
    let mut proof = 0u64;
    loop {
        if cancel.is_cancelled() {
            return None;
        }
        if valid_proof(last_proof, proof, difficulty) {
            return Some(proof);
        }
        proof = proof.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::GENESIS_PROOF;

    #[test]
    fn valid_proof_matches_digest_prefix() {
        let difficulty = Difficulty::new(2);
        for proof in 0..500u64 {
            let digest = hasher::sha256_hex(format!("{GENESIS_PROOF}{proof}").as_bytes());
            assert_eq!(
                valid_proof(GENESIS_PROOF, proof, difficulty),
                digest.starts_with("00"),
                "proof {proof}"
            );
        }
    }

    #[test]
    fn found_proof_is_the_first_valid_one() {
        let difficulty = Difficulty::new(2);
        let proof = find_proof(GENESIS_PROOF, difficulty, &CancelToken::default())
            .expect("search was not cancelled");
        assert!(valid_proof(GENESIS_PROOF, proof, difficulty));
        assert!((0..proof).all(|p| !valid_proof(GENESIS_PROOF, p, difficulty)));
    }

    #[test]
    fn default_difficulty_search_terminates() {
        let difficulty = Difficulty::default();
        assert_eq!(difficulty.leading_zeros(), 4);
        let proof = find_proof(35_293, difficulty, &CancelToken::default()).unwrap();
        assert!(valid_proof(35_293, proof, difficulty));
    }

    #[test]
    fn zero_difficulty_accepts_anything() {
        let proof = find_proof(9, Difficulty::new(0), &CancelToken::default());
        assert_eq!(proof, Some(0));
    }

    #[test]
    fn cancelled_search_returns_none() {
        let cancel = CancelToken::default();
        cancel.cancel();
        // 64 zero digits is never reached
        assert_eq!(find_proof(1, Difficulty::new(64), &cancel), None);
    }

    #[test]
    fn difficulty_longer_than_digest_is_never_met() {
        assert!(!Difficulty::new(5).is_met_by("0000"));
        assert!(Difficulty::new(4).is_met_by("0000ab"));
        assert!(!Difficulty::new(4).is_met_by("000a00"));
    }
}
