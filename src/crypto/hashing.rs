// Keccak-256 helpers used to address contract methods.

use primitive_types::H256;
use sha3::{Digest, Keccak256};

/// Keccak-256 digest of arbitrary bytes (the Ethereum flavour, not NIST SHA3-256).
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    H256::from_slice(&hasher.finalize())
}

/// 4-byte method selector for a canonical signature such as `addCrowdsale(address,address)`.
pub fn method_selector(signature: &str) -> [u8; 4] {
    let digest = keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&digest.as_bytes()[..4]);
    selector
}
