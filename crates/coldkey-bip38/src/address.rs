//! Checksum engine: public key → P2PKH address → 4-byte passphrase checksum
//!
//! The checksum is the first 4 bytes of a double SHA-256 over the *ASCII*
//! address string, not over the key bytes. That is what the standard
//! specifies, and it is what makes the checksum network-dependent.

use coldkey_core::{ColdkeyError, ColdkeyResult, Network};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::CHECKSUM_SIZE;

/// Double SHA-256. Also used for the EC-multiply FactorB derivation.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}

/// SHA-256 followed by RIPEMD-160, the standard public-key digest.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    Ripemd160::digest(sha).into()
}

/// Format the P2PKH address string for a serialized public key.
///
/// Accepts a compressed (33-byte) or uncompressed (65-byte) SEC1 encoding;
/// any other length means the caller handed us something that is not a
/// public key for this network.
pub fn p2pkh_address(pubkey: &[u8], network: Network) -> ColdkeyResult<String> {
    if pubkey.len() != 33 && pubkey.len() != 65 {
        return Err(ColdkeyError::Network(format!(
            "{} public key bytes (expected 33 or 65)",
            pubkey.len()
        )));
    }

    let digest = hash160(pubkey);
    let mut versioned = [0u8; 21];
    versioned[0] = network.pubkey_hash_version();
    versioned[1..].copy_from_slice(&digest);
    Ok(bs58::encode(&versioned).with_check().into_string())
}

/// Derive the record's 4-byte checksum from a serialized public key.
pub fn address_checksum(pubkey: &[u8], network: Network) -> ColdkeyResult<[u8; CHECKSUM_SIZE]> {
    let address = p2pkh_address(pubkey, network)?;
    let digest = sha256d(address.as_bytes());
    let mut checksum = [0u8; CHECKSUM_SIZE];
    checksum.copy_from_slice(&digest[..CHECKSUM_SIZE]);
    Ok(checksum)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Generator point for scalar 1, both serializations.
    const PUB_COMPRESSED: &str =
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const PUB_UNCOMPRESSED: &str =
        "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
         483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    #[test]
    fn test_p2pkh_known_addresses() {
        let compressed = hex::decode(PUB_COMPRESSED).unwrap();
        let uncompressed = hex::decode(PUB_UNCOMPRESSED).unwrap();

        assert_eq!(
            p2pkh_address(&compressed, Network::Bitcoin).unwrap(),
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        );
        assert_eq!(
            p2pkh_address(&uncompressed, Network::Bitcoin).unwrap(),
            "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm"
        );
    }

    #[test]
    fn test_network_changes_address_and_checksum() {
        let pubkey = hex::decode(PUB_COMPRESSED).unwrap();

        let mainnet = address_checksum(&pubkey, Network::Bitcoin).unwrap();
        let testnet = address_checksum(&pubkey, Network::Testnet).unwrap();
        assert_ne!(mainnet, testnet, "checksum must depend on the network");
    }

    #[test]
    fn test_bad_pubkey_length_is_network_error() {
        let result = p2pkh_address(&[0u8; 20], Network::Bitcoin);
        assert!(matches!(result, Err(ColdkeyError::Network(_))));
    }

    #[test]
    fn test_checksum_deterministic() {
        let pubkey = hex::decode(PUB_UNCOMPRESSED).unwrap();
        let a = address_checksum(&pubkey, Network::Bitcoin).unwrap();
        let b = address_checksum(&pubkey, Network::Bitcoin).unwrap();
        assert_eq!(a, b);
    }
}
