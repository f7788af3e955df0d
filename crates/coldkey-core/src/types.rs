use serde::{Deserialize, Serialize};

/// Network parameters consumed by address derivation.
///
/// The protection core only ever sees a network through its P2PKH address
/// version byte; everything else about a chain lives outside this workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Network {
    /// Bitcoin mainnet (P2PKH addresses starting with `1`)
    Bitcoin,
    /// Bitcoin testnet3 (P2PKH addresses starting with `m` or `n`)
    Testnet,
}

impl Network {
    /// Version byte prepended to a HASH160 digest when forming a
    /// Base58Check P2PKH address.
    pub fn pubkey_hash_version(&self) -> u8 {
        match self {
            Network::Bitcoin => 0x00,
            Network::Testnet => 0x6F,
        }
    }
}
