//! Wire codec: Base58Check ↔ 38-byte key record
//!
//! The outer Base58Check checksum (double SHA-256 of the whole record) only
//! catches transcription errors; it is unrelated to the inner address-derived
//! checksum field that verifies the passphrase.

use coldkey_core::{ColdkeyError, ColdkeyResult};

use crate::{CHECKSUM_SIZE, KEY_SIZE};

/// Fixed first byte of every encoded record.
pub const RECORD_VERSION: u8 = 0x01;

/// Record-type byte for non-EC-multiply records.
pub const RECORD_TYPE_NON_EC: u8 = 0x42;

/// Record-type byte for EC-multiply records.
pub const RECORD_TYPE_EC: u8 = 0x43;

/// Record length after the version byte: type + flag + checksum + payload.
pub const RECORD_LEN: usize = 1 + 1 + CHECKSUM_SIZE + KEY_SIZE;

/// A decoded protection record.
///
/// `flag & 0xC0 == 0xC0` selects non-EC-multiply mode; bit `0x20` marks a
/// compressed public key; bit `0x04` (EC mode only) marks the unsupported
/// lot/sequence extension.
#[derive(Clone)]
pub struct KeyRecord {
    pub flag: u8,
    pub checksum: [u8; CHECKSUM_SIZE],
    pub payload: [u8; KEY_SIZE],
}

impl KeyRecord {
    /// True when the record was produced without EC multiplication.
    pub fn is_non_ec(&self) -> bool {
        self.flag & 0xC0 == 0xC0
    }

    /// True when the record encodes a compressed public key.
    pub fn is_compressed(&self) -> bool {
        self.flag & 0x20 != 0
    }
}

/// Parse a Base58Check-encoded record.
pub fn decode(text: &str) -> ColdkeyResult<KeyRecord> {
    let data = bs58::decode(text)
        .with_check(None)
        .into_vec()
        .map_err(|e| ColdkeyError::Format(format!("base58check: {e}")))?;

    if data.len() != 1 + RECORD_LEN {
        return Err(ColdkeyError::Format(format!(
            "decoded to {} bytes (expected {})",
            data.len(),
            1 + RECORD_LEN
        )));
    }
    if data[0] != RECORD_VERSION {
        return Err(ColdkeyError::Format(format!(
            "version byte {:#04x} (expected {RECORD_VERSION:#04x})",
            data[0]
        )));
    }
    if data[1] != RECORD_TYPE_NON_EC && data[1] != RECORD_TYPE_EC {
        return Err(ColdkeyError::Format(format!(
            "record type byte {:#04x}",
            data[1]
        )));
    }

    let mut checksum = [0u8; CHECKSUM_SIZE];
    checksum.copy_from_slice(&data[3..3 + CHECKSUM_SIZE]);
    let mut payload = [0u8; KEY_SIZE];
    payload.copy_from_slice(&data[3 + CHECKSUM_SIZE..]);

    Ok(KeyRecord {
        flag: data[2],
        checksum,
        payload,
    })
}

/// Serialize a non-EC record to its Base58Check text form.
pub fn encode(flag: u8, checksum: &[u8; CHECKSUM_SIZE], payload: &[u8; KEY_SIZE]) -> String {
    let mut buf = [0u8; 1 + RECORD_LEN];
    buf[0] = RECORD_VERSION;
    buf[1] = RECORD_TYPE_NON_EC;
    buf[2] = flag;
    buf[3..3 + CHECKSUM_SIZE].copy_from_slice(checksum);
    buf[3 + CHECKSUM_SIZE..].copy_from_slice(payload);
    bs58::encode(&buf).with_check().into_string()
}
