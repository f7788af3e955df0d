//! coldkey-bip38: passphrase protection for secp256k1 private keys
//!
//! Implements the BIP38 binary standard: a private key is encrypted under a
//! passphrase with a deliberately expensive scrypt derivation, then wrapped
//! in a Base58Check record that carries a 4-byte address checksum used to
//! verify the passphrase on decryption.
//!
//! Record layout (39 bytes before the Base58Check wrapper):
//! ```text
//! 0x01 | type | flag | checksum (4) | payload (32)
//!        0x42 = non-EC-multiply, 0x43 = EC-multiply
//!        flag 0xC0/0xE0 = non-EC (0x20 = compressed pubkey)
//!        payload non-EC: masked AES-encrypted key scalar
//!        payload EC:     owner salt (8) | masked AES-encrypted seed (24)
//! ```
//!
//! Encryption always produces non-EC records. Decryption handles both modes;
//! EC-multiply records carrying lot/sequence numbers are rejected rather
//! than silently mis-decrypted.

pub mod address;
pub mod cipher;
pub mod curve;
pub mod kdf;
pub mod protect;
pub mod wire;

pub use curve::{CurveOps, Secp256k1Engine, SecretScalar};
pub use kdf::DerivedMaterial;
pub use protect::{decrypt, decrypt_with, encrypt, encrypt_with};
pub use wire::KeyRecord;

/// Size of a private-key scalar and of each KDF mask/key half.
pub const KEY_SIZE: usize = 32;

/// Size of the inner address-derived checksum.
pub const CHECKSUM_SIZE: usize = 4;

/// Size of the owner salt in an EC-multiply payload.
pub const OWNER_SALT_SIZE: usize = 8;

/// Size of the masked seed in an EC-multiply payload.
pub const SEED_SIZE: usize = 24;
