//! Orchestrator: the two public entry points, `encrypt` and `decrypt`
//!
//! Encryption only ever produces non-EC records; decryption dispatches on
//! the flag byte and handles both modes. Every decryption path ends in the
//! same checksum verification — no key leaves this module unverified.

use coldkey_core::{ColdkeyError, ColdkeyResult, Network};
use secrecy::SecretString;
use tracing::debug;

use crate::address::address_checksum;
use crate::curve::{factor_b, CurveOps, Secp256k1Engine, SecretScalar};
use crate::{cipher, kdf, wire};
use crate::{CHECKSUM_SIZE, OWNER_SALT_SIZE, SEED_SIZE};

/// Flag byte for a non-EC record with an uncompressed public key.
const FLAG_NON_EC: u8 = 0xC0;
/// Compression bit.
const FLAG_COMPRESSED: u8 = 0x20;
/// Lot/sequence bit (EC-multiply mode only; unsupported).
const FLAG_LOT_SEQUENCE: u8 = 0x04;

/// Address checksum for a curve point under a compression flag.
fn point_checksum<C: CurveOps>(
    engine: &C,
    point: &C::Point,
    compressed: bool,
    network: Network,
) -> ColdkeyResult<[u8; CHECKSUM_SIZE]> {
    if compressed {
        address_checksum(&engine.serialize_compressed(point)?, network)
    } else {
        address_checksum(&engine.serialize_uncompressed(point)?, network)
    }
}

/// Encrypt a private key under a passphrase, producing the Base58Check
/// record text. Non-EC mode only.
pub fn encrypt_with<C: CurveOps>(
    engine: &C,
    private_key: &SecretScalar,
    compressed: bool,
    passphrase: &SecretString,
    network: Network,
) -> ColdkeyResult<String> {
    let point = engine.scalar_base_multiply(private_key)?;
    let checksum = point_checksum(engine, &point, compressed, network)?;

    let flag = if compressed {
        FLAG_NON_EC | FLAG_COMPRESSED
    } else {
        FLAG_NON_EC
    };

    let material = kdf::derive_wrap_material(passphrase, &checksum)?;
    let payload = cipher::encrypt_masked(private_key.as_bytes(), material.mask(), material.key())?;

    debug!(compressed, ?network, "encrypted private key record");
    Ok(wire::encode(flag, &checksum, &payload))
}

/// Decrypt a record back to its private key and compression flag.
///
/// Returns [`ColdkeyError::WrongPassphrase`] whenever the recomputed address
/// checksum disagrees with the record — a wrong passphrase and a corrupted
/// payload are indistinguishable by design.
pub fn decrypt_with<C: CurveOps>(
    engine: &C,
    text: &str,
    passphrase: &SecretString,
    network: Network,
) -> ColdkeyResult<(SecretScalar, bool)> {
    let record = wire::decode(text)?;
    let compressed = record.is_compressed();

    let candidate = if record.is_non_ec() {
        debug!(compressed, "decrypting non-EC record");
        let material = kdf::derive_wrap_material(passphrase, &record.checksum)?;
        let plain = cipher::decrypt_masked(&record.payload, material.mask(), material.key())?;
        SecretScalar::from_bytes(*plain)
    } else {
        if record.flag & FLAG_LOT_SEQUENCE != 0 {
            return Err(ColdkeyError::Unsupported(
                "lot/sequence numbers in EC-multiply records",
            ));
        }
        debug!(compressed, "decrypting EC-multiply record");

        let mut owner_salt = [0u8; OWNER_SALT_SIZE];
        owner_salt.copy_from_slice(&record.payload[..OWNER_SALT_SIZE]);

        let pass_factor = kdf::derive_pass_factor(passphrase, &owner_salt)?;
        let pass_point = engine
            .scalar_base_multiply(&pass_factor)
            .map_err(|_| ColdkeyError::WrongPassphrase)?;
        let pass_point_bytes = engine.serialize_compressed(&pass_point)?;

        let material =
            kdf::derive_point_material(&pass_point_bytes, &record.checksum, &owner_salt)?;

        let mut seed_cipher = [0u8; SEED_SIZE];
        seed_cipher.copy_from_slice(&record.payload[OWNER_SALT_SIZE..]);
        let seed = cipher::decrypt_masked24(&seed_cipher, material.mask(), material.key())?;

        engine
            .scalar_multiply_mod_order(&pass_factor, &factor_b(&seed))
            .map_err(|_| ColdkeyError::WrongPassphrase)?
    };

    // The candidate only becomes a key if it reproduces the stored checksum.
    let point = engine
        .scalar_base_multiply(&candidate)
        .map_err(|_| ColdkeyError::WrongPassphrase)?;
    let checksum = point_checksum(engine, &point, compressed, network)?;
    if checksum != record.checksum {
        return Err(ColdkeyError::WrongPassphrase);
    }

    Ok((candidate, compressed))
}

/// [`encrypt_with`] using the default k256 engine.
pub fn encrypt(
    private_key: &SecretScalar,
    compressed: bool,
    passphrase: &SecretString,
    network: Network,
) -> ColdkeyResult<String> {
    encrypt_with(&Secp256k1Engine::new(), private_key, compressed, passphrase, network)
}

/// [`decrypt_with`] using the default k256 engine.
pub fn decrypt(
    text: &str,
    passphrase: &SecretString,
    network: Network,
) -> ColdkeyResult<(SecretScalar, bool)> {
    decrypt_with(&Secp256k1Engine::new(), text, passphrase, network)
}
