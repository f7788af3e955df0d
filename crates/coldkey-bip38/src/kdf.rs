//! KDF stage: the three fixed scrypt derivations of the protection standard
//!
//! The cost triples are protocol constants, not tuning knobs — any deviation
//! produces records no other implementation can open. Passphrases are NFC
//! normalized before hashing, per the published standard.

use scrypt::Params;
use secrecy::{ExposeSecret, SecretString};
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, Zeroizing};

use crate::curve::SecretScalar;
use crate::{CHECKSUM_SIZE, KEY_SIZE, OWNER_SALT_SIZE};

/// log2(N) for the passphrase-keyed stages (N = 16384).
pub const WRAP_LOG_N: u8 = 14;
/// Block size for the passphrase-keyed stages.
pub const WRAP_R: u32 = 8;
/// Parallelism for the passphrase-keyed stages.
pub const WRAP_P: u32 = 8;

/// log2(N) for the passpoint stage (N = 1024).
pub const POINT_LOG_N: u8 = 10;
/// Block size for the passpoint stage.
pub const POINT_R: u32 = 1;
/// Parallelism for the passpoint stage.
pub const POINT_P: u32 = 1;

/// A 64-byte derivation split into a 32-byte XOR mask and a 32-byte AES key.
///
/// Zeroized on drop.
pub struct DerivedMaterial {
    mask: [u8; KEY_SIZE],
    key: [u8; KEY_SIZE],
}

impl DerivedMaterial {
    fn split(okm: &[u8; 2 * KEY_SIZE]) -> Self {
        let mut mask = [0u8; KEY_SIZE];
        let mut key = [0u8; KEY_SIZE];
        mask.copy_from_slice(&okm[..KEY_SIZE]);
        key.copy_from_slice(&okm[KEY_SIZE..]);
        Self { mask, key }
    }

    pub fn mask(&self) -> &[u8; KEY_SIZE] {
        &self.mask
    }

    pub fn key(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

impl Drop for DerivedMaterial {
    fn drop(&mut self) {
        self.mask.zeroize();
        self.key.zeroize();
    }
}

impl std::fmt::Debug for DerivedMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedMaterial")
            .field("mask", &"[REDACTED]")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// NFC-normalize a passphrase into a scoped, zeroized buffer.
fn normalized(passphrase: &SecretString) -> Zeroizing<String> {
    Zeroizing::new(passphrase.expose_secret().nfc().collect::<String>())
}

/// Stage a (non-EC): passphrase + 4-byte address checksum → mask ‖ key.
pub fn derive_wrap_material(
    passphrase: &SecretString,
    checksum: &[u8; CHECKSUM_SIZE],
) -> anyhow::Result<DerivedMaterial> {
    let pass = normalized(passphrase);
    let params = Params::new(WRAP_LOG_N, WRAP_R, WRAP_P, 2 * KEY_SIZE)
        .map_err(|e| anyhow::anyhow!("scrypt params: {e}"))?;

    let mut okm = Zeroizing::new([0u8; 2 * KEY_SIZE]);
    scrypt::scrypt(pass.as_bytes(), checksum, &params, &mut okm[..])
        .map_err(|e| anyhow::anyhow!("scrypt: {e}"))?;
    Ok(DerivedMaterial::split(&okm))
}

/// Stage b (EC): passphrase + 8-byte owner salt → passfactor scalar.
pub fn derive_pass_factor(
    passphrase: &SecretString,
    owner_salt: &[u8; OWNER_SALT_SIZE],
) -> anyhow::Result<SecretScalar> {
    let pass = normalized(passphrase);
    let params = Params::new(WRAP_LOG_N, WRAP_R, WRAP_P, KEY_SIZE)
        .map_err(|e| anyhow::anyhow!("scrypt params: {e}"))?;

    let mut okm = Zeroizing::new([0u8; KEY_SIZE]);
    scrypt::scrypt(pass.as_bytes(), owner_salt, &params, &mut okm[..])
        .map_err(|e| anyhow::anyhow!("scrypt: {e}"))?;
    Ok(SecretScalar::from_bytes(*okm))
}

/// Stage c (EC): serialized passpoint, salted with checksum ‖ owner salt →
/// mask ‖ key for the seed decryption. Cheap parameters by design — the
/// expensive work already happened in stage b.
pub fn derive_point_material(
    pass_point: &[u8; 33],
    checksum: &[u8; CHECKSUM_SIZE],
    owner_salt: &[u8; OWNER_SALT_SIZE],
) -> anyhow::Result<DerivedMaterial> {
    let mut salt = [0u8; CHECKSUM_SIZE + OWNER_SALT_SIZE];
    salt[..CHECKSUM_SIZE].copy_from_slice(checksum);
    salt[CHECKSUM_SIZE..].copy_from_slice(owner_salt);

    let params = Params::new(POINT_LOG_N, POINT_R, POINT_P, 2 * KEY_SIZE)
        .map_err(|e| anyhow::anyhow!("scrypt params: {e}"))?;

    let mut okm = Zeroizing::new([0u8; 2 * KEY_SIZE]);
    scrypt::scrypt(pass_point, &salt, &params, &mut okm[..])
        .map_err(|e| anyhow::anyhow!("scrypt: {e}"))?;
    Ok(DerivedMaterial::split(&okm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn test_wrap_material_deterministic() {
        let pass = SecretString::from("TestingOneTwoThree");
        let checksum = [0x11, 0x22, 0x33, 0x44];

        let a = derive_wrap_material(&pass, &checksum).unwrap();
        let b = derive_wrap_material(&pass, &checksum).unwrap();

        assert_eq!(a.mask(), b.mask(), "KDF must be deterministic");
        assert_eq!(a.key(), b.key(), "KDF must be deterministic");
    }

    #[test]
    fn test_wrap_material_salt_sensitivity() {
        let pass = SecretString::from("TestingOneTwoThree");

        let a = derive_wrap_material(&pass, &[1, 2, 3, 4]).unwrap();
        let b = derive_wrap_material(&pass, &[4, 3, 2, 1]).unwrap();

        assert_ne!(a.mask(), b.mask(), "different salts must differ");
    }

    #[test]
    fn test_pass_factor_passphrase_sensitivity() {
        let salt = [9u8; OWNER_SALT_SIZE];

        let a = derive_pass_factor(&SecretString::from("alpha"), &salt).unwrap();
        let b = derive_pass_factor(&SecretString::from("beta"), &salt).unwrap();

        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_point_material_deterministic() {
        let point = [2u8; 33];
        let checksum = [5u8; CHECKSUM_SIZE];
        let salt = [6u8; OWNER_SALT_SIZE];

        let a = derive_point_material(&point, &checksum, &salt).unwrap();
        let b = derive_point_material(&point, &checksum, &salt).unwrap();

        assert_eq!(a.mask(), b.mask());
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_nfc_normalization_vector() {
        // Standard unicode passphrase vector: ϓ␀𐐀💩 composes to these bytes.
        let pass = "\u{03D2}\u{0301}\u{0000}\u{10400}\u{1F4A9}";
        let norm = normalized(&SecretString::from(pass));
        assert_eq!(
            hex::encode(norm.as_bytes()),
            "cf9300f0909080f09f92a9"
        );
    }
}
