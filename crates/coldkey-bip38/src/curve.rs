//! EC scalar engine: secp256k1 base-point multiplication and mod-order math
//!
//! Curve access goes through the [`CurveOps`] capability trait so the
//! orchestrator never touches a concrete curve library; [`Secp256k1Engine`]
//! backs it with k256.

use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::elliptic_curve::{Field, PrimeField};
use k256::{AffinePoint, FieldBytes, ProjectivePoint, Scalar, U256};
use zeroize::Zeroize;

use crate::address::sha256d;
use crate::{KEY_SIZE, SEED_SIZE};

/// A 256-bit private-key scalar, big-endian.
///
/// Zeroized on drop to prevent secrets lingering in memory.
#[derive(Clone)]
pub struct SecretScalar {
    bytes: [u8; KEY_SIZE],
}

impl SecretScalar {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for SecretScalar {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for SecretScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretScalar")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Curve operations the orchestrator needs; any standard secp256k1 library
/// can implement this.
pub trait CurveOps {
    type Point;

    /// Base-point multiplication. Fails on a zero or out-of-range scalar.
    fn scalar_base_multiply(&self, scalar: &SecretScalar) -> anyhow::Result<Self::Point>;

    /// `(a · b) mod n` over the curve group order. `b` is reduced mod n
    /// first (it comes out of a hash, not out of the scalar field); a zero
    /// product is an error, never a returned key.
    fn scalar_multiply_mod_order(
        &self,
        a: &SecretScalar,
        b: &[u8; KEY_SIZE],
    ) -> anyhow::Result<SecretScalar>;

    /// 33-byte SEC1 compressed encoding.
    fn serialize_compressed(&self, point: &Self::Point) -> anyhow::Result<[u8; 33]>;

    /// 65-byte SEC1 uncompressed encoding.
    fn serialize_uncompressed(&self, point: &Self::Point) -> anyhow::Result<[u8; 65]>;
}

/// k256-backed secp256k1 engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct Secp256k1Engine;

impl Secp256k1Engine {
    pub fn new() -> Self {
        Self
    }
}

/// Parse an exact (non-reduced) scalar; rejects zero and values ≥ n.
fn exact_scalar(bytes: &[u8; KEY_SIZE]) -> anyhow::Result<Scalar> {
    let scalar = Option::<Scalar>::from(Scalar::from_repr(FieldBytes::from(*bytes)))
        .ok_or_else(|| anyhow::anyhow!("scalar out of curve order range"))?;
    if bool::from(scalar.is_zero()) {
        anyhow::bail!("zero scalar");
    }
    Ok(scalar)
}

impl CurveOps for Secp256k1Engine {
    type Point = AffinePoint;

    fn scalar_base_multiply(&self, scalar: &SecretScalar) -> anyhow::Result<AffinePoint> {
        let s = exact_scalar(scalar.as_bytes())?;
        Ok((ProjectivePoint::GENERATOR * s).to_affine())
    }

    fn scalar_multiply_mod_order(
        &self,
        a: &SecretScalar,
        b: &[u8; KEY_SIZE],
    ) -> anyhow::Result<SecretScalar> {
        let a = exact_scalar(a.as_bytes())?;
        let b = <Scalar as Reduce<U256>>::reduce_bytes(&FieldBytes::from(*b));
        let product = a * b;
        if bool::from(product.is_zero()) {
            anyhow::bail!("zero scalar product");
        }
        Ok(SecretScalar::from_bytes(product.to_bytes().into()))
    }

    fn serialize_compressed(&self, point: &AffinePoint) -> anyhow::Result<[u8; 33]> {
        point
            .to_encoded_point(true)
            .as_bytes()
            .try_into()
            .map_err(|_| anyhow::anyhow!("point has no 33-byte encoding"))
    }

    fn serialize_uncompressed(&self, point: &AffinePoint) -> anyhow::Result<[u8; 65]> {
        point
            .to_encoded_point(false)
            .as_bytes()
            .try_into()
            .map_err(|_| anyhow::anyhow!("point has no 65-byte encoding"))
    }
}

/// The EC-multiply blinding factor: double SHA-256 of the decrypted seed.
pub fn factor_b(seed: &[u8; SEED_SIZE]) -> [u8; KEY_SIZE] {
    sha256d(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(n: u8) -> SecretScalar {
        let mut bytes = [0u8; KEY_SIZE];
        bytes[KEY_SIZE - 1] = n;
        SecretScalar::from_bytes(bytes)
    }

    #[test]
    fn test_base_multiply_generator() {
        let engine = Secp256k1Engine::new();
        let point = engine.scalar_base_multiply(&scalar(1)).unwrap();

        let compressed = engine.serialize_compressed(&point).unwrap();
        assert_eq!(
            hex::encode(compressed),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );

        let uncompressed = engine.serialize_uncompressed(&point).unwrap();
        assert_eq!(uncompressed[0], 0x04);
        assert_eq!(uncompressed[1..33], compressed[1..33]);
    }

    #[test]
    fn test_zero_scalar_rejected() {
        let engine = Secp256k1Engine::new();
        assert!(engine
            .scalar_base_multiply(&SecretScalar::from_bytes([0u8; KEY_SIZE]))
            .is_err());
    }

    #[test]
    fn test_mod_multiply_small_values() {
        let engine = Secp256k1Engine::new();
        let product = engine
            .scalar_multiply_mod_order(&scalar(2), scalar(3).as_bytes())
            .unwrap();
        assert_eq!(product.as_bytes(), scalar(6).as_bytes());
    }

    #[test]
    fn test_mod_multiply_reduces_second_operand() {
        // n + 2 must reduce to 2 before the multiplication.
        let over_order: [u8; KEY_SIZE] =
            hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364143")
                .unwrap()
                .try_into()
                .unwrap();

        let engine = Secp256k1Engine::new();
        let product = engine
            .scalar_multiply_mod_order(&scalar(1), &over_order)
            .unwrap();
        assert_eq!(product.as_bytes(), scalar(2).as_bytes());
    }

    #[test]
    fn test_mod_multiply_zero_product_rejected() {
        // b == n reduces to zero; the engine must refuse to return it.
        let order: [u8; KEY_SIZE] =
            hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141")
                .unwrap()
                .try_into()
                .unwrap();

        let engine = Secp256k1Engine::new();
        assert!(engine.scalar_multiply_mod_order(&scalar(1), &order).is_err());
    }

    #[test]
    fn test_factor_b_deterministic() {
        let seed = [7u8; SEED_SIZE];
        assert_eq!(factor_b(&seed), factor_b(&seed));
        assert_ne!(factor_b(&seed), factor_b(&[8u8; SEED_SIZE]));
    }
}
