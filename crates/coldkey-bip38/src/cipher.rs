//! Masked block-cipher engine: XOR masking over raw AES-256 single blocks
//!
//! No chaining mode: the standard encrypts a 32-byte buffer as two
//! independent 16-byte blocks. Masking is asymmetric on purpose — XOR
//! *before* encryption, XOR *after* decryption — and the 24-byte EC variant
//! splices half of the second plaintext block back into the first block's
//! ciphertext. Frozen standard behavior; reproduce exactly.

use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;
use zeroize::Zeroizing;

use crate::{KEY_SIZE, SEED_SIZE};

const BLOCK_SIZE: usize = 16;

fn block_cipher(key: &[u8; KEY_SIZE]) -> anyhow::Result<Aes256> {
    Aes256::new_from_slice(key).map_err(|e| anyhow::anyhow!("AES-256 key: {e}"))
}

/// XOR the plaintext with the mask, then encrypt each 16-byte half as an
/// independent block.
pub fn encrypt_masked(
    plain: &[u8; KEY_SIZE],
    mask: &[u8; KEY_SIZE],
    key: &[u8; KEY_SIZE],
) -> anyhow::Result<[u8; KEY_SIZE]> {
    let aes = block_cipher(key)?;

    let mut buf = Zeroizing::new(*plain);
    for (b, m) in buf.iter_mut().zip(mask) {
        *b ^= m;
    }
    aes.encrypt_block(GenericArray::from_mut_slice(&mut buf[..BLOCK_SIZE]));
    aes.encrypt_block(GenericArray::from_mut_slice(&mut buf[BLOCK_SIZE..]));

    // buf now holds ciphertext only
    Ok(*buf)
}

/// Decrypt each 16-byte half as an independent block, then XOR with the
/// mask — the mirror image of [`encrypt_masked`], applied in the opposite
/// order.
pub fn decrypt_masked(
    cipher: &[u8; KEY_SIZE],
    mask: &[u8; KEY_SIZE],
    key: &[u8; KEY_SIZE],
) -> anyhow::Result<Zeroizing<[u8; KEY_SIZE]>> {
    let aes = block_cipher(key)?;

    let mut buf = Zeroizing::new(*cipher);
    aes.decrypt_block(GenericArray::from_mut_slice(&mut buf[..BLOCK_SIZE]));
    aes.decrypt_block(GenericArray::from_mut_slice(&mut buf[BLOCK_SIZE..]));
    for (b, m) in buf.iter_mut().zip(mask) {
        *b ^= m;
    }
    Ok(buf)
}

/// Interleaved two-block decryption of a 24-byte EC-multiply seed.
///
/// The record stores only the first 8 bytes of the first ciphertext block;
/// the missing half rides inside the second block's plaintext. Decrypt the
/// second block first, unmask it, splice its first 8 bytes back in as
/// ciphertext for the first block, then decrypt and unmask that.
pub fn decrypt_masked24(
    cipher: &[u8; SEED_SIZE],
    mask: &[u8; KEY_SIZE],
    key: &[u8; KEY_SIZE],
) -> anyhow::Result<Zeroizing<[u8; SEED_SIZE]>> {
    let aes = block_cipher(key)?;

    let mut second = Zeroizing::new([0u8; BLOCK_SIZE]);
    second.copy_from_slice(&cipher[8..]);
    aes.decrypt_block(GenericArray::from_mut_slice(&mut second[..]));
    for (b, m) in second.iter_mut().zip(&mask[BLOCK_SIZE..]) {
        *b ^= m;
    }
    // second[..8] is the spliced ciphertext half, second[8..] is plain[16..24]

    let mut first = Zeroizing::new([0u8; BLOCK_SIZE]);
    first[..8].copy_from_slice(&cipher[..8]);
    first[8..].copy_from_slice(&second[..8]);
    aes.decrypt_block(GenericArray::from_mut_slice(&mut first[..]));
    for (b, m) in first.iter_mut().zip(&mask[..BLOCK_SIZE]) {
        *b ^= m;
    }

    let mut plain = Zeroizing::new([0u8; SEED_SIZE]);
    plain[..BLOCK_SIZE].copy_from_slice(first.as_ref());
    plain[BLOCK_SIZE..].copy_from_slice(&second[8..]);
    Ok(plain)
}
