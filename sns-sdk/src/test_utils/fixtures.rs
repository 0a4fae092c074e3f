//! Account fixtures and deterministic keys.

use ed25519_dalek::Signer;
use sha3::{Digest, Keccak256};

use crate::record::Record;
use crate::state::{serialize_reverse, NameRegistryState};
use crate::verification::{ethereum_roa_message, sol_record_message};
use crate::Pubkey;

/// Deterministic Ed25519 keypair; different seeds give different keys.
pub fn test_keypair(seed: u8) -> ed25519_dalek::SigningKey {
    ed25519_dalek::SigningKey::from_bytes(&[seed; 32])
}

/// Address of an Ed25519 keypair.
pub fn keypair_pubkey(keypair: &ed25519_dalek::SigningKey) -> Pubkey {
    Pubkey::new_from_array(keypair.verifying_key().to_bytes())
}

/// Deterministic secp256k1 key. `seed` must not be zero.
pub fn test_ethereum_key(seed: u8) -> k256::ecdsa::SigningKey {
    k256::ecdsa::SigningKey::from_slice(&[seed; 32]).expect("non-zero seed is a valid scalar")
}

/// Uncompressed public key without the `0x04` tag.
pub fn ethereum_pubkey(key: &k256::ecdsa::SigningKey) -> [u8; 64] {
    let point = key.verifying_key().to_encoded_point(false);
    let mut pubkey = [0u8; 64];
    pubkey.copy_from_slice(&point.as_bytes()[1..]);
    pubkey
}

/// `r ‖ s ‖ v` signature of the right-of-association message, `v` in `{27, 28}`.
pub fn sign_ethereum_roa(key: &k256::ecdsa::SigningKey, domain: &str, record: Record) -> [u8; 65] {
    let digest = Keccak256::digest(ethereum_roa_message(domain, record).as_bytes());
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(&digest)
        .expect("prehash signing does not fail for 32-byte digests");
    let mut bytes = [0u8; 65];
    bytes[..64].copy_from_slice(&signature.to_bytes());
    bytes[64] = recovery_id.to_byte() + 27;
    bytes
}

/// Name registry account bytes.
pub fn registry_account(parent: Pubkey, owner: Pubkey, class: Pubkey, data: Vec<u8>) -> Vec<u8> {
    NameRegistryState {
        parent_name: parent,
        owner,
        class,
        data,
    }
    .to_bytes()
    .expect("registry header encodes")
}

/// Content of a v1 `SOL` record pointing to `target`, signed by `owner`.
pub fn sol_record_v1_data(
    owner: &ed25519_dalek::SigningKey,
    target: &Pubkey,
    record_key: &Pubkey,
) -> Vec<u8> {
    let signature = owner.sign(&sol_record_message(target, record_key));
    let mut data = target.to_bytes().to_vec();
    data.extend_from_slice(&signature.to_bytes());
    data
}

/// Content region of a reverse lookup account.
pub fn reverse_data(name: &str) -> Vec<u8> {
    serialize_reverse(name).expect("reverse name encodes")
}

/// Right-pad `bytes` with zeros to `len`, like an over-allocated account.
pub fn zero_padded(mut bytes: Vec<u8>, len: usize) -> Vec<u8> {
    if bytes.len() < len {
        bytes.resize(len, 0);
    }
    bytes
}
