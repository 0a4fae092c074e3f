//! Right-of-association checks.
//!
//! All checks return `bool`: a signature that does not verify is an expected
//! outcome, and malformed input (wrong lengths, bad recovery byte) simply
//! fails the check.

use ed25519_dalek::{Signature as Ed25519Signature, Verifier, VerifyingKey as Ed25519Key};
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey as EcdsaKey};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::constants::ROA_MESSAGE_PREFIX;
use crate::record::Record;
use crate::state::{RecordState, Validation};
use crate::Pubkey;

/// Outcome of checking a record v2 account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordValidity {
    /// Validated by the current domain owner and, where needed, by the
    /// record's own key.
    Valid,
    /// The right of association does not match the record content.
    Invalid,
    /// The domain changed owner since the record was validated.
    Stale,
}

/// Verify an Ed25519 signature. Malformed keys or signatures return `false`.
pub fn verify_sol_record_signature(message: &[u8], signature: &[u8], signer: &Pubkey) -> bool {
    let Ok(signature) = Ed25519Signature::from_slice(signature) else {
        return false;
    };
    let Ok(key) = Ed25519Key::from_bytes(&signer.to_bytes()) else {
        return false;
    };
    key.verify(message, &signature).is_ok()
}

/// Message the domain owner signs for a v1 `SOL` record: the ASCII lowercase
/// hex of `content ‖ record_key`.
pub fn sol_record_message(content: &Pubkey, record_key: &Pubkey) -> Vec<u8> {
    let mut bytes = [0u8; 64];
    bytes[..32].copy_from_slice(&content.to_bytes());
    bytes[32..].copy_from_slice(&record_key.to_bytes());
    hex::encode(bytes).into_bytes()
}

/// Message signed by an Ethereum key to prove a right of association.
pub fn ethereum_roa_message(domain: &str, record: Record) -> String {
    format!("{ROA_MESSAGE_PREFIX}{record}.{domain}")
}

/// Verify an Ethereum right of association.
///
/// `signature` is `r ‖ s ‖ v` (65 bytes, `v` in `{27, 28}`) over the
/// Keccak-256 hash of `"SNS ROA: {record}.{domain}"`; `expected_pubkey` is the
/// 64-byte uncompressed secp256k1 key without its `0x04` tag.
pub fn verify_ethereum_roa(
    domain: &str,
    record: Record,
    signature: &[u8],
    expected_pubkey: &[u8],
) -> bool {
    if signature.len() != 65 || expected_pubkey.len() != 64 {
        return false;
    }
    let v = signature[64];
    if v != 27 && v != 28 {
        return false;
    }

    let Ok(mut ecdsa_signature) = EcdsaSignature::from_slice(&signature[..64]) else {
        return false;
    };
    let Some(mut recovery_id) = RecoveryId::from_byte(v - 27) else {
        return false;
    };
    // high-s signatures recover the same key once s and the parity are flipped
    if let Some(normalized) = ecdsa_signature.normalize_s() {
        ecdsa_signature = normalized;
        recovery_id = RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced());
    }

    let digest = Keccak256::digest(ethereum_roa_message(domain, record).as_bytes());
    let Ok(recovered) = EcdsaKey::recover_from_prehash(&digest, &ecdsa_signature, recovery_id)
    else {
        return false;
    };
    recovered.to_encoded_point(false).as_bytes()[1..] == *expected_pubkey
}

/// Ethereum address of an uncompressed secp256k1 key (64 bytes, no tag).
pub fn ethereum_address(pubkey: &[u8; 64]) -> [u8; 20] {
    let hash = Keccak256::digest(pubkey);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// True when the record was validated by `domain_owner` with a Solana
/// signature. Any other owner, or any other mode, makes the record stale.
pub fn verify_staleness(domain_owner: &Pubkey, state: &RecordState) -> bool {
    state.header.staleness_validation == Validation::Solana
        && state.staleness_id == domain_owner.to_bytes()
}

/// True when the right of association was signed by `verifier` with the
/// signature scheme the record type requires.
pub fn verify_right_of_association(state: &RecordState, record: Record, verifier: &[u8]) -> bool {
    let expected_mode = if record.uses_ethereum_roa() {
        Validation::Ethereum
    } else {
        Validation::Solana
    };
    state.header.right_of_association_validation == expected_mode
        && state.roa_id.as_slice() == verifier
}

/// Classify a record v2 account against the current domain owner.
///
/// Staleness is checked first. Self-signed records (`SOL`, EVM addresses,
/// `INJ`) must additionally carry a right of association signed by the key
/// they contain.
pub fn record_validity(record: Record, state: &RecordState, domain_owner: &Pubkey) -> RecordValidity {
    if !verify_staleness(domain_owner, state) {
        return RecordValidity::Stale;
    }
    if record.is_self_signed() && !verify_right_of_association(state, record, &state.content) {
        return RecordValidity::Invalid;
    }
    RecordValidity::Valid
}
