//! Name hashing and program-derived address search.

use curve25519_dalek::edwards::CompressedEdwardsY;
use sha2::{Digest, Sha256};

use crate::constants::{HASH_PREFIX, MAX_SEEDS, MAX_SEED_LEN, NAME_PROGRAM_ID, PDA_MARKER};
use crate::{Pubkey, Result, SnsError};

/// Hash a name the way the name service program does:
/// `SHA-256("SPL Name Service" ‖ name)`.
pub fn hash_name(name: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(HASH_PREFIX.as_bytes());
    hasher.update(name.as_bytes());
    hasher.finalize().into()
}

/// Whether 32 bytes decompress to a point on the Ed25519 curve.
pub fn bytes_are_curve_point(bytes: &[u8; 32]) -> bool {
    CompressedEdwardsY(*bytes).decompress().is_some()
}

/// Compute the program address for a complete seed list (bump included).
///
/// Fails with [`SnsError::SeedTooLong`] or [`SnsError::MaxSeedsExceeded`] on
/// oversized input. An on-curve hash yields `Ok(None)`.
pub fn create_program_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<Option<Pubkey>> {
    if seeds.len() > MAX_SEEDS {
        return Err(SnsError::MaxSeedsExceeded { count: seeds.len() });
    }
    if let Some(seed) = seeds.iter().find(|seed| seed.len() > MAX_SEED_LEN) {
        return Err(SnsError::SeedTooLong { len: seed.len() });
    }

    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update(program_id.to_bytes());
    hasher.update(PDA_MARKER);
    let hash: [u8; 32] = hasher.finalize().into();

    if bytes_are_curve_point(&hash) {
        return Ok(None);
    }
    Ok(Some(Pubkey::new_from_array(hash)))
}

/// Find the canonical program address: the highest bump in `255..=0` whose
/// hash is off the curve.
pub fn find_program_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    // the bump takes one seed slot
    if seeds.len() + 1 > MAX_SEEDS {
        return Err(SnsError::MaxSeedsExceeded {
            count: seeds.len() + 1,
        });
    }

    for bump in (0..=u8::MAX).rev() {
        let bump_seed = [bump];
        let mut with_bump: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 1);
        with_bump.extend_from_slice(seeds);
        with_bump.push(&bump_seed);
        if let Some(address) = create_program_address(&with_bump, program_id)? {
            return Ok((address, bump));
        }
    }
    Err(SnsError::NoValidAddressFound)
}

/// Derive a name account address from a hashed name.
///
/// Seeds are `[hash, class, parent]`, absent keys replaced by 32 zero bytes.
pub fn derive_address(
    hashed_name: &[u8; 32],
    parent: Option<&Pubkey>,
    class: Option<&Pubkey>,
) -> Result<Pubkey> {
    let zero = Pubkey::default();
    let class = class.unwrap_or(&zero);
    let parent = parent.unwrap_or(&zero);
    let seeds: [&[u8]; 3] = [hashed_name, class.as_ref(), parent.as_ref()];
    let (address, _bump) = find_program_address(&seeds, &NAME_PROGRAM_ID)?;
    Ok(address)
}
