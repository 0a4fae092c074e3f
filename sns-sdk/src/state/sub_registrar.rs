//! Sub-registrar accounts.
//!
//! A registrar lets a domain owner sell subdomains through the sub-registrar
//! program. Its address is the program address of `["registrar", domain]`.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use super::layout_error;
use crate::constants::{REGISTRAR_SEED, SUB_REGISTRAR_PROGRAM_ID};
use crate::derivation::find_program_address;
use crate::{Pubkey, Result, SnsError};

/// Account tag, the first byte of every sub-registrar program account.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub enum SubRegistrarTag {
    /// Freshly allocated.
    Uninitialized,
    /// Open registrar.
    Registrar,
    /// Registrar closed by its authority.
    ClosedRegistrar,
    /// Subdomain sold through a registrar.
    SubRecord,
    /// Revoked subdomain.
    ClosedSubRecord,
    /// Mint used to claim an NFT-gated subdomain.
    MintRecord,
}

/// Subdomain price for a label length.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct Price {
    /// Label length this price applies to.
    pub length: u64,
    /// Price in the smallest unit of the fee token.
    pub price: u64,
}

/// Registrar account of a domain.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct Registrar {
    pub tag: SubRegistrarTag,
    /// Bump of the registrar address.
    pub nonce: u8,
    /// Key allowed to update or close the registrar.
    pub authority: Pubkey,
    /// Token account receiving subdomain fees.
    pub fee_account: Pubkey,
    /// Domain whose subdomains are sold.
    pub domain_account: Pubkey,
    pub total_sub_created: u64,
    /// NFT collection required to mint, if gated.
    pub nft_gated_collection: Option<Pubkey>,
    /// Subdomains a single NFT may mint.
    pub max_nft_mint: u8,
    /// Whether the authority may revoke sold subdomains.
    pub allow_revoke: bool,
    pub price_schedule: Vec<Price>,
}

impl Registrar {
    /// Registrar address of `domain` and its bump.
    pub fn find_key(domain: &Pubkey) -> Result<(Pubkey, u8)> {
        let domain_bytes = domain.to_bytes();
        let seeds: [&[u8]; 2] = [REGISTRAR_SEED, &domain_bytes];
        find_program_address(&seeds, &SUB_REGISTRAR_PROGRAM_ID)
    }

    /// Parse registrar account data read from `key`.
    ///
    /// The first byte must be the open registrar tag. Trailing bytes are
    /// ignored.
    pub fn deserialize(key: &Pubkey, data: &[u8]) -> Result<Self> {
        if data.first() != Some(&(SubRegistrarTag::Registrar as u8)) {
            return Err(SnsError::InvalidSubRegistrar(*key));
        }
        let mut rest = data;
        <Self as BorshDeserialize>::deserialize(&mut rest)
            .map_err(|err| layout_error("sub-registrar", err))
    }

    /// Account bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        borsh::to_vec(self).map_err(|err| layout_error("sub-registrar", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Registrar {
        Registrar {
            tag: SubRegistrarTag::Registrar,
            nonce: 254,
            authority: Pubkey::new_from_array([1; 32]),
            fee_account: Pubkey::new_from_array([2; 32]),
            domain_account: Pubkey::new_from_array([3; 32]),
            total_sub_created: 12,
            nft_gated_collection: None,
            max_nft_mint: 0,
            allow_revoke: true,
            price_schedule: vec![
                Price {
                    length: 1,
                    price: 100,
                },
                Price {
                    length: 2,
                    price: 50,
                },
            ],
        }
    }

    #[test]
    fn test_layout() {
        let bytes = sample().to_bytes().unwrap();
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[1], 254);
        assert_eq!(&bytes[2..34], &[1; 32]);
        // tag, nonce, three keys, counter, None, max mint, revoke flag, vec length
        let fixed = 1 + 1 + 96 + 8 + 1 + 1 + 1 + 4;
        assert_eq!(bytes.len(), fixed + 2 * 16);
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut bytes = sample().to_bytes().unwrap();
        bytes.extend([0u8; 64]);
        let key = Pubkey::new_from_array([9; 32]);
        assert_eq!(Registrar::deserialize(&key, &bytes).unwrap(), sample());
    }

    #[test]
    fn test_closed_registrar_rejected() {
        let mut bytes = sample().to_bytes().unwrap();
        bytes[0] = SubRegistrarTag::ClosedRegistrar as u8;
        let key = Pubkey::new_from_array([9; 32]);
        assert!(matches!(
            Registrar::deserialize(&key, &bytes),
            Err(SnsError::InvalidSubRegistrar(k)) if k == key
        ));
        assert!(matches!(
            Registrar::deserialize(&key, &[]),
            Err(SnsError::InvalidSubRegistrar(_))
        ));
    }

    #[test]
    fn test_truncated_registrar_rejected() {
        let bytes = sample().to_bytes().unwrap();
        let key = Pubkey::default();
        assert!(matches!(
            Registrar::deserialize(&key, &bytes[..40]),
            Err(SnsError::InvalidAccountData(_))
        ));
    }

    #[test]
    fn test_registrar_key_is_off_curve_and_per_domain() {
        let (first, _) = Registrar::find_key(&Pubkey::new_from_array([1; 32])).unwrap();
        let (second, _) = Registrar::find_key(&Pubkey::new_from_array([2; 32])).unwrap();
        assert_ne!(first, second);
        assert!(!first.is_on_curve());
    }
}
