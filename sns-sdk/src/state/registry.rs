//! Name registry accounts.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use super::layout_error;
use crate::constants::NAME_REGISTRY_HEADER_LEN;
use crate::{Pubkey, Result, SnsError};

#[derive(BorshSerialize, BorshDeserialize)]
struct RegistryHeader {
    parent_name: Pubkey,
    owner: Pubkey,
    class: Pubkey,
}

/// Snapshot of a name registry account: the 96-byte header followed by the
/// content region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRegistryState {
    /// Parent name account; the `.sol` TLD for root domains.
    pub parent_name: Pubkey,
    /// Current owner.
    pub owner: Pubkey,
    /// Class key, all zeros when unused.
    pub class: Pubkey,
    /// Content region, whatever size was allocated at creation.
    pub data: Vec<u8>,
}

impl NameRegistryState {
    /// Header length in bytes.
    pub const HEADER_LEN: usize = NAME_REGISTRY_HEADER_LEN;

    /// Parse raw account data.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::HEADER_LEN {
            return Err(SnsError::InvalidAccountData(format!(
                "name registry account is {} bytes, header needs {}",
                bytes.len(),
                Self::HEADER_LEN
            )));
        }
        let mut rest = bytes;
        let header = RegistryHeader::deserialize(&mut rest)
            .map_err(|err| layout_error("name registry", err))?;
        Ok(Self {
            parent_name: header.parent_name,
            owner: header.owner,
            class: header.class,
            data: rest.to_vec(),
        })
    }

    /// Account bytes, header first.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let header = RegistryHeader {
            parent_name: self.parent_name,
            owner: self.owner,
            class: self.class,
        };
        let mut bytes = Vec::with_capacity(Self::HEADER_LEN + self.data.len());
        header
            .serialize(&mut bytes)
            .map_err(|err| layout_error("name registry", err))?;
        bytes.extend_from_slice(&self.data);
        Ok(bytes)
    }

    /// True when the content region is empty or all zeros.
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|byte| *byte == 0)
    }
}
