//! Record v2 accounts.
//!
//! Layout after the 96-byte name registry header:
//!
//! ```text
//! u16 staleness validation | u16 RoA validation | u32 content length  (LE)
//! staleness id | RoA id | content
//! ```
//!
//! Id lengths follow from the validation modes.

use borsh::io::{Error as IoError, ErrorKind, Read, Write};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use super::layout_error;
use super::registry::NameRegistryState;
use crate::constants::RECORD_V2_HEADER_LEN;
use crate::{Pubkey, Result, SnsError};

/// How a record v2 id was validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum Validation {
    /// No validation, empty id.
    None = 0,
    /// Signed by a Solana key.
    Solana = 1,
    /// Signed by an Ethereum key.
    Ethereum = 2,
    /// Solana key written without a signature.
    UnverifiedSolana = 3,
}

impl Validation {
    /// Length of an id validated this way.
    pub fn id_len(self) -> usize {
        match self {
            Self::None => 0,
            Self::Solana | Self::UnverifiedSolana => 32,
            Self::Ethereum => 20,
        }
    }
}

impl TryFrom<u16> for Validation {
    type Error = SnsError;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Solana),
            2 => Ok(Self::Ethereum),
            3 => Ok(Self::UnverifiedSolana),
            other => Err(SnsError::InvalidAccountData(format!(
                "unknown validation mode {other}"
            ))),
        }
    }
}

// Stored as a u16, so the derived one-byte enum tag does not fit.
impl BorshSerialize for Validation {
    fn serialize<W: Write>(&self, writer: &mut W) -> borsh::io::Result<()> {
        BorshSerialize::serialize(&(*self as u16), writer)
    }
}

impl BorshDeserialize for Validation {
    fn deserialize_reader<R: Read>(reader: &mut R) -> borsh::io::Result<Self> {
        let value = u16::deserialize_reader(reader)?;
        Self::try_from(value).map_err(|err| IoError::new(ErrorKind::InvalidData, err.to_string()))
    }
}

/// Fixed header of a record v2 account.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct RecordHeader {
    /// Validation of the staleness id.
    pub staleness_validation: Validation,
    /// Validation of the right-of-association id.
    pub right_of_association_validation: Validation,
    /// Length of the content that follows the ids.
    pub content_length: u32,
}

impl RecordHeader {
    /// Header length in bytes.
    pub const LEN: usize = RECORD_V2_HEADER_LEN;

    /// Parse the header from the start of `bytes`.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        let mut rest = bytes;
        <Self as BorshDeserialize>::deserialize(&mut rest)
            .map_err(|err| layout_error("record header", err))
    }

    /// Header bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        borsh::to_vec(self).map_err(|err| layout_error("record header", err))
    }
}

/// Snapshot of a record v2 account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordState {
    /// Domain (or subdomain) the record belongs to.
    pub parent_name: Pubkey,
    /// Record account owner.
    pub owner: Pubkey,
    /// Class key, the records program central state.
    pub class: Pubkey,
    /// Validation modes and content length.
    pub header: RecordHeader,
    /// Key of the domain owner at the time the record was validated.
    pub staleness_id: Vec<u8>,
    /// Key that signed the right of association.
    pub roa_id: Vec<u8>,
    /// Serialized record content.
    pub content: Vec<u8>,
}

impl RecordState {
    /// Parse raw account data.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        let registry = NameRegistryState::deserialize(bytes)?;
        let header = RecordHeader::deserialize(&registry.data)?;

        let staleness_end = RecordHeader::LEN + header.staleness_validation.id_len();
        let roa_end = staleness_end + header.right_of_association_validation.id_len();
        let content_end = roa_end + header.content_length as usize;
        if registry.data.len() < content_end {
            return Err(SnsError::InvalidAccountData(format!(
                "record account holds {} bytes after the registry header, layout needs {}",
                registry.data.len(),
                content_end
            )));
        }

        Ok(Self {
            parent_name: registry.parent_name,
            owner: registry.owner,
            class: registry.class,
            header,
            staleness_id: registry.data[RecordHeader::LEN..staleness_end].to_vec(),
            roa_id: registry.data[staleness_end..roa_end].to_vec(),
            content: registry.data[roa_end..content_end].to_vec(),
        })
    }

    /// Build a record snapshot, deriving the header from the ids.
    pub fn new(
        parent_name: Pubkey,
        owner: Pubkey,
        class: Pubkey,
        staleness: (Validation, Vec<u8>),
        roa: (Validation, Vec<u8>),
        content: Vec<u8>,
    ) -> Result<Self> {
        for (mode, id) in [&staleness, &roa] {
            if id.len() != mode.id_len() {
                return Err(SnsError::InvalidAccountData(format!(
                    "{mode:?} id must be {} bytes, got {}",
                    mode.id_len(),
                    id.len()
                )));
            }
        }
        let content_length = u32::try_from(content.len()).map_err(|_| {
            SnsError::InvalidAccountData(format!("content of {} bytes is too long", content.len()))
        })?;
        Ok(Self {
            parent_name,
            owner,
            class,
            header: RecordHeader {
                staleness_validation: staleness.0,
                right_of_association_validation: roa.0,
                content_length,
            },
            staleness_id: staleness.1,
            roa_id: roa.1,
            content,
        })
    }

    /// Account bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let registry = NameRegistryState {
            parent_name: self.parent_name,
            owner: self.owner,
            class: self.class,
            data: Vec::new(),
        };
        let mut bytes = registry.to_bytes()?;
        bytes.extend_from_slice(&self.header.to_bytes()?);
        bytes.extend_from_slice(&self.staleness_id);
        bytes.extend_from_slice(&self.roa_id);
        bytes.extend_from_slice(&self.content);
        Ok(bytes)
    }
}
