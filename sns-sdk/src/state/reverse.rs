//! Reverse lookup accounts.
//!
//! The content region holds the borsh-encoded domain name. Subdomain entries
//! start with a NUL byte. Accounts are usually over-allocated, so anything
//! after the name is ignored.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use super::layout_error;
use crate::Result;

/// Content of a reverse lookup account.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct ReverseLookupState {
    /// Stored name, without the `.sol` suffix.
    pub name: String,
}

impl ReverseLookupState {
    /// Parse a content region, ignoring trailing padding.
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        let mut rest = data;
        <Self as BorshDeserialize>::deserialize(&mut rest)
            .map_err(|err| layout_error("reverse lookup", err))
    }

    /// Content region bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        borsh::to_vec(self).map_err(|err| layout_error("reverse lookup", err))
    }
}

/// Decode the name stored in a reverse lookup content region.
///
/// With `trim_leading_nul`, a leading NUL byte (subdomain marker) is removed.
pub fn deserialize_reverse(data: &[u8], trim_leading_nul: bool) -> Result<String> {
    let ReverseLookupState { name } = ReverseLookupState::deserialize(data)?;
    match name.strip_prefix('\0') {
        Some(trimmed) if trim_leading_nul => Ok(trimmed.to_string()),
        _ => Ok(name),
    }
}

/// Encode a name the way reverse lookup accounts store it.
pub fn serialize_reverse(name: &str) -> Result<Vec<u8>> {
    ReverseLookupState {
        name: name.to_string(),
    }
    .to_bytes()
}
