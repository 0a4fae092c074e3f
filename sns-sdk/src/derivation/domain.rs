//! Domain, subdomain and record key resolution.

use serde::{Deserialize, Serialize};

use super::pda::{derive_address, hash_name};
use crate::constants::{
    CENTRAL_STATE_SNS_RECORDS, REVERSE_LOOKUP_CLASS, ROOT_DOMAIN_ACCOUNT, SOL_TLD_SUFFIX,
};
use crate::record::Record;
use crate::{Pubkey, Result, SnsError};

/// Record generation a lookup targets.
///
/// The discriminant is the byte prepended to the record name before hashing;
/// plain subdomains use `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RecordVersion {
    /// Records stored directly as name registry content.
    V1 = 1,
    /// Records owned by the records program, with staleness and RoA headers.
    V2 = 2,
}

impl RecordVersion {
    /// Name prefix byte for this version.
    pub fn prefix(self) -> char {
        char::from(self as u8)
    }

    /// Class key of record accounts of this version.
    pub fn class(self) -> Option<Pubkey> {
        match self {
            Self::V1 => None,
            Self::V2 => Some(CENTRAL_STATE_SNS_RECORDS),
        }
    }
}

/// Derived identity of a domain, subdomain or record path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainKeyResult {
    /// Address of the name account.
    pub address: Pubkey,
    /// Hash of the final, prefixed name segment.
    pub hashed_name: [u8; 32],
    /// True for anything below a root domain.
    pub is_subdomain: bool,
    /// Domain the account hangs off; `None` for root domains.
    pub parent_address: Option<Pubkey>,
    /// True for a record of a subdomain (`record.sub.domain`).
    pub is_sub_record: bool,
}

fn derive_root(name: &str) -> Result<(Pubkey, [u8; 32])> {
    let hashed = hash_name(name);
    let address = derive_address(&hashed, Some(&ROOT_DOMAIN_ACCOUNT), None)?;
    Ok((address, hashed))
}

fn derive_child(
    prefix: char,
    name: &str,
    parent: &Pubkey,
    class: Option<&Pubkey>,
) -> Result<(Pubkey, [u8; 32])> {
    let mut prefixed = String::with_capacity(name.len() + 1);
    prefixed.push(prefix);
    prefixed.push_str(name);
    let hashed = hash_name(&prefixed);
    let address = derive_address(&hashed, Some(parent), class)?;
    Ok((address, hashed))
}

/// Derive the account key of a domain, subdomain or record.
///
/// Accepted shapes, after stripping a trailing `.sol`:
///
/// * `domain`
/// * `sub.domain` (a record of `domain` when `record_version` is set)
/// * `record.sub.domain`, only with a `record_version`
///
/// Anything else is [`SnsError::MalformedDomain`].
///
/// # Example
///
/// ```
/// use sns_sdk::derivation::get_domain_key;
///
/// let key = get_domain_key("bonfida.sol", None).unwrap();
/// assert_eq!(
///     key.address.to_string(),
///     "Crf8hzfthWGbGbLTVCiqRqV5MVnbpHB1L9KQMd6gsinb"
/// );
/// assert!(!key.is_subdomain);
/// ```
pub fn get_domain_key(domain: &str, record_version: Option<RecordVersion>) -> Result<DomainKeyResult> {
    let domain = domain.strip_suffix(SOL_TLD_SUFFIX).unwrap_or(domain);
    let segments: Vec<&str> = domain.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(SnsError::MalformedDomain(format!(
            "'{domain}' contains an empty label"
        )));
    }

    let class = record_version.and_then(RecordVersion::class);
    let prefix = record_version.map_or('\0', RecordVersion::prefix);

    match (segments.as_slice(), record_version) {
        ([name], _) => {
            let (address, hashed_name) = derive_root(name)?;
            Ok(DomainKeyResult {
                address,
                hashed_name,
                is_subdomain: false,
                parent_address: None,
                is_sub_record: false,
            })
        }
        ([local, parent], _) => {
            let (parent_key, _) = derive_root(parent)?;
            let (address, hashed_name) = derive_child(prefix, local, &parent_key, class.as_ref())?;
            Ok(DomainKeyResult {
                address,
                hashed_name,
                is_subdomain: true,
                parent_address: Some(parent_key),
                is_sub_record: false,
            })
        }
        ([record, sub, parent], Some(_)) => {
            let (parent_key, _) = derive_root(parent)?;
            let (sub_key, _) = derive_child('\0', sub, &parent_key, None)?;
            let (address, hashed_name) = derive_child(prefix, record, &sub_key, class.as_ref())?;
            Ok(DomainKeyResult {
                address,
                hashed_name,
                is_subdomain: true,
                parent_address: Some(parent_key),
                is_sub_record: true,
            })
        }
        ([_, _, _], None) => Err(SnsError::MalformedDomain(format!(
            "'{domain}' has three labels but no record version"
        ))),
        _ => Err(SnsError::MalformedDomain(format!(
            "'{domain}' has {} labels, at most 3 are supported",
            segments.len()
        ))),
    }
}

/// Derive the key of a domain or subdomain, without record semantics.
pub fn get_domain_key_sync(domain: &str) -> Result<DomainKeyResult> {
    get_domain_key(domain, None)
}

/// Key of a v1 record account (`{record}.{domain}` hashed with the `\x01` prefix).
pub fn get_record_key(domain: &str, record: Record) -> Result<Pubkey> {
    let path = format!("{}.{}", record.as_str(), domain);
    Ok(get_domain_key(&path, Some(RecordVersion::V1))?.address)
}

/// Key of a v2 record account, classed under the records program central state.
pub fn get_record_v2_key(domain: &str, record: Record) -> Result<Pubkey> {
    let path = format!("{}.{}", record.as_str(), domain);
    Ok(get_domain_key(&path, Some(RecordVersion::V2))?.address)
}

/// Key of the reverse lookup account of a name account.
///
/// Subdomain reverse accounts are parented by their domain; root reverse
/// accounts have no parent.
pub fn get_reverse_key_from_key(domain_key: &Pubkey, parent: Option<&Pubkey>) -> Result<Pubkey> {
    let hashed = hash_name(&domain_key.to_string());
    derive_address(&hashed, parent, Some(&REVERSE_LOOKUP_CLASS))
}

/// Key of the reverse lookup account of a domain or subdomain.
pub fn get_reverse_key(domain: &str) -> Result<Pubkey> {
    let key = get_domain_key(domain, None)?;
    let parent = if key.is_subdomain {
        key.parent_address
    } else {
        None
    };
    get_reverse_key_from_key(&key.address, parent.as_ref())
}
