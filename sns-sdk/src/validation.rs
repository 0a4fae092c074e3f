//! Domain name and record content grammar.
//!
//! The on-chain programs are the authority on what can be stored; these
//! checks catch obviously unusable input before any key is derived.

use bech32::{FromBase32, Variant};

use crate::constants::SOL_TLD_SUFFIX;
use crate::errors::CodecError;
use crate::record::{serialize_record_v2_content, Record};
use crate::{Result, SnsError};

/// Longest label, in bytes.
pub const MAX_LABEL_LEN: usize = 63;

/// Labels that cannot be registered.
pub const RESERVED_LABELS: &[&str] = &["sol"];

const ACE_PREFIX: &str = "xn--";

fn invalid(name: &str, reason: impl Into<String>) -> SnsError {
    SnsError::InvalidDomainName {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Check a single label.
///
/// ASCII is limited to lowercase letters, digits, `-` and `_`; other Unicode
/// (emoji, IDN) is accepted as is.
pub fn validate_label(label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(invalid(label, "label is empty"));
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(invalid(
            label,
            format!("label is {} bytes, limit is {MAX_LABEL_LEN}", label.len()),
        ));
    }
    for c in label.chars() {
        if c.is_ascii_uppercase() {
            return Err(invalid(label, "uppercase letters are not allowed"));
        }
        if c.is_whitespace() || c.is_control() {
            return Err(invalid(label, "whitespace and control characters are not allowed"));
        }
        if c == '.' {
            return Err(invalid(label, "a label cannot contain '.'"));
        }
        if c.is_ascii() && !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_') {
            return Err(invalid(label, format!("character '{c}' is not allowed")));
        }
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(invalid(label, "a label cannot start or end with '-'"));
    }
    if RESERVED_LABELS.contains(&label) {
        return Err(invalid(label, "label is reserved"));
    }
    if label.starts_with(ACE_PREFIX) {
        return Err(invalid(label, "punycode labels are not allowed, use Unicode"));
    }
    Ok(())
}

/// Check a domain or subdomain (`.sol` suffix optional).
pub fn validate_domain(domain: &str) -> Result<()> {
    let stripped = domain.strip_suffix(SOL_TLD_SUFFIX).unwrap_or(domain);
    let labels: Vec<&str> = stripped.split('.').collect();
    if labels.len() > 2 {
        return Err(invalid(
            domain,
            format!("{} labels, expected a domain or a subdomain", labels.len()),
        ));
    }
    labels.into_iter().try_for_each(validate_label)
}

/// Check that `content` is well formed for `record`.
///
/// Chain addresses and content ids are stored as plain text, so the codec
/// accepts anything for them; here they are also checked against the
/// grammar of their network.
pub fn validate_record_content(content: &str, record: Record) -> Result<()> {
    serialize_record_v2_content(content, record)?;
    let grammar = match record {
        Record::Btc => check_utxo_address(content, &BITCOIN),
        Record::Ltc => check_utxo_address(content, &LITECOIN),
        Record::Doge => check_utxo_address(content, &DOGECOIN),
        Record::Ipfs => check_ipfs_cid(content),
        Record::Arwv => check_arweave_id(content),
        _ => Ok(()),
    };
    grammar.map_err(|source| SnsError::invalid_content(record, source))
}

/// Address formats of a UTXO chain.
struct UtxoChain {
    /// Base58Check version bytes of pay-to-pubkey-hash and pay-to-script-hash.
    versions: &'static [u8],
    /// Bech32 prefix of segwit addresses, if the chain has them.
    segwit_hrp: Option<&'static str>,
}

const BITCOIN: UtxoChain = UtxoChain {
    versions: &[0x00, 0x05],
    segwit_hrp: Some("bc"),
};

const LITECOIN: UtxoChain = UtxoChain {
    versions: &[0x30, 0x32, 0x05],
    segwit_hrp: Some("ltc"),
};

const DOGECOIN: UtxoChain = UtxoChain {
    versions: &[0x1e, 0x16],
    segwit_hrp: None,
};

const HASH160_LEN: usize = 20;
const ARWEAVE_ID_LEN: usize = 43;

fn check_utxo_address(text: &str, chain: &UtxoChain) -> std::result::Result<(), CodecError> {
    let invalid = || CodecError::InvalidAddress(text.to_string());

    if let Some(hrp) = chain.segwit_hrp {
        let separator = format!("{hrp}1");
        let has_prefix = text
            .get(..separator.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(&separator));
        if has_prefix {
            return is_segwit_address(text, hrp).then_some(()).ok_or_else(invalid);
        }
    }

    let payload = bs58::decode(text)
        .with_check(None)
        .into_vec()
        .map_err(|_| invalid())?;
    match payload.split_first() {
        Some((version, hash)) if hash.len() == HASH160_LEN && chain.versions.contains(version) => {
            Ok(())
        }
        _ => Err(invalid()),
    }
}

fn is_segwit_address(text: &str, hrp: &str) -> bool {
    let Ok((decoded_hrp, data, variant)) = bech32::decode(text) else {
        return false;
    };
    let Some((version, program)) = data.split_first() else {
        return false;
    };
    let Ok(program) = Vec::<u8>::from_base32(program) else {
        return false;
    };
    let (variant_ok, length_ok) = match version.to_u8() {
        0 => (variant == Variant::Bech32, program.len() == 20 || program.len() == 32),
        1..=16 => (variant == Variant::Bech32m, (2..=40).contains(&program.len())),
        _ => (false, false),
    };
    decoded_hrp == hrp && variant_ok && length_ok
}

/// CIDv0 (base58 sha2-256 multihash) or base32 CIDv1, with or without an
/// `ipfs://` scheme.
fn check_ipfs_cid(text: &str) -> std::result::Result<(), CodecError> {
    let invalid = || CodecError::InvalidContentId(text.to_string());
    let cid = text.strip_prefix("ipfs://").unwrap_or(text);

    if cid.starts_with("Qm") {
        let multihash = bs58::decode(cid).into_vec().map_err(|_| invalid())?;
        return match multihash.as_slice() {
            [0x12, 0x20, digest @ ..] if digest.len() == 32 => Ok(()),
            _ => Err(invalid()),
        };
    }
    // multibase 'b' followed by the CID version byte 0x01
    let is_base32 = cid.len() > 2
        && cid.starts_with("ba")
        && cid
            .bytes()
            .all(|b| b.is_ascii_lowercase() || (b'2'..=b'7').contains(&b));
    is_base32.then_some(()).ok_or_else(invalid)
}

/// Arweave transaction id: 32 bytes in unpadded base64url.
fn check_arweave_id(text: &str) -> std::result::Result<(), CodecError> {
    let valid = text.len() == ARWEAVE_ID_LEN
        && text
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    valid
        .then_some(())
        .ok_or_else(|| CodecError::InvalidContentId(text.to_string()))
}
