//! Encode/decode pairs, one per encoding family.

use bech32::{FromBase32, ToBase32, Variant};

use super::ip::{format_ipv4, format_ipv6, parse_ipv4, parse_ipv6};
use super::punycode::{decode_punycode_labels, encode_punycode_labels};
use crate::errors::CodecError;

const INJECTIVE_HRP: &str = "inj";
const EVM_ADDRESS_LEN: usize = 20;

fn fixed<const N: usize>(bytes: &[u8]) -> Result<[u8; N], CodecError> {
    bytes.try_into().map_err(|_| CodecError::InvalidLength {
        expected: N,
        actual: bytes.len(),
    })
}

pub(super) fn encode_evm(text: &str) -> Result<Vec<u8>, CodecError> {
    let invalid = || CodecError::InvalidEvmAddress(text.to_string());
    let digits = text.strip_prefix("0x").ok_or_else(invalid)?;
    if digits.len() != EVM_ADDRESS_LEN * 2 {
        return Err(invalid());
    }
    hex::decode(digits).map_err(|_| invalid())
}

pub(super) fn decode_evm(bytes: &[u8]) -> Result<String, CodecError> {
    let address: [u8; EVM_ADDRESS_LEN] = fixed(bytes)?;
    Ok(format!("0x{}", hex::encode(address)))
}

pub(super) fn encode_injective(text: &str) -> Result<Vec<u8>, CodecError> {
    let invalid = || CodecError::InvalidInjectiveAddress(text.to_string());
    let (hrp, data, variant) = bech32::decode(text).map_err(|_| invalid())?;
    if hrp != INJECTIVE_HRP || variant != Variant::Bech32 {
        return Err(invalid());
    }
    let payload = Vec::<u8>::from_base32(&data).map_err(|_| invalid())?;
    if payload.len() != EVM_ADDRESS_LEN {
        return Err(invalid());
    }
    Ok(payload)
}

pub(super) fn decode_injective(bytes: &[u8]) -> Result<String, CodecError> {
    let payload: [u8; EVM_ADDRESS_LEN] = fixed(bytes)?;
    bech32::encode(INJECTIVE_HRP, payload.to_base32(), Variant::Bech32)
        .map_err(|err| CodecError::InvalidInjectiveAddress(err.to_string()))
}

pub(super) fn encode_base58_key(text: &str) -> Result<Vec<u8>, CodecError> {
    let bytes = bs58::decode(text)
        .into_vec()
        .map_err(|_| CodecError::InvalidBase58(text.to_string()))?;
    let key: [u8; 32] = fixed(&bytes)?;
    Ok(key.to_vec())
}

pub(super) fn decode_base58_key(bytes: &[u8]) -> Result<String, CodecError> {
    let key: [u8; 32] = fixed(bytes)?;
    Ok(bs58::encode(key).into_string())
}

pub(super) fn encode_ipv4(text: &str) -> Result<Vec<u8>, CodecError> {
    parse_ipv4(text).map(|octets| octets.to_vec())
}

pub(super) fn decode_ipv4(bytes: &[u8]) -> Result<String, CodecError> {
    fixed(bytes).map(format_ipv4)
}

pub(super) fn encode_ipv6(text: &str) -> Result<Vec<u8>, CodecError> {
    parse_ipv6(text).map(|octets| octets.to_vec())
}

pub(super) fn decode_ipv6(bytes: &[u8]) -> Result<String, CodecError> {
    fixed(bytes).map(format_ipv6)
}

pub(super) fn encode_punycode_text(text: &str) -> Result<Vec<u8>, CodecError> {
    encode_punycode_labels(text).map(String::into_bytes)
}

pub(super) fn decode_punycode_text(bytes: &[u8]) -> Result<String, CodecError> {
    decode_text(bytes).and_then(|text| decode_punycode_labels(&text))
}

pub(super) fn encode_text(text: &str) -> Result<Vec<u8>, CodecError> {
    Ok(text.as_bytes().to_vec())
}

pub(super) fn decode_text(bytes: &[u8]) -> Result<String, CodecError> {
    String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)
}
