//! Per-label punycode for `CNAME` and `TXT` records.

use idna::punycode;

use crate::errors::CodecError;

const ACE_PREFIX: &str = "xn--";

/// Encode every non-ASCII dot-separated label as `xn--` punycode.
/// ASCII labels are kept as they are.
///
/// An ASCII label that already starts with `xn--` would be decoded into
/// different text on read, so it is rejected.
pub fn encode_punycode_labels(text: &str) -> Result<String, CodecError> {
    let labels = text
        .split('.')
        .map(|label| {
            if label.is_ascii() {
                if decode_label(label)? != label {
                    return Err(CodecError::Punycode(label.to_string()));
                }
                return Ok(label.to_string());
            }
            punycode::encode_str(label)
                .map(|encoded| format!("{ACE_PREFIX}{encoded}"))
                .ok_or_else(|| CodecError::Punycode(label.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(labels.join("."))
}

/// Decode every `xn--` label back to Unicode. Other labels are kept.
pub fn decode_punycode_labels(text: &str) -> Result<String, CodecError> {
    let labels = text
        .split('.')
        .map(decode_label)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(labels.join("."))
}

fn decode_label(label: &str) -> Result<String, CodecError> {
    match label.strip_prefix(ACE_PREFIX) {
        Some(encoded) => punycode::decode_to_string(&encoded.to_lowercase())
            .ok_or_else(|| CodecError::Punycode(label.to_string())),
        None => Ok(label.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_untouched() {
        assert_eq!(encode_punycode_labels("www.example.com").unwrap(), "www.example.com");
        assert_eq!(decode_punycode_labels("www.example.com").unwrap(), "www.example.com");
    }

    #[test]
    fn test_unicode_labels() {
        let encoded = encode_punycode_labels("münchen.example").unwrap();
        assert_eq!(encoded, "xn--mnchen-3ya.example");
        assert_eq!(decode_punycode_labels(&encoded).unwrap(), "münchen.example");
    }

    #[test]
    fn test_each_label_independent() {
        let encoded = encode_punycode_labels("ü.a.ü").unwrap();
        assert_eq!(encoded, "xn--tda.a.xn--tda");
        assert_eq!(decode_punycode_labels(&encoded).unwrap(), "ü.a.ü");
    }

    #[test]
    fn test_ascii_ace_label_rejected() {
        assert_eq!(
            encode_punycode_labels("xn--abc"),
            Err(CodecError::Punycode("xn--abc".into()))
        );
        assert!(encode_punycode_labels("www.xn--mnchen-3ya.example").is_err());
        assert!(encode_punycode_labels("xn--").is_err());
        // only the lowercase prefix is decoded on read
        assert_eq!(encode_punycode_labels("XN--abc").unwrap(), "XN--abc");
        assert_eq!(encode_punycode_labels("axn--b").unwrap(), "axn--b");
    }

    #[test]
    fn test_uppercase_ace_label_decodes() {
        assert_eq!(decode_punycode_labels("xn--MNCHEN-3YA").unwrap(), "münchen");
    }
}
