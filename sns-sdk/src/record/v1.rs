//! Record v1 codec.
//!
//! v1 records live in the content region of a plain name registry account.
//! The region is zero padded up to its allocated size, and early clients
//! stored fixed-size records as UTF-8 text, so reads have to tell the binary
//! and the legacy text forms apart.

use super::{EncodingFamily, Record};
use crate::state::NameRegistryState;
use crate::verification::{sol_record_message, verify_sol_record_signature};
use crate::{Pubkey, Result, SnsError};

/// Encode record text as v1 content.
///
/// `SOL` records carry a signature and must be built with
/// [`serialize_sol_record`].
pub fn serialize_record(content: &str, record: Record) -> Result<Vec<u8>> {
    if record.encoding().family == EncodingFamily::SolanaKey {
        return Err(SnsError::UnsupportedRecord {
            record,
            reason: "SOL v1 records need a signature, use serialize_sol_record".to_string(),
        });
    }
    (record.encoding().encode)(content).map_err(|source| SnsError::invalid_content(record, source))
}

/// Build a v1 `SOL` record: the 32-byte key followed by the domain owner's
/// signature over [`sol_record_message`].
///
/// The signature is checked against `signer` before the bytes are returned.
pub fn serialize_sol_record(
    content: &Pubkey,
    record_key: &Pubkey,
    signer: &Pubkey,
    signature: &[u8; 64],
) -> Result<Vec<u8>> {
    let message = sol_record_message(content, record_key);
    if !verify_sol_record_signature(&message, signature, signer) {
        return Err(SnsError::InvalidSignature(format!(
            "SOL record for {content} is not signed by {signer}"
        )));
    }
    let mut bytes = Vec::with_capacity(96);
    bytes.extend_from_slice(&content.to_bytes());
    bytes.extend_from_slice(signature);
    Ok(bytes)
}

/// Decode the content of a v1 record account.
///
/// Returns `None` when the content region is empty or all zeros, and for a
/// `SOL` record whose signature does not match the registry owner. Corrupt
/// content is [`SnsError::InvalidRecordData`].
pub fn deserialize_record(
    registry: &NameRegistryState,
    record: Record,
    record_key: &Pubkey,
) -> Result<Option<String>> {
    let data = registry.data.as_slice();
    let Some(last) = data.iter().rposition(|byte| *byte != 0) else {
        return Ok(None);
    };
    let idx = last + 1;
    let encoding = record.encoding();
    let decode = |bytes: &[u8]| {
        (encoding.decode)(bytes).map_err(|err| SnsError::invalid_data(record, err.to_string()))
    };

    let Some(size) = encoding.v1_size else {
        return decode(&data[..idx]).map(Some);
    };

    if encoding.family == EncodingFamily::SolanaKey {
        if data.len() >= size {
            let content = Pubkey::try_from(&data[..32])
                .map_err(|err| SnsError::invalid_data(record, err.to_string()))?;
            let message = sol_record_message(&content, record_key);
            if verify_sol_record_signature(&message, &data[32..size], &registry.owner) {
                return Ok(Some(content.to_string()));
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(record_key = %record_key, "SOL record signature does not match the domain owner");
        return Ok(None);
    }

    if idx != size {
        // legacy records stored the address as text
        let text = std::str::from_utf8(&data[..idx]).map_err(|_| {
            SnsError::invalid_data(record, format!("{idx} bytes stored, expected {size}"))
        })?;
        if is_legacy_address(record, text) {
            return Ok(Some(text.to_string()));
        }
        return Err(SnsError::invalid_data(
            record,
            format!("{idx} bytes stored, expected {size} or a text address"),
        ));
    }

    decode(&data[..size]).map(Some)
}

fn is_legacy_address(record: Record, text: &str) -> bool {
    let encoding = record.encoding();
    match encoding.family {
        EncodingFamily::Evm
        | EncodingFamily::Bech32
        | EncodingFamily::Ipv4
        | EncodingFamily::Ipv6 => (encoding.encode)(text).is_ok(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn registry(owner: Pubkey, data: Vec<u8>) -> NameRegistryState {
        NameRegistryState {
            parent_name: Pubkey::default(),
            owner,
            class: Pubkey::default(),
            data,
        }
    }

    fn padded(mut bytes: Vec<u8>, len: usize) -> Vec<u8> {
        bytes.resize(len, 0);
        bytes
    }

    #[test]
    fn test_empty_and_zero_content() {
        let key = Pubkey::default();
        assert_eq!(
            deserialize_record(&registry(key, vec![]), Record::Url, &key).unwrap(),
            None
        );
        assert_eq!(
            deserialize_record(&registry(key, vec![0; 96]), Record::Sol, &key).unwrap(),
            None
        );
    }

    #[test]
    fn test_text_record_trims_padding() {
        let key = Pubkey::default();
        let data = padded(serialize_record("@bonfida", Record::Twitter).unwrap(), 64);
        assert_eq!(
            deserialize_record(&registry(key, data), Record::Twitter, &key).unwrap(),
            Some("@bonfida".to_string())
        );
    }

    #[test]
    fn test_txt_punycode() {
        let key = Pubkey::default();
        let data = padded(serialize_record("héllo", Record::Txt).unwrap(), 32);
        assert!(data.starts_with(b"xn--"));
        assert_eq!(
            deserialize_record(&registry(key, data), Record::Txt, &key).unwrap(),
            Some("héllo".to_string())
        );
    }

    #[test]
    fn test_fixed_records() {
        let key = Pubkey::default();
        let background = Pubkey::new_from_array([7; 32]).to_string();
        let cases = [
            (Record::Eth, "0x4bbeeb066ed09b7aed07bf39eee0460dfa261520"),
            (Record::A, "192.168.1.1"),
            (Record::Aaaa, "2001:db8::1"),
            (Record::Background, background.as_str()),
        ];
        for (record, content) in cases {
            let data = serialize_record(content, record).unwrap();
            assert_eq!(Some(data.len()), record.v1_size());
            assert_eq!(
                deserialize_record(&registry(key, data), record, &key).unwrap(),
                Some(content.to_string()),
                "{record}"
            );
        }
    }

    #[test]
    fn test_fixed_record_in_larger_region_is_not_trimmed() {
        let key = Pubkey::default();
        let data = padded(vec![10, 1, 2, 3], 32);
        assert_eq!(
            deserialize_record(&registry(key, data), Record::A, &key).unwrap(),
            Some("10.1.2.3".to_string())
        );
    }

    #[test]
    fn test_legacy_text_addresses() {
        let key = Pubkey::default();
        let cases = [
            (Record::Eth, "0x4bbeeb066ed09b7aed07bf39eee0460dfa261520"),
            (Record::Bsc, "0x4170ad697176fe6d660763f6e4dfcf25018e8b63"),
            (Record::A, "10.0.0.1"),
            (Record::Aaaa, "::1"),
        ];
        for (record, content) in cases {
            let data = padded(content.as_bytes().to_vec(), 64);
            assert_eq!(
                deserialize_record(&registry(key, data), record, &key).unwrap(),
                Some(content.to_string()),
                "{record}"
            );
        }

        let injective = crate::record::deserialize_record_v2_content(&[3; 20], Record::Injective)
            .unwrap();
        let data = padded(injective.clone().into_bytes(), 64);
        assert_eq!(
            deserialize_record(&registry(key, data), Record::Injective, &key).unwrap(),
            Some(injective)
        );
    }

    #[test]
    fn test_legacy_garbage_is_invalid_data() {
        let key = Pubkey::default();
        let data = padded(b"not an address".to_vec(), 64);
        let err = deserialize_record(&registry(key, data), Record::Eth, &key).unwrap_err();
        assert!(matches!(
            err,
            SnsError::InvalidRecordData {
                record: Record::Eth,
                ..
            }
        ));

        // background has no legacy text form
        let data = padded(b"58PwtjSDuFHuUkYjH9BYnnQKHfwo9reZhC2zMJv9JPkx".to_vec(), 64);
        assert!(deserialize_record(&registry(key, data), Record::Background, &key).is_err());
    }

    #[test]
    fn test_sol_record_signed_by_owner() {
        let owner = SigningKey::from_bytes(&[11u8; 32]);
        let owner_key = Pubkey::new_from_array(owner.verifying_key().to_bytes());
        let content = Pubkey::new_from_array([5; 32]);
        let record_key = Pubkey::new_from_array([6; 32]);

        let signature = owner
            .sign(&sol_record_message(&content, &record_key))
            .to_bytes();
        let data = serialize_sol_record(&content, &record_key, &owner_key, &signature).unwrap();
        assert_eq!(data.len(), 96);

        let state = registry(owner_key, data.clone());
        assert_eq!(
            deserialize_record(&state, Record::Sol, &record_key).unwrap(),
            Some(content.to_string())
        );

        // a new owner invalidates the record
        let state = registry(Pubkey::new_from_array([1; 32]), data.clone());
        assert_eq!(deserialize_record(&state, Record::Sol, &record_key).unwrap(), None);

        // so does moving it to another record account
        let state = registry(owner_key, data);
        assert_eq!(
            deserialize_record(&state, Record::Sol, &Pubkey::new_from_array([7; 32])).unwrap(),
            None
        );
    }

    #[test]
    fn test_sol_record_requires_valid_signature() {
        let content = Pubkey::new_from_array([5; 32]);
        let err = serialize_sol_record(&content, &content, &content, &[0u8; 64]).unwrap_err();
        assert!(matches!(err, SnsError::InvalidSignature(_)));

        let err = serialize_record("58PwtjSDuFHuUkYjH9BYnnQKHfwo9reZhC2zMJv9JPkx", Record::Sol)
            .unwrap_err();
        assert!(matches!(err, SnsError::UnsupportedRecord { .. }));
    }
}
