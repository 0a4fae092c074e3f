//! Property-based tests for sns-sdk
//!
//! These tests use proptest to check codec and derivation laws across a wide
//! range of inputs.

#[cfg(test)]
mod codec_properties {
    use proptest::prelude::*;
    use sns_sdk::{deserialize_record_v2_content, serialize_record_v2_content, Record};

    fn round_trip_bytes(bytes: &[u8], record: Record) -> Vec<u8> {
        let text = deserialize_record_v2_content(bytes, record).unwrap();
        serialize_record_v2_content(&text, record).unwrap()
    }

    proptest! {
        /// Every IPv4 address survives bytes -> text -> bytes
        #[test]
        fn ipv4_round_trip(octets in any::<[u8; 4]>()) {
            prop_assert_eq!(round_trip_bytes(&octets, Record::A), octets.to_vec());
        }

        /// Every IPv6 address survives bytes -> text -> bytes, and the text is canonical
        #[test]
        fn ipv6_round_trip(octets in any::<[u8; 16]>()) {
            let text = deserialize_record_v2_content(&octets, Record::Aaaa).unwrap();
            prop_assert_eq!(round_trip_bytes(&octets, Record::Aaaa), octets.to_vec());
            prop_assert_eq!(text.to_lowercase(), text.clone());
            prop_assert!(text.matches("::").count() <= 1);
        }

        /// EVM addresses survive for every EVM chain record
        #[test]
        fn evm_round_trip(address in any::<[u8; 20]>()) {
            for record in [Record::Eth, Record::Bsc, Record::Base] {
                prop_assert_eq!(round_trip_bytes(&address, record), address.to_vec());
            }
        }

        /// Injective addresses survive bytes -> bech32 -> bytes
        #[test]
        fn injective_round_trip(address in any::<[u8; 20]>()) {
            let text = deserialize_record_v2_content(&address, Record::Injective).unwrap();
            prop_assert!(text.starts_with("inj1"));
            prop_assert_eq!(round_trip_bytes(&address, Record::Injective), address.to_vec());
        }

        /// 32-byte keys survive bytes -> base58 -> bytes
        #[test]
        fn base58_key_round_trip(key in any::<[u8; 32]>()) {
            for record in [Record::Sol, Record::Background] {
                prop_assert_eq!(round_trip_bytes(&key, record), key.to_vec());
            }
        }

        /// Text records keep any content as is
        #[test]
        fn text_round_trip(content in "\\PC{0,64}") {
            for record in [Record::Url, Record::Email, Record::Btc, Record::Ipfs] {
                let bytes = serialize_record_v2_content(&content, record).unwrap();
                prop_assert_eq!(deserialize_record_v2_content(&bytes, record).unwrap(), content.clone());
            }
        }

        /// ASCII CNAME and TXT content is stored verbatim, or refused when a
        /// label would read back as punycode
        #[test]
        fn ascii_punycode_text_round_trip(content in "([a-z0-9 _@=-]{0,12}|xn--[a-z0-9-]{0,8})(\\.([a-z0-9 _@=-]{0,12}|xn--[a-z0-9-]{0,8})){0,3}") {
            let has_ace_label = content.split('.').any(|label| label.starts_with("xn--"));
            for record in [Record::Cname, Record::Txt] {
                match serialize_record_v2_content(&content, record) {
                    Ok(bytes) => {
                        prop_assert!(!has_ace_label);
                        prop_assert_eq!(bytes.as_slice(), content.as_bytes());
                        prop_assert_eq!(deserialize_record_v2_content(&bytes, record).unwrap(), content.clone());
                    }
                    Err(_) => prop_assert!(has_ace_label),
                }
            }
        }

        /// Unicode CNAME and TXT content goes through punycode and comes back
        #[test]
        fn unicode_punycode_text_round_trip(
            content in "[a-zäöüéñß]{1,12}(\\.[a-zäöüéñß]{1,12}){0,3}"
        ) {
            for record in [Record::Cname, Record::Txt] {
                let bytes = serialize_record_v2_content(&content, record).unwrap();
                prop_assert!(bytes.is_ascii());
                prop_assert_eq!(deserialize_record_v2_content(&bytes, record).unwrap(), content.clone());
            }
        }
    }
}

#[cfg(test)]
mod derivation_properties {
    use proptest::prelude::*;
    use sns_sdk::{get_domain_key, RecordVersion, SnsError};

    proptest! {
        /// Key derivation is pure and ignores the `.sol` suffix
        #[test]
        fn domain_key_is_deterministic(label in "[a-z0-9-]{1,24}") {
            let first = get_domain_key(&label, None).unwrap();
            let second = get_domain_key(&label, None).unwrap();
            let suffixed = get_domain_key(&format!("{label}.sol"), None).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(&first, &suffixed);
            prop_assert!(!first.is_subdomain);
        }

        /// Subdomain keys are parented by the domain key
        #[test]
        fn subdomain_parent_is_domain(sub in "[a-z0-9]{1,16}", domain in "[a-z0-9]{1,16}") {
            let parent = get_domain_key(&domain, None).unwrap();
            let child = get_domain_key(&format!("{sub}.{domain}"), None).unwrap();
            prop_assert!(child.is_subdomain);
            prop_assert_eq!(child.parent_address, Some(parent.address));
            prop_assert_ne!(child.address, parent.address);
        }

        /// Three labels without a record version never resolve
        #[test]
        fn three_labels_without_version_are_malformed(
            a in "[a-z0-9]{1,10}",
            b in "[a-z0-9]{1,10}",
            c in "[a-z0-9]{1,10}",
        ) {
            let result = get_domain_key(&format!("{a}.{b}.{c}"), None);
            prop_assert!(matches!(result, Err(SnsError::MalformedDomain(_))));
        }

        /// Three labels with a record version always resolve to a record key
        #[test]
        fn three_labels_with_version_resolve(
            a in "[a-z0-9]{1,10}",
            b in "[a-z0-9]{1,10}",
            c in "[a-z0-9]{1,10}",
        ) {
            for version in [RecordVersion::V1, RecordVersion::V2] {
                let key = get_domain_key(&format!("{a}.{b}.{c}"), Some(version)).unwrap();
                prop_assert!(key.is_sub_record);
            }
        }
    }
}

#[cfg(test)]
mod verification_properties {
    use proptest::prelude::*;
    use sns_sdk::state::{RecordState, Validation};
    use sns_sdk::{verify_ethereum_roa, verify_staleness, Pubkey, Record};

    proptest! {
        /// Recovery ids outside {27, 28} are rejected without recovery
        #[test]
        fn ethereum_roa_rejects_bad_recovery_id(
            rs in prop::collection::vec(any::<u8>(), 64),
            v in any::<u8>(),
            pubkey in prop::collection::vec(any::<u8>(), 64),
        ) {
            prop_assume!(v != 27 && v != 28);
            let mut signature = rs;
            signature.push(v);
            prop_assert!(!verify_ethereum_roa("bonfida", Record::Eth, &signature, &pubkey));
        }

        /// Malformed lengths never verify and never panic
        #[test]
        fn ethereum_roa_rejects_bad_lengths(
            signature in prop::collection::vec(any::<u8>(), 0..80),
            pubkey in prop::collection::vec(any::<u8>(), 0..80),
        ) {
            prop_assume!(signature.len() != 65 || pubkey.len() != 64);
            prop_assert!(!verify_ethereum_roa("bonfida", Record::Eth, &signature, &pubkey));
        }

        /// A record validated by anyone but the current owner is stale
        #[test]
        fn staleness_requires_current_owner(owner in any::<[u8; 32]>(), validator in any::<[u8; 32]>()) {
            let owner = Pubkey::new_from_array(owner);
            let state = RecordState::new(
                Pubkey::default(),
                owner,
                Pubkey::default(),
                (Validation::Solana, validator.to_vec()),
                (Validation::None, Vec::new()),
                b"content".to_vec(),
            )
            .unwrap();
            prop_assert_eq!(verify_staleness(&owner, &state), owner.to_bytes() == validator);
        }
    }
}
