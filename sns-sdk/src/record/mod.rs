//! Record types and their binary encodings.
//!
//! Every [`Record`] maps to exactly one [`RecordEncoding`]: the encoding
//! family, the fixed size used by v1 record accounts (if any), and the pair of
//! functions that convert between the textual and the stored form. The v1 and
//! v2 codecs both read this table instead of branching on the record type.
//!
//! | Family | Records | v1 size |
//! |---|---|---|
//! | Solana key | `SOL` | 96 (key + signature) |
//! | EVM address | `ETH`, `BSC`, `BASE` | 20 |
//! | Bech32 | `INJ` | 20 |
//! | Base58 key | `background` | 32 |
//! | IPv4 | `A` | 4 |
//! | IPv6 | `AAAA` | 16 |
//! | Punycode text | `CNAME`, `TXT` | dynamic |
//! | UTF-8 text | everything else | dynamic |

mod families;
mod ip;
mod punycode;
mod v1;
mod v2;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CodecError;
use crate::SnsError;

pub use ip::{format_ipv4, format_ipv6, parse_ipv4, parse_ipv6};
pub use punycode::{decode_punycode_labels, encode_punycode_labels};
pub use v1::{deserialize_record, serialize_record, serialize_sol_record};
pub use v2::{deserialize_record_v2_content, serialize_record_v2_content};

/// A record type that can be attached to a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Record {
    /// Solana wallet address (`SOL`).
    Sol,
    /// Ethereum address (`ETH`).
    Eth,
    /// Bitcoin address (`BTC`).
    Btc,
    /// Litecoin address (`LTC`).
    Ltc,
    /// Dogecoin address (`DOGE`).
    Doge,
    /// Email address.
    Email,
    /// Website URL.
    Url,
    /// Discord handle.
    Discord,
    /// Github handle.
    Github,
    /// Reddit handle.
    Reddit,
    /// Twitter handle.
    Twitter,
    /// Telegram handle.
    Telegram,
    /// Profile picture URL.
    Pic,
    /// Shadow drive address (`SHDW`).
    Shdw,
    /// Point network address (`POINT`).
    Point,
    /// BNB smart chain address (`BSC`).
    Bsc,
    /// Injective address (`INJ`).
    Injective,
    /// Backpack username.
    Backpack,
    /// IPv4 address (`A`).
    A,
    /// IPv6 address (`AAAA`).
    Aaaa,
    /// Canonical name (`CNAME`).
    Cname,
    /// Free text (`TXT`).
    Txt,
    /// Background image, stored as an NFT mint key.
    Background,
    /// Base chain address (`BASE`).
    Base,
    /// IPNS name.
    Ipns,
    /// IPFS content id.
    Ipfs,
    /// Arweave transaction id (`ARWV`).
    Arwv,
}

impl Record {
    /// Every record type, in protocol order.
    pub const ALL: [Record; 27] = [
        Record::Sol,
        Record::Eth,
        Record::Btc,
        Record::Ltc,
        Record::Doge,
        Record::Email,
        Record::Url,
        Record::Discord,
        Record::Github,
        Record::Reddit,
        Record::Twitter,
        Record::Telegram,
        Record::Pic,
        Record::Shdw,
        Record::Point,
        Record::Bsc,
        Record::Injective,
        Record::Backpack,
        Record::A,
        Record::Aaaa,
        Record::Cname,
        Record::Txt,
        Record::Background,
        Record::Base,
        Record::Ipns,
        Record::Ipfs,
        Record::Arwv,
    ];

    /// Record name as used in record account paths (`"{record}.{domain}"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sol => "SOL",
            Self::Eth => "ETH",
            Self::Btc => "BTC",
            Self::Ltc => "LTC",
            Self::Doge => "DOGE",
            Self::Email => "email",
            Self::Url => "url",
            Self::Discord => "discord",
            Self::Github => "github",
            Self::Reddit => "reddit",
            Self::Twitter => "twitter",
            Self::Telegram => "telegram",
            Self::Pic => "pic",
            Self::Shdw => "SHDW",
            Self::Point => "POINT",
            Self::Bsc => "BSC",
            Self::Injective => "INJ",
            Self::Backpack => "backpack",
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Txt => "TXT",
            Self::Background => "background",
            Self::Base => "BASE",
            Self::Ipns => "IPNS",
            Self::Ipfs => "IPFS",
            Self::Arwv => "ARWV",
        }
    }

    /// Encoding of this record type.
    pub fn encoding(&self) -> &'static RecordEncoding {
        match self {
            Self::Sol => &SOLANA_KEY,
            Self::Eth | Self::Bsc | Self::Base => &EVM,
            Self::Injective => &BECH32,
            Self::Background => &BASE58_KEY,
            Self::A => &IPV4,
            Self::Aaaa => &IPV6,
            Self::Cname | Self::Txt => &PUNYCODE_TEXT,
            Self::Btc
            | Self::Ltc
            | Self::Doge
            | Self::Email
            | Self::Url
            | Self::Discord
            | Self::Github
            | Self::Reddit
            | Self::Twitter
            | Self::Telegram
            | Self::Pic
            | Self::Shdw
            | Self::Point
            | Self::Backpack
            | Self::Ipns
            | Self::Ipfs
            | Self::Arwv => &TEXT,
        }
    }

    /// Fixed size of the content of a v1 record account, `None` for text records.
    pub fn v1_size(&self) -> Option<usize> {
        self.encoding().v1_size
    }

    /// Records whose content is an address that signs its own right of
    /// association.
    pub fn is_self_signed(&self) -> bool {
        matches!(
            self.encoding().family,
            EncodingFamily::SolanaKey | EncodingFamily::Evm | EncodingFamily::Bech32
        )
    }

    /// Records whose right of association is proven with a secp256k1 signature.
    pub fn uses_ethereum_roa(&self) -> bool {
        matches!(
            self.encoding().family,
            EncodingFamily::Evm | EncodingFamily::Bech32
        )
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Record {
    type Err = SnsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Record::ALL
            .iter()
            .copied()
            .find(|record| record.as_str() == s)
            .ok_or_else(|| SnsError::UnknownRecord(s.to_string()))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Binary encoding families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingFamily {
    /// 32-byte Solana key; v1 accounts append a 64-byte Ed25519 signature.
    SolanaKey,
    /// `0x`-prefixed 20-byte EVM address.
    Evm,
    /// Bech32 address with the `inj` prefix and a 20-byte payload.
    Bech32,
    /// 32-byte key rendered as base58.
    Base58Key,
    /// Dotted-quad IPv4 address.
    Ipv4,
    /// IPv6 address, rendered with the longest zero run compressed.
    Ipv6,
    /// UTF-8 text with non-ASCII labels stored as punycode.
    PunycodeText,
    /// Plain UTF-8 text.
    Text,
}

/// Converts record text to stored bytes.
pub type EncodeFn = fn(&str) -> Result<Vec<u8>, CodecError>;

/// Converts stored bytes back to record text.
pub type DecodeFn = fn(&[u8]) -> Result<String, CodecError>;

/// Table entry describing how a record type is stored.
#[derive(Debug)]
pub struct RecordEncoding {
    /// Encoding family.
    pub family: EncodingFamily,
    /// Content size of a v1 record account, `None` when dynamic.
    pub v1_size: Option<usize>,
    /// Text to bytes.
    pub encode: EncodeFn,
    /// Bytes to text. Fixed-size families check the input length.
    pub decode: DecodeFn,
}

static SOLANA_KEY: RecordEncoding = RecordEncoding {
    family: EncodingFamily::SolanaKey,
    v1_size: Some(96),
    encode: families::encode_base58_key,
    decode: families::decode_base58_key,
};

static EVM: RecordEncoding = RecordEncoding {
    family: EncodingFamily::Evm,
    v1_size: Some(20),
    encode: families::encode_evm,
    decode: families::decode_evm,
};

static BECH32: RecordEncoding = RecordEncoding {
    family: EncodingFamily::Bech32,
    v1_size: Some(20),
    encode: families::encode_injective,
    decode: families::decode_injective,
};

static BASE58_KEY: RecordEncoding = RecordEncoding {
    family: EncodingFamily::Base58Key,
    v1_size: Some(32),
    encode: families::encode_base58_key,
    decode: families::decode_base58_key,
};

static IPV4: RecordEncoding = RecordEncoding {
    family: EncodingFamily::Ipv4,
    v1_size: Some(4),
    encode: families::encode_ipv4,
    decode: families::decode_ipv4,
};

static IPV6: RecordEncoding = RecordEncoding {
    family: EncodingFamily::Ipv6,
    v1_size: Some(16),
    encode: families::encode_ipv6,
    decode: families::decode_ipv6,
};

static PUNYCODE_TEXT: RecordEncoding = RecordEncoding {
    family: EncodingFamily::PunycodeText,
    v1_size: None,
    encode: families::encode_punycode_text,
    decode: families::decode_punycode_text,
};

static TEXT: RecordEncoding = RecordEncoding {
    family: EncodingFamily::Text,
    v1_size: None,
    encode: families::encode_text,
    decode: families::decode_text,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for record in Record::ALL {
            assert_eq!(record.as_str().parse::<Record>().unwrap(), record);
            assert_eq!(record.to_string(), record.as_str());
        }
    }

    #[test]
    fn test_unknown_record_name() {
        assert!(matches!(
            "sol".parse::<Record>(),
            Err(SnsError::UnknownRecord(_))
        ));
    }

    #[test]
    fn test_v1_sizes() {
        assert_eq!(Record::Sol.v1_size(), Some(96));
        assert_eq!(Record::Eth.v1_size(), Some(20));
        assert_eq!(Record::Base.v1_size(), Some(20));
        assert_eq!(Record::Injective.v1_size(), Some(20));
        assert_eq!(Record::A.v1_size(), Some(4));
        assert_eq!(Record::Aaaa.v1_size(), Some(16));
        assert_eq!(Record::Background.v1_size(), Some(32));
        assert_eq!(Record::Btc.v1_size(), None);
        assert_eq!(Record::Txt.v1_size(), None);
    }

    #[test]
    fn test_self_signed_records() {
        let self_signed: Vec<Record> = Record::ALL
            .into_iter()
            .filter(Record::is_self_signed)
            .collect();
        assert_eq!(
            self_signed,
            vec![Record::Sol, Record::Eth, Record::Bsc, Record::Injective, Record::Base]
        );
        assert!(!Record::Sol.uses_ethereum_roa());
        assert!(Record::Injective.uses_ethereum_roa());
    }

    #[test]
    fn test_serde_uses_record_name() {
        let json = serde_json::to_string(&Record::Injective).unwrap();
        assert_eq!(json, "\"INJ\"");
        let back: Record = serde_json::from_str("\"background\"").unwrap();
        assert_eq!(back, Record::Background);
    }
}
