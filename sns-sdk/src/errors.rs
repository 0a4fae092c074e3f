//! Error types for SNS operations.
//!
//! Malformed input, protocol invariant violations and missing accounts are
//! reported as [`SnsError`]. Cryptographic checks never produce an error: a
//! bad signature is an expected outcome and is returned as `false`.

use crate::record::Record;
use crate::Pubkey;
use solana_pubkey::ParsePubkeyError;

/// Stable numeric error codes for callers and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SnsErrorCode {
    /// Transport/network layer error
    Transport = 2000,
    /// Connection failed
    ConnectionFailed = 2001,
    /// Connection timeout
    ConnectionTimeout = 2002,
    /// Account not found
    AccountNotFound = 4000,
    /// Domain is not registered
    DomainDoesNotExist = 4001,
    /// Domain string has an unsupported shape
    MalformedDomain = 5000,
    /// Domain label violates the naming grammar
    InvalidDomainName = 5001,
    /// Public key text or bytes are invalid
    InvalidPubkey = 5002,
    /// Record content does not match the record grammar
    InvalidRecordContent = 5003,
    /// Record operation not supported for this record type
    UnsupportedRecord = 5004,
    /// Signature rejected while building a record
    InvalidSignature = 5005,
    /// Serialization error
    Serialization = 5006,
    /// Record name is not a known record type
    UnknownRecord = 5007,
    /// PDA seed longer than 32 bytes
    SeedTooLong = 6000,
    /// Too many PDA seeds
    MaxSeedsExceeded = 6001,
    /// Bump search exhausted
    NoValidAddressFound = 6002,
    /// Stored record bytes are corrupt or use the wrong record tag
    InvalidRecordData = 6003,
    /// Account bytes do not match the expected layout
    InvalidAccountData = 6004,
    /// Resolution target is a program-derived address
    PdaOwnerNotAllowed = 6005,
    /// Sub-registrar account has the wrong tag
    InvalidSubRegistrar = 6006,
    /// Rate limited
    RateLimited = 8000,
    /// Internal/unexpected error
    Internal = 9999,
}

/// Grammar failures detected while encoding or decoding a record value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// EVM address is not `0x` followed by 40 hex characters.
    #[error("invalid EVM address: {0}")]
    InvalidEvmAddress(String),

    /// Injective address is not a bech32 `inj` address with a 20-byte payload.
    #[error("invalid Injective address: {0}")]
    InvalidInjectiveAddress(String),

    /// IPv4 address is not four decimal octets.
    #[error("invalid IPv4 address: {0}")]
    InvalidIpv4(String),

    /// IPv6 address is not eight hex groups.
    #[error("invalid IPv6 address: {0}")]
    InvalidIpv6(String),

    /// Text is not an address of the record's chain.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Text is not a content identifier of the record's network.
    #[error("invalid content id: {0}")]
    InvalidContentId(String),

    /// Text contains characters outside the base58 alphabet.
    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    /// Decoded payload has the wrong size.
    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Protocol size for the record
        expected: usize,
        /// Size that was found
        actual: usize,
    },

    /// Stored bytes are not valid UTF-8.
    #[error("content is not valid UTF-8")]
    InvalidUtf8,

    /// A label could not be converted to or from punycode.
    #[error("punycode conversion failed for label '{0}'")]
    Punycode(String),
}

/// Comprehensive error type for SNS operations.
#[derive(Debug, thiserror::Error)]
pub enum SnsError {
    /// Transport/network layer error.
    #[error("transport error: {0}")]
    Transport(String),

    /// Connection failed.
    #[error("connection to {target} failed: {reason}")]
    ConnectionFailed {
        /// Target endpoint
        target: String,
        /// Underlying error message
        reason: String,
    },

    /// Connection timeout.
    #[error("{operation} timed out after {timeout_ms}ms")]
    ConnectionTimeout {
        /// Operation that timed out
        operation: String,
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// Account does not exist on chain.
    #[error("account not found: {0}")]
    AccountNotFound(Pubkey),

    /// Domain registry account does not exist.
    #[error("domain does not exist: {0}")]
    DomainDoesNotExist(String),

    /// Domain string has too many segments for the requested lookup.
    #[error("the domain is malformed: {0}")]
    MalformedDomain(String),

    /// A domain label violates the naming grammar.
    #[error("invalid domain name '{name}': {reason}")]
    InvalidDomainName {
        /// Offending label or domain
        name: String,
        /// Rule that was violated
        reason: String,
    },

    /// Public key could not be parsed.
    #[error("invalid public key: {0}")]
    InvalidPubkey(String),

    /// Record content does not match the grammar of its record type.
    #[error("invalid {record} record content: {source}")]
    InvalidRecordContent {
        /// Record type being encoded
        record: Record,
        /// Grammar failure
        #[source]
        source: CodecError,
    },

    /// Stored record bytes cannot be interpreted as the given record type.
    #[error("invalid {record} record data{}: {reason}", domain_suffix(.domain))]
    InvalidRecordData {
        /// Record type being decoded
        record: Record,
        /// Domain the record belongs to, when known
        domain: Option<String>,
        /// What was wrong with the data
        reason: String,
    },

    /// Operation not supported for this record type.
    #[error("unsupported record {record}: {reason}")]
    UnsupportedRecord {
        /// Record type
        record: Record,
        /// Why it is unsupported
        reason: String,
    },

    /// Record name is not one of the known record types.
    #[error("unknown record type '{0}'")]
    UnknownRecord(String),

    /// Signature did not verify while building a record.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// Account bytes do not match the expected layout.
    #[error("invalid account data: {0}")]
    InvalidAccountData(String),

    /// A PDA seed is longer than 32 bytes.
    #[error("seed of {len} bytes exceeds the 32 byte limit")]
    SeedTooLong {
        /// Length of the offending seed
        len: usize,
    },

    /// More seeds than a program address accepts.
    #[error("{count} seeds exceed the limit of 16")]
    MaxSeedsExceeded {
        /// Number of seeds supplied, bump included
        count: usize,
    },

    /// Every bump value produced an on-curve hash.
    #[error("unable to find a viable program address bump seed")]
    NoValidAddressFound,

    /// The resolved target is a program-derived address and PDAs are not allowed.
    #[error("resolution target {0} is a program-derived address")]
    PdaOwnerNotAllowed(Pubkey),

    /// Account at the registrar address is not an open sub-registrar.
    #[error("account {0} is not a sub-registrar")]
    InvalidSubRegistrar(Pubkey),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Rate limited, should retry after delay.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited {
        /// Suggested retry delay in milliseconds
        retry_after_ms: u64,
    },

    /// Internal/unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SnsError {
    /// Numeric code of this error.
    pub fn code(&self) -> SnsErrorCode {
        match self {
            Self::Transport(_) => SnsErrorCode::Transport,
            Self::ConnectionFailed { .. } => SnsErrorCode::ConnectionFailed,
            Self::ConnectionTimeout { .. } => SnsErrorCode::ConnectionTimeout,
            Self::AccountNotFound(_) => SnsErrorCode::AccountNotFound,
            Self::DomainDoesNotExist(_) => SnsErrorCode::DomainDoesNotExist,
            Self::MalformedDomain(_) => SnsErrorCode::MalformedDomain,
            Self::InvalidDomainName { .. } => SnsErrorCode::InvalidDomainName,
            Self::InvalidPubkey(_) => SnsErrorCode::InvalidPubkey,
            Self::InvalidRecordContent { .. } => SnsErrorCode::InvalidRecordContent,
            Self::InvalidRecordData { .. } => SnsErrorCode::InvalidRecordData,
            Self::UnsupportedRecord { .. } => SnsErrorCode::UnsupportedRecord,
            Self::UnknownRecord(_) => SnsErrorCode::UnknownRecord,
            Self::InvalidSignature(_) => SnsErrorCode::InvalidSignature,
            Self::InvalidAccountData(_) => SnsErrorCode::InvalidAccountData,
            Self::SeedTooLong { .. } => SnsErrorCode::SeedTooLong,
            Self::MaxSeedsExceeded { .. } => SnsErrorCode::MaxSeedsExceeded,
            Self::NoValidAddressFound => SnsErrorCode::NoValidAddressFound,
            Self::PdaOwnerNotAllowed(_) => SnsErrorCode::PdaOwnerNotAllowed,
            Self::InvalidSubRegistrar(_) => SnsErrorCode::InvalidSubRegistrar,
            Self::Serialization(_) => SnsErrorCode::Serialization,
            Self::RateLimited { .. } => SnsErrorCode::RateLimited,
            Self::Internal(_) => SnsErrorCode::Internal,
        }
    }

    /// The error message as an owned string.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns true if this error is potentially recoverable by retrying.
    ///
    /// Only network-level failures qualify; codec and derivation errors are
    /// deterministic and will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport(_)
                | Self::ConnectionFailed { .. }
                | Self::ConnectionTimeout { .. }
                | Self::RateLimited { .. }
        )
    }

    /// Returns a suggested retry delay in milliseconds, if applicable.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_ms } => Some(*retry_after_ms),
            Self::ConnectionTimeout { .. } => Some(1000),
            Self::ConnectionFailed { .. } => Some(2000),
            Self::Transport(_) => Some(1000),
            _ => None,
        }
    }

    /// Create a transport error from any error type.
    pub fn transport<E: std::error::Error>(err: E) -> Self {
        Self::Transport(err.to_string())
    }

    /// Create an invalid record content error.
    pub fn invalid_content(record: Record, source: CodecError) -> Self {
        Self::InvalidRecordContent { record, source }
    }

    /// Create an invalid record data error without domain context.
    pub fn invalid_data(record: Record, reason: impl Into<String>) -> Self {
        Self::InvalidRecordData {
            record,
            domain: None,
            reason: reason.into(),
        }
    }

    /// Attach the domain to record decoding errors so the message names both
    /// the record type and the domain it was read from.
    pub fn with_domain(self, domain: &str) -> Self {
        match self {
            Self::InvalidRecordData {
                record,
                domain: None,
                reason,
            } => Self::InvalidRecordData {
                record,
                domain: Some(domain.to_string()),
                reason,
            },
            other => other,
        }
    }
}

fn domain_suffix(domain: &Option<String>) -> String {
    domain
        .as_ref()
        .map(|d| format!(" for {d}"))
        .unwrap_or_default()
}

impl From<ParsePubkeyError> for SnsError {
    fn from(err: ParsePubkeyError) -> Self {
        Self::InvalidPubkey(err.to_string())
    }
}

impl From<serde_json::Error> for SnsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
