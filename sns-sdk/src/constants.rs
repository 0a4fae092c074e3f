//! Protocol constants.
//!
//! Program identifiers and fixed prefixes shared by every SNS client. Changing
//! any of these breaks address compatibility with the deployed programs.

use solana_pubkey::{pubkey, Pubkey};

/// SPL name service program that owns every domain, subdomain and record account.
pub const NAME_PROGRAM_ID: Pubkey = pubkey!("namesLPneVptA9Z5rqUDD9tMTWEJwofgaYwp8cawRkX");

/// Registry account of the `.sol` top-level domain; parent of every root domain.
pub const ROOT_DOMAIN_ACCOUNT: Pubkey = pubkey!("58PwtjSDuFHuUkYjH9BYnnQKHfwo9reZhC2zMJv9JPkx");

/// Class of reverse-lookup accounts.
pub const REVERSE_LOOKUP_CLASS: Pubkey = pubkey!("33m47vH6Eav6jr5Ry86XjhRft2jRBLDnDgPSHoquXi2Z");

/// Central state of the records program; class of every record v2 account.
pub const CENTRAL_STATE_SNS_RECORDS: Pubkey = pubkey!("2pMnqHvei2N5oDcVGCRdZx48gqti199wr5CsyTTafsbo");

/// Records program that writes record v2 accounts.
pub const SNS_RECORDS_ID: Pubkey = pubkey!("HP3D4D1ZCmohQGFVms2SS4LCANgJyksBf5s1F77FuFjZ");

/// Sub-registrar program that sells subdomains on behalf of a domain owner.
pub const SUB_REGISTRAR_PROGRAM_ID: Pubkey = pubkey!("2KkyPzjaAYaz2ojQZ9P3xYakLd96B5UH6a2isLaZ4Cgs");

/// Seed prefix of registrar accounts.
pub const REGISTRAR_SEED: &[u8] = b"registrar";

/// Prefix hashed in front of every name.
pub const HASH_PREFIX: &str = "SPL Name Service";

/// Suffix of the `.sol` top-level domain, stripped before derivation.
pub const SOL_TLD_SUFFIX: &str = ".sol";

/// Marker appended to program address seeds before hashing.
pub const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Maximum length of a single program address seed.
pub const MAX_SEED_LEN: usize = 32;

/// Maximum number of program address seeds, bump included.
pub const MAX_SEEDS: usize = 16;

/// Prefix of the message signed for an Ethereum right of association.
pub const ROA_MESSAGE_PREFIX: &str = "SNS ROA: ";

/// Size of the name registry header (parent, owner, class).
pub const NAME_REGISTRY_HEADER_LEN: usize = 96;

/// Size of the record v2 header that follows the registry header.
pub const RECORD_V2_HEADER_LEN: usize = 8;

/// Byte offset of the owner inside a name registry account.
pub const OWNER_OFFSET: usize = 32;

/// Byte offset of the parent inside a name registry account.
pub const PARENT_OFFSET: usize = 0;
