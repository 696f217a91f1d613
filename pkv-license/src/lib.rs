//! Partial key verification (PKV) serials.
//!
//! This crate handles:
//! - Deriving obfuscated key bytes from a 32-bit seed
//! - Generating hyphenated serials with a rolling checksum
//! - Classifying serials as good, invalid, blacklisted, or phony
//! - Loading scheme configurations (parameters, enabled slots, blacklist)
//!
//! # Design Principles
//!
//! - **Partial checks**: a verifier checks a configured subset of key bytes
//! - **Total functions**: generating and checking never fail or panic
//! - **Injected configuration**: blacklist and enabled slots are values,
//!   not compile-time switches
//!
//! This is an obfuscation scheme, not a signature. It offers no
//! cryptographic guarantee.
//!
//! # Serial Format
//!
//! `HEX8(seed) ‖ HEX2(key byte)… ‖ HEX4(checksum)`, uppercase, with a `-`
//! every four characters from the right. The reference scheme has four key
//! bytes: `A279-1717-7D7A-CA2E-7154`.

mod checksum;
mod config;
mod derive;
mod error;
mod generator;
mod serial;
mod verifier;

pub use checksum::{checksum, checksum_hex, checksum_wide, CHECKSUM_LEFT_INIT, CHECKSUM_RIGHT_INIT};
pub use config::{Blacklist, SchemeConfig, DEFAULT_BLACKLIST};
pub use derive::{derive_key_byte, KeyByteParams, DEFAULT_KEY_BYTE_PARAMS};
pub use error::{PkvError, PkvResult};
pub use generator::{create_key, parse_seed, KeyGenerator};
pub use serial::{insert_separators, normalize, serial_len, SEPARATOR};
pub use verifier::{check_key, KeyStatus, KeyVerifier};
