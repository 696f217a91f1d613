//! Shared test helpers for PKV tests.

#![allow(dead_code)]

use pkv_license::{checksum_hex, insert_separators, Blacklist, KeyByteParams, KeyVerifier};
use std::collections::BTreeMap;

/// Serials shipped with the reference application, all generated by the
/// reference scheme.
pub const REFERENCE_SERIALS: [&str; 3] = [
    "0D9C-DAF5-F0CB-63D5-1180",
    "DE81-89F2-2498-A173-7B41",
    "A029-9C44-6C1B-3318-4D2E",
];

/// Seed used for fixed-output fixtures.
pub const REFERENCE_SEED: u32 = 0xA279_1717;

/// Serial generated from [`REFERENCE_SEED`] by the reference scheme.
pub const REFERENCE_SEED_SERIAL: &str = "A279-1717-7D7A-CA2E-7154";

/// Appends a correct checksum to `body` and inserts separators, the way a
/// forger who only knows the checksum would build a serial.
pub fn forge(body: &str) -> String {
    let raw = format!("{body}{}", checksum_hex(body));
    insert_separators(&raw)
}

/// Reference parameters keyed by slot, restricted to `slots`.
pub fn reference_checks(slots: &[usize]) -> BTreeMap<usize, KeyByteParams> {
    slots
        .iter()
        .map(|slot| (*slot, pkv_license::DEFAULT_KEY_BYTE_PARAMS[*slot]))
        .collect()
}

/// Reference-scheme verifier checking only `slots`, with the default blacklist.
pub fn partial_verifier(slots: &[usize]) -> KeyVerifier {
    KeyVerifier::new(
        pkv_license::DEFAULT_KEY_BYTE_PARAMS.len(),
        reference_checks(slots),
        Blacklist::new(pkv_license::DEFAULT_BLACKLIST),
    )
    .unwrap()
}
