//! Serial verification.
//!
//! Checks run in a fixed order and the first failure decides the outcome:
//!
//! 1. length and checksum → [`KeyStatus::Invalid`]
//! 2. blacklist → [`KeyStatus::Blacklisted`]
//! 3. seed hex and each enabled key byte → [`KeyStatus::Phony`]
//!
//! A forger can produce a self-consistent checksum without knowing the
//! scheme, so a serial that passes the checksum but fails a key byte is
//! reported as phony rather than invalid.
//!
//! # Partial verification
//!
//! A released verifier should check only some of the key byte slots. If a
//! keygen leaks, a later release enables a slot the keygen never had to
//! get right, and its serials stop verifying while genuine ones keep
//! working. The serial format and the per-slot algorithm never change;
//! only the set of enabled slots does.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::checksum::checksum_hex;
use crate::config::{Blacklist, SchemeConfig};
use crate::derive::{derive_key_byte, KeyByteParams, DEFAULT_KEY_BYTE_PARAMS};
use crate::error::{PkvError, PkvResult};
use crate::serial::{
    body_len, key_byte_offset, normalize, serial_len, CHECKSUM_HEX_LEN, KEY_BYTE_HEX_LEN,
    SEED_HEX_LEN,
};

/// Outcome of checking a serial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyStatus {
    /// Every enabled check passed.
    #[serde(rename = "KEY_GOOD")]
    Good,
    /// Wrong length or checksum mismatch.
    #[serde(rename = "KEY_INVALID")]
    Invalid,
    /// Contains a blacklisted substring.
    #[serde(rename = "KEY_BLACKLISTED")]
    Blacklisted,
    /// Checksum is consistent but the seed or a key byte is not.
    #[serde(rename = "KEY_PHONY")]
    Phony,
}

impl KeyStatus {
    /// Returns the status name used in reports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "KEY_GOOD",
            Self::Invalid => "KEY_INVALID",
            Self::Blacklisted => "KEY_BLACKLISTED",
            Self::Phony => "KEY_PHONY",
        }
    }

    /// Returns true if the serial should be accepted.
    #[must_use]
    pub fn is_good(&self) -> bool {
        matches!(self, Self::Good)
    }
}

impl fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies serials against a scheme, checking only the enabled slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyVerifier {
    slot_count: usize,
    checks: BTreeMap<usize, KeyByteParams>,
    blacklist: Blacklist,
}

impl Default for KeyVerifier {
    /// Reference scheme with every slot enabled and the default blacklist.
    fn default() -> Self {
        Self {
            slot_count: DEFAULT_KEY_BYTE_PARAMS.len(),
            checks: DEFAULT_KEY_BYTE_PARAMS.iter().copied().enumerate().collect(),
            blacklist: SchemeConfig::default().blacklist(),
        }
    }
}

impl KeyVerifier {
    /// Creates a verifier for serials with `slot_count` key bytes that
    /// checks only the slots present in `checks`.
    ///
    /// # Errors
    ///
    /// Returns [`PkvError::InvalidConfig`] if `checks` is empty or names a
    /// slot outside `0..slot_count`.
    pub fn new(
        slot_count: usize,
        checks: BTreeMap<usize, KeyByteParams>,
        blacklist: Blacklist,
    ) -> PkvResult<Self> {
        if checks.is_empty() {
            return Err(PkvError::InvalidConfig(
                "at least one slot must be checked".to_string(),
            ));
        }
        if let Some(slot) = checks.keys().find(|s| **s >= slot_count) {
            return Err(PkvError::InvalidConfig(format!(
                "checked slot {slot} out of range (serials have {slot_count} key bytes)"
            )));
        }
        Ok(Self {
            slot_count,
            checks,
            blacklist,
        })
    }

    /// Creates a verifier from a scheme, keeping only the parameters of the
    /// enabled slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn from_config(config: &SchemeConfig) -> PkvResult<Self> {
        config.validate()?;
        let checks = config
            .active_slots()
            .into_iter()
            .map(|slot| (slot, config.key_bytes[slot]))
            .collect();
        Self::new(config.slot_count(), checks, config.blacklist())
    }

    /// Replaces the blacklist.
    #[must_use]
    pub fn with_blacklist(mut self, blacklist: Blacklist) -> Self {
        self.blacklist = blacklist;
        self
    }

    /// Number of key bytes expected in a serial.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Slots this verifier checks, in ascending order.
    pub fn enabled_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.checks.keys().copied()
    }

    /// Returns the blacklist.
    #[must_use]
    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    /// Returns true if `serial` has the right length and a matching checksum.
    #[must_use]
    pub fn has_valid_checksum(&self, serial: &str) -> bool {
        let chars: Vec<char> = normalize(serial).chars().collect();
        self.checksum_matches(&chars)
    }

    /// Classifies `serial`. Accepts any case, with or without separators.
    ///
    /// Lengths and field offsets count characters, so a serial with
    /// non-hex characters in its body still reaches the checksum and, if
    /// that matches, is reported as phony.
    #[must_use]
    pub fn check_key(&self, serial: &str) -> KeyStatus {
        let key = normalize(serial);
        let chars: Vec<char> = key.chars().collect();

        if !self.checksum_matches(&chars) {
            debug!("Serial rejected: bad length or checksum");
            return KeyStatus::Invalid;
        }

        if let Some(entry) = self.blacklist.find_in(&key) {
            debug!("Serial rejected: contains blacklisted {}", entry);
            return KeyStatus::Blacklisted;
        }

        let Some(seed) = parse_embedded_seed(&field(&chars, 0, SEED_HEX_LEN)) else {
            debug!("Serial rejected: seed is not hexadecimal");
            return KeyStatus::Phony;
        };

        for (slot, params) in &self.checks {
            let digits = field(&chars, key_byte_offset(*slot), KEY_BYTE_HEX_LEN);
            let mut found = [0u8; 1];
            if hex::decode_to_slice(&digits, &mut found).is_err()
                || found[0] != derive_key_byte(seed, *params)
            {
                debug!("Serial rejected: key byte {} does not match", slot);
                return KeyStatus::Phony;
            }
        }

        KeyStatus::Good
    }

    /// `chars` must already be normalized.
    fn checksum_matches(&self, chars: &[char]) -> bool {
        if chars.len() != serial_len(self.slot_count) {
            return false;
        }
        let body_end = body_len(self.slot_count);
        let body = field(chars, 0, body_end);
        let sum = field(chars, body_end, CHECKSUM_HEX_LEN);
        checksum_hex(&body) == sum
    }
}

/// Collects `len` characters starting at character offset `start`.
fn field(chars: &[char], start: usize, len: usize) -> String {
    chars.iter().skip(start).take(len).collect()
}

/// Decodes the 8 seed digits. Only `[0-9A-F]` is accepted.
fn parse_embedded_seed(digits: &str) -> Option<u32> {
    if digits.len() != SEED_HEX_LEN
        || !digits.bytes().all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
    {
        return None;
    }
    let mut bytes = [0u8; 4];
    hex::decode_to_slice(digits, &mut bytes).ok()?;
    Some(u32::from_be_bytes(bytes))
}

/// Classifies `serial` using the reference scheme with every slot enabled.
#[must_use]
pub fn check_key(serial: &str) -> KeyStatus {
    KeyVerifier::default().check_key(serial)
}
