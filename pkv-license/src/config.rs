//! Scheme configuration.
//!
//! A scheme is the ordered list of key byte parameter triples, the set of
//! slots a verifier actually checks, and the serial blacklist. The
//! defaults reproduce the reference scheme. Configurations can be read
//! from TOML:
//!
//! ```toml
//! enabled_slots = [0, 2]
//! blacklist = ["11111111"]
//!
//! [[key_bytes]]
//! a = 24
//! b = 3
//! c = 200
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::derive::{KeyByteParams, DEFAULT_KEY_BYTE_PARAMS};
use crate::error::{PkvError, PkvResult};

/// Substrings rejected by the reference scheme.
pub const DEFAULT_BLACKLIST: [&str; 1] = ["11111111"];

/// Read-only set of rejected serial substrings.
///
/// Entries are stored uppercase; matching is case-insensitive against a
/// normalized serial.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    entries: Vec<String>,
}

impl Blacklist {
    /// Builds a blacklist. Entries are uppercased but otherwise kept
    /// verbatim, so surrounding whitespace never matches a serial. Empty
    /// entries would match every serial and are dropped.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kept = Vec::new();
        for entry in entries {
            let entry = entry.as_ref();
            if entry.is_empty() {
                warn!("Ignoring empty blacklist entry");
                continue;
            }
            let entry = entry.to_uppercase();
            if !kept.contains(&entry) {
                kept.push(entry);
            }
        }
        Self { entries: kept }
    }

    /// Returns the first entry contained in `normalized`, if any.
    #[must_use]
    pub fn find_in(&self, normalized: &str) -> Option<&str> {
        let haystack = normalized.to_uppercase();
        self.entries
            .iter()
            .find(|entry| haystack.contains(entry.as_str()))
            .map(String::as_str)
    }

    /// Returns true if `normalized` contains a blacklisted substring.
    #[must_use]
    pub fn matches(&self, normalized: &str) -> bool {
        self.find_in(normalized).is_some()
    }

    /// Returns the entries.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Returns true if nothing is blacklisted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Full description of a PKV scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeConfig {
    /// Parameter triple for each key byte slot, in serial order.
    #[serde(default = "default_key_bytes")]
    pub key_bytes: Vec<KeyByteParams>,

    /// Slots a verifier checks. `None` checks every slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_slots: Option<BTreeSet<usize>>,

    /// Rejected serial substrings.
    #[serde(default = "default_blacklist")]
    pub blacklist: Vec<String>,
}

fn default_key_bytes() -> Vec<KeyByteParams> {
    DEFAULT_KEY_BYTE_PARAMS.to_vec()
}

fn default_blacklist() -> Vec<String> {
    DEFAULT_BLACKLIST.iter().map(|s| (*s).to_string()).collect()
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self {
            key_bytes: default_key_bytes(),
            enabled_slots: None,
            blacklist: default_blacklist(),
        }
    }
}

impl SchemeConfig {
    /// Parses and validates a TOML scheme description.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or the scheme is invalid.
    pub fn from_toml_str(s: &str) -> PkvResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a TOML scheme file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid scheme.
    pub fn load(path: &Path) -> PkvResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        info!(
            "Loaded scheme from {:?}: {} key bytes, {} checked",
            path,
            config.slot_count(),
            config.active_slots().len()
        );
        Ok(config)
    }

    /// Checks that the scheme can generate and verify serials.
    ///
    /// # Errors
    ///
    /// Returns [`PkvError::InvalidConfig`] if there are no key bytes, the
    /// enabled slot set is empty, or an enabled slot is out of range.
    pub fn validate(&self) -> PkvResult<()> {
        if self.key_bytes.is_empty() {
            return Err(PkvError::InvalidConfig(
                "at least one key byte is required".to_string(),
            ));
        }

        if let Some(enabled) = &self.enabled_slots {
            if enabled.is_empty() {
                return Err(PkvError::InvalidConfig(
                    "at least one slot must be checked".to_string(),
                ));
            }
            if let Some(slot) = enabled.iter().find(|s| **s >= self.key_bytes.len()) {
                return Err(PkvError::InvalidConfig(format!(
                    "enabled slot {slot} out of range (scheme has {} key bytes)",
                    self.key_bytes.len()
                )));
            }
        }

        Ok(())
    }

    /// Number of key byte slots in a serial.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.key_bytes.len()
    }

    /// Slots a verifier built from this scheme checks.
    #[must_use]
    pub fn active_slots(&self) -> BTreeSet<usize> {
        match &self.enabled_slots {
            Some(enabled) => enabled.clone(),
            None => (0..self.key_bytes.len()).collect(),
        }
    }

    /// Builds the blacklist.
    #[must_use]
    pub fn blacklist(&self) -> Blacklist {
        Blacklist::new(&self.blacklist)
    }
}
