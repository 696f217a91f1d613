//! Serial generation.

use crate::checksum::checksum_hex;
use crate::config::SchemeConfig;
use crate::derive::{derive_key_byte, KeyByteParams, DEFAULT_KEY_BYTE_PARAMS};
use crate::error::{PkvError, PkvResult};
use crate::serial::{insert_separators, serial_len};

/// Produces serials for a fixed set of key byte parameters.
///
/// The generator needs every slot's parameters. Ship it only with the
/// tooling that issues serials, never with a verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyGenerator {
    params: Vec<KeyByteParams>,
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self {
            params: DEFAULT_KEY_BYTE_PARAMS.to_vec(),
        }
    }
}

impl KeyGenerator {
    /// Creates a generator for the given slot parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PkvError::InvalidConfig`] if `params` is empty.
    pub fn new(params: Vec<KeyByteParams>) -> PkvResult<Self> {
        if params.is_empty() {
            return Err(PkvError::InvalidConfig(
                "at least one key byte is required".to_string(),
            ));
        }
        Ok(Self { params })
    }

    /// Creates a generator from a scheme configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn from_config(config: &SchemeConfig) -> PkvResult<Self> {
        config.validate()?;
        Self::new(config.key_bytes.clone())
    }

    /// Number of key bytes in each serial.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.params.len()
    }

    /// Derives the key bytes for `seed`, in slot order.
    #[must_use]
    pub fn key_bytes(&self, seed: u32) -> Vec<u8> {
        self.params
            .iter()
            .map(|params| derive_key_byte(seed, *params))
            .collect()
    }

    /// Builds the hyphenated serial for `seed`.
    #[must_use]
    pub fn create_key(&self, seed: u32) -> String {
        let mut raw = String::with_capacity(serial_len(self.params.len()));
        raw.push_str(&format!("{seed:08X}"));
        raw.push_str(&hex::encode_upper(self.key_bytes(seed)));

        let sum = checksum_hex(&raw);
        raw.push_str(&sum);

        insert_separators(&raw)
    }
}

/// Builds the serial for `seed` using the reference scheme.
#[must_use]
pub fn create_key(seed: u32) -> String {
    KeyGenerator::default().create_key(seed)
}

/// Parses user-supplied seed text: 1 to 8 hex digits, optionally
/// prefixed with `0x`.
///
/// # Errors
///
/// Returns [`PkvError::InvalidSeed`] if the text is not a 32-bit hex value.
pub fn parse_seed(text: &str) -> PkvResult<u32> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() || digits.len() > 8 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(PkvError::InvalidSeed(format!(
            "expected 1 to 8 hex digits, got {text:?}"
        )));
    }

    u32::from_str_radix(digits, 16).map_err(|e| PkvError::InvalidSeed(e.to_string()))
}
