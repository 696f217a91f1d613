//! Serial layout and formatting.
//!
//! A serial is `HEX8(seed) ‖ HEX2(byte)… ‖ HEX4(checksum)` with a `-`
//! every four characters counted from the right.

/// Hex digits used for the seed.
pub const SEED_HEX_LEN: usize = 8;

/// Hex digits used for each key byte.
pub const KEY_BYTE_HEX_LEN: usize = 2;

/// Hex digits used for the checksum.
pub const CHECKSUM_HEX_LEN: usize = 4;

/// Separator inserted for readability.
pub const SEPARATOR: char = '-';

const GROUP_LEN: usize = 4;

/// Length of the checksummed body (seed and key bytes) for `slot_count` slots.
#[must_use]
pub const fn body_len(slot_count: usize) -> usize {
    SEED_HEX_LEN + KEY_BYTE_HEX_LEN * slot_count
}

/// Length of an un-hyphenated serial for `slot_count` slots.
#[must_use]
pub const fn serial_len(slot_count: usize) -> usize {
    body_len(slot_count) + CHECKSUM_HEX_LEN
}

/// Offset of a key byte's hex digits within an un-hyphenated serial.
#[must_use]
pub const fn key_byte_offset(slot: usize) -> usize {
    SEED_HEX_LEN + KEY_BYTE_HEX_LEN * slot
}

/// Strips separators and uppercases the serial.
#[must_use]
pub fn normalize(serial: &str) -> String {
    serial
        .chars()
        .filter(|c| *c != SEPARATOR)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Inserts a separator every four characters, counting from the end.
///
/// No separator is placed at an insertion point of 1 or less, so the
/// result never starts with a separator or a one-character group.
#[must_use]
pub fn insert_separators(raw: &str) -> String {
    let mut chars: Vec<char> = raw.chars().collect();
    let mut at = chars.len().saturating_sub(GROUP_LEN);

    while at > 1 {
        chars.insert(at, SEPARATOR);
        at = at.saturating_sub(GROUP_LEN);
    }

    chars.into_iter().collect()
}
