//! Key byte derivation.
//!
//! Each key byte is derived from the seed and a fixed `(a, b, c)` triple.
//! The even/odd split on `a` (OR against AND) is part of the scheme and
//! must not be collapsed into a single expression.

use serde::{Deserialize, Serialize};

/// Parameter triple for one key byte slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyByteParams {
    /// Shift selecting the byte of the seed that is exposed.
    pub a: u8,
    /// Shift applied to the seed before it is combined with `c`.
    pub b: u8,
    /// Mask combined with the shifted seed.
    pub c: u8,
}

impl KeyByteParams {
    /// Creates a parameter triple.
    #[must_use]
    pub const fn new(a: u8, b: u8, c: u8) -> Self {
        Self { a, b, c }
    }
}

/// Parameter triples of the reference scheme, in slot order.
pub const DEFAULT_KEY_BYTE_PARAMS: [KeyByteParams; 4] = [
    KeyByteParams::new(24, 3, 200),
    KeyByteParams::new(10, 0, 56),
    KeyByteParams::new(1, 2, 91),
    KeyByteParams::new(7, 1, 100),
];

/// Derives one key byte from `seed`.
///
/// `a` is reduced modulo 25 and `b` modulo 3, so both shifts are always
/// valid for a 32-bit word. `c` is combined with the full-width shifted
/// seed; only the final value is masked to 8 bits.
#[must_use]
pub fn derive_key_byte(seed: u32, params: KeyByteParams) -> u8 {
    let a = u32::from(params.a % 25);
    let b = u32::from(params.b % 3);
    let c = u32::from(params.c);

    let exposed = (seed >> a) & 0xFF;
    let result = if a % 2 == 0 {
        exposed ^ ((seed >> b) | c)
    } else {
        exposed ^ ((seed >> b) & c)
    };

    (result & 0xFF) as u8
}
