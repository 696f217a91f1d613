//! Rolling checksum over the serial body.

/// Initial value of the left accumulator.
pub const CHECKSUM_LEFT_INIT: u16 = 0x56;

/// Initial value of the right accumulator.
pub const CHECKSUM_RIGHT_INIT: u16 = 0xAF;

/// Computes the checksum of `input`, one UTF-16 code unit at a time.
///
/// Each accumulator is reduced by subtracting `0xFF` (not masking) once it
/// exceeds `0xFF`. The result is `(left << 8) + right` at full width: for
/// ASCII input it always fits in 16 bits, other input can exceed it.
#[must_use]
pub fn checksum_wide(input: &str) -> u64 {
    let mut left = u64::from(CHECKSUM_LEFT_INIT);
    let mut right = u64::from(CHECKSUM_RIGHT_INIT);

    for unit in input.encode_utf16() {
        right = right.wrapping_add(u64::from(unit));
        if right > 0xFF {
            right -= 0xFF;
        }

        left = left.wrapping_add(right);
        if left > 0xFF {
            left -= 0xFF;
        }
    }

    (left << 8).wrapping_add(right)
}

/// Computes the 16-bit checksum of `input`.
///
/// Returns `None` when the accumulators outgrow 16 bits, which only
/// happens for non-ASCII input.
#[must_use]
pub fn checksum(input: &str) -> Option<u16> {
    u16::try_from(checksum_wide(input)).ok()
}

/// Renders a checksum as uppercase hex, at least four digits wide.
///
/// A wide checksum renders with more than four digits and so never equals
/// the four-digit tail of a serial.
#[must_use]
pub fn checksum_hex(input: &str) -> String {
    format!("{:04X}", checksum_wide(input))
}
