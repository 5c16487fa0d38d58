//! Incremental hex field decoding
//!
//! Fields arrive one ASCII digit at a time, most significant nibble first.
//! The accumulators work on the byte currently being filled: position 0
//! clears the value, every even position after that promotes the finished
//! byte by shifting left 8 bits, and each digit is merged into the low byte.
//!
//! Decoding never fails. Bytes that are not hex digits decode as `0`.

/// Digits in a numeric parameter (16 bits)
pub const NUM_PARAM_DIGITS: u8 = 4;

/// Digits in an RGB color (24 bits)
pub const COLOR_DIGITS: u8 = 6;

/// Decode one ASCII hex digit, case-insensitive
///
/// Any other byte decodes to 0.
pub const fn nibble(byte: u8) -> u8 {
    match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'f' => byte - b'a' + 10,
        b'A'..=b'F' => byte - b'A' + 10,
        _ => 0,
    }
}

/// Shift a digit into the low byte, dropping the byte's high nibble
const fn push_nibble(low: u8, byte: u8) -> u8 {
    (low << 4) | nibble(byte)
}

/// Accumulate one digit of a 4-digit numeric parameter
///
/// `pos` is the index of `byte` within the field (0..4).
pub fn accumulate_u16(value: u16, byte: u8, pos: u8) -> u16 {
    let mut value = if pos == 0 { 0 } else { value };
    if pos == 2 {
        value <<= 8;
    }

    (value & 0xFF00) | u16::from(push_nibble(value as u8, byte))
}

/// Accumulate one digit of a 6-digit 0xRRGGBB color
///
/// `pos` is the index of `byte` within the field (0..6).
pub fn accumulate_color(value: u32, byte: u8, pos: u8) -> u32 {
    let mut value = if pos == 0 { 0 } else { value };
    if pos == 2 || pos == 4 {
        value <<= 8;
    }

    (value & 0x00FF_FF00) | u32::from(push_nibble(value as u8, byte))
}

/// Decode a complete numeric parameter
pub fn decode_u16(digits: &[u8; NUM_PARAM_DIGITS as usize]) -> u16 {
    digits
        .iter()
        .zip(0u8..)
        .fold(0, |value, (&byte, pos)| accumulate_u16(value, byte, pos))
}

/// Decode a complete color
pub fn decode_color(digits: &[u8; COLOR_DIGITS as usize]) -> u32 {
    digits
        .iter()
        .zip(0u8..)
        .fold(0, |value, (&byte, pos)| accumulate_color(value, byte, pos))
}

/// Upper-case ASCII digit for the low nibble of `value`
pub const fn hex_digit(value: u8) -> u8 {
    let n = value & 0x0F;
    if n < 10 {
        b'0' + n
    } else {
        b'A' + n - 10
    }
}

/// Encode a numeric parameter as 4 upper-case digits
pub fn encode_u16(value: u16) -> [u8; NUM_PARAM_DIGITS as usize] {
    let mut out = [0u8; NUM_PARAM_DIGITS as usize];
    for (i, digit) in out.iter_mut().enumerate() {
        let shift = 12 - 4 * i as u32;
        *digit = hex_digit((value >> shift) as u8);
    }
    out
}

/// Encode a color as 6 upper-case digits
///
/// Bits above the 24-bit color are ignored.
pub fn encode_color(value: u32) -> [u8; COLOR_DIGITS as usize] {
    let mut out = [0u8; COLOR_DIGITS as usize];
    for (i, digit) in out.iter_mut().enumerate() {
        let shift = 20 - 4 * i as u32;
        *digit = hex_digit((value >> shift) as u8);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nibble_digits() {
        assert_eq!(nibble(b'0'), 0);
        assert_eq!(nibble(b'9'), 9);
        assert_eq!(nibble(b'a'), 10);
        assert_eq!(nibble(b'f'), 15);
        assert_eq!(nibble(b'A'), 10);
        assert_eq!(nibble(b'F'), 15);
    }

    #[test]
    fn test_nibble_non_hex_is_zero() {
        for byte in [b'g', b'G', b'z', b' ', b'\n', b'/', b':', b'@', b'`', 0x00, 0xFF] {
            assert_eq!(nibble(byte), 0, "byte {:#04x}", byte);
        }
    }

    #[test]
    fn test_accumulate_u16_positions() {
        // "1234" digit by digit
        let v = accumulate_u16(0xFFFF, b'1', 0);
        assert_eq!(v, 0x0001);
        let v = accumulate_u16(v, b'2', 1);
        assert_eq!(v, 0x0012);
        let v = accumulate_u16(v, b'3', 2);
        assert_eq!(v, 0x1203);
        let v = accumulate_u16(v, b'4', 3);
        assert_eq!(v, 0x1234);
    }

    #[test]
    fn test_accumulate_color_positions() {
        let digits = b"ff8001";
        let mut v = 0xDEAD_BEEF;
        let expected: [u32; 6] = [0x0F, 0xFF, 0xFF08, 0xFF80, 0xFF_8000, 0xFF_8001];
        for (pos, (&byte, &want)) in digits.iter().zip(expected.iter()).enumerate() {
            v = accumulate_color(v, byte, pos as u8);
            assert_eq!(v, want, "after digit {}", pos);
        }
    }

    #[test]
    fn test_decode_mixed_case() {
        assert_eq!(decode_u16(b"00fF"), 0x00FF);
        assert_eq!(decode_u16(b"BEEF"), 0xBEEF);
        assert_eq!(decode_color(b"aBcDeF"), 0xABCDEF);
    }

    #[test]
    fn test_decode_garbage_as_zero() {
        assert_eq!(decode_u16(b"x1y2"), 0x0102);
        assert_eq!(decode_color(b"zz00zz"), 0);
    }

    #[test]
    fn test_encode() {
        assert_eq!(&encode_u16(0x0010), b"0010");
        assert_eq!(&encode_u16(0xBEEF), b"BEEF");
        assert_eq!(&encode_color(0xFF0000), b"FF0000");
        assert_eq!(&encode_color(0x1234_5678), b"345678");
    }
}
