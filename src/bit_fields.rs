//! Arbitrary-width field access inside a `u64` container.
//!
//! Fields are addressed by their most significant bit (`start_bit`) and a
//! width, so a field of `width` bits occupies `[start_bit + 1 - width, start_bit]`.

/// Mask with the low `width` bits set. `width` may be the full 64.
#[inline]
pub const fn low_mask(width: u32) -> u64 {
    if width >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

#[inline]
const fn field_shift(start_bit: u32, width: u32) -> u32 {
    debug_assert!(start_bit < u64::BITS);
    debug_assert!(width <= start_bit + 1);
    start_bit + 1 - width
}

/// Reads `width` bits ending at `start_bit` and returns them right-aligned.
#[inline]
pub const fn get_bit_field_unsigned(start_bit: u32, width: u32, container: u64) -> u64 {
    if width == 0 {
        return 0;
    }
    (container >> field_shift(start_bit, width)) & low_mask(width)
}

/// Sets bit `position` to the low bit of `bit`.
#[inline]
pub fn set_bit(position: u32, bit: u64, container: &mut u64) {
    debug_assert!(position < u64::BITS);
    *container = (*container & !(1u64 << position)) | ((bit & 1) << position);
}

/// Writes the low `width` bits of `value` into the field ending at `start_bit`.
/// Bits of `value` above `width` are discarded.
#[inline]
pub fn set_bit_field(start_bit: u32, width: u32, value: u64, container: &mut u64) {
    if width == 0 {
        return;
    }
    let shift = field_shift(start_bit, width);
    let mask = low_mask(width) << shift;
    *container = (*container & !mask) | ((value << shift) & mask);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_field_of_double() {
        let bits = 1.5f64.to_bits();
        assert_eq!(get_bit_field_unsigned(63, 1, bits), 0);
        assert_eq!(get_bit_field_unsigned(62, 11, bits), 0x3FF);
        assert_eq!(get_bit_field_unsigned(51, 52, bits), 1 << 51);

        let neg = (-0.0f64).to_bits();
        assert_eq!(get_bit_field_unsigned(63, 1, neg), 1);
        assert_eq!(get_bit_field_unsigned(62, 63, neg), 0);
    }

    #[test]
    fn test_full_width_field() {
        assert_eq!(get_bit_field_unsigned(63, 64, u64::MAX), u64::MAX);

        let mut container = 0;
        set_bit_field(63, 64, 0xDEAD_BEEF_0000_0001, &mut container);
        assert_eq!(container, 0xDEAD_BEEF_0000_0001);
    }

    #[test]
    fn test_set_bit_field_discards_high_value_bits() {
        let mut container = 0;
        set_bit_field(6, 4, 0b1_0110, &mut container);
        assert_eq!(container, 0b0_0110_000);
    }

    #[test]
    fn test_set_bit_field_keeps_neighbours() {
        let mut container = 0b1111_1111;
        set_bit_field(5, 3, 0b010, &mut container);
        assert_eq!(container, 0b1101_0111);
    }

    #[test]
    fn test_set_bit() {
        let mut container = 0b1000;
        set_bit(7, 1, &mut container);
        assert_eq!(container, 0b1000_1000);
        set_bit(3, 0, &mut container);
        assert_eq!(container, 0b1000_0000);
        // only the low bit of the value counts
        set_bit(0, 0b10, &mut container);
        assert_eq!(container, 0b1000_0000);
    }

    #[test]
    fn test_zero_width_is_noop() {
        let mut container = 0xFF;
        set_bit_field(3, 0, 0xF, &mut container);
        assert_eq!(container, 0xFF);
        assert_eq!(get_bit_field_unsigned(3, 0, container), 0);
    }
}
