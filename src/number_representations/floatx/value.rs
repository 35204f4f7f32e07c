use std::fmt;

use crate::number_representations::core::FloatxCategory;

use super::format::FloatxFormat;

/// Packed floatx value with its layout fixed at compile time.
///
/// `N` is the total width and `E` the exponent width. An invalid pair is a
/// compile-time error wherever the layout gets evaluated.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Floatx<const N: u32, const E: u32> {
    bits: u64,
}

pub type Floatx8E4 = Floatx<8, 4>;
pub type Floatx8E5 = Floatx<8, 5>;
pub type Floatx16E5 = Floatx<16, 5>;
pub type Floatx16E8 = Floatx<16, 8>;

impl<const N: u32, const E: u32> Floatx<N, E> {
    pub const FORMAT: FloatxFormat = FloatxFormat::new_unchecked(N, E);

    pub const ZERO: Self = Self { bits: 0 };
    pub const NEG_ZERO: Self = Self {
        bits: 1 << Self::FORMAT.sign_bit(),
    };
    pub const INFINITY: Self = Self {
        bits: Self::FORMAT.max_exponent_field() << Self::FORMAT.mantissa_bits(),
    };
    pub const NEG_INFINITY: Self = Self {
        bits: Self::INFINITY.bits | Self::NEG_ZERO.bits,
    };
    pub const NAN: Self = Self {
        bits: Self::INFINITY.bits | (1 << Self::FORMAT.nan_marker_bit()),
    };

    /// Bits above `N` are cleared.
    pub const fn from_bits(bits: u64) -> Self {
        Self {
            bits: bits & crate::bit_fields::low_mask(N),
        }
    }

    pub const fn to_bits(self) -> u64 {
        self.bits
    }

    pub const fn sign(self) -> u64 {
        Self::FORMAT.sign_of(self.bits)
    }

    pub const fn exponent_field(self) -> u64 {
        Self::FORMAT.exponent_field_of(self.bits)
    }

    pub const fn mantissa_field(self) -> u64 {
        Self::FORMAT.mantissa_field_of(self.bits)
    }

    pub const fn classify(self) -> FloatxCategory {
        Self::FORMAT.classify(self.bits)
    }

    pub const fn is_sign_negative(self) -> bool {
        self.sign() == 1
    }

    pub fn is_zero(self) -> bool {
        self.classify() == FloatxCategory::Zero
    }

    pub fn is_subnormal(self) -> bool {
        self.classify() == FloatxCategory::Subnormal
    }

    pub fn is_infinite(self) -> bool {
        self.classify() == FloatxCategory::Infinite
    }

    pub fn is_nan(self) -> bool {
        self.classify() == FloatxCategory::Nan
    }
}

impl<const N: u32, const E: u32> From<f64> for Floatx<N, E> {
    fn from(value: f64) -> Self {
        Self {
            bits: Self::FORMAT.encode(value),
        }
    }
}

impl<const N: u32, const E: u32> From<f32> for Floatx<N, E> {
    fn from(value: f32) -> Self {
        Self::from(f64::from(value))
    }
}

impl<const N: u32, const E: u32> fmt::Debug for Floatx<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = N as usize + 2;
        write!(f, "Floatx<{}, {}>({:#0width$b})", N, E, self.bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_match_conversion() {
        assert_eq!(Floatx8E4::from(0.0), Floatx8E4::ZERO);
        assert_eq!(Floatx8E4::from(-0.0), Floatx8E4::NEG_ZERO);
        assert_eq!(Floatx8E4::from(f64::INFINITY), Floatx8E4::INFINITY);
        assert_eq!(Floatx8E4::from(f64::NEG_INFINITY), Floatx8E4::NEG_INFINITY);
        assert_eq!(Floatx8E4::from(f64::NAN), Floatx8E4::NAN);
        assert_eq!(Floatx8E4::NAN.to_bits(), 0b0_1111_100);
        assert_eq!(Floatx16E5::INFINITY.to_bits(), 0x7C00);
        assert_eq!(Floatx16E8::NAN.to_bits(), 0x7FC0);
    }

    #[test]
    fn test_field_inspection() {
        let value = Floatx8E4::from(-2.0);
        assert_eq!(value.to_bits(), 0b1_1000_000);
        assert_eq!(value.sign(), 1);
        assert!(value.is_sign_negative());
        assert_eq!(value.exponent_field(), 8);
        assert_eq!(value.mantissa_field(), 0);
        assert_eq!(value.classify(), FloatxCategory::Normal);

        assert!(Floatx8E4::from(-0.0).is_zero());
        assert!(Floatx8E4::from(0.0048828125).is_subnormal());
        assert!(Floatx8E4::from(1e10).is_infinite());
        assert!(Floatx8E5::from(f64::NAN).is_nan());
        assert!(!Floatx8E5::from(f64::INFINITY).is_nan());
    }

    #[test]
    fn test_from_f32() {
        assert_eq!(Floatx16E8::from(1.0f32).to_bits(), 0x3F80);
        assert_eq!(Floatx16E5::from(-2.0f32).to_bits(), 0xC000);
    }

    #[test]
    fn test_from_bits_masks_to_width() {
        assert_eq!(Floatx8E4::from_bits(0x1_38).to_bits(), 0x38);
        assert_eq!(Floatx::<5, 2>::from_bits(0xFF).to_bits(), 0b11111);
    }

    #[test]
    fn test_debug_shows_layout_and_bits() {
        assert_eq!(
            format!("{:?}", Floatx8E4::from(1.0)),
            "Floatx<8, 4>(0b00111000)"
        );
    }
}
