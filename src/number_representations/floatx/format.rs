use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    bit_fields::{get_bit_field_unsigned, low_mask},
    error::{FloatxError, Result},
    number_representations::core::{FloatxCategory, FloatxStorage},
};

/// Validated layout of a floatx value: `total_bits` wide, one sign bit, then
/// `exp_bits` exponent bits, then the mantissa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFormat", into = "RawFormat")]
pub struct FloatxFormat {
    total_bits: u32,
    exp_bits: u32,
}

#[derive(Serialize, Deserialize)]
struct RawFormat {
    total_bits: u32,
    exp_bits: u32,
}

impl TryFrom<RawFormat> for FloatxFormat {
    type Error = FloatxError;

    fn try_from(raw: RawFormat) -> Result<Self> {
        FloatxFormat::new(raw.total_bits, raw.exp_bits)
    }
}

impl From<FloatxFormat> for RawFormat {
    fn from(format: FloatxFormat) -> Self {
        RawFormat {
            total_bits: format.total_bits,
            exp_bits: format.exp_bits,
        }
    }
}

impl FloatxFormat {
    pub const MIN_TOTAL_BITS: u32 = 4;
    pub const MAX_TOTAL_BITS: u32 = 64;
    pub const MIN_EXP_BITS: u32 = 2;

    pub const BINARY16: Self = Self::new_unchecked(16, 5);
    pub const BFLOAT16: Self = Self::new_unchecked(16, 8);
    pub const BINARY32: Self = Self::new_unchecked(32, 8);
    pub const BINARY64: Self = Self::new_unchecked(64, 11);
    pub const E4M3: Self = Self::new_unchecked(8, 4);
    pub const E5M2: Self = Self::new_unchecked(8, 5);

    pub fn new(total_bits: u32, exp_bits: u32) -> Result<Self> {
        let format = Self::check(total_bits, exp_bits);
        if let Err(err) = &format {
            tracing::debug!(total_bits, exp_bits, %err, "rejected floatx format");
        }
        format
    }

    const fn is_valid(total_bits: u32, exp_bits: u32) -> bool {
        total_bits >= Self::MIN_TOTAL_BITS
            && total_bits <= Self::MAX_TOTAL_BITS
            && exp_bits >= Self::MIN_EXP_BITS
            && exp_bits <= total_bits - 2
    }

    fn check(total_bits: u32, exp_bits: u32) -> Result<Self> {
        if !(Self::MIN_TOTAL_BITS..=Self::MAX_TOTAL_BITS).contains(&total_bits) {
            return Err(FloatxError::InvalidTotalWidth { total_bits });
        }
        if !(Self::MIN_EXP_BITS..=total_bits - 2).contains(&exp_bits) {
            return Err(FloatxError::InvalidExponentWidth {
                exp_bits,
                total_bits,
            });
        }
        Ok(Self {
            total_bits,
            exp_bits,
        })
    }

    /// Panics (at compile time in const items) on a bad layout.
    pub(crate) const fn new_unchecked(total_bits: u32, exp_bits: u32) -> Self {
        assert!(Self::is_valid(total_bits, exp_bits), "invalid floatx layout");
        Self {
            total_bits,
            exp_bits,
        }
    }

    pub const fn total_bits(&self) -> u32 {
        self.total_bits
    }

    pub const fn exp_bits(&self) -> u32 {
        self.exp_bits
    }

    pub const fn mantissa_bits(&self) -> u32 {
        self.total_bits - self.exp_bits - 1
    }

    /// `2^(exp_bits - 1) - 1`
    pub const fn bias(&self) -> i64 {
        (1 << (self.exp_bits - 1)) - 1
    }

    /// All-ones exponent field, used by infinities and NaNs.
    pub const fn max_exponent_field(&self) -> u64 {
        low_mask(self.exp_bits)
    }

    pub const fn sign_bit(&self) -> u32 {
        self.total_bits - 1
    }

    pub const fn exponent_msb(&self) -> u32 {
        self.total_bits - 2
    }

    /// Most significant mantissa bit; the only bit a converted NaN carries.
    pub const fn nan_marker_bit(&self) -> u32 {
        self.mantissa_bits() - 1
    }

    /// Width of the smallest native unsigned integer holding the format.
    pub const fn storage_bits(&self) -> u32 {
        match self.total_bits {
            0..=8 => 8,
            9..=16 => 16,
            17..=32 => 32,
            _ => 64,
        }
    }

    pub const fn fits_in<C: FloatxStorage>(&self) -> bool {
        self.total_bits <= C::BITS
    }

    pub const fn sign_of(&self, bits: u64) -> u64 {
        get_bit_field_unsigned(self.sign_bit(), 1, bits)
    }

    pub const fn exponent_field_of(&self, bits: u64) -> u64 {
        get_bit_field_unsigned(self.exponent_msb(), self.exp_bits, bits)
    }

    pub const fn mantissa_field_of(&self, bits: u64) -> u64 {
        get_bit_field_unsigned(self.mantissa_bits() - 1, self.mantissa_bits(), bits)
    }

    /// Category of an already packed value, read from its fields.
    pub const fn classify(&self, bits: u64) -> FloatxCategory {
        let exponent = self.exponent_field_of(bits);
        let mantissa = self.mantissa_field_of(bits);
        if exponent == 0 {
            if mantissa == 0 {
                FloatxCategory::Zero
            } else {
                FloatxCategory::Subnormal
            }
        } else if exponent == self.max_exponent_field() {
            if mantissa == 0 {
                FloatxCategory::Infinite
            } else {
                FloatxCategory::Nan
            }
        } else {
            FloatxCategory::Normal
        }
    }
}

impl fmt::Display for FloatxFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.total_bits, self.exp_bits)
    }
}

impl FromStr for FloatxFormat {
    type Err = FloatxError;

    fn from_str(s: &str) -> Result<Self> {
        let parse_err = || FloatxError::Parse(s.to_string());
        let (total, exp) = s.split_once(':').ok_or_else(parse_err)?;
        let total_bits = total.trim().parse().map_err(|_| parse_err())?;
        let exp_bits = exp.trim().parse().map_err(|_| parse_err())?;
        FloatxFormat::new(total_bits, exp_bits)
    }
}
