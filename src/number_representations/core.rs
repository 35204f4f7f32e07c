use std::fmt::{Debug, LowerHex};

use num_traits::{PrimInt, Unsigned};

pub const DOUBLE_EXPONENT_BITS: u32 = 11;
pub const DOUBLE_MANTISSA_BITS: u32 = 52;
pub const DOUBLE_SIGN_BIT: u32 = 63;
pub const DOUBLE_EXPONENT_MSB: u32 = 62;
pub const DOUBLE_EXPONENT_BIAS: i64 = (1 << (DOUBLE_EXPONENT_BITS - 1)) - 1;
pub const DOUBLE_EXPONENT_MAX: u64 = (1 << DOUBLE_EXPONENT_BITS) - 1;
/// Position of the implicit leading bit of a double significand.
pub const DOUBLE_IMPLICIT_BIT: u64 = 1 << DOUBLE_MANTISSA_BITS;

/// Sign, biased exponent and stored fraction of a double.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DecodedDouble {
    pub sign: u64,
    pub exponent: u64,
    pub fraction: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatxCategory {
    Zero,
    Subnormal,
    Normal,
    Infinite,
    Nan,
}

/// Native unsigned integer able to hold a packed floatx value.
pub trait FloatxStorage: PrimInt + Unsigned + Debug + LowerHex {
    const BITS: u32;

    /// Narrows a packed value whose bits above `Self::BITS` are zero.
    fn from_packed(bits: u64) -> Self;
}

macro_rules! impl_floatx_storage {
    ($($t:ty),*) => {
        $(
            impl FloatxStorage for $t {
                const BITS: u32 = <$t>::BITS;

                #[inline]
                fn from_packed(bits: u64) -> Self {
                    debug_assert!(bits >> (<Self as FloatxStorage>::BITS - 1) >> 1 == 0);
                    bits as $t
                }
            }
        )*
    };
}

impl_floatx_storage!(u8, u16, u32, u64);
