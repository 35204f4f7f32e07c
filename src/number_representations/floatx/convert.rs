use ndarray::{Array, ArrayBase, Data, Dimension};
use num_traits::ToPrimitive;

use crate::{
    bit_fields::{get_bit_field_unsigned, set_bit, set_bit_field},
    error::{FloatxError, Result},
    number_representations::core::{
        DOUBLE_EXPONENT_BIAS, DOUBLE_EXPONENT_BITS, DOUBLE_EXPONENT_MAX, DOUBLE_EXPONENT_MSB,
        DOUBLE_IMPLICIT_BIT, DOUBLE_MANTISSA_BITS, DOUBLE_SIGN_BIT, DecodedDouble, FloatxStorage,
    },
};

use super::format::FloatxFormat;

/// Converts `value` into a `total_bits`-wide floatx with `exp_bits` exponent
/// bits, truncating mantissa bits that do not fit.
///
/// Both widths are checked before anything else; bits above `total_bits` in
/// the returned value are always zero.
pub fn double_to_floatx(value: f64, total_bits: u32, exp_bits: u32) -> Result<u64> {
    let format = FloatxFormat::new(total_bits, exp_bits)?;
    Ok(format.encode(value))
}

fn decompose(value: f64) -> DecodedDouble {
    let bits = value.to_bits();
    DecodedDouble {
        sign: get_bit_field_unsigned(DOUBLE_SIGN_BIT, 1, bits),
        exponent: get_bit_field_unsigned(DOUBLE_EXPONENT_MSB, DOUBLE_EXPONENT_BITS, bits),
        fraction: get_bit_field_unsigned(DOUBLE_MANTISSA_BITS - 1, DOUBLE_MANTISSA_BITS, bits),
    }
}

/// Takes the top `mantissa_bits` of a 52-bit aligned fraction. Wider targets
/// get the fraction left-aligned with zero low bits.
fn align_fraction(fraction: u64, mantissa_bits: u32) -> u64 {
    if mantissa_bits <= DOUBLE_MANTISSA_BITS {
        fraction >> (DOUBLE_MANTISSA_BITS - mantissa_bits)
    } else {
        fraction << (mantissa_bits - DOUBLE_MANTISSA_BITS)
    }
}

impl FloatxFormat {
    /// Packs `value` into this format. Never fails: every double, including
    /// zeros, subnormals, infinities and NaNs, has an encoding.
    pub fn encode(&self, value: f64) -> u64 {
        let DecodedDouble {
            sign,
            exponent,
            mut fraction,
        } = decompose(value);

        let exponent_msb = self.exponent_msb();
        let exp_bits = self.exp_bits();
        let mantissa_bits = self.mantissa_bits();

        let mut result = 0u64;
        set_bit(self.sign_bit(), sign, &mut result);

        if exponent == 0 && fraction == 0 {
            tracing::trace!(value, format = %self, "zero");
            return result;
        }

        if exponent == DOUBLE_EXPONENT_MAX {
            set_bit_field(exponent_msb, exp_bits, self.max_exponent_field(), &mut result);
            if fraction != 0 {
                // payload is not carried over, only the marker bit
                set_bit(self.nan_marker_bit(), 1, &mut result);
                tracing::trace!(format = %self, "nan");
            } else {
                tracing::trace!(value, format = %self, "infinity");
            }
            return result;
        }

        let mut bias = exponent as i64 - DOUBLE_EXPONENT_BIAS + self.bias();

        if bias <= 0 {
            // Normalize so the leading one sits on the implicit bit. A zero
            // fraction already has its leading one there.
            let shift_count = if fraction == 0 {
                fraction = DOUBLE_IMPLICIT_BIT;
                0
            } else {
                fraction.leading_zeros() - (u64::BITS - DOUBLE_MANTISSA_BITS - 1)
            };
            fraction <<= shift_count;
            bias -= i64::from(shift_count);

            if bias == 0 {
                // implicit bit is dropped, not re-inserted
                fraction <<= 1;
            } else {
                fraction |= DOUBLE_IMPLICIT_BIT;
                let demote = u32::try_from(-bias).unwrap_or(u32::MAX);
                fraction = fraction.checked_shr(demote).unwrap_or(0);
                bias = 0;
            }

            tracing::trace!(value, format = %self, shift_count, "subnormal");
            set_bit_field(exponent_msb, exp_bits, bias as u64, &mut result);
            set_bit_field(
                mantissa_bits - 1,
                mantissa_bits,
                align_fraction(fraction, mantissa_bits),
                &mut result,
            );
        } else if (bias as u64) < self.max_exponent_field() {
            tracing::trace!(value, format = %self, bias, "normal");
            set_bit_field(exponent_msb, exp_bits, bias as u64, &mut result);
            set_bit_field(
                mantissa_bits - 1,
                mantissa_bits,
                align_fraction(fraction, mantissa_bits),
                &mut result,
            );
        } else {
            tracing::trace!(value, format = %self, bias, "overflow to infinity");
            set_bit_field(exponent_msb, exp_bits, self.max_exponent_field(), &mut result);
        }

        result
    }

    /// Like [`FloatxFormat::encode`], narrowed to a native container.
    pub fn encode_as<C: FloatxStorage>(&self, value: f64) -> Result<C> {
        if !self.fits_in::<C>() {
            return Err(FloatxError::ContainerTooNarrow {
                total_bits: self.total_bits(),
                container_bits: C::BITS,
            });
        }
        Ok(C::from_packed(self.encode(value)))
    }

    /// Encodes any numeric value that widens to `f64`.
    pub fn encode_primitive<T: ToPrimitive>(&self, value: T) -> Option<u64> {
        value.to_f64().map(|v| self.encode(v))
    }

    pub fn encode_slice(&self, values: &[f64]) -> Vec<u64> {
        values.iter().map(|&v| self.encode(v)).collect()
    }

    /// Element-wise encoding of an ndarray of doubles, keeping its shape.
    pub fn encode_array<S, D>(&self, values: &ArrayBase<S, D>) -> Array<u64, D>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        values.mapv(|v| self.encode(v))
    }
}
