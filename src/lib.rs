//! Truncating conversion of `f64` values into custom-width floating-point
//! bit patterns ("floatx") whose total and exponent widths are chosen by the
//! caller.

pub mod bit_fields;
pub mod error;
pub mod logging;
pub mod number_representations;

pub use error::{FloatxError, Result};
pub use number_representations::{
    core::{FloatxCategory, FloatxStorage},
    floatx::{
        convert::double_to_floatx,
        format::FloatxFormat,
        value::{Floatx, Floatx8E4, Floatx8E5, Floatx16E5, Floatx16E8},
    },
};
