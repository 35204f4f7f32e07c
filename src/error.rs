use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FloatxError {
    #[error("total number of bits should be in between 4 and 64, got {total_bits}")]
    InvalidTotalWidth { total_bits: u32 },

    #[error(
        "number of exponent bits should be in between 2 and {} for a {total_bits}-bit format, got {exp_bits}",
        .total_bits.saturating_sub(2)
    )]
    InvalidExponentWidth { exp_bits: u32, total_bits: u32 },

    #[error("a {total_bits}-bit floatx does not fit in a {container_bits}-bit container")]
    ContainerTooNarrow { total_bits: u32, container_bits: u32 },

    #[error("invalid floatx format `{0}`, expected `<total_bits>:<exp_bits>`")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, FloatxError>;
