pub mod core;
pub mod floatx;
