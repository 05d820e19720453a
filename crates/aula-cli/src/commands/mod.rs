//! Command implementations

pub mod engines;
pub mod generate;
pub mod serve;
pub mod validate;
