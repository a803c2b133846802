//! Core types and utilities

pub mod error;
pub mod result;
pub mod units;

pub use error::ScaleUpError;
pub use result::{ResultEntry, ResultValue, ScaleUpResult};
pub use units::Unit;
