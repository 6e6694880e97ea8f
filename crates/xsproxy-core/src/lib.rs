#![forbid(unsafe_code)]

//! Core types for xsproxy: namespace and algorithm constants, and the
//! shared error type.

pub mod algorithm;
pub mod error;
pub mod ns;

pub use error::{Error, Result};
