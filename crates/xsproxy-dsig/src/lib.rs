#![forbid(unsafe_code)]

//! XML Digital Signature element proxies.
//!
//! Binds the generic element proxy to the XML-DSig namespaces and provides
//! the `<ds:KeyInfo>` helpers used by XML Encryption structures.

pub mod keyinfo;
pub mod proxy;

pub use proxy::{Signature11ElementProxy, SignatureElementProxy};
