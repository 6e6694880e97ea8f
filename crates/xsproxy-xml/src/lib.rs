#![forbid(unsafe_code)]

//! XML document model for the xsproxy element proxies.
//!
//! Wraps `uppsala`'s arena DOM with the name validation and structural
//! checks the proxies rely on, and serializes through uppsala's writer.

pub mod document;
pub mod name;
pub mod writer;

pub use document::XmlDocument;
pub use uppsala::{Element, NodeId, NodeKind, QName};
