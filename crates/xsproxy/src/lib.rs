#![forbid(unsafe_code)]

//! Namespace-fixed element proxies for XML Signature and XML Encryption.

pub use xsproxy_core as core;
pub use xsproxy_dsig as dsig;
pub use xsproxy_enc as enc;
pub use xsproxy_proxy as proxy;
pub use xsproxy_xml as xml;

pub use xsproxy_core::{Error, Result};
pub use xsproxy_proxy::{ElementProxy, NamespaceBinding, PrefixMap, SpecFamily};
pub use xsproxy_xml::{NodeId, XmlDocument};
