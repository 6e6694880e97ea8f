#![forbid(unsafe_code)]

//! Namespace-fixed element proxies.
//!
//! An [`ElementProxy`] is a view over one element of an
//! [`XmlDocument`](xsproxy_xml::XmlDocument) whose namespace is guaranteed
//! to be that of a [`SpecFamily`]. Proxies are either created fresh, which
//! allocates a new element in the family namespace, or adopted from an
//! existing element, which validates the element's namespace and local name.
//!
//! Specification-specific proxies are unit types implementing
//! [`NamespaceBinding`], which fixes the family at compile time.

pub mod binding;
pub mod family;
pub mod prefixes;
pub mod proxy;

pub use binding::NamespaceBinding;
pub use family::SpecFamily;
pub use prefixes::PrefixMap;
pub use proxy::ElementProxy;
