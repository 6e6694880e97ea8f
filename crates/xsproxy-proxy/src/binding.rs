#![forbid(unsafe_code)]

//! Compile-time binding of a proxy type to one specification family.

use crate::family::SpecFamily;
use crate::prefixes::PrefixMap;
use crate::proxy::ElementProxy;
use xsproxy_core::Error;
use xsproxy_xml::{NodeId, XmlDocument};

/// A proxy type bound to one specification family.
///
/// Implementors only provide [`NamespaceBinding::FAMILY`]; every operation
/// forwards to [`ElementProxy`] with that family.
///
/// ```
/// use xsproxy_core::ns;
/// use xsproxy_proxy::{family, NamespaceBinding, SpecFamily};
/// use xsproxy_xml::XmlDocument;
///
/// struct Enc;
/// impl NamespaceBinding for Enc {
///     const FAMILY: SpecFamily = family::ENCRYPTION;
/// }
///
/// let mut doc = XmlDocument::new();
/// let proxy = Enc::create(Some(&mut doc), "EncryptedData").unwrap();
/// assert_eq!(doc.namespace_uri(proxy.node()), Some(ns::ENC));
/// ```
pub trait NamespaceBinding {
    const FAMILY: SpecFamily;

    /// The namespace every element of this binding is in.
    fn base_namespace() -> &'static str {
        Self::FAMILY.namespace()
    }

    fn create(doc: Option<&mut XmlDocument>, local_name: &str) -> Result<ElementProxy, Error> {
        ElementProxy::create(doc, Self::FAMILY, local_name)
    }

    fn create_with_prefixes(
        doc: Option<&mut XmlDocument>,
        local_name: &str,
        prefixes: &PrefixMap,
    ) -> Result<ElementProxy, Error> {
        ElementProxy::create_with_prefixes(doc, Self::FAMILY, local_name, prefixes)
    }

    fn adopt(
        doc: &XmlDocument,
        element: Option<NodeId>,
        base_uri: &str,
        local_name: &str,
    ) -> Result<ElementProxy, Error> {
        ElementProxy::adopt(doc, element, base_uri, Self::FAMILY, local_name)
    }

    fn adopt_any(
        doc: &XmlDocument,
        element: Option<NodeId>,
        base_uri: &str,
    ) -> Result<ElementProxy, Error> {
        ElementProxy::adopt_any(doc, element, base_uri, Self::FAMILY)
    }
}
