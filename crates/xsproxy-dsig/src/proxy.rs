#![forbid(unsafe_code)]

//! Element proxies bound to the XML Signature namespaces.

use xsproxy_proxy::{family, NamespaceBinding, SpecFamily};

/// Elements in the XML Signature namespace (`ds:`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureElementProxy;

impl NamespaceBinding for SignatureElementProxy {
    const FAMILY: SpecFamily = family::SIGNATURE;
}

/// Elements in the XML Signature 1.1 namespace (`dsig11:`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Signature11ElementProxy;

impl NamespaceBinding for Signature11ElementProxy {
    const FAMILY: SpecFamily = family::SIGNATURE11;
}

#[cfg(test)]
mod tests {
    use super::*;
    use xsproxy_core::{ns, Error};
    use xsproxy_xml::XmlDocument;

    #[test]
    fn test_signature_namespace() {
        assert_eq!(SignatureElementProxy::base_namespace(), ns::DSIG);
        assert_eq!(Signature11ElementProxy::base_namespace(), ns::DSIG11);

        let mut doc = XmlDocument::new();
        let sig = SignatureElementProxy::create(Some(&mut doc), ns::node::SIGNATURE).unwrap();
        assert_eq!(doc.namespace_uri(sig.node()), Some(ns::DSIG));
        assert_eq!(sig.prefix(&doc), Some("ds"));
    }

    #[test]
    fn test_versions_do_not_mix() {
        let mut doc = XmlDocument::new();
        let v11 = Signature11ElementProxy::create(Some(&mut doc), "ECKeyValue").unwrap();
        assert!(matches!(
            SignatureElementProxy::adopt(&doc, Some(v11.node()), "", "ECKeyValue"),
            Err(Error::NamespaceMismatch { .. })
        ));
    }
}
