#![forbid(unsafe_code)]

//! Element proxies bound to the XML Encryption namespaces.

use xsproxy_proxy::{family, NamespaceBinding, SpecFamily};

/// Elements in the XML Encryption namespace, `http://www.w3.org/2001/04/xmlenc#`.
///
/// ```
/// use xsproxy_core::ns;
/// use xsproxy_enc::EncryptionElementProxy;
/// use xsproxy_proxy::NamespaceBinding;
/// use xsproxy_xml::XmlDocument;
///
/// let mut doc = XmlDocument::new();
/// let ed = EncryptionElementProxy::create(Some(&mut doc), "EncryptedData").unwrap();
/// assert_eq!(ed.namespace(), ns::ENC);
/// assert_eq!(ed.local_name(&doc), "EncryptedData");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EncryptionElementProxy;

impl NamespaceBinding for EncryptionElementProxy {
    const FAMILY: SpecFamily = family::ENCRYPTION;
}

/// Elements in the XML Encryption 1.1 namespace (`xenc11:`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Encryption11ElementProxy;

impl NamespaceBinding for Encryption11ElementProxy {
    const FAMILY: SpecFamily = family::ENCRYPTION11;
}

#[cfg(test)]
mod tests {
    use super::*;
    use xsproxy_core::{ns, Error};
    use xsproxy_xml::{NodeId, XmlDocument};

    #[test]
    fn test_construct_encrypted_data() {
        let mut doc = XmlDocument::new();
        let ed = EncryptionElementProxy::create(Some(&mut doc), ns::node::ENCRYPTED_DATA).unwrap();
        assert_eq!(doc.namespace_uri(ed.node()), Some(ns::ENC));
        assert_eq!(doc.local_name(ed.node()), Some("EncryptedData"));
        assert_eq!(EncryptionElementProxy::base_namespace(), ns::ENC);
    }

    #[test]
    fn test_adopt_encrypted_key() {
        let doc = XmlDocument::parse(
            r#"<EncryptedKey xmlns="http://www.w3.org/2001/04/xmlenc#" Id="k1"/>"#,
        )
        .unwrap();
        let root = doc.root_element();
        let ek = EncryptionElementProxy::adopt(&doc, root, "", ns::node::ENCRYPTED_KEY).unwrap();
        assert_eq!(Some(ek.node()), root);
        assert_eq!(ek.id(&doc), Some("k1"));
    }

    #[test]
    fn test_adopt_other_namespace() {
        let doc = XmlDocument::parse(r#"<o:EncryptedData xmlns:o="http://example.org/other"/>"#)
            .unwrap();
        assert!(matches!(
            EncryptionElementProxy::adopt(&doc, doc.root_element(), "", ns::node::ENCRYPTED_DATA),
            Err(Error::NamespaceMismatch { .. })
        ));
    }

    #[test]
    fn test_absent_inputs() {
        assert!(matches!(
            EncryptionElementProxy::create(None, ns::node::ENCRYPTED_DATA),
            Err(Error::InvalidArgument(_))
        ));
        let doc = XmlDocument::new();
        assert!(matches!(
            EncryptionElementProxy::adopt(&doc, None::<NodeId>, "", ns::node::ENCRYPTED_DATA),
            Err(Error::MissingElement(_))
        ));
    }

    #[test]
    fn test_enc11_is_separate() {
        let mut doc = XmlDocument::new();
        let dk = Encryption11ElementProxy::create(Some(&mut doc), ns::node::DERIVED_KEY).unwrap();
        assert_eq!(dk.prefix(&doc), Some("xenc11"));
        assert!(matches!(
            EncryptionElementProxy::adopt_any(&doc, Some(dk.node()), ""),
            Err(Error::NamespaceMismatch { .. })
        ));
    }
}
