#![forbid(unsafe_code)]

//! XML serialization for [`XmlDocument`] nodes using uppsala's writer.
//!
//! Namespace declarations are planned by uppsala: an element whose prefix
//! is not bound in scope gets a declaration, and an element in no
//! namespace under a default namespace gets `xmlns=""`.

use crate::document::XmlDocument;
use uppsala::{Document, NodeId, NodeKind};
use xsproxy_core::Error;

/// Serialize the subtree rooted at `node` as a standalone fragment.
///
/// The subtree is copied out of its document first, so every namespace it
/// uses is declared in the output, including bindings inherited from
/// ancestors.
pub fn serialize(doc: &XmlDocument, node: NodeId) -> Result<String, Error> {
    if !doc.contains(node) {
        return Err(Error::MissingElement(format!(
            "node {} is not in the document",
            node.index()
        )));
    }
    let source = doc.as_uppsala();
    if matches!(source.node_kind(node), Some(NodeKind::Document)) {
        return Ok(source.node_to_xml(node));
    }
    let mut fragment = Document::new();
    let copy = fragment.import_subtree(source, node).ok_or_else(|| {
        Error::XmlStructure(format!("node {} cannot be serialized", node.index()))
    })?;
    let root = fragment.root();
    fragment.append_child(root, copy);
    Ok(fragment.to_xml())
}

/// Serialize the whole document, with an XML declaration.
pub fn serialize_document(doc: &XmlDocument) -> String {
    let mut writer = uppsala::XmlWriter::new();
    writer.write_declaration();
    writer.raw(&doc.as_uppsala().node_to_xml(doc.root()));
    writer.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use xsproxy_core::ns;

    #[test]
    fn test_serialize_created_element() {
        let mut doc = XmlDocument::new();
        let ed = doc.create_element_ns(Some(ns::ENC), "xenc:EncryptedData").unwrap();
        doc.declare_namespace(ed, "xenc", ns::ENC).unwrap();
        doc.set_attribute(ed, "Id", "ed-1").unwrap();
        let cd = doc.create_element_ns(Some(ns::ENC), "xenc:CipherData").unwrap();
        doc.append_child(ed, cd).unwrap();

        assert_eq!(
            serialize(&doc, ed).unwrap(),
            "<xenc:EncryptedData xmlns:xenc=\"http://www.w3.org/2001/04/xmlenc#\" Id=\"ed-1\">\
             <xenc:CipherData/></xenc:EncryptedData>"
        );
    }

    #[test]
    fn test_serialize_fragment_carries_inherited_namespaces() {
        let doc = XmlDocument::parse(
            r#"<root xmlns:xenc="http://www.w3.org/2001/04/xmlenc#"><xenc:CipherValue>QUJD</xenc:CipherValue></root>"#,
        )
        .unwrap();
        let cv = doc.find_element(ns::ENC, "CipherValue").unwrap();
        assert_eq!(
            serialize(&doc, cv).unwrap(),
            "<xenc:CipherValue xmlns:xenc=\"http://www.w3.org/2001/04/xmlenc#\">QUJD</xenc:CipherValue>"
        );
    }

    #[test]
    fn test_serialize_escapes_text_and_attributes() {
        let mut doc = XmlDocument::new();
        let a = doc.create_element_ns(None, "a").unwrap();
        doc.set_attribute(a, "x", "1 & \"2\"").unwrap();
        let t = doc.create_text_node("<t>");
        doc.append_child(a, t).unwrap();
        assert_eq!(
            serialize(&doc, a).unwrap(),
            "<a x=\"1 &amp; &quot;2&quot;\">&lt;t&gt;</a>"
        );
    }

    #[test]
    fn test_no_namespace_child_keeps_its_namespace_on_reparse() {
        let mut doc = XmlDocument::new();
        let root = doc.create_element_ns(Some("urn:x"), "root").unwrap();
        doc.declare_namespace(root, "", "urn:x").unwrap();
        doc.append_child(doc.root(), root).unwrap();
        let plain = doc.create_element_ns(None, "plain").unwrap();
        doc.append_child(root, plain).unwrap();

        let out = serialize_document(&doc);
        assert!(out.contains("<plain xmlns=\"\"/>"), "{out}");
        let reparsed = XmlDocument::parse(&out).unwrap();
        let root = reparsed.root_element().unwrap();
        assert_eq!(reparsed.namespace_uri(root), Some("urn:x"));
        let plain = reparsed.first_element_child(root).unwrap();
        assert_eq!(reparsed.local_name(plain), Some("plain"));
        assert_eq!(reparsed.namespace_uri(plain), None);
    }

    #[test]
    fn test_serialize_document_reparses() {
        let src = r#"<a xmlns="urn:x" b="1"><!--c--><d>e &amp; f</d><?p q?></a>"#;
        let doc = XmlDocument::parse(src).unwrap();
        let out = serialize_document(&doc);
        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        let reparsed = XmlDocument::parse(&out).unwrap();
        let d = reparsed.find_element("urn:x", "d").unwrap();
        assert_eq!(reparsed.text(d), "e & f");
        assert_eq!(
            reparsed.attribute(reparsed.root_element().unwrap(), "b"),
            Some("1")
        );
    }

    #[test]
    fn test_serialize_unknown_node() {
        let doc = XmlDocument::new();
        assert!(matches!(
            serialize(&doc, NodeId::new(42)),
            Err(Error::MissingElement(_))
        ));
    }
}
