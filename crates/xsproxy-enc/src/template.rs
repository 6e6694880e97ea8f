#![forbid(unsafe_code)]

//! Blank `EncryptedData` / `EncryptedKey` templates.
//!
//! A template holds the structure an encryptor fills in:
//!
//! ```text
//! <xenc:EncryptedData xmlns:xenc="http://www.w3.org/2001/04/xmlenc#">
//!   <xenc:EncryptionMethod Algorithm="..."/>      (optional)
//!   <ds:KeyInfo>...</ds:KeyInfo>                   (optional, see add_key_info)
//!   <xenc:CipherData>
//!     <xenc:CipherValue>...</xenc:CipherValue>     (or CipherReference URI="...")
//!   </xenc:CipherData>
//! </xenc:EncryptedData>
//! ```

use crate::context::EncContext;
use crate::proxy::EncryptionElementProxy;
use xsproxy_core::{ns, Error};
use xsproxy_proxy::{ElementProxy, NamespaceBinding};
use xsproxy_xml::XmlDocument;

/// How the cipher text is carried inside `<CipherData>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherDataType {
    /// Inline base64 `<CipherValue>`.
    Value,
    /// `<CipherReference URI="...">` pointing at the cipher text.
    Reference,
}

/// Build a detached, blank encrypted type named `local_name`.
///
/// `value` becomes the `CipherValue` text or the `CipherReference` URI;
/// it may be empty for a template that is filled in later.
pub fn create_blank_encrypted_type(
    ctx: &EncContext,
    doc: &mut XmlDocument,
    local_name: &str,
    cipher_type: CipherDataType,
    algorithm: Option<&str>,
    value: &str,
) -> Result<ElementProxy, Error> {
    if algorithm.is_some_and(str::is_empty) {
        return Err(Error::InvalidArgument(
            "EncryptionMethod algorithm must not be empty".into(),
        ));
    }

    let encrypted =
        EncryptionElementProxy::create_with_prefixes(Some(&mut *doc), local_name, &ctx.prefixes)?;

    if let Some(algorithm) = algorithm {
        let method = encrypted.add_element(doc, ns::node::ENCRYPTION_METHOD)?;
        method.set_attribute(doc, ns::attr::ALGORITHM, algorithm)?;
    }

    let cipher_data = encrypted.add_element(doc, ns::node::CIPHER_DATA)?;
    match cipher_type {
        CipherDataType::Value => {
            let cipher_value = cipher_data.add_element(doc, ns::node::CIPHER_VALUE)?;
            if !value.is_empty() {
                cipher_value.add_text(doc, value)?;
            }
        }
        CipherDataType::Reference => {
            let reference = cipher_data.add_element(doc, ns::node::CIPHER_REFERENCE)?;
            reference.set_attribute(doc, ns::attr::URI, value)?;
        }
    }

    tracing::debug!(
        local_name,
        ?cipher_type,
        algorithm = algorithm.unwrap_or(""),
        "created blank encrypted type"
    );
    Ok(encrypted)
}

/// Insert an empty `<ds:KeyInfo>` into an encrypted type, after any
/// `EncryptionMethod` and before `CipherData`.
///
/// Returns the existing KeyInfo if there is one.
pub fn add_key_info(
    ctx: &EncContext,
    doc: &mut XmlDocument,
    encrypted: &ElementProxy,
) -> Result<ElementProxy, Error> {
    if encrypted.namespace() != EncryptionElementProxy::base_namespace() {
        return Err(Error::InvalidArgument(format!(
            "`{}` is not an XML Encryption element",
            encrypted.local_name(doc)
        )));
    }

    let existing = doc.element_children(encrypted.node()).find(|c| {
        doc.namespace_uri(*c) == Some(ns::DSIG) && doc.local_name(*c) == Some(ns::node::KEY_INFO)
    });
    if let Some(node) = existing {
        return xsproxy_dsig::keyinfo::load_key_info(doc, Some(node), encrypted.base_uri());
    }

    let key_info = xsproxy_dsig::keyinfo::create_key_info_with_prefixes(doc, &ctx.prefixes)?;
    let cipher_data = encrypted.child(doc, ns::node::CIPHER_DATA, 0);
    doc.insert_before(encrypted.node(), key_info.node(), cipher_data)?;
    Ok(key_info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xsproxy_core::algorithm;
    use xsproxy_proxy::PrefixMap;
    use xsproxy_xml::writer;

    #[test]
    fn test_blank_encrypted_data_with_value() {
        let ctx = EncContext::new();
        let mut doc = XmlDocument::new();
        let ed = create_blank_encrypted_type(
            &ctx,
            &mut doc,
            ns::node::ENCRYPTED_DATA,
            CipherDataType::Value,
            Some(algorithm::AES128_CBC),
            "",
        )
        .unwrap();
        ed.set_attribute(&mut doc, ns::attr::TYPE, ns::ENC_TYPE_ELEMENT).unwrap();

        assert_eq!(
            writer::serialize(&doc, ed.node()).unwrap(),
            "<xenc:EncryptedData xmlns:xenc=\"http://www.w3.org/2001/04/xmlenc#\" \
             Type=\"http://www.w3.org/2001/04/xmlenc#Element\">\
             <xenc:EncryptionMethod Algorithm=\"http://www.w3.org/2001/04/xmlenc#aes128-cbc\"/>\
             <xenc:CipherData><xenc:CipherValue/></xenc:CipherData>\
             </xenc:EncryptedData>"
        );
    }

    #[test]
    fn test_blank_encrypted_key_with_reference() {
        let ctx = EncContext::new();
        let mut doc = XmlDocument::new();
        let ek = create_blank_encrypted_type(
            &ctx,
            &mut doc,
            ns::node::ENCRYPTED_KEY,
            CipherDataType::Reference,
            None,
            "#cipher",
        )
        .unwrap();
        assert_eq!(
            writer::serialize(&doc, ek.node()).unwrap(),
            "<xenc:EncryptedKey xmlns:xenc=\"http://www.w3.org/2001/04/xmlenc#\">\
             <xenc:CipherData><xenc:CipherReference URI=\"#cipher\"/></xenc:CipherData>\
             </xenc:EncryptedKey>"
        );
    }

    #[test]
    fn test_blank_rejects_bad_input() {
        let ctx = EncContext::new();
        let mut doc = XmlDocument::new();
        assert!(matches!(
            create_blank_encrypted_type(&ctx, &mut doc, "", CipherDataType::Value, None, ""),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            create_blank_encrypted_type(
                &ctx,
                &mut doc,
                ns::node::ENCRYPTED_DATA,
                CipherDataType::Value,
                Some(""),
                ""
            ),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_key_info_goes_before_cipher_data() {
        let ctx = EncContext::new();
        let mut doc = XmlDocument::new();
        let ed = create_blank_encrypted_type(
            &ctx,
            &mut doc,
            ns::node::ENCRYPTED_DATA,
            CipherDataType::Value,
            Some(algorithm::AES256_CBC),
            "",
        )
        .unwrap();
        let ki = add_key_info(&ctx, &mut doc, &ed).unwrap();
        xsproxy_dsig::keyinfo::add_key_name(&mut doc, &ki, "session").unwrap();

        let order: Vec<&str> = doc
            .element_children(ed.node())
            .filter_map(|c| doc.local_name(c))
            .collect();
        assert_eq!(order, vec!["EncryptionMethod", "KeyInfo", "CipherData"]);

        let again = add_key_info(&ctx, &mut doc, &ed).unwrap();
        assert_eq!(again.node(), ki.node());
    }

    #[test]
    fn test_custom_prefixes() {
        let prefixes = PrefixMap::default()
            .with_prefix(ns::ENC, "enc")
            .unwrap()
            .with_prefix(ns::DSIG, "dsig")
            .unwrap();
        let ctx = EncContext::with_prefixes(prefixes);
        let mut doc = XmlDocument::new();
        let ed = create_blank_encrypted_type(
            &ctx,
            &mut doc,
            ns::node::ENCRYPTED_DATA,
            CipherDataType::Value,
            None,
            "QUJD",
        )
        .unwrap();
        add_key_info(&ctx, &mut doc, &ed).unwrap();
        assert_eq!(
            writer::serialize(&doc, ed.node()).unwrap(),
            "<enc:EncryptedData xmlns:enc=\"http://www.w3.org/2001/04/xmlenc#\">\
             <dsig:KeyInfo xmlns:dsig=\"http://www.w3.org/2000/09/xmldsig#\"/>\
             <enc:CipherData><enc:CipherValue>QUJD</enc:CipherValue></enc:CipherData>\
             </enc:EncryptedData>"
        );
    }

    #[test]
    fn test_add_key_info_requires_encryption_element() {
        let ctx = EncContext::new();
        let mut doc = XmlDocument::new();
        let ki = xsproxy_dsig::keyinfo::create_key_info(&mut doc).unwrap();
        assert!(matches!(
            add_key_info(&ctx, &mut doc, &ki),
            Err(Error::InvalidArgument(_))
        ));
    }
}
