#![forbid(unsafe_code)]

//! Loading existing `<EncryptedData>` and `<EncryptedKey>` elements.

use crate::proxy::EncryptionElementProxy;
use xsproxy_core::{ns, Error};
use xsproxy_proxy::{proxy::decode_base64, ElementProxy, NamespaceBinding};
use xsproxy_xml::{NodeId, XmlDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncryptedKind {
    Data,
    Key,
}

/// Contents of `<CipherData>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CipherData {
    /// Base64 text of `<CipherValue>`, as written.
    Value(String),
    /// `URI` of `<CipherReference>`. The reference is not resolved.
    Reference { uri: String },
}

/// A parsed `EncryptedData` or `EncryptedKey`.
#[derive(Debug, Clone)]
pub struct EncryptedType {
    proxy: ElementProxy,
    kind: EncryptedKind,
    algorithm: Option<String>,
    key_info: Option<ElementProxy>,
    cipher_data: CipherData,
    id: Option<String>,
    type_uri: Option<String>,
    mime_type: Option<String>,
    encoding: Option<String>,
}

impl EncryptedType {
    /// Adopt `element` and read its structure.
    ///
    /// Children are read in schema order: an optional `EncryptionMethod`,
    /// an optional `ds:KeyInfo`, then the required `CipherData`.
    pub fn load(doc: &XmlDocument, element: Option<NodeId>, base_uri: &str) -> Result<Self, Error> {
        let proxy = EncryptionElementProxy::adopt_any(doc, element, base_uri)?;
        let kind = match proxy.local_name(doc) {
            ns::node::ENCRYPTED_DATA => EncryptedKind::Data,
            ns::node::ENCRYPTED_KEY => EncryptedKind::Key,
            other => {
                return Err(Error::NamespaceMismatch {
                    expected_namespace: ns::ENC.to_owned(),
                    expected_local_name: format!(
                        "{} or {}",
                        ns::node::ENCRYPTED_DATA,
                        ns::node::ENCRYPTED_KEY
                    ),
                    found_namespace: ns::ENC.to_owned(),
                    found_local_name: other.to_owned(),
                })
            }
        };

        let mut current = doc.first_element_child(proxy.node());

        let mut algorithm = None;
        if let Some(node) = current.filter(|n| is_enc(doc, *n, ns::node::ENCRYPTION_METHOD)) {
            let alg = doc.attribute(node, ns::attr::ALGORITHM).ok_or_else(|| {
                Error::MissingAttribute("Algorithm on EncryptionMethod".into())
            })?;
            algorithm = Some(alg.to_owned());
            current = doc.next_element_sibling(node);
        }

        let mut key_info = None;
        if let Some(node) = current.filter(|n| {
            doc.namespace_uri(*n) == Some(ns::DSIG) && doc.local_name(*n) == Some(ns::node::KEY_INFO)
        }) {
            key_info = Some(xsproxy_dsig::keyinfo::load_key_info(doc, Some(node), base_uri)?);
            current = doc.next_element_sibling(node);
        }

        let cipher_data_node = current
            .filter(|n| is_enc(doc, *n, ns::node::CIPHER_DATA))
            .ok_or_else(|| Error::MissingElement(ns::node::CIPHER_DATA.into()))?;
        let cipher_data = read_cipher_data(doc, cipher_data_node, base_uri)?;

        let attr = |name: &str| proxy.attribute(doc, name).map(str::to_owned);
        let loaded = Self {
            kind,
            algorithm,
            key_info,
            cipher_data,
            id: attr(ns::attr::ID),
            type_uri: attr(ns::attr::TYPE),
            mime_type: attr(ns::attr::MIME_TYPE),
            encoding: attr(ns::attr::ENCODING),
            proxy,
        };
        tracing::debug!(kind = ?loaded.kind, algorithm = ?loaded.algorithm, "loaded encrypted type");
        Ok(loaded)
    }

    pub fn proxy(&self) -> &ElementProxy {
        &self.proxy
    }

    pub fn kind(&self) -> EncryptedKind {
        self.kind
    }

    /// `Algorithm` of `EncryptionMethod`, if present.
    pub fn algorithm(&self) -> Option<&str> {
        self.algorithm.as_deref()
    }

    pub fn key_info(&self) -> Option<&ElementProxy> {
        self.key_info.as_ref()
    }

    pub fn cipher_data(&self) -> &CipherData {
        &self.cipher_data
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn type_uri(&self) -> Option<&str> {
        self.type_uri.as_deref()
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    /// Decoded `CipherValue` bytes. Fails for a `CipherReference`.
    pub fn cipher_value_bytes(&self) -> Result<Vec<u8>, Error> {
        match &self.cipher_data {
            CipherData::Value(text) => {
                decode_base64(text).map_err(|e| Error::Base64(format!("CipherValue: {e}")))
            }
            CipherData::Reference { uri } => Err(Error::InvalidArgument(format!(
                "cipher data is a reference to `{uri}`"
            ))),
        }
    }
}

fn is_enc(doc: &XmlDocument, node: NodeId, local_name: &str) -> bool {
    doc.namespace_uri(node) == Some(ns::ENC) && doc.local_name(node) == Some(local_name)
}

fn read_cipher_data(doc: &XmlDocument, node: NodeId, base_uri: &str) -> Result<CipherData, Error> {
    let cipher_data = EncryptionElementProxy::adopt(doc, Some(node), base_uri, ns::node::CIPHER_DATA)?;

    if let Some(value) = cipher_data.child(doc, ns::node::CIPHER_VALUE, 0) {
        return Ok(CipherData::Value(doc.text(value).trim().to_owned()));
    }
    if let Some(reference) = cipher_data.child(doc, ns::node::CIPHER_REFERENCE, 0) {
        let uri = doc
            .attribute(reference, ns::attr::URI)
            .ok_or_else(|| Error::MissingAttribute("URI on CipherReference".into()))?;
        return Ok(CipherData::Reference { uri: uri.to_owned() });
    }
    Err(Error::MissingElement("CipherValue or CipherReference".into()))
}
