#![forbid(unsafe_code)]

//! The generic element proxy.

use crate::family::SpecFamily;
use crate::prefixes::PrefixMap;
use base64::Engine;
use xsproxy_core::{ns, Error};
use xsproxy_xml::{name, NodeId, XmlDocument};

/// A handle to one element whose namespace is that of `family`.
///
/// The proxy does not own the element; it records the node id inside the
/// document it was created or adopted from. Methods that read or change the
/// element take that document as an argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementProxy {
    node: NodeId,
    family: SpecFamily,
    base_uri: String,
}

impl ElementProxy {
    /// Create a new, detached element `local_name` in the family namespace,
    /// using the family's default prefix.
    ///
    /// The element declares its own prefix, so it can be inserted anywhere
    /// in the tree. Fails with [`Error::InvalidArgument`] when `doc` is
    /// `None` or `local_name` is not an NCName.
    pub fn create(
        doc: Option<&mut XmlDocument>,
        family: SpecFamily,
        local_name: &str,
    ) -> Result<Self, Error> {
        Self::create_prefixed(doc, family, local_name, family.default_prefix())
    }

    /// Like [`ElementProxy::create`], with the prefix taken from `prefixes`.
    /// Namespaces missing from the map fall back to the family default.
    pub fn create_with_prefixes(
        doc: Option<&mut XmlDocument>,
        family: SpecFamily,
        local_name: &str,
        prefixes: &PrefixMap,
    ) -> Result<Self, Error> {
        let prefix = prefixes
            .prefix_for(family.namespace())
            .unwrap_or(family.default_prefix());
        Self::create_prefixed(doc, family, local_name, prefix)
    }

    fn create_prefixed(
        doc: Option<&mut XmlDocument>,
        family: SpecFamily,
        local_name: &str,
        prefix: &str,
    ) -> Result<Self, Error> {
        let doc = doc.ok_or_else(|| {
            Error::InvalidArgument(format!("no document to create `{local_name}` in"))
        })?;
        check_local_name(local_name)?;
        name::validate_prefix_binding(prefix, family.namespace())?;

        let node = doc.create_element_ns(Some(family.namespace()), &qualify(prefix, local_name))?;
        doc.declare_namespace(node, prefix, family.namespace())?;

        tracing::debug!(
            family = family.name(),
            local_name,
            node = node.index(),
            "created element"
        );
        Ok(Self {
            node,
            family,
            base_uri: doc.base_uri().unwrap_or("").to_owned(),
        })
    }

    /// Wrap an existing element, checking that it is `local_name` in the
    /// family namespace.
    ///
    /// `base_uri` is kept as given and returned by [`ElementProxy::base_uri`].
    /// Fails with [`Error::MissingElement`] when `element` is `None`, unknown
    /// to `doc`, or not an element, and with [`Error::NamespaceMismatch`]
    /// when the namespace or local name differ.
    pub fn adopt(
        doc: &XmlDocument,
        element: Option<NodeId>,
        base_uri: &str,
        family: SpecFamily,
        local_name: &str,
    ) -> Result<Self, Error> {
        Self::adopt_checked(doc, element, base_uri, family, Some(local_name))
    }

    /// Wrap an existing element of the family namespace, whatever its local
    /// name.
    pub fn adopt_any(
        doc: &XmlDocument,
        element: Option<NodeId>,
        base_uri: &str,
        family: SpecFamily,
    ) -> Result<Self, Error> {
        Self::adopt_checked(doc, element, base_uri, family, None)
    }

    fn adopt_checked(
        doc: &XmlDocument,
        element: Option<NodeId>,
        base_uri: &str,
        family: SpecFamily,
        local_name: Option<&str>,
    ) -> Result<Self, Error> {
        let node = element
            .ok_or_else(|| Error::MissingElement("no element supplied for adoption".into()))?;
        if !doc.contains(node) {
            return Err(Error::MissingElement(format!(
                "node {} does not belong to this document",
                node.index()
            )));
        }
        let elem = doc.element(node).ok_or_else(|| {
            Error::MissingElement(format!("node {} is not an element", node.index()))
        })?;

        let found_namespace = elem.name.namespace_uri.as_deref().unwrap_or("");
        let found_local_name: &str = &elem.name.local_name;
        let namespace_ok = found_namespace == family.namespace();
        let local_ok = local_name.map_or(true, |expected| expected == found_local_name);
        if !namespace_ok || !local_ok {
            tracing::debug!(
                family = family.name(),
                found_namespace,
                found_local_name,
                "rejected element"
            );
            return Err(Error::NamespaceMismatch {
                expected_namespace: family.namespace().to_owned(),
                expected_local_name: local_name.unwrap_or("*").to_owned(),
                found_namespace: found_namespace.to_owned(),
                found_local_name: found_local_name.to_owned(),
            });
        }

        tracing::debug!(
            family = family.name(),
            local_name = found_local_name,
            node = node.index(),
            "adopted element"
        );
        Ok(Self {
            node,
            family,
            base_uri: base_uri.to_owned(),
        })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn family(&self) -> SpecFamily {
        self.family
    }

    /// The namespace URI every element behind this proxy is in.
    pub fn namespace(&self) -> &'static str {
        self.family.namespace()
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn local_name<'d>(&self, doc: &'d XmlDocument) -> &'d str {
        doc.local_name(self.node).unwrap_or("")
    }

    /// The prefix the element is written with, `None` for the default namespace.
    pub fn prefix<'d>(&self, doc: &'d XmlDocument) -> Option<&'d str> {
        doc.element(self.node)?
            .name
            .prefix
            .as_deref()
            .filter(|p| !p.is_empty())
    }

    pub fn attribute<'d>(&self, doc: &'d XmlDocument, name: &str) -> Option<&'d str> {
        doc.attribute(self.node, name)
    }

    pub fn set_attribute(&self, doc: &mut XmlDocument, name: &str, value: &str) -> Result<(), Error> {
        doc.set_attribute(self.node, name, value)
    }

    pub fn id<'d>(&self, doc: &'d XmlDocument) -> Option<&'d str> {
        self.attribute(doc, ns::attr::ID)
    }

    pub fn set_id(&self, doc: &mut XmlDocument, id: &str) -> Result<(), Error> {
        self.set_attribute(doc, ns::attr::ID, id)
    }

    /// Direct text content of the element.
    pub fn text(&self, doc: &XmlDocument) -> String {
        doc.text(self.node)
    }

    /// Append a text node.
    pub fn add_text(&self, doc: &mut XmlDocument, text: &str) -> Result<(), Error> {
        let node = doc.create_text_node(text);
        doc.append_child(self.node, node)
    }

    /// Append `data` as base64 text.
    pub fn add_base64_text(&self, doc: &mut XmlDocument, data: &[u8]) -> Result<(), Error> {
        let engine = base64::engine::general_purpose::STANDARD;
        self.add_text(doc, &engine.encode(data))
    }

    /// Append an element proxy created elsewhere as the last child.
    pub fn append(&self, doc: &mut XmlDocument, child: &ElementProxy) -> Result<(), Error> {
        doc.append_child(self.node, child.node)
    }

    /// Create a new family element `local_name` and append it as the last
    /// child. The child reuses this element's prefix.
    pub fn add_element(&self, doc: &mut XmlDocument, local_name: &str) -> Result<ElementProxy, Error> {
        check_local_name(local_name)?;
        let prefix = self.prefix(doc).unwrap_or("").to_owned();
        let node = doc.create_element_ns(Some(self.namespace()), &qualify(&prefix, local_name))?;
        if prefix.is_empty() && doc.lookup_namespace_uri(self.node, "") != Some(self.namespace()) {
            doc.declare_namespace(node, "", self.namespace())?;
        }
        doc.append_child(self.node, node)?;
        Ok(ElementProxy {
            node,
            family: self.family,
            base_uri: self.base_uri.clone(),
        })
    }

    /// Append a child element `local_name` holding `text`.
    pub fn add_text_element(
        &self,
        doc: &mut XmlDocument,
        local_name: &str,
        text: &str,
    ) -> Result<ElementProxy, Error> {
        let child = self.add_element(doc, local_name)?;
        child.add_text(doc, text)?;
        Ok(child)
    }

    /// Append a child element `local_name` holding `data` as base64.
    pub fn add_base64_element(
        &self,
        doc: &mut XmlDocument,
        local_name: &str,
        data: &[u8],
    ) -> Result<ElementProxy, Error> {
        let child = self.add_element(doc, local_name)?;
        child.add_base64_text(doc, data)?;
        Ok(child)
    }

    /// Child elements named `local_name` in the family namespace.
    pub fn children(&self, doc: &XmlDocument, local_name: &str) -> Vec<NodeId> {
        self.children_ns(doc, self.namespace(), local_name)
    }

    /// Child elements named `local_name` in `namespace`, which may belong
    /// to another family (e.g. `ds:KeyInfo` under `xenc:EncryptedData`).
    pub fn children_ns(&self, doc: &XmlDocument, namespace: &str, local_name: &str) -> Vec<NodeId> {
        doc.element_children(self.node)
            .filter(|c| {
                doc.namespace_uri(*c).unwrap_or("") == namespace
                    && doc.local_name(*c) == Some(local_name)
            })
            .collect()
    }

    /// The `index`-th child element named `local_name` in the family namespace.
    pub fn child(&self, doc: &XmlDocument, local_name: &str, index: usize) -> Option<NodeId> {
        self.children(doc, local_name).into_iter().nth(index)
    }

    /// Number of child elements named `local_name` in the family namespace.
    pub fn child_count(&self, doc: &XmlDocument, local_name: &str) -> usize {
        self.children(doc, local_name).len()
    }

    /// Text of the first family child named `local_name`.
    pub fn text_from_child(&self, doc: &XmlDocument, local_name: &str) -> Option<String> {
        self.child(doc, local_name, 0).map(|c| doc.text(c))
    }

    /// Base64-decoded text of the first family child named `local_name`.
    /// Whitespace inside the text is ignored.
    pub fn base64_from_child(&self, doc: &XmlDocument, local_name: &str) -> Result<Vec<u8>, Error> {
        let text = self
            .text_from_child(doc, local_name)
            .ok_or_else(|| Error::MissingElement(local_name.to_owned()))?;
        decode_base64(&text).map_err(|e| Error::Base64(format!("{local_name}: {e}")))
    }
}

/// Decode base64 text, ignoring embedded whitespace.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let clean: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    base64::engine::general_purpose::STANDARD.decode(clean)
}

fn check_local_name(local_name: &str) -> Result<(), Error> {
    if local_name.is_empty() {
        return Err(Error::InvalidArgument("local name must not be empty".into()));
    }
    if !name::is_ncname(local_name) {
        return Err(Error::InvalidArgument(format!(
            "`{local_name}` is not a valid local name"
        )));
    }
    Ok(())
}

fn qualify(prefix: &str, local_name: &str) -> String {
    if prefix.is_empty() {
        local_name.to_owned()
    } else {
        format!("{prefix}:{local_name}")
    }
}
