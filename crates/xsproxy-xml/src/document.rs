#![forbid(unsafe_code)]

//! Mutable XML document backed by `uppsala`.
//!
//! [`XmlDocument`] owns an `uppsala::Document` arena and adds the checks
//! element proxies rely on: XML name and prefix validation on creation,
//! structural errors instead of silent no-ops on insertion, and a base URI
//! carried alongside the tree. New nodes are created detached and become
//! part of the tree only through [`XmlDocument::append_child`] or
//! [`XmlDocument::insert_before`].

use crate::name;
use std::borrow::Cow;
use std::collections::BTreeMap;
use uppsala::{Document, Element, NodeId, NodeKind, QName};
use xsproxy_core::{ns, Error};

/// An owned, mutable XML document.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    doc: Document<'static>,
    base_uri: Option<String>,
    /// Additional ID attribute names to register (beyond the default `Id`, `ID`, `id`).
    extra_id_attrs: Vec<String>,
}

impl XmlDocument {
    /// Create an empty document holding only the document node.
    pub fn new() -> Self {
        Self::from_uppsala(Document::new())
    }

    fn from_uppsala(doc: Document<'static>) -> Self {
        Self {
            doc,
            base_uri: None,
            extra_id_attrs: Vec::new(),
        }
    }

    /// Parse XML text into a new document.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let doc = uppsala::parse(text)
            .map_err(|e| Error::XmlParse(e.to_string()))?
            .into_static();
        tracing::trace!(input_len = text.len(), "parsed XML document");
        Ok(Self::from_uppsala(doc))
    }

    /// Parse XML from bytes (UTF-8, or UTF-16 with or without a BOM).
    pub fn parse_bytes(data: &[u8]) -> Result<Self, Error> {
        let doc = uppsala::parse_bytes(data).map_err(|e| Error::XmlParse(e.to_string()))?;
        Ok(Self::from_uppsala(doc))
    }

    /// Parse XML text and record the URI it was loaded from.
    pub fn parse_with_base_uri(text: &str, base_uri: &str) -> Result<Self, Error> {
        let mut doc = Self::parse(text)?;
        doc.base_uri = Some(base_uri.to_owned());
        Ok(doc)
    }

    pub fn base_uri(&self) -> Option<&str> {
        self.base_uri.as_deref()
    }

    pub fn set_base_uri(&mut self, base_uri: &str) {
        self.base_uri = Some(base_uri.to_owned());
    }

    /// The underlying `uppsala` tree.
    pub fn as_uppsala(&self) -> &Document<'static> {
        &self.doc
    }

    /// The document node.
    pub fn root(&self) -> NodeId {
        self.doc.root()
    }

    /// The document element, if one has been attached.
    pub fn root_element(&self) -> Option<NodeId> {
        self.doc.document_element()
    }

    /// Whether `id` refers to a tree node of this document.
    pub fn contains(&self, id: NodeId) -> bool {
        !matches!(self.doc.node_kind(id), None | Some(NodeKind::Attribute(..)))
    }

    pub fn node_kind(&self, id: NodeId) -> Option<&NodeKind<'static>> {
        self.doc.node_kind(id)
    }

    pub fn element(&self, id: NodeId) -> Option<&Element<'static>> {
        self.doc.element(id)
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut Element<'static>, Error> {
        self.doc
            .element_mut(id)
            .ok_or_else(|| Error::MissingElement(format!("node {} is not an element", id.index())))
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.doc.parent(id)
    }

    /// Direct children of `id`, in document order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.doc.children_iter(id)
    }

    /// Direct element children of `id`, in document order.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id).filter(move |c| self.is_element(*c))
    }

    /// All descendants of `id` in document order, not including `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        self.doc.descendants(id)
    }

    pub fn first_element_child(&self, id: NodeId) -> Option<NodeId> {
        self.element_children(id).next()
    }

    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.doc.next_sibling(id);
        while let Some(n) = current {
            if self.is_element(n) {
                return Some(n);
            }
            current = self.doc.next_sibling(n);
        }
        None
    }

    /// Create a detached element with a namespace URI and qualified name.
    ///
    /// The element carries no namespace declaration; callers that need it
    /// to serialize with its own prefix add one with
    /// [`XmlDocument::declare_namespace`].
    pub fn create_element_ns(
        &mut self,
        namespace_uri: Option<&str>,
        qualified_name: &str,
    ) -> Result<NodeId, Error> {
        let (prefix, local) = name::split_qname(qualified_name)?;
        let namespace_uri = namespace_uri.filter(|uri| !uri.is_empty());
        if let Some(prefix) = prefix {
            let uri = namespace_uri.ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "prefixed name `{qualified_name}` requires a namespace URI"
                ))
            })?;
            name::validate_prefix_binding(prefix, uri)?;
        }
        Ok(self.doc.create_element(owned_qname(namespace_uri, prefix, local)))
    }

    /// Create a detached text node.
    pub fn create_text_node(&mut self, text: &str) -> NodeId {
        self.doc.create_text(text.to_owned())
    }

    /// Attach a detached node as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        self.insert_before(parent, child, None)
    }

    /// Attach a detached node under `parent`, before `reference` or at the
    /// end when `reference` is `None`.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), Error> {
        self.check_insertion(parent, child)?;
        match reference {
            Some(r) => {
                if self.parent(r) != Some(parent) {
                    return Err(Error::XmlStructure(format!(
                        "reference node {} is not a child of node {}",
                        r.index(),
                        parent.index()
                    )));
                }
                self.doc.insert_before(parent, child, r);
            }
            None => self.doc.append_child(parent, child),
        }
        Ok(())
    }

    /// `uppsala` ignores invalid insertions; report them instead.
    fn check_insertion(&self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        if !self.contains(parent) || !self.contains(child) {
            return Err(Error::XmlStructure("node does not belong to this document".into()));
        }
        if child == self.root() {
            return Err(Error::XmlStructure("the document node cannot be a child".into()));
        }
        if self.parent(child).is_some() {
            return Err(Error::XmlStructure(format!(
                "node {} is already attached",
                child.index()
            )));
        }
        match self.doc.node_kind(parent) {
            Some(NodeKind::Element(_)) => {}
            Some(NodeKind::Document) => {
                if self.is_element(child) && self.root_element().is_some() {
                    return Err(Error::XmlStructure(
                        "document already has a document element".into(),
                    ));
                }
                if matches!(
                    self.doc.node_kind(child),
                    Some(NodeKind::Text(_)) | Some(NodeKind::CData(_))
                ) {
                    return Err(Error::XmlStructure(
                        "text cannot be a child of the document node".into(),
                    ));
                }
            }
            _ => {
                return Err(Error::XmlStructure(format!(
                    "node {} cannot have children",
                    parent.index()
                )))
            }
        }
        let mut ancestor = Some(parent);
        while let Some(a) = ancestor {
            if a == child {
                return Err(Error::XmlStructure(
                    "cannot insert a node into its own subtree".into(),
                ));
            }
            ancestor = self.parent(a);
        }
        Ok(())
    }

    /// Set an attribute by qualified name, replacing any existing value.
    ///
    /// A prefixed name must use a prefix in scope at `id`. `xmlns` and
    /// `xmlns:p` names are treated as namespace declarations.
    pub fn set_attribute(&mut self, id: NodeId, qualified_name: &str, value: &str) -> Result<(), Error> {
        let (prefix, local) = name::split_qname(qualified_name)?;
        match prefix {
            None if local == ns::prefix::XMLNS => return self.declare_namespace(id, "", value),
            Some(ns::prefix::XMLNS) => return self.declare_namespace(id, local, value),
            _ => {}
        }
        let namespace_uri = match prefix {
            Some(p) => Some(
                self.lookup_namespace_uri(id, p)
                    .ok_or_else(|| {
                        Error::InvalidArgument(format!("namespace prefix `{p}` is not in scope"))
                    })?
                    .to_owned(),
            ),
            None => None,
        };
        let qname = owned_qname(namespace_uri.as_deref(), prefix, local);
        let elem = self.element_mut(id)?;
        match elem
            .attributes
            .iter_mut()
            .find(|a| a.name.matches(namespace_uri.as_deref(), local))
        {
            Some(existing) => existing.value = Cow::Owned(value.to_owned()),
            None => {
                elem.set_attribute(qname, Cow::Owned(value.to_owned()));
            }
        }
        Ok(())
    }

    /// Look up an attribute by qualified name, or by local name for
    /// attributes without a namespace.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?
            .attributes
            .iter()
            .find(|a| {
                (a.name.namespace_uri.is_none() && a.name.local_name == name)
                    || (a.name.prefix.is_some() && a.name.prefixed_name() == name)
            })
            .map(|a| &*a.value)
    }

    /// Look up an attribute by namespace and local name.
    pub fn attribute_ns(&self, id: NodeId, namespace_uri: Option<&str>, local_name: &str) -> Option<&str> {
        self.element(id)?
            .attributes
            .iter()
            .find(|a| a.name.matches(namespace_uri, local_name))
            .map(|a| &*a.value)
    }

    /// Declare `prefix` (empty for the default namespace) on element `id`.
    pub fn declare_namespace(&mut self, id: NodeId, prefix: &str, namespace_uri: &str) -> Result<(), Error> {
        name::validate_prefix_binding(prefix, namespace_uri)?;
        if !self.doc.declare_namespace(id, Some(prefix), namespace_uri.to_owned()) {
            return Err(Error::MissingElement(format!(
                "node {} is not an element",
                id.index()
            )));
        }
        Ok(())
    }

    /// Resolve `prefix` (empty for the default namespace) at element `id`.
    pub fn lookup_namespace_uri(&self, id: NodeId, prefix: &str) -> Option<&str> {
        if prefix == ns::prefix::XML {
            return Some(ns::XML);
        }
        let mut current = Some(id);
        while let Some(n) = current {
            if let Some(elem) = self.element(n) {
                if let Some((_, uri)) = elem
                    .namespace_declarations
                    .iter()
                    .find(|(p, _)| &**p == prefix)
                {
                    return if uri.is_empty() { None } else { Some(&**uri) };
                }
            }
            current = self.parent(n);
        }
        None
    }

    /// All namespace bindings in scope at element `id`, keyed by prefix.
    pub fn in_scope_namespaces(&self, id: NodeId) -> BTreeMap<String, String> {
        let mut levels: Vec<&Element<'static>> = Vec::new();
        let mut current = Some(id);
        while let Some(n) = current {
            if let Some(elem) = self.element(n) {
                levels.push(elem);
            }
            current = self.parent(n);
        }

        let mut result = BTreeMap::new();
        for elem in levels.into_iter().rev() {
            for (prefix, uri) in &elem.namespace_declarations {
                if uri.is_empty() {
                    result.remove(&**prefix);
                } else {
                    result.insert(prefix.to_string(), uri.to_string());
                }
            }
        }
        result
    }

    pub fn namespace_uri(&self, id: NodeId) -> Option<&str> {
        self.element(id)?.name.namespace_uri.as_deref()
    }

    pub fn local_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| &*e.name.local_name)
    }

    /// Concatenated content of the direct text and CDATA children of `id`.
    pub fn text(&self, id: NodeId) -> String {
        self.children(id)
            .filter_map(|c| self.doc.text_content(c))
            .collect()
    }

    /// Register additional ID attribute names (e.g., `"wsu:Id"`).
    pub fn add_id_attr(&mut self, name: &str) {
        self.extra_id_attrs.push(name.to_owned());
    }

    /// Find the attached element whose ID attribute equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        let default_attrs = ["Id", "ID", "id"];
        self.descendants(self.root()).into_iter().find(|n| {
            self.is_element(*n)
                && default_attrs
                    .iter()
                    .copied()
                    .chain(self.extra_id_attrs.iter().map(String::as_str))
                    .any(|attr| self.attribute(*n, attr) == Some(id))
        })
    }

    /// Find the first attached element with the given namespace and local
    /// name. An empty `namespace_uri` matches elements in no namespace.
    pub fn find_element(&self, namespace_uri: &str, local_name: &str) -> Option<NodeId> {
        self.find_elements(namespace_uri, local_name).into_iter().next()
    }

    /// Find all attached elements with the given namespace and local name.
    pub fn find_elements(&self, namespace_uri: &str, local_name: &str) -> Vec<NodeId> {
        let namespace_uri = Some(namespace_uri).filter(|uri| !uri.is_empty());
        self.descendants(self.root())
            .into_iter()
            .filter(|n| {
                self.element(*n)
                    .is_some_and(|e| e.name.matches(namespace_uri, local_name))
            })
            .collect()
    }
}

impl Default for XmlDocument {
    fn default() -> Self {
        Self::new()
    }
}

fn owned_qname(namespace_uri: Option<&str>, prefix: Option<&str>, local: &str) -> QName<'static> {
    QName {
        namespace_uri: namespace_uri.map(|uri| Cow::Owned(uri.to_owned())),
        prefix: prefix.map(|p| Cow::Owned(p.to_owned())),
        local_name: Cow::Owned(local.to_owned()),
    }
}
