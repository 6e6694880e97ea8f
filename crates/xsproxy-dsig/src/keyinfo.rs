#![forbid(unsafe_code)]

//! `<ds:KeyInfo>` construction and reading.

use crate::proxy::SignatureElementProxy;
use xsproxy_core::{ns, Error};
use xsproxy_proxy::{ElementProxy, NamespaceBinding, PrefixMap};
use xsproxy_xml::{NodeId, XmlDocument};

/// Create a detached, empty `<ds:KeyInfo>`.
pub fn create_key_info(doc: &mut XmlDocument) -> Result<ElementProxy, Error> {
    SignatureElementProxy::create(Some(doc), ns::node::KEY_INFO)
}

/// Create a detached, empty `<KeyInfo>` with the prefix configured in `prefixes`.
pub fn create_key_info_with_prefixes(
    doc: &mut XmlDocument,
    prefixes: &PrefixMap,
) -> Result<ElementProxy, Error> {
    SignatureElementProxy::create_with_prefixes(Some(doc), ns::node::KEY_INFO, prefixes)
}

/// Wrap an existing `<ds:KeyInfo>`.
pub fn load_key_info(
    doc: &XmlDocument,
    element: Option<NodeId>,
    base_uri: &str,
) -> Result<ElementProxy, Error> {
    SignatureElementProxy::adopt(doc, element, base_uri, ns::node::KEY_INFO)
}

/// Append `<ds:KeyName>name</ds:KeyName>` to a KeyInfo.
pub fn add_key_name(
    doc: &mut XmlDocument,
    key_info: &ElementProxy,
    name: &str,
) -> Result<ElementProxy, Error> {
    ensure_key_info(doc, key_info)?;
    if name.trim().is_empty() {
        return Err(Error::InvalidArgument("key name must not be empty".into()));
    }
    key_info.add_text_element(doc, ns::node::KEY_NAME, name)
}

/// The non-empty `<ds:KeyName>` values of a KeyInfo, trimmed, in order.
pub fn key_names(doc: &XmlDocument, key_info: &ElementProxy) -> Vec<String> {
    key_info
        .children(doc, ns::node::KEY_NAME)
        .into_iter()
        .map(|n| doc.text(n).trim().to_owned())
        .filter(|name| !name.is_empty())
        .collect()
}

fn ensure_key_info(doc: &XmlDocument, proxy: &ElementProxy) -> Result<(), Error> {
    if proxy.namespace() != ns::DSIG || proxy.local_name(doc) != ns::node::KEY_INFO {
        return Err(Error::InvalidArgument(format!(
            "expected ds:KeyInfo, got `{}` in `{}`",
            proxy.local_name(doc),
            proxy.namespace()
        )));
    }
    Ok(())
}
