#![forbid(unsafe_code)]

//! Namespace prefix configuration for newly created elements.

use crate::family;
use std::collections::HashMap;
use xsproxy_core::Error;
use xsproxy_xml::name;

/// Maps namespace URIs to the prefix new elements are written with.
///
/// The default map holds each family's default prefix. A prefix can be
/// assigned to at most one namespace.
#[derive(Debug, Clone)]
pub struct PrefixMap {
    prefixes: HashMap<String, String>,
}

impl PrefixMap {
    /// A map with no assignments.
    pub fn empty() -> Self {
        Self {
            prefixes: HashMap::new(),
        }
    }

    /// Assign `prefix` to `namespace`. An empty prefix selects the default
    /// namespace.
    pub fn set_prefix(&mut self, namespace: &str, prefix: &str) -> Result<(), Error> {
        name::validate_prefix_binding(prefix, namespace)?;
        if let Some((other, _)) = self
            .prefixes
            .iter()
            .find(|(ns, p)| p.as_str() == prefix && ns.as_str() != namespace)
        {
            return Err(Error::InvalidArgument(format!(
                "prefix `{prefix}` is already assigned to `{other}`"
            )));
        }
        self.prefixes.insert(namespace.to_owned(), prefix.to_owned());
        Ok(())
    }

    pub fn prefix_for(&self, namespace: &str) -> Option<&str> {
        self.prefixes.get(namespace).map(String::as_str)
    }

    /// Builder form of [`PrefixMap::set_prefix`].
    pub fn with_prefix(mut self, namespace: &str, prefix: &str) -> Result<Self, Error> {
        self.set_prefix(namespace, prefix)?;
        Ok(self)
    }
}

impl Default for PrefixMap {
    fn default() -> Self {
        let prefixes = family::ALL
            .iter()
            .map(|f| (f.namespace().to_owned(), f.default_prefix().to_owned()))
            .collect();
        Self { prefixes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xsproxy_core::ns;

    #[test]
    fn test_defaults() {
        let map = PrefixMap::default();
        assert_eq!(map.prefix_for(ns::ENC), Some("xenc"));
        assert_eq!(map.prefix_for(ns::DSIG), Some("ds"));
        assert_eq!(map.prefix_for("urn:unknown"), None);
        assert_eq!(PrefixMap::empty().prefix_for(ns::ENC), None);
    }

    #[test]
    fn test_reassign_same_namespace() {
        let mut map = PrefixMap::default();
        map.set_prefix(ns::ENC, "enc").unwrap();
        assert_eq!(map.prefix_for(ns::ENC), Some("enc"));
        map.set_prefix(ns::ENC, "").unwrap();
        assert_eq!(map.prefix_for(ns::ENC), Some(""));
    }

    #[test]
    fn test_prefix_already_assigned() {
        let mut map = PrefixMap::default();
        let err = map.set_prefix(ns::ENC11, "xenc").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(map.prefix_for(ns::ENC11), Some("xenc11"));
    }

    #[test]
    fn test_invalid_prefixes() {
        let map = PrefixMap::default();
        assert!(map.clone().with_prefix(ns::ENC, "xmlns").is_err());
        assert!(map.clone().with_prefix(ns::ENC, "xml").is_err());
        assert!(map.clone().with_prefix(ns::ENC, "a:b").is_err());
        assert!(map.with_prefix(ns::ENC, "x1").is_ok());
    }
}
