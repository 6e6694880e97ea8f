#![forbid(unsafe_code)]

//! Specification families: one namespace URI and its default prefix.

use xsproxy_core::ns;

/// An XML security specification family.
///
/// The namespace is fixed when the value is built and cannot be changed
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecFamily {
    name: &'static str,
    namespace: &'static str,
    default_prefix: &'static str,
}

impl SpecFamily {
    pub const fn new(
        name: &'static str,
        namespace: &'static str,
        default_prefix: &'static str,
    ) -> Self {
        Self {
            name,
            namespace,
            default_prefix,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// Prefix used for new elements when no [`PrefixMap`](crate::PrefixMap)
    /// overrides it. Empty means the default namespace.
    pub const fn default_prefix(&self) -> &'static str {
        self.default_prefix
    }
}

pub const SIGNATURE: SpecFamily = SpecFamily::new("XML Signature", ns::DSIG, ns::prefix::DSIG);
pub const SIGNATURE11: SpecFamily =
    SpecFamily::new("XML Signature 1.1", ns::DSIG11, ns::prefix::DSIG11);
pub const ENCRYPTION: SpecFamily = SpecFamily::new("XML Encryption", ns::ENC, ns::prefix::ENC);
pub const ENCRYPTION11: SpecFamily =
    SpecFamily::new("XML Encryption 1.1", ns::ENC11, ns::prefix::ENC11);

/// Every family known to this crate.
pub const ALL: [SpecFamily; 4] = [SIGNATURE, SIGNATURE11, ENCRYPTION, ENCRYPTION11];
