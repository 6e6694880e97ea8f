#![forbid(unsafe_code)]

//! Encryption context — holds template configuration.

use xsproxy_proxy::PrefixMap;

/// Context for building XML-Enc templates.
#[derive(Debug, Clone, Default)]
pub struct EncContext {
    /// Prefixes used for new `xenc:` and `ds:` elements.
    pub prefixes: PrefixMap,
}

impl EncContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefixes(prefixes: PrefixMap) -> Self {
        Self { prefixes }
    }
}
