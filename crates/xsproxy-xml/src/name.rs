#![forbid(unsafe_code)]

//! XML name rules from XML 1.0 (Fifth Edition) and Namespaces in XML 1.0.

use xsproxy_core::{ns, Error};

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}')
}

/// Whether `s` is an XML `Name`.
pub fn is_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

/// Whether `s` is an `NCName` (a `Name` without colons).
pub fn is_ncname(s: &str) -> bool {
    !s.contains(':') && is_name(s)
}

/// Whether `s` is a `QName`: `NCName` or `NCName:NCName`.
pub fn is_qname(s: &str) -> bool {
    match s.split_once(':') {
        Some((prefix, local)) => is_ncname(prefix) && is_ncname(local),
        None => is_ncname(s),
    }
}

/// Split a qualified name into `(prefix, local_name)`.
///
/// Fails with [`Error::InvalidArgument`] if `qname` is not a valid `QName`.
pub fn split_qname(qname: &str) -> Result<(Option<&str>, &str), Error> {
    if !is_qname(qname) {
        return Err(Error::InvalidArgument(format!(
            "`{qname}` is not a valid qualified name"
        )));
    }
    Ok(match qname.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, qname),
    })
}

/// Check a prefix-to-namespace binding against the reserved `xml` and
/// `xmlns` rules.
///
/// An empty prefix stands for the default namespace.
pub fn validate_prefix_binding(prefix: &str, namespace_uri: &str) -> Result<(), Error> {
    if !prefix.is_empty() && !is_ncname(prefix) {
        return Err(Error::InvalidArgument(format!(
            "`{prefix}` is not a valid namespace prefix"
        )));
    }
    if prefix == ns::prefix::XMLNS {
        return Err(Error::InvalidArgument(
            "the `xmlns` prefix cannot be bound".into(),
        ));
    }
    if prefix == ns::prefix::XML && namespace_uri != ns::XML {
        return Err(Error::InvalidArgument(format!(
            "the `xml` prefix cannot be bound to `{namespace_uri}`"
        )));
    }
    if namespace_uri == ns::XML && prefix != ns::prefix::XML {
        return Err(Error::InvalidArgument(format!(
            "`{}` can only be bound to the `xml` prefix",
            ns::XML
        )));
    }
    if namespace_uri == ns::XMLNS {
        return Err(Error::InvalidArgument(format!(
            "`{}` cannot be bound to a prefix",
            ns::XMLNS
        )));
    }
    if namespace_uri.is_empty() && !prefix.is_empty() {
        return Err(Error::InvalidArgument(format!(
            "prefix `{prefix}` cannot be bound to the empty namespace"
        )));
    }
    Ok(())
}
