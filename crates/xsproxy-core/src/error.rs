#![forbid(unsafe_code)]

/// Errors produced by the xsproxy crates.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(
        "wrong element: expected `{expected_local_name}` in namespace `{expected_namespace}`, \
         found `{found_local_name}` in namespace `{found_namespace}`"
    )]
    NamespaceMismatch {
        expected_namespace: String,
        expected_local_name: String,
        found_namespace: String,
        found_local_name: String,
    },

    #[error("missing required element: {0}")]
    MissingElement(String),

    #[error("missing required attribute: {0}")]
    MissingAttribute(String),

    #[error("XML parsing error: {0}")]
    XmlParse(String),

    #[error("invalid XML structure: {0}")]
    XmlStructure(String),

    #[error("base64 decode error: {0}")]
    Base64(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_mismatch_message() {
        let err = Error::NamespaceMismatch {
            expected_namespace: "http://www.w3.org/2001/04/xmlenc#".into(),
            expected_local_name: "EncryptedData".into(),
            found_namespace: "http://example.org/other".into(),
            found_local_name: "EncryptedData".into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("wrong element:"));
        assert!(msg.contains("http://example.org/other"));
        assert!(msg.contains("http://www.w3.org/2001/04/xmlenc#"));
    }

    #[test]
    fn test_messages_name_the_failure() {
        let cases = [
            (Error::InvalidArgument("x".into()), "invalid argument: x"),
            (Error::MissingElement("CipherData".into()), "missing required element: CipherData"),
            (Error::MissingAttribute("Algorithm".into()), "missing required attribute: Algorithm"),
            (Error::XmlParse("eof".into()), "XML parsing error: eof"),
            (Error::XmlStructure("cycle".into()), "invalid XML structure: cycle"),
            (Error::Base64("pad".into()), "base64 decode error: pad"),
        ];
        for (err, msg) in cases {
            assert_eq!(err.to_string(), msg);
        }
    }
}
