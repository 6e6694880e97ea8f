#![forbid(unsafe_code)]

//! XML Encryption element proxies.
//!
//! Binds the generic element proxy to the XML-Enc namespaces, builds blank
//! `<EncryptedData>`/`<EncryptedKey>` templates, and loads existing ones.
//! No cipher is applied here.

pub mod context;
pub mod encrypted_type;
pub mod proxy;
pub mod template;

pub use context::EncContext;
pub use encrypted_type::{CipherData, EncryptedKind, EncryptedType};
pub use proxy::{Encryption11ElementProxy, EncryptionElementProxy};
pub use template::{add_key_info, create_blank_encrypted_type, CipherDataType};
