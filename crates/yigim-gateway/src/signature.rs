//! Request signatures for the `X-Signature` header.
//!
//! The gateway authenticates a request by hashing its fields, in a fixed
//! per-command order and with no separators, followed by the merchant
//! secret. The digest is MD5, as mandated by the gateway, transported as
//! padded standard base64.

use base64::Engine;
use md5::{Digest, Md5};

/// Base64-encoded MD5 digest of `value`.
pub fn generate_signature(value: &str) -> String {
    let digest = Md5::digest(value.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(digest)
}

/// Concatenate `fields` followed by `secret` and sign the result.
pub fn sign<'a>(fields: impl IntoIterator<Item = &'a str>, secret: &str) -> String {
    let mut input: String = fields.into_iter().collect();
    input.push_str(secret);
    generate_signature(&input)
}
