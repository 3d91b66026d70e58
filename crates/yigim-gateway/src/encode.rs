//! Canonical encoding of gateway commands.
//!
//! Every command travels as a GET query string plus an `X-Signature` header.
//! The two use different field orders: the query is sorted by parameter
//! name, the signature input follows the order the gateway documents for
//! that command.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use crate::signature;

/// Query string and signature for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRequest {
    /// `application/x-www-form-urlencoded` parameters, sorted by key
    pub query: String,
    /// Value of the `X-Signature` header
    pub signature: String,
}

/// A command the gateway accepts.
pub trait GatewayRequest {
    /// Path relative to the gateway address, e.g. `payment/create`.
    const PATH: &'static str;

    /// Body the gateway answers this command with.
    type Response: DeserializeOwned;

    /// Reference of the transaction the command is about.
    fn reference(&self) -> &str;

    /// Query parameters under their gateway names.
    fn query_pairs(&self) -> Vec<(&'static str, Cow<'_, str>)>;

    /// Signature input fields, in signing order, secret excluded.
    fn signature_fields(&self) -> Vec<Cow<'_, str>>;

    fn encode(&self, secret: &str) -> EncodedRequest {
        let signature = signature::sign(
            self.signature_fields().iter().map(|f| f.as_ref()),
            secret,
        );
        EncodedRequest {
            query: encode_query(self.query_pairs()),
            signature,
        }
    }
}

/// Form-encode `pairs` with keys in ascending order.
pub fn encode_query<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs: Vec<(K, V)> = pairs.into_iter().collect();
    pairs.sort_by(|a, b| a.0.as_ref().cmp(b.0.as_ref()));

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in &pairs {
        serializer.append_pair(key.as_ref(), value.as_ref());
    }
    serializer.finish()
}

/// Flatten extra payment attributes into `key=value;` entries.
///
/// Entries come out in key order so the signature is reproducible.
pub fn serialize_extra(extra: &BTreeMap<String, String>) -> String {
    extra.iter().fold(String::new(), |mut s, (key, value)| {
        use std::fmt::Write;
        let _ = write!(s, "{key}={value};");
        s
    })
}
