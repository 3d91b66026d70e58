use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CREATE_PATH, EXECUTE_PATH, REFUND_PATH, REF_PREFIX, REF_UUID_LEN, STATUS_PATH,
};
use crate::encode::{serialize_extra, GatewayRequest};
use crate::response::{
    PaymentCreateResult, PaymentExecuteResult, PaymentRefundResult, PaymentStatusResult,
};

/// Transaction flow of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentType {
    /// Single Message System: authorization and capture in one step
    #[serde(rename = "SMS")]
    Sms,
    /// Dual Message System: pre-authorization, captured later
    #[serde(rename = "DMS")]
    Dms,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Sms => "SMS",
            PaymentType::Dms => "DMS",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language of the card entry page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Az,
    En,
    Ru,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Az => "az",
            Language::En => "en",
            Language::Ru => "ru",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gateway spelling of the save-card flag.
fn yes_no(flag: bool) -> &'static str {
    if flag {
        "y"
    } else {
        "n"
    }
}

mod yes_no_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(super::yes_no(*flag))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match String::deserialize(deserializer)?.as_str() {
            "y" => Ok(true),
            "n" => Ok(false),
            other => Err(serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(other),
                &"\"y\" or \"n\"",
            )),
        }
    }
}

/// Registers a payment and optionally starts card linking.
///
/// The gateway answers with a URL to redirect the cardholder to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCreate {
    /// Unique reference number
    pub reference: String,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    /// Card token to link, empty for a new card
    pub token: String,
    /// Whether the gateway should save the card for later `execute` calls
    #[serde(with = "yes_no_serde")]
    pub save: bool,
    /// Amount in minor units, so 50.55 is 5055
    pub amount: u64,
    /// ISO 4217 numeric currency code, see [`crate::DEFAULT_CURRENCY`]
    pub currency: String,
    pub biller: String,
    pub description: String,
    pub template: String,
    pub language: Language,
    /// URL the gateway calls after card linking completes
    pub callback: String,
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl GatewayRequest for PaymentCreate {
    const PATH: &'static str = CREATE_PATH;
    type Response = PaymentCreateResult;

    fn reference(&self) -> &str {
        &self.reference
    }

    fn query_pairs(&self) -> Vec<(&'static str, Cow<'_, str>)> {
        vec![
            ("reference", Cow::Borrowed(self.reference.as_str())),
            ("type", Cow::Borrowed(self.payment_type.as_str())),
            ("token", Cow::Borrowed(self.token.as_str())),
            ("save", Cow::Borrowed(yes_no(self.save))),
            ("amount", Cow::Owned(self.amount.to_string())),
            ("currency", Cow::Borrowed(self.currency.as_str())),
            ("biller", Cow::Borrowed(self.biller.as_str())),
            ("description", Cow::Borrowed(self.description.as_str())),
            ("template", Cow::Borrowed(self.template.as_str())),
            ("language", Cow::Borrowed(self.language.as_str())),
            ("callback", Cow::Borrowed(self.callback.as_str())),
            ("extra", Cow::Owned(serialize_extra(&self.extra))),
        ]
    }

    fn signature_fields(&self) -> Vec<Cow<'_, str>> {
        // Same order as the query pairs, which is the gateway's signing order.
        self.query_pairs().into_iter().map(|(_, v)| v).collect()
    }
}

/// Looks up the state of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStatus {
    pub reference: String,
}

impl PaymentStatus {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

impl GatewayRequest for PaymentStatus {
    const PATH: &'static str = STATUS_PATH;
    type Response = PaymentStatusResult;

    fn reference(&self) -> &str {
        &self.reference
    }

    fn query_pairs(&self) -> Vec<(&'static str, Cow<'_, str>)> {
        vec![("reference", Cow::Borrowed(self.reference.as_str()))]
    }

    fn signature_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.reference.as_str())]
    }
}

/// Refunds a previous payment, or releases an amount locked for card
/// verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRefund {
    pub reference: String,
}

impl PaymentRefund {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

impl GatewayRequest for PaymentRefund {
    const PATH: &'static str = REFUND_PATH;
    type Response = PaymentRefundResult;

    fn reference(&self) -> &str {
        &self.reference
    }

    fn query_pairs(&self) -> Vec<(&'static str, Cow<'_, str>)> {
        vec![("reference", Cow::Borrowed(self.reference.as_str()))]
    }

    fn signature_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.reference.as_str())]
    }
}

/// Charges a saved card token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentExecute {
    /// Unique payment (order) reference
    pub reference: String,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    /// Card token returned by a saving `create`
    pub token: String,
    /// Amount in minor units, so 50.55 is 5055
    pub amount: u64,
    pub currency: String,
    pub biller: String,
}

impl GatewayRequest for PaymentExecute {
    const PATH: &'static str = EXECUTE_PATH;
    type Response = PaymentExecuteResult;

    fn reference(&self) -> &str {
        &self.reference
    }

    fn query_pairs(&self) -> Vec<(&'static str, Cow<'_, str>)> {
        vec![
            ("reference", Cow::Borrowed(self.reference.as_str())),
            ("type", Cow::Borrowed(self.payment_type.as_str())),
            ("token", Cow::Borrowed(self.token.as_str())),
            ("amount", Cow::Owned(self.amount.to_string())),
            ("currency", Cow::Borrowed(self.currency.as_str())),
            ("biller", Cow::Borrowed(self.biller.as_str())),
        ]
    }

    fn signature_fields(&self) -> Vec<Cow<'_, str>> {
        self.query_pairs().into_iter().map(|(_, v)| v).collect()
    }
}

/// Mint a fresh reference: `ref-` followed by the first 10 characters of a
/// random UUID.
pub fn generate_reference() -> String {
    let id = uuid::Uuid::new_v4().to_string();
    format!("{REF_PREFIX}{}", &id[..REF_UUID_LEN])
}
