use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// API-level result code carried by every gateway response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ResponseCode {
    /// OK (no error)
    Code0,
    Code1,
    Code2,
    Code3,
    Code4,
    Code5,
    Code6,
}

/// Codes reported as a successful call.
pub const SUCCESS_CODES: &[ResponseCode] = &[ResponseCode::Code0];

impl ResponseCode {
    pub fn is_success(&self) -> bool {
        SUCCESS_CODES.contains(self)
    }
}

impl TryFrom<u8> for ResponseCode {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ResponseCode::Code0),
            1 => Ok(ResponseCode::Code1),
            2 => Ok(ResponseCode::Code2),
            3 => Ok(ResponseCode::Code3),
            4 => Ok(ResponseCode::Code4),
            5 => Ok(ResponseCode::Code5),
            6 => Ok(ResponseCode::Code6),
            other => Err(format!("unknown response code {other}")),
        }
    }
}

impl From<ResponseCode> for u8 {
    fn from(code: ResponseCode) -> Self {
        code as u8
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// Transaction state reported by `status` and `execute`.
///
/// Values the gateway documents get a named variant; anything else is kept
/// verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatusCode {
    S0,
    S1,
    S2,
    S3,
    S4,
    S5,
    S7,
    Approved,
    ReferToIssuer,
    ExpiredCard,
    InvalidAmount,
    InactiveCard,
    InsufficientFunds,
    SuspectedFraud,
    ExceedsWithdrawalLimit,
    FormatError,
    Other(String),
}

impl PaymentStatusCode {
    /// Gateway wire value, e.g. `S1` or `05`.
    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatusCode::S0 => "S0",
            PaymentStatusCode::S1 => "S1",
            PaymentStatusCode::S2 => "S2",
            PaymentStatusCode::S3 => "S3",
            PaymentStatusCode::S4 => "S4",
            PaymentStatusCode::S5 => "S5",
            PaymentStatusCode::S7 => "S7",
            PaymentStatusCode::Approved => "00",
            PaymentStatusCode::ReferToIssuer => "01",
            PaymentStatusCode::ExpiredCard => "02",
            PaymentStatusCode::InvalidAmount => "03",
            PaymentStatusCode::InactiveCard => "04",
            PaymentStatusCode::InsufficientFunds => "05",
            PaymentStatusCode::SuspectedFraud => "06",
            PaymentStatusCode::ExceedsWithdrawalLimit => "07",
            PaymentStatusCode::FormatError => "08",
            PaymentStatusCode::Other(code) => code,
        }
    }

    /// Meaning documented by the gateway.
    pub fn description(&self) -> &'static str {
        match self {
            PaymentStatusCode::S0 => "newly created transaction, waiting for card data input",
            PaymentStatusCode::S1 => "pending DMS transaction (pre-authorized, charge or cancel)",
            PaymentStatusCode::S2 => "transaction is in progress",
            PaymentStatusCode::S3 => "unknown error",
            PaymentStatusCode::S4 => "reversed transaction (cancelled)",
            PaymentStatusCode::S5 => "refunded transaction",
            PaymentStatusCode::S7 => "system malfunction",
            PaymentStatusCode::Approved => "approved",
            PaymentStatusCode::ReferToIssuer => "decline, refer to issuer",
            PaymentStatusCode::ExpiredCard => "decline, expired card",
            PaymentStatusCode::InvalidAmount => "decline, invalid amount",
            PaymentStatusCode::InactiveCard => "decline, inactive card",
            PaymentStatusCode::InsufficientFunds => "decline, insufficient funds",
            PaymentStatusCode::SuspectedFraud => "decline, suspected fraud",
            PaymentStatusCode::ExceedsWithdrawalLimit => "decline, exceeds withdrawal limit",
            PaymentStatusCode::FormatError => "format error",
            PaymentStatusCode::Other(_) => "undocumented status",
        }
    }
}

impl From<String> for PaymentStatusCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "S0" => PaymentStatusCode::S0,
            "S1" => PaymentStatusCode::S1,
            "S2" => PaymentStatusCode::S2,
            "S3" => PaymentStatusCode::S3,
            "S4" => PaymentStatusCode::S4,
            "S5" => PaymentStatusCode::S5,
            "S7" => PaymentStatusCode::S7,
            "00" => PaymentStatusCode::Approved,
            "01" => PaymentStatusCode::ReferToIssuer,
            "02" => PaymentStatusCode::ExpiredCard,
            "03" => PaymentStatusCode::InvalidAmount,
            "04" => PaymentStatusCode::InactiveCard,
            "05" => PaymentStatusCode::InsufficientFunds,
            "06" => PaymentStatusCode::SuspectedFraud,
            "07" => PaymentStatusCode::ExceedsWithdrawalLimit,
            "08" => PaymentStatusCode::FormatError,
            _ => PaymentStatusCode::Other(code),
        }
    }
}

impl From<PaymentStatusCode> for String {
    fn from(code: PaymentStatusCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Display for PaymentStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of 3-D Secure cardholder authentication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Secure3DStatus {
    Status00,
    Status10,
    Status20,
    Status21,
    Status22,
    Status23,
    Status24,
    Status25,
    Status30,
    Other(String),
}

impl Secure3DStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Secure3DStatus::Status00 => "00",
            Secure3DStatus::Status10 => "10",
            Secure3DStatus::Status20 => "20",
            Secure3DStatus::Status21 => "21",
            Secure3DStatus::Status22 => "22",
            Secure3DStatus::Status23 => "23",
            Secure3DStatus::Status24 => "24",
            Secure3DStatus::Status25 => "25",
            Secure3DStatus::Status30 => "30",
            Secure3DStatus::Other(status) => status,
        }
    }
}

impl From<String> for Secure3DStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "00" => Secure3DStatus::Status00,
            "10" => Secure3DStatus::Status10,
            "20" => Secure3DStatus::Status20,
            "21" => Secure3DStatus::Status21,
            "22" => Secure3DStatus::Status22,
            "23" => Secure3DStatus::Status23,
            "24" => Secure3DStatus::Status24,
            "25" => Secure3DStatus::Status25,
            "30" => Secure3DStatus::Status30,
            _ => Secure3DStatus::Other(status),
        }
    }
}

impl From<Secure3DStatus> for String {
    fn from(status: Secure3DStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for Secure3DStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a string tag, treating `null` and `""` as absent.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|tag| !tag.is_empty())
        .map(T::from))
}

/// Response to `payment/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCreateResult {
    /// Page to redirect the cardholder to. Empty when the call failed.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    pub code: ResponseCode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

/// Name/value attribute echoed back from the payment's `extra` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraField {
    pub name: String,
    pub value: String,
}

/// Response to `payment/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentStatusResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub reference: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub datetime: String,
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub payment_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub token: String,
    pub pan: Option<String>,
    pub expiry: Option<String>,
    /// Amount in major units, as reported by the gateway
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    /// Alphabetic currency code, e.g. `AZN`
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub biller: String,
    /// Card scheme
    #[serde(default, deserialize_with = "null_as_default")]
    pub system: String,
    pub issuer: Option<String>,
    /// Retrieval reference number
    #[serde(default, deserialize_with = "null_as_default")]
    pub rrn: String,
    #[serde(default, rename = "3ds", deserialize_with = "empty_as_none")]
    pub secure3d_status: Option<Secure3DStatus>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub approval: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<PaymentStatusCode>,
    pub code: ResponseCode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    pub extra: Option<Vec<ExtraField>>,
}

/// Response to `payment/refund`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRefundResult {
    pub code: ResponseCode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

/// Response to `payment/execute`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentExecuteResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub reference: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub datetime: String,
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub payment_type: String,
    pub pan: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub biller: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub system: String,
    pub issuer: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rrn: String,
    #[serde(default, rename = "3ds", deserialize_with = "empty_as_none")]
    pub secure3d_status: Option<Secure3DStatus>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub approval: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<PaymentStatusCode>,
    pub code: ResponseCode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}
