/// Sandbox API endpoint of the Yigim gateway.
pub const SANDBOX_ADDRESS: &str = "https://sandbox.api.pay.yigim.az";

/// Path of the payment registration (card linking) command.
pub const CREATE_PATH: &str = "payment/create";

/// Path of the transaction status command.
pub const STATUS_PATH: &str = "payment/status";

/// Path of the refund command.
pub const REFUND_PATH: &str = "payment/refund";

/// Path of the token-based execute command.
pub const EXECUTE_PATH: &str = "payment/execute";

pub const MERCHANT_HEADER: &str = "X-Merchant";
pub const TYPE_HEADER: &str = "X-Type";
pub const SIGNATURE_HEADER: &str = "X-Signature";

/// Response format requested through the `X-Type` header.
pub const RESPONSE_FORMAT: &str = "JSON";

/// Prefix of references minted by [`crate::payment::generate_reference`].
pub const REF_PREFIX: &str = "ref-";

/// Number of UUID characters kept after [`REF_PREFIX`].
pub const REF_UUID_LEN: usize = 10;

/// Azerbaijani manat, the gateway's default currency (ISO 4217 numeric).
pub const DEFAULT_CURRENCY: &str = "944";
