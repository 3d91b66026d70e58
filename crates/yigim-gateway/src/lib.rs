//! Client for the Yigim card payment gateway.
//!
//! Every gateway command is a GET request whose parameters travel in the
//! query string and whose authenticity is proven by an `X-Signature` header:
//! the command's fields, in a fixed order, followed by the merchant secret,
//! hashed with MD5 and base64-encoded.
//!
//! # Commands
//!
//! - **create** ([`PaymentCreate`]) registers a payment, optionally linking
//!   and saving the card, and returns the card entry URL
//! - **status** ([`PaymentStatus`]) reports a transaction's state
//! - **refund** ([`PaymentRefund`]) refunds a previous payment
//! - **execute** ([`PaymentExecute`]) charges a saved card token
//!
//! # Quick example
//!
//! ```no_run
//! use yigim::{Configuration, PaymentStatus, YigimClient};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let client = YigimClient::new(Configuration::sandbox("MERCHANT", "SECRET"));
//!
//! let status = client
//!     .status(&PaymentStatus::new("ref-1a2b3c4d-5"))
//!     .await
//!     .unwrap();
//!
//! if status.code.is_success() {
//!     println!("transaction state: {:?}", status.status);
//! }
//! # }
//! ```

// Core types
pub mod config;
pub mod constants;
pub mod error;
pub mod payment;
pub mod response;

// Encoding and signing
pub mod encode;
pub mod signature;

// Gateway surface and HTTP client
pub mod gateway;
pub mod http_client;

// Re-exports
pub use config::{ConfigError, Configuration};
pub use constants::*;
pub use encode::{EncodedRequest, GatewayRequest};
pub use error::YigimError;
pub use gateway::PaymentGateway;
pub use payment::*;
pub use response::*;

pub use http_client::YigimClient;
