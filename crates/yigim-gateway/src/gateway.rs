//! Operation surface of a Yigim payment gateway.
//!
//! [`crate::YigimClient`] is the HTTP implementation. Merchant code written
//! against [`PaymentGateway`] can be exercised with an in-memory double.

use std::future::Future;

use crate::error::YigimError;
use crate::payment::{PaymentCreate, PaymentExecute, PaymentRefund, PaymentStatus};
use crate::response::{
    PaymentCreateResult, PaymentExecuteResult, PaymentRefundResult, PaymentStatusResult,
};

pub trait PaymentGateway: Send + Sync {
    /// Register a payment and obtain the card entry URL.
    fn create(
        &self,
        payment: &PaymentCreate,
    ) -> impl Future<Output = Result<PaymentCreateResult, YigimError>> + Send;

    /// Look up a transaction by reference.
    fn status(
        &self,
        payment: &PaymentStatus,
    ) -> impl Future<Output = Result<PaymentStatusResult, YigimError>> + Send;

    /// Refund a previous payment.
    fn refund(
        &self,
        payment: &PaymentRefund,
    ) -> impl Future<Output = Result<PaymentRefundResult, YigimError>> + Send;

    /// Charge a saved card token.
    fn execute(
        &self,
        payment: &PaymentExecute,
    ) -> impl Future<Output = Result<PaymentExecuteResult, YigimError>> + Send;

    /// Mint a unique reference for a new transaction. No network access.
    fn get_ref(&self) -> String;
}
