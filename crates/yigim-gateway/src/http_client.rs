use std::sync::Arc;

use url::Url;

use crate::config::{ConfigError, Configuration};
use crate::constants::{MERCHANT_HEADER, RESPONSE_FORMAT, SIGNATURE_HEADER, TYPE_HEADER};
use crate::encode::GatewayRequest;
use crate::error::YigimError;
use crate::gateway::PaymentGateway;
use crate::payment::{
    generate_reference, PaymentCreate, PaymentExecute, PaymentRefund, PaymentStatus,
};
use crate::response::{
    PaymentCreateResult, PaymentExecuteResult, PaymentRefundResult, PaymentStatusResult,
};

/// HTTP client for the Yigim gateway.
///
/// Wraps `reqwest::Client`. Each operation sends one signed GET request and
/// decodes the JSON answer; nothing is retried. Clones share the
/// configuration and the connection pool.
#[derive(Debug, Clone)]
pub struct YigimClient {
    http: reqwest::Client,
    config: Arc<Configuration>,
}

impl YigimClient {
    pub fn new(config: Configuration) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }

    /// Create a client with a custom reqwest::Client, e.g. one with a timeout.
    pub fn with_http_client(config: Configuration, http: reqwest::Client) -> Self {
        Self {
            http,
            config: Arc::new(config),
        }
    }

    /// Create a client from `YIGIM_*` environment variables, loading `.env`
    /// first if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Ok(Self::new(Configuration::from_env()?))
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Build the signed GET request for `request` without sending it.
    pub fn build_request<R: GatewayRequest>(
        &self,
        request: &R,
    ) -> Result<reqwest::Request, YigimError> {
        let address = self.config.address.trim_end_matches('/');
        let mut url = Url::parse(&format!("{address}/{}", R::PATH)).map_err(|e| {
            YigimError::RequestBuild(format!("invalid address {:?}: {e}", self.config.address))
        })?;

        let encoded = request.encode(&self.config.secret);
        url.set_query(Some(&encoded.query));

        self.http
            .get(url)
            .header(MERCHANT_HEADER, self.config.merchant.as_str())
            .header(TYPE_HEADER, RESPONSE_FORMAT)
            .header(SIGNATURE_HEADER, encoded.signature)
            .build()
            .map_err(|e| YigimError::RequestBuild(e.to_string()))
    }

    /// Send `request` and decode the gateway's answer.
    ///
    /// The HTTP status is not interpreted; decline codes come back as a
    /// successfully decoded response.
    pub async fn send<R: GatewayRequest>(&self, request: &R) -> Result<R::Response, YigimError> {
        let req = self.build_request(request)?;
        tracing::debug!(
            path = R::PATH,
            reference = request.reference(),
            "sending gateway request"
        );

        let body = self.execute_request(req).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn execute_request(&self, req: reqwest::Request) -> Result<Vec<u8>, YigimError> {
        let path = req.url().path().to_string();

        let resp = self
            .http
            .execute(req)
            .await
            .map_err(YigimError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(
                %status,
                path = %path,
                "gateway answered with a non-success HTTP status"
            );
        }

        let body = resp.bytes().await.map_err(YigimError::BodyRead)?;
        tracing::debug!(%status, path = %path, len = body.len(), "gateway response received");
        Ok(body.to_vec())
    }

    /// Register a payment and optionally start card linking.
    /// Returns the URL to redirect the cardholder to.
    pub async fn create(
        &self,
        payment: &PaymentCreate,
    ) -> Result<PaymentCreateResult, YigimError> {
        self.send(payment).await
    }

    /// Status of a transaction by its reference.
    pub async fn status(
        &self,
        payment: &PaymentStatus,
    ) -> Result<PaymentStatusResult, YigimError> {
        self.send(payment).await
    }

    /// Refund a previous payment.
    pub async fn refund(
        &self,
        payment: &PaymentRefund,
    ) -> Result<PaymentRefundResult, YigimError> {
        self.send(payment).await
    }

    /// Execute a payment using a saved card token.
    pub async fn execute(
        &self,
        payment: &PaymentExecute,
    ) -> Result<PaymentExecuteResult, YigimError> {
        self.send(payment).await
    }

    /// Unique reference for a new transaction.
    pub fn get_ref(&self) -> String {
        generate_reference()
    }
}

impl PaymentGateway for YigimClient {
    async fn create(&self, payment: &PaymentCreate) -> Result<PaymentCreateResult, YigimError> {
        YigimClient::create(self, payment).await
    }

    async fn status(&self, payment: &PaymentStatus) -> Result<PaymentStatusResult, YigimError> {
        YigimClient::status(self, payment).await
    }

    async fn refund(&self, payment: &PaymentRefund) -> Result<PaymentRefundResult, YigimError> {
        YigimClient::refund(self, payment).await
    }

    async fn execute(
        &self,
        payment: &PaymentExecute,
    ) -> Result<PaymentExecuteResult, YigimError> {
        YigimClient::execute(self, payment).await
    }

    fn get_ref(&self) -> String {
        YigimClient::get_ref(self)
    }
}
