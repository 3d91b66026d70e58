use thiserror::Error;

/// Errors returned by gateway operations.
///
/// Each variant names the phase of the exchange that failed. A response that
/// decodes but carries a decline code is not an error; see
/// [`crate::response::ResponseCode::is_success`].
#[derive(Debug, Error)]
pub enum YigimError {
    #[error("cannot build the request: {0}")]
    RequestBuild(String),

    #[error("cannot execute the request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("cannot read the body: {0}")]
    BodyRead(#[source] reqwest::Error),

    #[error("cannot unmarshal the response: {0}")]
    Decode(#[from] serde_json::Error),
}
