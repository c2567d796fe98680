use thiserror::Error;

/// Failures talking to the image service.
///
/// Either the request never completed (connection refused, timeout) or
/// the service answered with a non-success status. The service sends no
/// structured error body, so a status code is all a caller gets.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("could not reach the image service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("the image service answered with status {0}")]
    Status(reqwest::StatusCode),
}
