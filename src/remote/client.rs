//! HTTP client for the image-processing service
//!
//! The process call is a multipart form: the image as a named file part
//! (the service reads the output encoding off the filename extension),
//! the operation name, the active operation's parameters as plain text
//! fields and the username. The response body is the processed image,
//! returned raw. Any non-2xx status is a failure; the service sends no
//! structured error body.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use super::error::RemoteError;
use crate::state::form::ProcessPayload;

/// Response shape of the listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ListImagesResponse {
    pub images: Vec<String>,
}

/// Client for the remote processing service.
///
/// Cheap to clone; clones share the underlying connection pool, which
/// is how it travels into the background tasks issuing the calls.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    pub fn new(base_url: &str) -> Self {
        RemoteClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute URL for an endpoint path.
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL under which a previously processed image is served.
    pub fn asset_url(&self, filename: &str) -> String {
        format!("{}/static/uploads/{}", self.base_url, filename)
    }

    /// Submit one processing request and return the response image bytes.
    pub async fn process(&self, payload: ProcessPayload) -> Result<Vec<u8>, RemoteError> {
        let mut form = Form::new()
            .part(
                "file",
                Part::bytes(payload.bytes).file_name(payload.filename),
            )
            .text("operation", payload.operation.wire_name())
            .text("username", payload.username);

        for (name, value) in payload.operation.form_fields() {
            form = form.text(name, value);
        }

        let response = self
            .http
            .post(self.endpoint("/images/process"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status()));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Fetch the gallery listing for a username.
    ///
    /// The order of filenames is preserved exactly as the server sent it.
    pub async fn list_images(&self, username: &str) -> Result<Vec<String>, RemoteError> {
        let response = self
            .http
            .get(self.endpoint("/list-images"))
            .query(&[("username", username)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status()));
        }

        let listing: ListImagesResponse = response.json().await?;
        Ok(listing.images)
    }

    /// Fetch the bytes of a previously processed image for display.
    pub async fn fetch_asset(&self, filename: &str) -> Result<Vec<u8>, RemoteError> {
        let response = self.http.get(self.asset_url(filename)).send().await?;

        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
