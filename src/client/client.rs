//! # Inference Client
//!
//! Sends one image to a hosted classification model and returns what the
//! service answered.
//!
//! ## Responsibility
//!
//! The [`InferenceClient`] performs a single, stateless operation:
//! - Read the whole image file into memory
//! - POST the raw bytes to the endpoint with `Authorization: Bearer <token>`
//! - Decode the response body as JSON into a [`ClassifyResponse`]
//!
//! It does not retry, re-sort, or validate the predictions. A non-2xx status
//! is only logged: the service reports problems such as a model that is still
//! loading in a JSON body, which is handed back as
//! [`ClassifyResponse::RemoteError`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use image_classify::client::InferenceClient;
//!
//! let client = InferenceClient::new(
//!     "https://api-inference.huggingface.co/models/google/vit-base-patch16-224",
//!     std::env::var("HF_API_KEY")?,
//! )?;
//!
//! let response = client.classify("data/000000039769.jpeg").await?;
//! println!("{}", response);
//! ```

use log::{debug, info, warn};
use reqwest::Url;
use std::path::Path;
use std::time::Duration;

use crate::common::error::ClassifyError;
use crate::common::prediction::ClassifyResponse;

/// Client bound to one endpoint and one credential.
///
/// Holds no per-call state, so calling [`classify`](Self::classify) any number
/// of times has no local side effects.
pub struct InferenceClient {
    /// Underlying HTTP client
    http: reqwest::Client,
    /// Model inference URL
    endpoint: Url,
    /// Bearer token, sent verbatim
    credential: String,
}

impl InferenceClient {
    /// Creates a client that uses the transport's default timeout.
    ///
    /// # Errors
    ///
    /// * [`ClassifyError::MissingCredential`] if `credential` is empty
    /// * [`ClassifyError::InvalidEndpoint`] if `endpoint` is not an absolute http(s) URL
    pub fn new(endpoint: &str, credential: impl Into<String>) -> Result<Self, ClassifyError> {
        Self::with_timeout(endpoint, credential, None)
    }

    /// Creates a client, optionally bounding the whole request by `timeout`.
    pub fn with_timeout(
        endpoint: &str,
        credential: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ClassifyError> {
        let credential = credential.into();
        if credential.is_empty() {
            return Err(ClassifyError::MissingCredential);
        }

        let endpoint = parse_endpoint(endpoint)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            endpoint,
            credential,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Reads `file_path` and asks the remote model to classify it.
    ///
    /// The file is read before anything touches the network, so a missing
    /// file fails with [`ClassifyError::FileNotFound`] without sending a request.
    ///
    /// # Errors
    ///
    /// * [`ClassifyError::FileNotFound`] / [`ClassifyError::FileRead`] if the image cannot be read
    /// * [`ClassifyError::Transport`] if the request cannot complete
    /// * [`ClassifyError::Decode`] if the body is not valid JSON
    pub async fn classify(
        &self,
        file_path: impl AsRef<Path>,
    ) -> Result<ClassifyResponse, ClassifyError> {
        let file_path = file_path.as_ref();
        let image_data = tokio::fs::read(file_path)
            .await
            .map_err(|e| ClassifyError::from_io(file_path.to_path_buf(), e))?;

        match image::guess_format(&image_data) {
            Ok(format) => debug!("🖼️  {} looks like {:?}", file_path.display(), format),
            Err(_) => debug!("🖼️  {} has no recognized image header", file_path.display()),
        }

        self.classify_bytes(image_data).await
    }

    /// Sends already loaded image bytes. Makes exactly one request.
    pub async fn classify_bytes(
        &self,
        image_data: Vec<u8>,
    ) -> Result<ClassifyResponse, ClassifyError> {
        info!(
            "📤 Sending {} bytes to {}",
            image_data.len(),
            self.endpoint
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.credential)
            .body(image_data)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            info!("📥 Response {}", status);
        } else {
            warn!("⚠️  Response {}, passing body through", status);
        }

        let body = response.bytes().await?;
        let decoded: ClassifyResponse = serde_json::from_slice(&body)?;

        if decoded.is_remote_error() {
            warn!("⚠️  Inference service returned an error payload");
        }

        Ok(decoded)
    }
}

/// One-shot helper: builds a client and classifies a single file.
pub async fn classify(
    file_path: impl AsRef<Path>,
    endpoint: &str,
    credential: &str,
) -> Result<ClassifyResponse, ClassifyError> {
    InferenceClient::new(endpoint, credential)?
        .classify(file_path)
        .await
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ClassifyError> {
    let invalid = |reason: String| ClassifyError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}
