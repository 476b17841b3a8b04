//! HTTP Transport
//!
//! The client talks to the gateway through [`Transport`] so the wire can be
//! swapped out: [`HttpTransport`] uses reqwest, [`MockTransport`] records
//! requests and replays canned responses.

mod mock;

pub use mock::MockTransport;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::error::{PagSeguroError, Result};

/// HTTP method used by the gateway API
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Outbound request, fully built
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayRequest {
    pub method: Method,
    pub url: Url,
    pub content_type: Option<&'static str>,
    pub body: Option<Vec<u8>>,
}

/// Raw HTTP response
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: None,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Decode the body using the charset from the `Content-Type` header,
    /// falling back to the XML declaration and then UTF-8
    pub fn text(&self) -> String {
        let encoding = self
            .content_type
            .as_deref()
            .and_then(charset_param)
            .or_else(|| declared_encoding(&self.body))
            .and_then(|label| encoding_rs::Encoding::for_label(label.as_bytes()))
            .unwrap_or(encoding_rs::UTF_8);

        let (text, _, _) = encoding.decode(&self.body);
        text.into_owned()
    }
}

fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"').to_string())
    })
}

fn declared_encoding(body: &[u8]) -> Option<String> {
    let head = body.strip_prefix(b"<?xml")?;
    let end = head.windows(2).position(|w| w == b"?>")?;
    let decl = std::str::from_utf8(&head[..end]).ok()?;
    let (_, rest) = decl.split_once("encoding=")?;
    let quote = rest.chars().next()?;
    let rest = &rest[quote.len_utf8()..];
    let (label, _) = rest.split_once(quote)?;
    Some(label.to_string())
}

/// Sends one request and returns the raw response
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: GatewayRequest) -> Result<RawResponse>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PagSeguroError::Config(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: GatewayRequest) -> Result<RawResponse> {
        let mut builder = match request.method {
            Method::Get => self.client.get(request.url),
            Method::Post => self.client.post(request.url),
        };
        if let Some(content_type) = request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| PagSeguroError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response
            .bytes()
            .await
            .map_err(|e| PagSeguroError::Transport(e.to_string()))?;

        Ok(RawResponse {
            status,
            content_type,
            body: body.to_vec(),
        })
    }
}
