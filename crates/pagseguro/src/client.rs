//! PagSeguro Client
//!
//! One outbound call per operation, no retries. Gateway rejections and HTTP
//! failures come back as [`GatewayResult::Errors`]; only faults below HTTP
//! (and local serialization problems) are `Err`.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{Credentials, GatewayConfig};
use crate::error::Result;
use crate::form::{checkout_params, encode_form, FORM_CONTENT_TYPE};
use crate::links;
use crate::notification::{xml_to_value, Notification};
use crate::order::Order;
use crate::response::GatewayResult;
use crate::transport::{GatewayRequest, HttpTransport, Method, Transport};
use crate::xml::{checkout_xml, encode_latin1, XML_CONTENT_TYPE};

/// Body encoding for checkout creation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutFormat {
    /// XML document, credentials in the query string
    #[default]
    Xml,
    /// Url-encoded parameters, credentials in the body
    Form,
}

/// PagSeguro API client
pub struct PagSeguroClient {
    config: GatewayConfig,
    transport: Arc<dyn Transport>,
    format: CheckoutFormat,
}

impl PagSeguroClient {
    /// Create a client over HTTP
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let transport = HttpTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(GatewayConfig::from_env()?)
    }

    /// Create over any transport
    pub fn with_transport(config: GatewayConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            format: CheckoutFormat::default(),
        }
    }

    /// Select the checkout body encoding
    #[must_use]
    pub fn format(mut self, format: CheckoutFormat) -> Self {
        self.format = format;
        self
    }

    pub const fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Create a checkout for the order
    ///
    /// Merchant email/token set on the order take precedence over the
    /// configured credentials.
    pub async fn create_checkout(&self, order: &Order) -> Result<GatewayResult> {
        let credentials = self.order_credentials(order);

        let request = match self.format {
            CheckoutFormat::Xml => {
                let xml = checkout_xml(order)?;
                tracing::debug!(reference = %order.reference(), bytes = xml.len(), "Built checkout XML");
                GatewayRequest {
                    method: Method::Post,
                    url: links::checkout_url(&self.config, Some(&credentials))?,
                    content_type: Some(XML_CONTENT_TYPE),
                    body: Some(encode_latin1(&xml).into_owned()),
                }
            }
            CheckoutFormat::Form => {
                let body = encode_form(&checkout_params(order, &credentials));
                tracing::debug!(reference = %order.reference(), bytes = body.len(), "Built checkout form");
                GatewayRequest {
                    method: Method::Post,
                    url: links::checkout_url(&self.config, None)?,
                    content_type: Some(FORM_CONTENT_TYPE),
                    body: Some(body.into_bytes()),
                }
            }
        };

        tracing::info!(
            reference = %order.reference(),
            items = order.items().len(),
            format = ?self.format,
            endpoint = %request.url.path(),
            "Creating PagSeguro checkout"
        );

        let response = self.transport.send(request).await?;
        let result = GatewayResult::from_response(response.status, &response.text());

        match &result {
            GatewayResult::Success(checkout) => {
                tracing::info!(
                    reference = %order.reference(),
                    code = %checkout.code,
                    "Checkout created"
                );
            }
            GatewayResult::Errors(errors) => {
                tracing::warn!(
                    reference = %order.reference(),
                    status = response.status,
                    errors = ?errors,
                    "Checkout rejected"
                );
            }
        }

        Ok(result)
    }

    /// Look up a notification code
    ///
    /// Returns the response body as a mapping without interpreting it. A
    /// non-2xx answer that is not XML (`401 Unauthorized`) keeps its raw text.
    /// `credentials` overrides the configured merchant credentials.
    pub async fn fetch_notification(
        &self,
        notification_code: &str,
        credentials: Option<&Credentials>,
    ) -> Result<Notification> {
        let credentials = credentials.unwrap_or(&self.config.credentials);
        let url = links::notification_lookup_url(&self.config, notification_code, credentials)?;

        tracing::info!(code = %notification_code, endpoint = %url.path(), "Fetching PagSeguro notification");

        let response = self
            .transport
            .send(GatewayRequest {
                method: Method::Get,
                url,
                content_type: None,
                body: None,
            })
            .await?;

        if !response.is_success() {
            tracing::warn!(code = %notification_code, status = response.status, "Notification lookup failed");
        }

        let text = response.text();
        let body = match xml_to_value(&text) {
            Ok(body) => body,
            Err(e) if !response.is_success() => {
                tracing::debug!(error = %e, "Notification error body is not XML");
                Value::String(text)
            }
            Err(e) => return Err(e),
        };

        Ok(Notification {
            code: notification_code.to_string(),
            status: response.status,
            body,
        })
    }

    /// Hosted payment page for a checkout code
    pub fn payment_url(&self, checkout_code: &str) -> String {
        links::payment_url(&self.config, checkout_code)
    }

    /// Notification resource for a notification code
    pub fn notification_url(&self, notification_code: &str) -> String {
        links::notification_url(&self.config, notification_code)
    }

    fn order_credentials(&self, order: &Order) -> Credentials {
        let defaults = &self.config.credentials;
        Credentials {
            email: order.email.clone().unwrap_or_else(|| defaults.email.clone()),
            token: order.token.clone().unwrap_or_else(|| defaults.token.clone()),
        }
    }
}
