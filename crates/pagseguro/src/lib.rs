//! # pagseguro
//!
//! Client for the PagSeguro v2 checkout and notification APIs.
//!
//! ## Checkout Flow
//!
//! ```text
//! ┌─────────────┐  POST /v2/checkout   ┌─────────────┐
//! │  Your Site  │─────────────────────▶│  PagSeguro  │
//! │   (order)   │◀─────────────────────│  web svc    │
//! └─────────────┘   checkout code      └─────────────┘
//!        │
//!        │ redirect: payment.html?code=<code>
//!        ▼
//! ┌─────────────┐  notificationCode    ┌─────────────┐
//! │  PagSeguro  │─────────────────────▶│  Your Site  │──▶ GET /v2/transactions/
//! │ payment page│     (webhook)        │  (handler)  │        notifications/<code>
//! └─────────────┘                      └─────────────┘
//! ```
//!
//! The client is stateless: no retries, no persistence, no signature
//! checks. Every call is a single request and a normalized answer.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagseguro::{GatewayConfig, GatewayResult, LineItem, Order, PagSeguroClient};
//! use rust_decimal_macros::dec;
//!
//! let client = PagSeguroClient::new(GatewayConfig::sandbox("seller@example.com", "TOKEN"))?;
//!
//! let mut order = Order::new("I1001");
//! order.push(LineItem::new(1001, "Rails 3 e-Book", dec!(10.00)));
//!
//! match client.create_checkout(&order).await? {
//!     GatewayResult::Success(checkout) => redirect(client.payment_url(&checkout.code)),
//!     GatewayResult::Errors(errors) => show(errors),
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod links;
pub mod notification;
pub mod order;
pub mod response;
pub mod transport;
pub mod xml;

pub use client::{CheckoutFormat, PagSeguroClient};
pub use config::{Credentials, Environment, GatewayConfig};
pub use error::{PagSeguroError, Result};
pub use notification::Notification;
pub use order::{Billing, LineItem, Order, ShippingType};
pub use response::{CheckoutCode, GatewayError, GatewayResult};
pub use transport::{GatewayRequest, HttpTransport, MockTransport, RawResponse, Transport};
