//! Gateway Configuration
//!
//! Endpoints and merchant credentials, carried by value into the client
//! instead of living in process-wide state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PagSeguroError, Result};

const PRODUCTION_API: &str = "https://ws.pagseguro.uol.com.br/v2";
const PRODUCTION_PAYMENT_PAGE: &str = "https://pagseguro.uol.com.br/v2/checkout/payment.html";
const SANDBOX_API: &str = "https://ws.sandbox.pagseguro.uol.com.br/v2";
const SANDBOX_PAYMENT_PAGE: &str = "https://sandbox.pagseguro.uol.com.br/v2/checkout/payment.html";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// PagSeguro environment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    /// Base URL of the v2 web service
    pub const fn api_base(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_API,
            Self::Sandbox => SANDBOX_API,
        }
    }

    /// Hosted payment page the buyer is redirected to
    pub const fn payment_page(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_PAYMENT_PAGE,
            Self::Sandbox => SANDBOX_PAYMENT_PAGE,
        }
    }
}

impl FromStr for Environment {
    type Err = PagSeguroError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "sandbox" => Ok(Self::Sandbox),
            other => Err(PagSeguroError::Config(format!(
                "unknown PagSeguro environment '{other}'"
            ))),
        }
    }
}

/// Merchant email + token pair
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub token: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            token: token.into(),
        }
    }
}

// Keep tokens out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Client configuration
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub environment: Environment,

    /// Default merchant credentials
    pub credentials: Credentials,

    /// Web service base URL (no trailing slash needed)
    pub base_url: String,

    /// Hosted payment page URL
    pub payment_url: String,

    /// Transport timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::for_environment(Environment::Production, Credentials::default())
    }
}

impl GatewayConfig {
    pub fn for_environment(environment: Environment, credentials: Credentials) -> Self {
        Self {
            environment,
            credentials,
            base_url: environment.api_base().into(),
            payment_url: environment.payment_page().into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn production(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self::for_environment(Environment::Production, Credentials::new(email, token))
    }

    pub fn sandbox(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self::for_environment(Environment::Sandbox, Credentials::new(email, token))
    }

    /// Create from environment variables
    ///
    /// `PAGSEGURO_EMAIL` and `PAGSEGURO_TOKEN` are required. `PAGSEGURO_ENV`,
    /// `PAGSEGURO_BASE_URL`, `PAGSEGURO_PAYMENT_URL` and
    /// `PAGSEGURO_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (environment, a map in tests, ...)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| PagSeguroError::Config(format!("{key} not set")))
        };

        let email = required("PAGSEGURO_EMAIL")?;
        let token = required("PAGSEGURO_TOKEN")?;

        let environment = match lookup("PAGSEGURO_ENV") {
            Some(value) => value.parse()?,
            None => Environment::default(),
        };

        let mut config = Self::for_environment(environment, Credentials::new(email, token));

        if let Some(base_url) = lookup("PAGSEGURO_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(payment_url) = lookup("PAGSEGURO_PAYMENT_URL") {
            config.payment_url = payment_url;
        }
        if let Some(timeout) = lookup("PAGSEGURO_TIMEOUT_SECS") {
            config.timeout_secs = timeout.parse().map_err(|_| {
                PagSeguroError::Config(format!("PAGSEGURO_TIMEOUT_SECS is not a number: {timeout}"))
            })?;
        }

        Ok(config)
    }
}
