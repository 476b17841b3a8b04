//! Gateway URLs
//!
//! Endpoint construction for the client, plus the redirect and notification
//! links a web layer renders.

use url::Url;

use crate::config::{Credentials, GatewayConfig};
use crate::error::{PagSeguroError, Result};

/// `POST <base>/checkout`, optionally with query credentials
pub fn checkout_url(config: &GatewayConfig, credentials: Option<&Credentials>) -> Result<Url> {
    let mut url = endpoint(&config.base_url, &["checkout"])?;
    if let Some(credentials) = credentials {
        append_credentials(&mut url, credentials);
    }
    Ok(url)
}

/// `GET <base>/transactions/notifications/<code>?email=..&token=..`
pub fn notification_lookup_url(
    config: &GatewayConfig,
    notification_code: &str,
    credentials: &Credentials,
) -> Result<Url> {
    let mut url = endpoint(
        &config.base_url,
        &["transactions", "notifications", notification_code],
    )?;
    append_credentials(&mut url, credentials);
    Ok(url)
}

/// Hosted payment page for a checkout code
pub fn payment_url(config: &GatewayConfig, checkout_code: &str) -> String {
    format!("{}?code={checkout_code}", config.payment_url)
}

/// Notification resource for a notification code, without credentials
pub fn notification_url(config: &GatewayConfig, notification_code: &str) -> String {
    format!(
        "{}/transactions/notifications/{notification_code}",
        config.base_url.trim_end_matches('/')
    )
}

fn endpoint(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| PagSeguroError::Config(format!("invalid base URL '{base}': {e}")))?;
    url.path_segments_mut()
        .map_err(|()| PagSeguroError::Config(format!("base URL '{base}' cannot take a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn append_credentials(url: &mut Url, credentials: &Credentials) {
    url.query_pairs_mut()
        .append_pair("email", &credentials.email)
        .append_pair("token", &credentials.token);
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODE: &str = "9CA8D46AF0C6177CB4C23D76CAF5E4B0";

    #[test]
    fn test_checkout_url_carries_credentials() {
        let config = GatewayConfig::production("john@doe.com", CODE);
        let url = checkout_url(&config, Some(&config.credentials)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://ws.pagseguro.uol.com.br/v2/checkout?email=john%40doe.com&token=9CA8D46AF0C6177CB4C23D76CAF5E4B0"
        );
    }

    #[test]
    fn test_trailing_slash_in_base() {
        let mut config = GatewayConfig::default();
        config.base_url = "http://localhost:3000/v2/".into();
        let url = checkout_url(&config, None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/v2/checkout");
    }

    #[test]
    fn test_notification_lookup_url() {
        let config = GatewayConfig::sandbox("john@doe.com", "TOKEN");
        let url = notification_lookup_url(
            &config,
            "766B9C-AD4B044B04DA-77742F5FA653-E1AB24",
            &config.credentials,
        )
        .unwrap();

        assert_eq!(
            url.path(),
            "/v2/transactions/notifications/766B9C-AD4B044B04DA-77742F5FA653-E1AB24"
        );
        assert_eq!(url.query(), Some("email=john%40doe.com&token=TOKEN"));
    }

    #[test]
    fn test_payment_url_with_code() {
        let config = GatewayConfig::default();
        assert_eq!(
            payment_url(&config, CODE),
            format!("https://pagseguro.uol.com.br/v2/checkout/payment.html?code={CODE}")
        );
    }

    #[test]
    fn test_notification_url_with_code() {
        let config = GatewayConfig::default();
        assert_eq!(
            notification_url(&config, CODE),
            format!("https://ws.pagseguro.uol.com.br/v2/transactions/notifications/{CODE}")
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = GatewayConfig::default();
        config.base_url = "not a url".into();
        assert!(matches!(checkout_url(&config, None), Err(PagSeguroError::Config(_))));
    }
}
