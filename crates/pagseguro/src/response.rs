//! Checkout Response Normalization
//!
//! The gateway answers `POST /v2/checkout` with one of:
//!
//! ```text
//! <checkout><code>..</code><date>..</date></checkout>          -> Success
//! <errors><error><code>..</code><message>..</message></error>  -> Errors (1)
//! <errors><error>..</error><error>..</error></errors>          -> Errors (n)
//! anything else / non-2xx                                      -> Errors ["HTTP <status>", body]
//! ```
//!
//! The shape is inspected once, here. Downstream code only ever matches on
//! [`GatewayResult`].

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{PagSeguroError, Result};

/// One `(code, message)` pair reported by the gateway
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayError {
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl GatewayError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// A created checkout
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutCode {
    /// Opaque code the buyer is redirected with
    pub code: String,

    /// Creation time as reported by the gateway
    pub date: DateTime<FixedOffset>,
}

impl CheckoutCode {
    /// Build from the raw `code`/`date` pair of a success document
    pub fn parse(code: impl Into<String>, date: &str) -> Result<Self> {
        let date = DateTime::parse_from_rfc3339(date.trim())
            .map_err(|e| PagSeguroError::InvalidTimestamp(format!("{date}: {e}")))?;
        Ok(Self {
            code: code.into(),
            date,
        })
    }
}

/// Outcome of a checkout call: a checkout code or a non-empty error list
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayResult {
    Success(CheckoutCode),
    Errors(Vec<GatewayError>),
}

impl GatewayResult {
    /// Normalize a raw HTTP response
    pub fn from_response(status: u16, body: &str) -> Self {
        let success = (200..300).contains(&status);

        match parse_document(body) {
            Some(ResponseDocument::Checkout(doc)) if success => {
                match CheckoutCode::parse(doc.code, &doc.date) {
                    Ok(checkout) => Self::Success(checkout),
                    Err(e) => {
                        tracing::warn!(error = %e, "Checkout response carried an unreadable date");
                        Self::http_failure(status, body)
                    }
                }
            }
            Some(ResponseDocument::Errors(doc)) if !doc.errors.is_empty() => {
                Self::Errors(doc.errors)
            }
            _ => Self::http_failure(status, body),
        }
    }

    /// Single synthetic error for a response we could not interpret
    pub fn http_failure(status: u16, body: &str) -> Self {
        Self::Errors(vec![GatewayError::new(format!("HTTP {status}"), body)])
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub const fn checkout(&self) -> Option<&CheckoutCode> {
        match self {
            Self::Success(checkout) => Some(checkout),
            Self::Errors(_) => None,
        }
    }

    /// Error list, empty on success
    pub fn errors(&self) -> &[GatewayError] {
        match self {
            Self::Success(_) => &[],
            Self::Errors(errors) => errors,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum ResponseDocument {
    Checkout(CheckoutDocument),
    Errors(ErrorsDocument),
}

#[derive(Deserialize)]
struct CheckoutDocument {
    code: String,
    date: String,
}

#[derive(Deserialize)]
struct ErrorsDocument {
    #[serde(rename = "error", default)]
    errors: Vec<GatewayError>,
}

// JSON bodies carry a single `error` as an object and several as an array.
#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum JsonDocument {
    Checkout(CheckoutDocument),
    Errors(JsonErrors),
}

#[derive(Deserialize)]
struct JsonErrors {
    error: OneOrMany<GatewayError>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

fn parse_document(body: &str) -> Option<ResponseDocument> {
    let trimmed = body.trim_start();
    if trimmed.starts_with('{') {
        let doc: JsonDocument = serde_json::from_str(trimmed).ok()?;
        return Some(match doc {
            JsonDocument::Checkout(checkout) => ResponseDocument::Checkout(checkout),
            JsonDocument::Errors(JsonErrors { error }) => {
                ResponseDocument::Errors(ErrorsDocument {
                    errors: match error {
                        OneOrMany::One(error) => vec![error],
                        OneOrMany::Many(errors) => errors,
                    },
                })
            }
        });
    }
    if trimmed.starts_with('<') {
        return quick_xml::de::from_str(trimmed).ok();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECL: &str = r#"<?xml version="1.0" encoding="ISO-8859-1" standalone="yes"?>"#;

    fn errors(pairs: &[(&str, &str)]) -> GatewayResult {
        GatewayResult::Errors(
            pairs
                .iter()
                .map(|(code, message)| GatewayError::new(*code, *message))
                .collect(),
        )
    }

    #[test]
    fn test_xml_success() {
        let body = format!(
            "{DECL}<checkout><code>ABC123</code><date>2010-12-02T10:11:28.000-02:00</date></checkout>"
        );
        let result = GatewayResult::from_response(200, &body);

        let checkout = result.checkout().unwrap();
        assert_eq!(checkout.code, "ABC123");
        assert_eq!(
            checkout.date,
            DateTime::parse_from_rfc3339("2010-12-02T10:11:28-02:00").unwrap()
        );
        assert!(result.errors().is_empty());
    }

    #[test]
    fn test_json_success() {
        let body = r#"{"checkout": {"code": "ABC123", "date": "2010-12-02T10:11:28.000-02:00"}}"#;
        let result = GatewayResult::from_response(200, body);

        assert!(result.is_success());
        assert_eq!(result.checkout().unwrap().code, "ABC123");
    }

    #[test]
    fn test_xml_single_error() {
        let body = format!(
            "{DECL}<errors><error><code>11004</code><message>Currency is required.</message></error></errors>"
        );
        assert_eq!(
            GatewayResult::from_response(400, &body),
            errors(&[("11004", "Currency is required.")])
        );
    }

    #[test]
    fn test_xml_multiple_errors_keep_order() {
        let body = format!(
            "{DECL}<errors>\
             <error><code>11004</code><message>Currency is required.</message></error>\
             <error><code>11005</code><message>Currency invalid value: 100</message></error>\
             </errors>"
        );
        assert_eq!(
            GatewayResult::from_response(400, &body),
            errors(&[
                ("11004", "Currency is required."),
                ("11005", "Currency invalid value: 100"),
            ])
        );
    }

    #[test]
    fn test_error_without_message_keeps_codes() {
        let body = "<errors>\
                    <error><code>11004</code><message>Currency is required.</message></error>\
                    <error><code>11013</code></error>\
                    </errors>";
        assert_eq!(
            GatewayResult::from_response(400, body),
            errors(&[("11004", "Currency is required."), ("11013", "")])
        );
    }

    #[test]
    fn test_json_single_error() {
        let body = r#"{"errors": {"error": {"code": "11004", "message": "Currency is required."}}}"#;
        assert_eq!(
            GatewayResult::from_response(200, body),
            errors(&[("11004", "Currency is required.")])
        );
    }

    #[test]
    fn test_json_multiple_errors_keep_order() {
        let body = r#"{"errors": {"error": [
            {"code": "11004", "message": "Currency is required."},
            {"code": "11005", "message": "Currency invalid value: 100"}
        ]}}"#;
        assert_eq!(
            GatewayResult::from_response(200, body),
            errors(&[
                ("11004", "Currency is required."),
                ("11005", "Currency invalid value: 100"),
            ])
        );
    }

    #[test]
    fn test_unauthorized_becomes_http_error() {
        assert_eq!(
            GatewayResult::from_response(401, "Unauthorized"),
            errors(&[("HTTP 401", "Unauthorized")])
        );
    }

    #[test]
    fn test_success_document_on_error_status_is_http_error() {
        let body = "<checkout><code>ABC123</code><date>2010-12-02T10:11:28.000-02:00</date></checkout>";
        let result = GatewayResult::from_response(500, body);
        assert_eq!(result.errors()[0].code, "HTTP 500");
        assert_eq!(result.errors()[0].message, body);
    }

    #[test]
    fn test_bad_date_is_http_error() {
        let body = "<checkout><code>ABC123</code><date>yesterday</date></checkout>";
        let result = GatewayResult::from_response(200, body);
        assert_eq!(result, errors(&[("HTTP 200", body)]));
    }

    #[test]
    fn test_empty_errors_document_is_http_error() {
        let result = GatewayResult::from_response(400, "<errors></errors>");
        assert_eq!(result, errors(&[("HTTP 400", "<errors></errors>")]));
    }

    #[test]
    fn test_unknown_root_is_http_error() {
        let result = GatewayResult::from_response(200, "<transaction><code>X</code></transaction>");
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].code, "HTTP 200");
    }

    #[test]
    fn test_checkout_code_rejects_bad_date() {
        let err = CheckoutCode::parse("ABC123", "02/12/2010").unwrap_err();
        assert!(matches!(err, PagSeguroError::InvalidTimestamp(_)));
    }
}
