//! Checkout XML Payload
//!
//! Builds the `<checkout>` document for `POST /v2/checkout`. The gateway only
//! accepts ISO-8859-1, so the document declares it and [`encode_latin1`]
//! transcodes the body before it goes on the wire.
//!
//! Shipping is sent as one aggregate freight line (`id` 999, "Frete") rather
//! than per item. Every other order field has its own element.

use std::borrow::Cow;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{PagSeguroError, Result};
use crate::order::{format_amount, Order};

/// XML declaration required by the gateway
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="ISO-8859-1"?>"#;

/// Content type for the XML checkout body
pub const XML_CONTENT_TYPE: &str = "application/xml; charset=ISO-8859-1";

/// Item id of the synthetic freight line
pub const FREIGHT_ITEM_ID: u64 = 999;

/// Description of the synthetic freight line
pub const FREIGHT_ITEM_DESCRIPTION: &str = "Frete";

#[derive(Serialize)]
struct CheckoutXml<'a> {
    items: ItemsXml<'a>,
    #[serde(rename = "redirectURL", skip_serializing_if = "Option::is_none")]
    redirect_url: Option<&'a str>,
    currency: &'a str,
    reference: &'a str,
    #[serde(rename = "extraAmount", skip_serializing_if = "Option::is_none")]
    extra_amount: Option<String>,
    sender: SenderXml<'a>,
    shipping: ShippingXml<'a>,
    #[serde(rename = "maxUses", skip_serializing_if = "Option::is_none")]
    max_uses: Option<u32>,
    #[serde(rename = "maxAge", skip_serializing_if = "Option::is_none")]
    max_age: Option<u32>,
}

#[derive(Serialize)]
struct ItemsXml<'a> {
    #[serde(rename = "item")]
    items: Vec<ItemXml<'a>>,
}

#[derive(Serialize)]
struct ItemXml<'a> {
    id: u64,
    description: &'a str,
    amount: String,
    quantity: u32,
}

#[derive(Serialize)]
struct SenderXml<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<PhoneXml<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PhoneXml<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    area_code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<&'a str>,
}

#[derive(Serialize)]
struct ShippingXml<'a> {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<u8>,
    address: AddressXml<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddressXml<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    street: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    complement: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    district: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    postal_code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<&'a str>,
}

impl<'a> From<&'a Order> for CheckoutXml<'a> {
    fn from(order: &'a Order) -> Self {
        let billing = &order.billing;

        let mut items: Vec<ItemXml<'a>> = order
            .items()
            .iter()
            .map(|item| ItemXml {
                id: item.id,
                description: &item.description,
                amount: format_amount(item.amount),
                quantity: item.quantity,
            })
            .collect();

        let freight = order.shipping_cost();
        if freight != Decimal::ZERO {
            items.push(ItemXml {
                id: FREIGHT_ITEM_ID,
                description: FREIGHT_ITEM_DESCRIPTION,
                amount: format_amount(freight),
                quantity: 1,
            });
        }

        Self {
            items: ItemsXml { items },
            redirect_url: order.redirect_url.as_deref(),
            currency: &order.currency,
            reference: order.reference(),
            extra_amount: order.extra_amount.map(format_amount),
            sender: SenderXml {
                name: billing.name.as_deref(),
                email: billing.email.as_deref(),
                phone: (billing.phone_area_code.is_some() || billing.phone_number.is_some())
                    .then(|| PhoneXml {
                        area_code: billing.phone_area_code.as_deref(),
                        number: billing.phone_number.as_deref(),
                    }),
            },
            shipping: ShippingXml {
                kind: order.shipping_type.map(|t| t.code()),
                address: AddressXml {
                    street: billing.street.as_deref(),
                    number: billing.number.as_deref(),
                    complement: billing.complement.as_deref(),
                    district: billing.district.as_deref(),
                    postal_code: billing.postal_code.as_deref(),
                    city: billing.city.as_deref(),
                    state: billing.state.as_deref(),
                    country: billing.country.as_deref(),
                },
            },
            max_uses: order.max_uses,
            max_age: order.max_age,
        }
    }
}

/// Render the checkout document, declaration included
pub fn checkout_xml(order: &Order) -> Result<String> {
    let document = CheckoutXml::from(order);
    let body = quick_xml::se::to_string_with_root("checkout", &document)
        .map_err(|e| PagSeguroError::Serialization(e.to_string()))?;
    Ok(format!("{XML_DECLARATION}{body}"))
}

/// Transcode to ISO-8859-1 bytes
///
/// Characters outside Latin-1 become numeric character references, which
/// keeps the document valid XML. `encoding_rs` only offers windows-1252 for
/// this label, which would put `€` and friends into the C1 range.
pub fn encode_latin1(text: &str) -> Cow<'_, [u8]> {
    if text.is_ascii() {
        return Cow::Borrowed(text.as_bytes());
    }

    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        match u8::try_from(c) {
            Ok(byte) => bytes.push(byte),
            Err(_) => bytes.extend_from_slice(format!("&#{};", u32::from(c)).as_bytes()),
        }
    }
    Cow::Owned(bytes)
}
