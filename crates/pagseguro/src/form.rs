//! Checkout Form Parameters
//!
//! The url-encoded flavour of `POST /v2/checkout`. Items use positional
//! names (`itemId1`, `itemAmount1`, `itemId2`, ...) so insertion order
//! matters. Unlike the XML payload, per-item shipping cost and weight are
//! sent as item fields.

use url::form_urlencoded;

use crate::config::Credentials;
use crate::order::{format_amount, Order};
use crate::xml::encode_latin1;

/// Content type for the form checkout body
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=ISO-8859-1";

/// Ordered `(name, value)` pairs for an order
pub fn checkout_params(order: &Order, credentials: &Credentials) -> Vec<(String, String)> {
    let mut params = Params::default();

    params.push("email", &credentials.email);
    params.push("token", &credentials.token);
    params.push("currency", &order.currency);
    params.push("reference", order.reference());

    params.push_opt("redirectURL", order.redirect_url.as_deref());
    params.push_opt("shippingType", order.shipping_type.map(|t| t.code()));
    params.push_opt("extraAmount", order.extra_amount.map(format_amount));
    params.push_opt("maxUses", order.max_uses);
    params.push_opt("maxAge", order.max_age);

    for (index, item) in order.items().iter().enumerate() {
        let n = index + 1;
        params.push(format!("itemId{n}"), item.id);
        params.push(format!("itemDescription{n}"), &item.description);
        params.push(format!("itemAmount{n}"), format_amount(item.amount));
        params.push(format!("itemQuantity{n}"), item.quantity);
        params.push_opt(format!("itemShippingCost{n}"), item.shipping_cost.map(format_amount));
        params.push_opt(format!("itemWeight{n}"), item.weight);
    }

    let billing = &order.billing;
    params.push_opt("senderName", billing.name.as_deref());
    params.push_opt("senderEmail", billing.email.as_deref());
    params.push_opt("senderAreaCode", billing.phone_area_code.as_deref());
    params.push_opt("senderPhone", billing.phone_number.as_deref());
    params.push_opt("shippingAddressCountry", billing.country.as_deref());
    params.push_opt("shippingAddressState", billing.state.as_deref());
    params.push_opt("shippingAddressCity", billing.city.as_deref());
    params.push_opt("shippingAddressPostalCode", billing.postal_code.as_deref());
    params.push_opt("shippingAddressDistrict", billing.district.as_deref());
    params.push_opt("shippingAddressStreet", billing.street.as_deref());
    params.push_opt("shippingAddressNumber", billing.number.as_deref());
    params.push_opt("shippingAddressComplement", billing.complement.as_deref());

    params.0
}

/// Url-encode pairs with ISO-8859-1 percent escapes
pub fn encode_form(params: &[(String, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.encoding_override(Some(&encode_latin1));
    serializer.extend_pairs(params);
    serializer.finish()
}

#[derive(Default)]
struct Params(Vec<(String, String)>);

impl Params {
    fn push(&mut self, name: impl Into<String>, value: impl ToString) {
        self.0.push((name.into(), value.to_string()));
    }

    fn push_opt(&mut self, name: impl Into<String>, value: Option<impl ToString>) {
        if let Some(value) = value {
            self.push(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{Billing, LineItem, ShippingType};
    use rust_decimal_macros::dec;

    fn credentials() -> Credentials {
        Credentials::new("john@doe.com", "9CA8D46AF0C6177CB4C23D76CAF5E4B0")
    }

    fn get<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_default_params() {
        let params = checkout_params(&Order::new("I1001"), &credentials());
        assert_eq!(
            params,
            vec![
                ("email".to_string(), "john@doe.com".to_string()),
                ("token".to_string(), "9CA8D46AF0C6177CB4C23D76CAF5E4B0".to_string()),
                ("currency".to_string(), "BRL".to_string()),
                ("reference".to_string(), "I1001".to_string()),
            ]
        );
    }

    #[test]
    fn test_order_options() {
        let mut order = Order::new("I1001");
        order.shipping_type = Some(ShippingType::Pac);
        order.redirect_url = Some("http://example.com.br/confirmation".into());
        order.extra_amount = Some(dec!(-35.2));
        order.max_uses = Some(8);
        order.max_age = Some(60);

        let params = checkout_params(&order, &credentials());
        assert_eq!(get(&params, "shippingType"), Some("1"));
        assert_eq!(get(&params, "redirectURL"), Some("http://example.com.br/confirmation"));
        assert_eq!(get(&params, "extraAmount"), Some("-35.20"));
        assert_eq!(get(&params, "maxUses"), Some("8"));
        assert_eq!(get(&params, "maxAge"), Some("60"));
    }

    #[test]
    fn test_minimum_product_info() {
        let mut order = Order::new("I1001");
        order.push(LineItem::new(1001, "Rails 3 e-Book", dec!(10.00)));

        let params = checkout_params(&order, &credentials());
        assert_eq!(get(&params, "itemId1"), Some("1001"));
        assert_eq!(get(&params, "itemDescription1"), Some("Rails 3 e-Book"));
        assert_eq!(get(&params, "itemQuantity1"), Some("1"));
        assert_eq!(get(&params, "itemAmount1"), Some("10.00"));
        assert_eq!(get(&params, "itemShippingCost1"), None);
        assert_eq!(get(&params, "itemWeight1"), None);
    }

    #[test]
    fn test_optional_product_info() {
        let mut order = Order::new("I1001");
        order.push(
            LineItem::new(1001, "T-Shirt", dec!(17.23))
                .with_weight(300)
                .with_shipping_cost(dec!(8.50))
                .with_quantity(33),
        );

        let params = checkout_params(&order, &credentials());
        assert_eq!(get(&params, "itemQuantity1"), Some("33"));
        assert_eq!(get(&params, "itemAmount1"), Some("17.23"));
        assert_eq!(get(&params, "itemShippingCost1"), Some("8.50"));
        assert_eq!(get(&params, "itemWeight1"), Some("300"));
    }

    #[test]
    fn test_multiple_products_are_numbered() {
        let mut order = Order::new("I1001");
        order
            .push(LineItem::new(1001, "Rails 3 e-Book", dec!(18.07)))
            .push(LineItem::new(1002, "E-Book + Screencast", dec!(19.30)));

        let params = checkout_params(&order, &credentials());
        assert_eq!(get(&params, "itemId1"), Some("1001"));
        assert_eq!(get(&params, "itemAmount1"), Some("18.07"));
        assert_eq!(get(&params, "itemId2"), Some("1002"));
        assert_eq!(get(&params, "itemDescription2"), Some("E-Book + Screencast"));
        assert_eq!(get(&params, "itemAmount2"), Some("19.30"));
        assert_eq!(get(&params, "itemId3"), None);
    }

    #[test]
    fn test_billing_info() {
        let mut order = Order::new("I1001");
        order.billing = Billing {
            name: Some("John Doe".into()),
            email: Some("john@doe.com".into()),
            phone_area_code: Some("22".into()),
            phone_number: Some("12345678".into()),
            country: Some("BRA".into()),
            state: Some("AC".into()),
            city: Some("Pantano Grande".into()),
            street: Some("Rua Orobó".into()),
            postal_code: Some("28050035".into()),
            district: Some("Tenório".into()),
            number: Some("72".into()),
            complement: Some("Casa do fundo".into()),
        };

        let params = checkout_params(&order, &credentials());
        for (name, value) in [
            ("senderName", "John Doe"),
            ("senderEmail", "john@doe.com"),
            ("senderAreaCode", "22"),
            ("senderPhone", "12345678"),
            ("shippingAddressCountry", "BRA"),
            ("shippingAddressState", "AC"),
            ("shippingAddressCity", "Pantano Grande"),
            ("shippingAddressPostalCode", "28050035"),
            ("shippingAddressDistrict", "Tenório"),
            ("shippingAddressStreet", "Rua Orobó"),
            ("shippingAddressNumber", "72"),
            ("shippingAddressComplement", "Casa do fundo"),
        ] {
            assert_eq!(params.iter().filter(|(k, _)| k == name).count(), 1, "{name}");
            assert_eq!(get(&params, name), Some(value), "{name}");
        }
    }

    #[test]
    fn test_encode_form_uses_latin1_escapes() {
        let params = vec![
            ("senderEmail".to_string(), "john@doe.com".to_string()),
            ("shippingAddressStreet".to_string(), "Rua Orobó".to_string()),
        ];
        assert_eq!(
            encode_form(&params),
            "senderEmail=john%40doe.com&shippingAddressStreet=Rua+Orob%F3"
        );
    }
}
