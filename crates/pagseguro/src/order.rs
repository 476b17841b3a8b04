//! Order Model
//!
//! Plain values the caller fills in before a checkout call. Uses
//! `rust_decimal` for every monetary amount.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Default checkout currency
pub const DEFAULT_CURRENCY: &str = "BRL";

/// Shipping service requested for the order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingType {
    /// Encomenda normal (PAC)
    Pac,
    /// SEDEX
    Sedex,
    /// Not specified, buyer picks on the payment page
    Unspecified,
}

impl ShippingType {
    /// Gateway code for this shipping type
    pub const fn code(self) -> u8 {
        match self {
            Self::Pac => 1,
            Self::Sedex => 2,
            Self::Unspecified => 3,
        }
    }
}

/// Buyer and shipping address details
///
/// Values are sent exactly as given; postal codes and phone numbers stay
/// strings so leading zeros survive.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Billing {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_area_code: Option<String>,
    pub phone_number: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

/// A product line in the order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: u64,

    pub description: String,

    /// Unit price
    pub amount: Decimal,

    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Per-item shipping cost
    #[serde(default)]
    pub shipping_cost: Option<Decimal>,

    /// Weight in grams
    #[serde(default)]
    pub weight: Option<u32>,
}

const fn default_quantity() -> u32 {
    1
}

impl LineItem {
    /// Create an item with quantity 1 and no shipping info
    pub fn new(id: u64, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id,
            description: description.into(),
            amount,
            quantity: default_quantity(),
            shipping_cost: None,
            weight: None,
        }
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    #[must_use]
    pub fn with_shipping_cost(mut self, shipping_cost: Decimal) -> Self {
        self.shipping_cost = Some(shipping_cost);
        self
    }

    #[must_use]
    pub fn with_weight(mut self, grams: u32) -> Self {
        self.weight = Some(grams);
        self
    }
}

/// An order to be sent to the checkout API
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Merchant-side reference, fixed at construction
    reference: String,

    /// Overrides the configured merchant email
    #[serde(default)]
    pub email: Option<String>,

    /// Overrides the configured merchant token
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// Where the buyer lands after paying
    #[serde(default)]
    pub redirect_url: Option<String>,

    #[serde(default)]
    pub shipping_type: Option<ShippingType>,

    /// Extra charge (positive) or discount (negative)
    #[serde(default)]
    pub extra_amount: Option<Decimal>,

    /// How many times the checkout code may be used
    #[serde(default)]
    pub max_uses: Option<u32>,

    /// Checkout code lifetime in seconds
    #[serde(default)]
    pub max_age: Option<u32>,

    #[serde(default)]
    pub billing: Billing,

    #[serde(default)]
    items: Vec<LineItem>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Order {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            email: None,
            token: None,
            currency: default_currency(),
            redirect_url: None,
            shipping_type: None,
            extra_amount: None,
            max_uses: None,
            max_age: None,
            billing: Billing::default(),
            items: Vec::new(),
        }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Append a line item, keeping insertion order
    pub fn push(&mut self, item: LineItem) -> &mut Self {
        self.items.push(item);
        self
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Aggregate shipping cost: sum of the per-item shipping costs
    pub fn shipping_cost(&self) -> Decimal {
        self.items
            .iter()
            .filter_map(|item| item.shipping_cost)
            .sum()
    }
}

impl Extend<LineItem> for Order {
    fn extend<I: IntoIterator<Item = LineItem>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

/// Format a money amount the way the gateway expects: two fraction digits
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}
