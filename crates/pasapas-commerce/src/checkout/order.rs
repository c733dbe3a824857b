//! Order types.
//!
//! Field names follow the backend's French wire format; the Rust names are
//! English.

use crate::ids::{OrderId, OrderLineId, UserId, VariantId};
use crate::money::{parse_price, Currency, Money};
use crate::wire::opt_string;
use serde::{Deserialize, Serialize};

/// Payload for `POST /orders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRequest {
    #[serde(rename = "id_client")]
    pub client_id: UserId,
    #[serde(rename = "products")]
    pub items: Vec<OrderItem>,
}

/// One line of an order request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    #[serde(rename = "child_id")]
    pub variant_id: VariantId,
    #[serde(rename = "quantite")]
    pub quantity: i64,
    /// Listed price string, sent unparsed.
    #[serde(rename = "prix_unitaire")]
    pub unit_price: String,
}

/// Reference returned when an order is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderRef {
    #[serde(rename = "id_commande")]
    pub id: OrderId,
}

/// An order as listed on a dashboard or shown in detail.
///
/// List endpoints omit `lines`; detail endpoints include them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    #[serde(rename = "id_commande")]
    pub id: OrderId,
    #[serde(rename = "id_client", default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<UserId>,
    #[serde(rename = "date_commande", default, deserialize_with = "opt_string")]
    pub placed_at: Option<String>,
    /// Total as sent, usually a decimal string.
    #[serde(rename = "montant_total", default, deserialize_with = "opt_string")]
    pub total: Option<String>,
    #[serde(rename = "statut", default, deserialize_with = "opt_string")]
    pub status: Option<String>,
    #[serde(rename = "order_lines", default)]
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Create an order with only an id.
    pub fn new(id: impl Into<OrderId>) -> Self {
        Self {
            id: id.into(),
            client_id: None,
            placed_at: None,
            total: None,
            status: None,
            lines: Vec::new(),
        }
    }

    /// Parsed total.
    pub fn total_amount(&self) -> Option<Money> {
        self.total
            .as_deref()
            .and_then(parse_price)
            .map(|v| Money::from_decimal(v, Currency::EUR))
    }

    /// Total for display: formatted euros, the raw text if it is not a
    /// number, or a dash when absent.
    pub fn total_label(&self) -> String {
        match (self.total_amount(), self.total.as_deref()) {
            (Some(money), _) => money.display(),
            (None, Some(raw)) => raw.to_string(),
            (None, None) => "—".to_string(),
        }
    }

    /// Fold a mutation response into this order.
    ///
    /// Fields present in `update` replace ours; lines are replaced only
    /// when the update carries some.
    pub fn merge(&mut self, update: Order) {
        if update.client_id.is_some() {
            self.client_id = update.client_id;
        }
        if update.placed_at.is_some() {
            self.placed_at = update.placed_at;
        }
        if update.total.is_some() {
            self.total = update.total;
        }
        if update.status.is_some() {
            self.status = update.status;
        }
        if !update.lines.is_empty() {
            self.lines = update.lines;
        }
    }

    /// Set a line's status. Returns false when the line is unknown.
    pub fn set_line_status(&mut self, line_id: &OrderLineId, status: &str) -> bool {
        match self.lines.iter_mut().find(|l| &l.id == line_id) {
            Some(line) => {
                line.status = Some(status.to_string());
                true
            }
            None => false,
        }
    }
}

/// One line of an order detail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    #[serde(rename = "order_line_id")]
    pub id: OrderLineId,
    #[serde(rename = "child_id", default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,
    #[serde(default, deserialize_with = "opt_string")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub size: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub gender: Option<String>,
    #[serde(rename = "quantite", default)]
    pub quantity: i64,
    #[serde(rename = "prix_unitaire", default, deserialize_with = "opt_string")]
    pub unit_price: Option<String>,
    #[serde(rename = "statut_ligne", default, deserialize_with = "opt_string")]
    pub status: Option<String>,
}

impl OrderLine {
    /// `unit_price * quantity`, when the price parses.
    pub fn subtotal(&self) -> Option<Money> {
        self.unit_price
            .as_deref()
            .and_then(|raw| Money::from_price_str(raw, Currency::EUR))
            .and_then(|unit| unit.try_multiply(self.quantity))
    }
}

/// Body for `PATCH /sellers/orders/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderStatusUpdate {
    #[serde(rename = "statut")]
    pub status: String,
}

/// Body for `PATCH /sellers/orders/{id}/lines/{lineId}/status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineStatusUpdate {
    #[serde(rename = "statut_ligne")]
    pub status: String,
}
