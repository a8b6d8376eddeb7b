//! Trade record types as they appear in the marketplace export
//!
//! Field names follow the export's camelCase JSON. Optional fields default
//! instead of failing so that variable exports still load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Buy,
    Sell,
}

impl Category {
    /// String table key for this category
    pub fn label_key(&self) -> &'static str {
        match self {
            Category::Buy => "cat_buy",
            Category::Sell => "cat_sell",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Buy => write!(f, "Buy"),
            Category::Sell => write!(f, "Sell"),
        }
    }
}

/// Trade state as reported by the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State {
    Succeeded,
    Failed,
    /// Any state the viewer does not know; classified as a failure
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            State::Succeeded => write!(f, "Succeeded"),
            State::Failed => write!(f, "Failed"),
            State::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Realized (or proposed) payment for a trade
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default)]
    pub transaction_fee: Option<f64>,
}

/// Catalog item referenced by a trade
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Stable catalog key, used for aggregation
    pub item_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub asset_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Opaque type string (e.g. "WeaponSkin")
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub item_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub maximum_quantity: Option<u64>,
}

/// Wrapper around a traded item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: u64,
    #[serde(default)]
    pub item: Option<ItemDetails>,
}

/// One attempted or completed trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trade_id: String,
    pub state: State,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
    #[serde(default)]
    pub days_before_expiration: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub failures: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trade_items: Vec<TradeItem>,
    #[serde(default)]
    pub payment: Option<Payment>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub payment_options: Vec<Payment>,
    #[serde(default)]
    pub payment_proposal: Option<Payment>,
}

impl TradeRecord {
    /// The traded item. Only the first entry of `trade_items` is considered.
    pub fn item(&self) -> Option<&ItemDetails> {
        self.trade_items.first().and_then(|wrapper| wrapper.item.as_ref())
    }

    /// Raw item type of the first traded item
    pub fn item_type(&self) -> Option<&str> {
        self.item().map(|item| item.item_type.as_str())
    }

    /// Gross price, 0 when no payment was recorded
    pub fn price(&self) -> f64 {
        self.payment.as_ref().map_or(0.0, |p| p.price)
    }

    /// Transaction fee, 0 when absent
    pub fn fee(&self) -> f64 {
        self.payment
            .as_ref()
            .and_then(|p| p.transaction_fee)
            .unwrap_or(0.0)
    }
}

/// Per-item rollup of successful sales
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedItem {
    pub item_id: String,
    pub name: String,
    pub asset_url: String,
    pub item_type: String,
    pub count: u64,
    pub total_earned: f64,
}

/// Headline figures over all succeeded trades
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobalTotals {
    pub sold_count: u64,
    /// Revenue after fees
    pub sold_net: f64,
    pub bought_count: u64,
    /// Gross spend (fees are not subtracted)
    pub bought_cost: f64,
    pub unique_items: usize,
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::TimeZone;

    /// Build a record with an item and payment, timestamps spaced by `seq` minutes
    pub fn record(
        id: &str,
        category: Category,
        state: State,
        item_id: Option<&str>,
        price: f64,
        fee: f64,
        seq: i64,
    ) -> TradeRecord {
        let base = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let at = base + chrono::Duration::minutes(seq);
        let trade_items = item_id
            .map(|item_id| {
                vec![TradeItem {
                    id: format!("ti-{id}"),
                    quantity: 1,
                    item: Some(ItemDetails {
                        id: format!("it-{item_id}"),
                        item_id: item_id.to_string(),
                        name: format!("Item {item_id}"),
                        asset_url: format!("https://cdn.example/{item_id}.png"),
                        tags: vec!["Rare".to_string()],
                        item_type: "WeaponSkin".to_string(),
                        ..Default::default()
                    }),
                }]
            })
            .unwrap_or_default();

        TradeRecord {
            id: id.to_string(),
            trade_id: format!("trade-{id}"),
            state,
            category,
            created_at: at,
            last_modified_at: at,
            days_before_expiration: None,
            failures: Vec::new(),
            trade_items,
            payment: Some(Payment {
                id: format!("pay-{id}"),
                price,
                transaction_fee: Some(fee),
            }),
            payment_options: Vec::new(),
            payment_proposal: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_record() {
        let value = json!({
            "id": "r1",
            "tradeId": "t1",
            "state": "Succeeded",
            "category": "Sell",
            "createdAt": "2025-03-01T10:00:00.000Z",
            "lastModifiedAt": "2025-03-01T11:30:00.000Z",
            "daysBeforeExpiration": null,
            "failures": [],
            "tradeItems": [{
                "id": "ti1",
                "quantity": 1,
                "item": {
                    "id": "x",
                    "assetUrl": "https://cdn.example/a.png",
                    "itemId": "A",
                    "name": "Black Ice",
                    "description": null,
                    "subtitle": null,
                    "tags": ["Rarity_Legendary"],
                    "type": "WeaponSkin",
                    "maximumQuantity": null
                }
            }],
            "payment": { "id": "p1", "price": 1200, "transactionFee": 120 },
            "paymentOptions": [],
            "paymentProposal": null
        });

        let record: TradeRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.category, Category::Sell);
        assert_eq!(record.state, State::Succeeded);
        assert_eq!(record.item().unwrap().item_id, "A");
        assert_eq!(record.item_type(), Some("WeaponSkin"));
        assert_eq!(record.price(), 1200.0);
        assert_eq!(record.fee(), 120.0);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let value = json!({
            "id": "r2",
            "tradeId": "t2",
            "state": "Failed",
            "category": "Buy",
            "createdAt": "2025-03-01T10:00:00Z",
            "lastModifiedAt": "2025-03-01T10:00:00Z"
        });

        let record: TradeRecord = serde_json::from_value(value).unwrap();
        assert!(record.failures.is_empty());
        assert!(record.item().is_none());
        assert_eq!(record.price(), 0.0);
        assert_eq!(record.fee(), 0.0);
    }

    #[test]
    fn test_null_fields_default() {
        let value = json!({
            "id": "r3",
            "tradeId": null,
            "state": "Failed",
            "category": "Sell",
            "createdAt": "2025-03-01T10:00:00Z",
            "lastModifiedAt": "2025-03-01T10:00:00Z",
            "failures": null,
            "tradeItems": [{
                "id": null,
                "quantity": null,
                "item": { "itemId": "A", "name": null, "tags": null, "type": null }
            }],
            "payment": { "id": null, "price": null, "transactionFee": null },
            "paymentOptions": null
        });

        let record: TradeRecord = serde_json::from_value(value).unwrap();
        assert!(record.failures.is_empty());
        assert!(record.payment_options.is_empty());
        assert_eq!(record.item().unwrap().item_id, "A");
        assert!(record.item().unwrap().tags.is_empty());
        assert_eq!(record.item_type(), Some(""));
        assert_eq!(record.price(), 0.0);
        assert_eq!(record.fee(), 0.0);
    }

    #[test]
    fn test_unrecognized_state() {
        let value = json!({
            "id": "r4",
            "tradeId": "t4",
            "state": "Pending",
            "category": "Sell",
            "createdAt": "2025-03-01T10:00:00Z",
            "lastModifiedAt": "2025-03-01T10:00:00Z"
        });

        let record: TradeRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.state, State::Unknown);
    }

    #[test]
    fn test_only_first_trade_item_is_read() {
        let mut record =
            test_support::record("r", Category::Sell, State::Succeeded, Some("A"), 10.0, 0.0, 0);
        let mut second = record.trade_items[0].clone();
        second.item.as_mut().unwrap().item_id = "B".to_string();
        record.trade_items.push(second);

        assert_eq!(record.item().unwrap().item_id, "A");
    }

    #[test]
    fn test_item_wrapper_without_item() {
        let mut record =
            test_support::record("r", Category::Sell, State::Succeeded, Some("A"), 10.0, 0.0, 0);
        record.trade_items[0].item = None;
        assert!(record.item().is_none());
        assert!(record.item_type().is_none());
    }
}
