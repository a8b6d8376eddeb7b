//! Extraction of trade records from the exporter's envelope
//!
//! The exporter writes an array of GraphQL responses. Records live at
//! `[0].data.game.viewer.meta.trades.nodes`. Anything that does not resolve
//! down to that path yields no records at all.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ExportError, Result};
use crate::model::TradeRecord;

/// JSON pointer from the first response to the record list
const NODES_POINTER: &str = "/data/game/viewer/meta/trades/nodes";

/// Extract the flat record list from a parsed export. Never fails: any
/// structural mismatch returns an empty list.
pub fn parse_trade_export(value: &Value) -> Vec<TradeRecord> {
    let Some(first) = value.as_array().and_then(|responses| responses.first()) else {
        debug!("Export is not a non-empty array");
        return Vec::new();
    };

    let Some(nodes) = first.pointer(NODES_POINTER) else {
        warn!("Export envelope is missing {}", NODES_POINTER);
        return Vec::new();
    };

    match Vec::<TradeRecord>::deserialize(nodes) {
        Ok(records) => {
            debug!("Normalized {} trade records", records.len());
            records
        }
        Err(e) => {
            warn!("Export trade nodes are malformed: {}", e);
            Vec::new()
        }
    }
}

/// Parse export text. Invalid JSON and exports without records are errors.
pub fn parse_trade_export_str(text: &str) -> Result<Vec<TradeRecord>> {
    let value: Value = serde_json::from_str(text)?;
    let records = parse_trade_export(&value);
    if records.is_empty() {
        return Err(ExportError::NoRecords);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(id: &str) -> Value {
        json!({
            "id": id,
            "tradeId": format!("t-{id}"),
            "state": "Succeeded",
            "category": "Sell",
            "createdAt": "2025-01-02T03:04:05.000Z",
            "lastModifiedAt": "2025-01-02T03:04:05.000Z",
            "failures": [],
            "tradeItems": [],
            "payment": null
        })
    }

    fn envelope(nodes: Vec<Value>) -> Value {
        json!([{
            "data": { "game": { "id": "g", "viewer": { "meta": {
                "id": "m",
                "trades": { "nodes": nodes }
            } } } }
        }])
    }

    #[test]
    fn test_valid_envelope_yields_all_nodes() {
        let value = envelope(vec![node("a"), node("b"), node("c")]);
        let records = parse_trade_export(&value);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, "a");
        assert_eq!(records[2].id, "c");
    }

    #[test]
    fn test_only_first_response_is_read() {
        let mut value = envelope(vec![node("a")]);
        let second = envelope(vec![node("b"), node("c")]);
        value.as_array_mut().unwrap().push(second[0].clone());

        assert_eq!(parse_trade_export(&value).len(), 1);
    }

    #[test]
    fn test_empty_and_non_array_inputs() {
        assert!(parse_trade_export(&json!([])).is_empty());
        assert!(parse_trade_export(&json!({})).is_empty());
        assert!(parse_trade_export(&json!("text")).is_empty());
        assert!(parse_trade_export(&Value::Null).is_empty());
        assert!(parse_trade_export(&envelope(vec![])).is_empty());
    }

    #[test]
    fn test_missing_path_segment() {
        let value = json!([{ "data": { "game": { "viewer": { "meta": {} } } } }]);
        assert!(parse_trade_export(&value).is_empty());

        let value = json!([{ "data": { "game": { "viewer": { "meta": {
            "trades": { "nodes": "nope" }
        } } } } }]);
        assert!(parse_trade_export(&value).is_empty());
    }

    #[test]
    fn test_one_malformed_node_rejects_everything() {
        let mut bad = node("b");
        bad["createdAt"] = json!("yesterday");
        let value = envelope(vec![node("a"), bad]);
        assert!(parse_trade_export(&value).is_empty());
    }

    #[test]
    fn test_null_optional_fields_keep_every_node() {
        let mut null_failures = node("b");
        null_failures["failures"] = Value::Null;

        let mut null_price = node("c");
        null_price["payment"] = json!({ "id": "p", "price": null, "transactionFee": null });

        let mut null_lists = node("d");
        null_lists["tradeItems"] = Value::Null;
        null_lists["paymentOptions"] = Value::Null;

        let value = envelope(vec![node("a"), null_failures, null_price, null_lists]);
        let records = parse_trade_export(&value);
        assert_eq!(records.len(), 4);
        assert!(records[1].failures.is_empty());
        assert_eq!(records[2].price(), 0.0);
        assert!(records[3].item().is_none());
    }

    #[test]
    fn test_unknown_state_is_kept() {
        let mut pending = node("b");
        pending["state"] = json!("Pending");

        let value = envelope(vec![node("a"), pending]);
        let records = parse_trade_export(&value);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].state, crate::model::State::Unknown);
    }

    #[test]
    fn test_parse_str_errors() {
        assert!(matches!(
            parse_trade_export_str("{not json"),
            Err(ExportError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_trade_export_str("[]"),
            Err(ExportError::NoRecords)
        ));

        let text = envelope(vec![node("a")]).to_string();
        assert_eq!(parse_trade_export_str(&text).unwrap().len(), 1);
    }
}
