//! Per-record derived fields: net price and outcome classification

use serde::Serialize;

use crate::i18n::StringTable;
use crate::model::{State, TradeRecord};

/// Failure code the marketplace uses for a cancelled listing
pub const CANCELLED_CODE: &str = "1853";

/// Failure code the marketplace uses for an expired listing
pub const EXPIRED_CODE: &str = "1854";

/// Four-way outcome, richer than the raw `State`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    Succeeded,
    Failed,
    Cancelled,
    Expired,
}

impl Outcome {
    /// String table key for this outcome
    pub fn label_key(&self) -> &'static str {
        match self {
            Outcome::Succeeded => "status_succeeded",
            Outcome::Failed => "status_failed",
            Outcome::Cancelled => "status_cancelled",
            Outcome::Expired => "status_expired",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Succeeded => write!(f, "Succeeded"),
            Outcome::Failed => write!(f, "Failed"),
            Outcome::Cancelled => write!(f, "Cancelled"),
            Outcome::Expired => write!(f, "Expired"),
        }
    }
}

/// Settled price after fees, floored at zero
pub fn net_price(record: &TradeRecord) -> f64 {
    (record.price() - record.fee()).max(0.0)
}

/// Classify a record. Any state other than Succeeded is a failure, and the
/// cancelled code is checked before the expired code.
pub fn classify_outcome(record: &TradeRecord) -> Outcome {
    if record.state == State::Succeeded {
        return Outcome::Succeeded;
    }

    if record.failures.iter().any(|code| code == CANCELLED_CODE) {
        Outcome::Cancelled
    } else if record.failures.iter().any(|code| code == EXPIRED_CODE) {
        Outcome::Expired
    } else {
        Outcome::Failed
    }
}

/// Map a raw failure code to its reason key; unknown codes pass through
pub fn resolve_failure_code(code: &str) -> String {
    match code {
        CANCELLED_CODE | EXPIRED_CODE => format!("fail_code_{}", code),
        other => other.to_string(),
    }
}

/// Display strings for each failure code of a record, in order
pub fn failure_reasons(record: &TradeRecord, table: &StringTable) -> Vec<String> {
    record
        .failures
        .iter()
        .map(|code| table.get(&resolve_failure_code(code)).to_string())
        .collect()
}
