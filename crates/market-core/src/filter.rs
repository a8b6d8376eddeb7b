//! Record filtering for the transaction list and item views

use crate::derive::{classify_outcome, Outcome};
use crate::i18n::{translate_item_type, StringTable};
use crate::model::{AggregatedItem, Category, TradeRecord};

/// Item type selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    /// Exact match on the raw (untranslated) type string
    Exact(String),
}

impl TypeFilter {
    /// Build from a CLI-style value where "all" disables filtering
    pub fn from_arg(value: Option<&str>) -> Self {
        match value {
            None => TypeFilter::All,
            Some(v) if v.eq_ignore_ascii_case("all") => TypeFilter::All,
            Some(v) => TypeFilter::Exact(v.to_string()),
        }
    }
}

/// Active predicates. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub search: String,
    pub item_type: TypeFilter,
    pub category: Option<Category>,
    pub outcome: Option<Outcome>,
}

impl RecordFilter {
    fn matches(&self, record: &TradeRecord, table: &StringTable, needle: Option<&str>) -> bool {
        if self.category.is_some_and(|category| category != record.category) {
            return false;
        }
        if self.outcome.is_some_and(|outcome| outcome != classify_outcome(record)) {
            return false;
        }
        if let TypeFilter::Exact(wanted) = &self.item_type {
            if record.item_type() != Some(wanted.as_str()) {
                return false;
            }
        }
        match needle {
            Some(needle) => matches_record_search(record, needle, table),
            None => true,
        }
    }
}

/// Records satisfying every active predicate, in input order
pub fn filter_records<'a>(
    records: &'a [TradeRecord],
    filter: &RecordFilter,
    table: &StringTable,
) -> Vec<&'a TradeRecord> {
    let needle = normalized_term(&filter.search);
    records
        .iter()
        .filter(|record| filter.matches(record, table, needle.as_deref()))
        .collect()
}

/// Lowercased search term, or None when the term is empty
fn normalized_term(term: &str) -> Option<String> {
    if term.is_empty() {
        None
    } else {
        Some(term.to_lowercase())
    }
}

/// Name, any tag, or translated type contains the (lowercased) needle
fn matches_record_search(record: &TradeRecord, needle: &str, table: &StringTable) -> bool {
    let Some(item) = record.item() else {
        return false;
    };

    item.name.to_lowercase().contains(needle)
        || item.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
        || translate_item_type(&item.item_type, table)
            .to_lowercase()
            .contains(needle)
}

/// Search used by the item-limits view: name or translated type, no tags
pub fn matches_item_search(item: &AggregatedItem, term: &str, table: &StringTable) -> bool {
    let Some(needle) = normalized_term(term) else {
        return true;
    };

    item.name.to_lowercase().contains(&needle)
        || (!item.item_type.is_empty()
            && translate_item_type(&item.item_type, table)
                .to_lowercase()
                .contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::model::test_support::record;
    use crate::model::State;

    fn sample() -> Vec<TradeRecord> {
        let mut charm = record("2", Category::Buy, State::Succeeded, Some("C"), 50.0, 0.0, 1);
        {
            let item = charm.trade_items[0].item.as_mut().unwrap();
            item.name = "Dust Line Charm".to_string();
            item.item_type = "Charm".to_string();
            item.tags = vec!["Season_Y8".to_string()];
        }
        let mut expired = record("3", Category::Sell, State::Failed, Some("A"), 80.0, 8.0, 2);
        expired.failures = vec!["1854".to_string()];

        vec![
            record("1", Category::Sell, State::Succeeded, Some("A"), 100.0, 10.0, 0),
            charm,
            expired,
            record("4", Category::Sell, State::Succeeded, None, 10.0, 1.0, 3),
        ]
    }

    fn ids(records: &[&TradeRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let records = sample();
        let table = StringTable::new(Language::En);
        let out = filter_records(&records, &RecordFilter::default(), &table);
        assert_eq!(ids(&out), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_search_name_is_case_insensitive() {
        let records = sample();
        let table = StringTable::new(Language::En);
        let filter = RecordFilter {
            search: "DUST".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_records(&records, &filter, &table)), vec!["2"]);
    }

    #[test]
    fn test_search_matches_tags() {
        let records = sample();
        let table = StringTable::new(Language::En);
        let filter = RecordFilter {
            search: "y8".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_records(&records, &filter, &table)), vec!["2"]);
    }

    #[test]
    fn test_search_matches_translated_type() {
        let records = sample();
        let en = StringTable::new(Language::En);
        let filter = RecordFilter {
            search: "weapon skin".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_records(&records, &filter, &en)), vec!["1", "3"]);

        let zh = StringTable::new(Language::Zh);
        let filter = RecordFilter {
            search: "挂件".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_records(&records, &filter, &zh)), vec!["2"]);
    }

    #[test]
    fn test_type_filter_uses_raw_type() {
        let records = sample();
        let table = StringTable::new(Language::En);
        let filter = RecordFilter {
            item_type: TypeFilter::Exact("Charm".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_records(&records, &filter, &table)), vec!["2"]);

        let filter = RecordFilter {
            item_type: TypeFilter::from_arg(Some("ALL")),
            ..Default::default()
        };
        assert_eq!(filter_records(&records, &filter, &table).len(), 4);
    }

    #[test]
    fn test_category_and_outcome_selectors() {
        let records = sample();
        let table = StringTable::new(Language::En);
        let filter = RecordFilter {
            category: Some(Category::Sell),
            outcome: Some(Outcome::Succeeded),
            ..Default::default()
        };
        assert_eq!(ids(&filter_records(&records, &filter, &table)), vec!["1", "4"]);

        let filter = RecordFilter {
            outcome: Some(Outcome::Expired),
            ..Default::default()
        };
        assert_eq!(ids(&filter_records(&records, &filter, &table)), vec!["3"]);
    }

    #[test]
    fn test_item_search_skips_tags() {
        let table = StringTable::new(Language::En);
        let item = AggregatedItem {
            item_id: "A".to_string(),
            name: "Black Ice".to_string(),
            asset_url: String::new(),
            item_type: "WeaponSkin".to_string(),
            count: 3,
            total_earned: 0.0,
        };
        assert!(matches_item_search(&item, "ice", &table));
        assert!(matches_item_search(&item, "weapon", &table));
        assert!(matches_item_search(&item, "", &table));
        assert!(!matches_item_search(&item, "rare", &table));
    }
}
