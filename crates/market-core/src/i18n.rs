//! Static bilingual string table
//!
//! Lookups fall back to the key itself, so an unknown key renders as-is.

use serde::Deserialize;

/// Supported display languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "zh" | "cn" | "chinese" => Ok(Language::Zh),
            _ => Err(format!("Unknown language '{}'. Use: en, zh", s)),
        }
    }
}

// =============================================================================
// Tables
// =============================================================================

const EN: &[(&str, &str)] = &[
    ("nav_transactions", "Transactions"),
    ("nav_analytics", "Analytics"),
    ("nav_limits", "Item Limits"),
    ("nav_reset", "Clear Data"),
    ("upload_title", "R6 Market History"),
    ("error_invalid", "Invalid JSON file. Please check the format."),
    ("load_ok", "Loaded"),
    ("load_hint", "No data loaded. Use 'market-history load <file.json>' to import an export."),
    ("reset_ok", "Cached data cleared."),
    ("hist_title", "Transaction History"),
    ("total", "Total"),
    ("records", "records"),
    ("all_types", "All Types"),
    ("newest", "Newest First"),
    ("oldest", "Oldest First"),
    ("no_trans", "No transactions found matching your criteria."),
    ("page", "Page"),
    ("page_of", "of"),
    ("stats_title", "Sales Analytics"),
    ("limits_title", "Item Limits"),
    ("limits_subtitle", "Showing items successfully sold 3 or more times."),
    ("total_rev", "Total Revenue"),
    ("total_spend", "Total Spend"),
    ("succ_sales", "Successful Sales"),
    ("sold", "Sold"),
    ("bought", "Bought"),
    ("unique_items", "Unique Items Sold"),
    ("top_5", "Top 5 Best Sellers"),
    ("item_perf", "Item Count"),
    ("by_vol", "By Volume"),
    ("by_rev", "By Revenue"),
    ("sold_count", "Sold"),
    ("details", "Details"),
    ("name", "Name"),
    ("type", "Type"),
    ("category", "Category"),
    ("status", "Status"),
    ("amount", "Transaction Amount"),
    ("fee", "Fee"),
    ("date", "Date & Time"),
    ("last_mod", "Last Modified"),
    ("created_at", "Created At"),
    ("fail_reason", "Failure Reasons"),
    ("unknown_item", "Unknown Item"),
    ("unknown_type", "Unknown Type"),
    ("credits", "Credits"),
    ("status_succeeded", "Succeeded"),
    ("status_failed", "Failed"),
    ("status_cancelled", "Cancelled"),
    ("status_expired", "Expired"),
    ("cat_buy", "Buy"),
    ("cat_sell", "Sell"),
    ("fail_code_1853", "Cancelled"),
    ("fail_code_1854", "Expired"),
    ("history_popup_title", "Sale History"),
    ("net_income", "Net Profit"),
    ("unit_price", "Price"),
    ("tags", "Tags"),
    ("type_WeaponSkin", "Weapon Skin"),
    ("type_CharacterHeadgear", "Headgear"),
    ("type_CharacterUniform", "Uniform"),
    ("type_WeaponAttachmentSkinSet", "Attachment Skin"),
    ("type_Charm", "Charm"),
    ("type_OperatorCardPortrait", "Card Portrait"),
    ("type_OperatorCardBackground", "Card Background"),
    ("type_DroneSkin", "Drone Skin"),
    ("type_GadgetSkin", "Gadget Skin"),
    ("type_lootcrate", "Alpha Pack"),
];

const ZH: &[(&str, &str)] = &[
    ("nav_transactions", "交易记录"),
    ("nav_analytics", "统计分析"),
    ("nav_limits", "上限物品"),
    ("nav_reset", "清除数据"),
    ("upload_title", "R6 Market History"),
    ("error_invalid", "无效的JSON文件，请检查格式。"),
    ("load_ok", "已加载"),
    ("load_hint", "尚未加载数据。请使用 'market-history load <file.json>' 导入导出文件。"),
    ("reset_ok", "缓存数据已清除。"),
    ("hist_title", "交易记录"),
    ("total", "总计"),
    ("records", "条记录"),
    ("all_types", "所有类型"),
    ("newest", "最新"),
    ("oldest", "最早"),
    ("no_trans", "未找到匹配的交易。"),
    ("page", "第"),
    ("page_of", "页 / 共"),
    ("stats_title", "统计分析"),
    ("limits_title", "上限物品统计"),
    ("limits_subtitle", "显示已成功售出 3 次及以上的物品。"),
    ("total_rev", "总收入"),
    ("total_spend", "总支出"),
    ("succ_sales", "成功售出"),
    ("sold", "售出"),
    ("bought", "购入"),
    ("unique_items", "物品种类"),
    ("top_5", "热销 Top 5"),
    ("item_perf", "物品统计"),
    ("by_vol", "按销量"),
    ("by_rev", "按收入"),
    ("sold_count", "已售"),
    ("details", "详情"),
    ("name", "名称"),
    ("type", "类型"),
    ("category", "类别"),
    ("status", "状态"),
    ("amount", "交易金额"),
    ("fee", "手续费"),
    ("date", "时间"),
    ("last_mod", "最后更新"),
    ("created_at", "创建时间"),
    ("fail_reason", "失败原因"),
    ("unknown_item", "未知物品"),
    ("unknown_type", "未知类型"),
    ("credits", "点数"),
    ("status_succeeded", "成功"),
    ("status_failed", "失败"),
    ("status_cancelled", "取消"),
    ("status_expired", "到期"),
    ("cat_buy", "买入"),
    ("cat_sell", "卖出"),
    ("fail_code_1853", "取消"),
    ("fail_code_1854", "到期"),
    ("history_popup_title", "售出记录"),
    ("net_income", "净利润"),
    ("unit_price", "售价"),
    ("tags", "标签"),
    ("type_WeaponSkin", "武器"),
    ("type_CharacterHeadgear", "头部"),
    ("type_CharacterUniform", "制服"),
    ("type_WeaponAttachmentSkinSet", "配件"),
    ("type_Charm", "挂件"),
    ("type_OperatorCardPortrait", "立绘"),
    ("type_OperatorCardBackground", "背景"),
    ("type_DroneSkin", "小车"),
    ("type_GadgetSkin", "装备"),
    ("type_lootcrate", "补给包"),
];

// =============================================================================
// Lookup
// =============================================================================

/// Key to display-string lookup for one language
#[derive(Debug, Clone, Copy)]
pub struct StringTable {
    entries: &'static [(&'static str, &'static str)],
}

impl StringTable {
    pub fn new(language: Language) -> Self {
        let entries = match language {
            Language::En => EN,
            Language::Zh => ZH,
        };
        Self { entries }
    }

    /// Translate `key`, returning the key unchanged when there is no entry
    pub fn get<'a>(&self, key: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map_or(key, |(_, v)| *v)
    }
}

impl Default for StringTable {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

/// Display name for a raw item type, or the raw type when untranslated
pub fn translate_item_type(item_type: &str, table: &StringTable) -> String {
    let key = format!("type_{}", item_type);
    let translated = table.get(&key);
    if translated == key {
        item_type.to_string()
    } else {
        translated.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_fallback() {
        let en = StringTable::new(Language::En);
        assert_eq!(en.get("status_cancelled"), "Cancelled");
        assert_eq!(en.get("no_such_key"), "no_such_key");

        let zh = StringTable::new(Language::Zh);
        assert_eq!(zh.get("cat_sell"), "卖出");
    }

    #[test]
    fn test_tables_have_same_keys() {
        for (key, _) in EN {
            assert!(ZH.iter().any(|(k, _)| k == key), "missing zh entry for {}", key);
        }
        assert_eq!(EN.len(), ZH.len());
    }

    #[test]
    fn test_translate_item_type() {
        let en = StringTable::new(Language::En);
        assert_eq!(translate_item_type("lootcrate", &en), "Alpha Pack");
        assert_eq!(translate_item_type("MysteryBox", &en), "MysteryBox");
    }

    #[test]
    fn test_parse_language() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert_eq!("zh".parse::<Language>().unwrap(), Language::Zh);
        assert!("fr".parse::<Language>().is_err());
    }
}
