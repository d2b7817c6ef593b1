//! Record Module
//!
//! 出力JSONの1要素（1か月分のデータ）を表す型。

use serde::{Deserialize, Serialize};

/// mNAV計算用の拡張指標
///
/// 拡張列が無いデータセットではすべて0になります。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtendedMetrics {
    pub mstr_market_cap: f64,
    pub mstr_share_price: f64,
    pub shares_outstanding: f64,
    pub total_debt: f64,
    pub other_assets: f64,
}

impl ExtendedMetrics {
    /// すべて0（プレースホルダー）かどうか
    pub fn is_placeholder(&self) -> bool {
        *self == Self::default()
    }
}

/// 1か月分の保有データ
///
/// JSONのキーはフィールド名（snake_case）そのまま、拡張指標もフラットに並びます。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub year: i32,
    pub month: u32,
    pub avg_btc_price: f64,
    pub mstr_btc_holdings: f64,
    pub mstr_holdings_value: f64,
    pub btc_closing_price: f64,
    #[serde(flatten)]
    pub extended: ExtendedMetrics,
}

impl MonthlyRecord {
    /// 並び替えキー（年, 月）
    pub fn period(&self) -> (i32, u32) {
        (self.year, self.month)
    }
}
