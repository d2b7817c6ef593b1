//! Public API Types
//!
//! 公開APIで使用する設定用の型を定義するモジュール。

/// 変換対象シートの選択方式
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum SheetSelector {
    /// 先頭シート（デフォルト）
    #[default]
    First,

    /// インデックスで指定（0始まり）
    Index(usize),

    /// シート名で指定
    Name(String),
}

/// 数値セルの変換ポリシー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum NumericPolicy {
    /// 空セル・数値として解釈できないセルは0として扱う（デフォルト）
    #[default]
    Lenient,

    /// 空セルは0、空でないのに数値として解釈できない必須セルはエラー
    ///
    /// 拡張列（6〜10列目）は常に寛容に扱います。
    Strict,
}

/// 拡張指標（mNAV計算用）の列インデックス（0始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedColumns {
    pub mstr_market_cap: usize,
    pub mstr_share_price: usize,
    pub shares_outstanding: usize,
    pub total_debt: usize,
    pub other_assets: usize,
}

impl ExtendedColumns {
    /// 6〜10列目に拡張指標が並ぶ標準レイアウト
    pub const fn positional() -> Self {
        Self {
            mstr_market_cap: 5,
            mstr_share_price: 6,
            shares_outstanding: 7,
            total_debt: 8,
            other_assets: 9,
        }
    }

    pub(crate) fn indices(&self) -> [usize; 5] {
        [
            self.mstr_market_cap,
            self.mstr_share_price,
            self.shares_outstanding,
            self.total_debt,
            self.other_assets,
        ]
    }
}

/// 各フィールドの列インデックス（0始まり）
///
/// `ColumnLayout::Explicit`で使用します。`extended`が`None`の場合、
/// 拡張指標はすべて0で出力されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub period: usize,
    pub avg_btc_price: usize,
    pub mstr_btc_holdings: usize,
    pub mstr_holdings_value: usize,
    pub btc_closing_price: usize,
    pub extended: Option<ExtendedColumns>,
}

impl ColumnMap {
    /// 1〜5列目（と、存在すれば6〜10列目）の標準レイアウト
    pub const fn positional(extended: bool) -> Self {
        Self {
            period: 0,
            avg_btc_price: 1,
            mstr_btc_holdings: 2,
            mstr_holdings_value: 3,
            btc_closing_price: 4,
            extended: if extended {
                Some(ExtendedColumns::positional())
            } else {
                None
            },
        }
    }

    /// 4つの必須数値列のインデックス（出力順）
    pub(crate) fn required_indices(&self) -> [usize; 4] {
        [
            self.avg_btc_price,
            self.mstr_btc_holdings,
            self.mstr_holdings_value,
            self.btc_closing_price,
        ]
    }

    /// マップが参照する最大の列インデックス
    pub(crate) fn max_index(&self) -> usize {
        let required = self
            .required_indices()
            .into_iter()
            .fold(self.period, usize::max);
        match self.extended {
            Some(ext) => ext.indices().into_iter().fold(required, usize::max),
            None => required,
        }
    }
}

/// 列レイアウトの決定方式
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum ColumnLayout {
    /// 位置ベース（デフォルト）
    ///
    /// 1列目がPeriod、2〜5列目が必須指標。シートの列数が10以上の場合に限り、
    /// 6〜10列目を拡張指標として読み込みます。
    #[default]
    Positional,

    /// 明示的な列マップ
    ///
    /// 列数による判定を行わず、マップに従って読み込みます。
    /// 拡張指標の有無は`ColumnMap::extended`で決まります。
    Explicit(ColumnMap),
}

/// 位置ベースで拡張指標を有効にするための最小列数
pub(crate) const EXTENDED_MIN_COLUMNS: usize = 10;

/// 必須列数（Period + 必須指標4列）
pub(crate) const REQUIRED_COLUMNS: usize = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_map_without_extended() {
        let map = ColumnMap::positional(false);
        assert_eq!(map.period, 0);
        assert_eq!(map.required_indices(), [1, 2, 3, 4]);
        assert!(map.extended.is_none());
        assert_eq!(map.max_index(), 4);
    }

    #[test]
    fn test_positional_map_with_extended() {
        let map = ColumnMap::positional(true);
        assert_eq!(map.extended.map(|e| e.indices()), Some([5, 6, 7, 8, 9]));
        assert_eq!(map.max_index(), 9);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(SheetSelector::default(), SheetSelector::First);
        assert_eq!(NumericPolicy::default(), NumericPolicy::Lenient);
        assert_eq!(ColumnLayout::default(), ColumnLayout::Positional);
    }
}
