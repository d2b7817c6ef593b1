//! Tabular Normalizer
//!
//! 半構造化された表（年グループ行 + 月行 + 集計行）を、
//! 年月ごとのフラットなレコード列に変換するモジュール。
//!
//! # 処理フロー
//!
//! 1. 列レイアウトの決定（拡張列を読むかどうかはデータセット全体で1回だけ判定）
//! 2. 先頭のヘッダー行をスキップ
//! 3. 集計行（"Grand Total"など）を除外
//! 4. Period列を分類しながら前から走査し、直前の年を保持して月行をレコード化
//! 5. (年, 月) の昇順に安定ソート

use crate::api::{ColumnLayout, ColumnMap, NumericPolicy, EXTENDED_MIN_COLUMNS, REQUIRED_COLUMNS};
use crate::builder::ConversionConfig;
use crate::error::HoldingsError;
use crate::record::{ExtendedMetrics, MonthlyRecord};
use crate::types::Table;

/// 変換結果
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// (年, 月) の昇順に並んだレコード
    pub records: Vec<MonthlyRecord>,

    /// 拡張指標を実データから読み込んだかどうか
    pub has_extended: bool,
}

impl Conversion {
    /// 最新（最後）のレコード
    pub fn latest(&self) -> Option<&MonthlyRecord> {
        self.records.last()
    }
}

/// Period列のラベルの分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PeriodLabel {
    /// 4桁の年グループ
    Year(i32),

    /// 月（範囲チェック前、小数部は切り捨て済み）
    Month(i64),

    /// 数値でないラベル（集計行など）
    Other,
}

/// Period列のラベルを分類する
///
/// `.`を除いた文字列がすべて数字のとき数値ラベルとみなし、
/// ラベル自体が4文字なら年、それ以外は月として扱います。
pub(crate) fn classify_period(label: &str) -> PeriodLabel {
    let digits: String = label.chars().filter(|c| *c != '.').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return PeriodLabel::Other;
    }

    if label.len() == 4 {
        if let Ok(year) = label.parse::<i32>() {
            return PeriodLabel::Year(year);
        }
    }

    match label.parse::<f64>() {
        Ok(value) => PeriodLabel::Month(value.trunc() as i64),
        Err(_) => PeriodLabel::Other,
    }
}

/// 表を正規化してレコード列を生成する
pub(crate) fn normalize(
    table: &Table,
    config: &ConversionConfig,
) -> Result<Conversion, HoldingsError> {
    let columns = resolve_columns(table, &config.column_layout)?;
    let has_extended = columns.extended.is_some();
    if has_extended {
        log::info!("Extended (mNAV) columns detected");
    } else {
        log::info!("No extended (mNAV) columns; filling placeholders");
    }

    let mut records = Vec::new();
    let mut current_year: Option<i32> = None;

    for row in config.header_rows..table.height() {
        let label = table.cell(row, columns.period).label();

        if config
            .summary_labels
            .iter()
            .any(|summary| label.contains(summary.as_str()))
        {
            log::debug!("Row {}: summary row '{}' skipped", row + 1, label);
            continue;
        }

        match classify_period(&label) {
            PeriodLabel::Year(year) => {
                log::debug!("Row {}: year {}", row + 1, year);
                current_year = Some(year);
            }
            PeriodLabel::Month(month) => {
                let Some(year) = current_year else {
                    log::warn!("Row {}: month '{}' before any year, skipped", row + 1, label);
                    continue;
                };
                if !(1..=12).contains(&month) {
                    log::debug!("Row {}: '{}' is not a month, skipped", row + 1, label);
                    continue;
                }
                log::debug!("Row {}: {}/{:02}", row + 1, year, month);
                records.push(build_record(
                    table,
                    row,
                    year,
                    month as u32,
                    &columns,
                    config.numeric_policy,
                )?);
            }
            PeriodLabel::Other => {
                log::debug!("Row {}: '{}' skipped", row + 1, label);
            }
        }
    }

    records.sort_by_key(MonthlyRecord::period);
    log::info!("Normalized {} monthly record(s)", records.len());

    Ok(Conversion {
        records,
        has_extended,
    })
}

/// 列レイアウトを決定する
fn resolve_columns(table: &Table, layout: &ColumnLayout) -> Result<ColumnMap, HoldingsError> {
    let width = table.width();

    match layout {
        ColumnLayout::Positional => {
            if width < REQUIRED_COLUMNS {
                return Err(HoldingsError::MissingColumns {
                    required: REQUIRED_COLUMNS,
                    found: width,
                });
            }
            Ok(ColumnMap::positional(width >= EXTENDED_MIN_COLUMNS))
        }
        ColumnLayout::Explicit(map) => {
            let required = map.max_index() + 1;
            if width < required {
                return Err(HoldingsError::MissingColumns {
                    required,
                    found: width,
                });
            }
            Ok(*map)
        }
    }
}

fn build_record(
    table: &Table,
    row: usize,
    year: i32,
    month: u32,
    columns: &ColumnMap,
    policy: NumericPolicy,
) -> Result<MonthlyRecord, HoldingsError> {
    let [avg_btc_price, mstr_btc_holdings, mstr_holdings_value, btc_closing_price] =
        columns.required_indices();

    // 拡張指標は常に寛容に扱う
    let extended = match columns.extended {
        Some(ext) => ExtendedMetrics {
            mstr_market_cap: read_number(table, row, ext.mstr_market_cap, NumericPolicy::Lenient)?,
            mstr_share_price: read_number(table, row, ext.mstr_share_price, NumericPolicy::Lenient)?,
            shares_outstanding: read_number(table, row, ext.shares_outstanding, NumericPolicy::Lenient)?,
            total_debt: read_number(table, row, ext.total_debt, NumericPolicy::Lenient)?,
            other_assets: read_number(table, row, ext.other_assets, NumericPolicy::Lenient)?,
        },
        None => ExtendedMetrics::default(),
    };

    Ok(MonthlyRecord {
        year,
        month,
        avg_btc_price: read_number(table, row, avg_btc_price, policy)?,
        mstr_btc_holdings: read_number(table, row, mstr_btc_holdings, policy)?,
        mstr_holdings_value: read_number(table, row, mstr_holdings_value, policy)?,
        btc_closing_price: read_number(table, row, btc_closing_price, policy)?,
        extended,
    })
}

/// 数値セルを読み込む（空セルは0）
fn read_number(
    table: &Table,
    row: usize,
    col: usize,
    policy: NumericPolicy,
) -> Result<f64, HoldingsError> {
    let cell = table.cell(row, col);
    if let Some(value) = cell.to_number() {
        return Ok(value);
    }
    if cell.is_empty() {
        return Ok(0.0);
    }

    match policy {
        NumericPolicy::Strict => Err(HoldingsError::Coercion {
            row: row + 1,
            column: col + 1,
            value: cell.label(),
        }),
        NumericPolicy::Lenient => {
            log::warn!(
                "Row {}, column {}: '{}' is not a number, using 0",
                row + 1,
                col + 1,
                cell.label()
            );
            Ok(0.0)
        }
    }
}
