//! Workbook Parser
//!
//! calamineのラッパーとして、ワークブックを開きシートを`Table`に変換します。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use std::io::{Cursor, Read};

use crate::api::SheetSelector;
use crate::error::HoldingsError;
use crate::types::{CellValue, Table};

/// ワークブックパーサー
///
/// XLSX/XLSM/XLSB/XLS/ODSのいずれにも対応します（calamineの自動判別）。
pub(crate) struct WorkbookParser {
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// ワークブックを開く
    ///
    /// 入力全体をメモリに読み込んでから解析します。
    ///
    /// # 引数
    ///
    /// * `reader` - スプレッドシートを読み込むためのリーダー
    /// * `max_input_size` - 入力サイズの上限（バイト）
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - 読み込みに成功した場合
    /// * `Err(HoldingsError::InputTooLarge)` - 入力が上限を超えた場合
    /// * `Err(HoldingsError::Parse)` - ワークブックとして解析できない場合
    pub fn open<R: Read>(reader: R, max_input_size: u64) -> Result<Self, HoldingsError> {
        // 上限+1バイトまで読み、超過を検出する
        let mut buffer = Vec::new();
        let bytes_read = reader
            .take(max_input_size.saturating_add(1))
            .read_to_end(&mut buffer)? as u64;

        if bytes_read > max_input_size {
            return Err(HoldingsError::InputTooLarge {
                size: bytes_read,
                max: max_input_size,
            });
        }

        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        log::info!(
            "Opened workbook ({} bytes, {} sheet(s))",
            bytes_read,
            workbook.sheet_names().len()
        );

        Ok(Self { workbook })
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// シート選択方式に基づいてシート名を決定する
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 選択されたシート名
    /// * `Err(HoldingsError::Config)` - シートが見つからない、またはインデックスが範囲外の場合
    pub fn select_sheet(&self, selector: &SheetSelector) -> Result<String, HoldingsError> {
        let names = self.sheet_names();

        match selector {
            SheetSelector::First => names
                .into_iter()
                .next()
                .ok_or_else(|| HoldingsError::Config("Workbook contains no sheets".to_string())),

            SheetSelector::Index(index) => {
                let total = names.len();
                names.into_iter().nth(*index).ok_or_else(|| {
                    HoldingsError::Config(format!(
                        "Sheet index {} is out of range (total: {})",
                        index, total
                    ))
                })
            }

            SheetSelector::Name(name) => {
                if !names.contains(name) {
                    return Err(HoldingsError::Config(format!("Sheet '{}' not found", name)));
                }
                Ok(name.clone())
            }
        }
    }

    /// シートを読み込み、`Table`に変換する
    pub fn read_table(&mut self, sheet_name: &str) -> Result<Table, HoldingsError> {
        let range = self.workbook.worksheet_range(sheet_name)?;
        let table = range_to_table(&range);
        log::info!(
            "Read sheet '{}': {} row(s) x {} column(s)",
            sheet_name,
            table.height(),
            table.width()
        );
        Ok(table)
    }
}

/// calamineの範囲をシート上の絶対位置に合わせた`Table`に変換する
///
/// 使用範囲より上・左の空白もそのまま空セルとして残すため、
/// 「先頭3行」「10列以上」はシート上の位置で判定されます。
fn range_to_table(range: &Range<Data>) -> Table {
    let Some((last_row, last_col)) = range.end() else {
        return Table::default();
    };

    let rows = (0..=last_row)
        .map(|row| {
            (0..=last_col)
                .map(|col| {
                    range
                        .get_value((row, col))
                        .map(to_cell_value)
                        .unwrap_or(CellValue::Empty)
                })
                .collect()
        })
        .collect();

    Table::from_rows(rows)
}

fn to_cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
        // 日付・期間はcalamineの表示形式の文字列として保持
        other => CellValue::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_cell_value() {
        assert_eq!(to_cell_value(&Data::Int(3)), CellValue::Number(3.0));
        assert_eq!(to_cell_value(&Data::Float(2.5)), CellValue::Number(2.5));
        assert_eq!(
            to_cell_value(&Data::String("Grand Total".to_string())),
            CellValue::from("Grand Total")
        );
        assert_eq!(to_cell_value(&Data::Empty), CellValue::Empty);
    }

    #[test]
    fn test_range_to_table_keeps_absolute_positions() {
        // B3:C4 だけにデータがある範囲
        let mut range: Range<Data> = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), Data::String("2020".to_string()));
        range.set_value((3, 2), Data::Float(8000.0));

        let table = range_to_table(&range);
        assert_eq!(table.height(), 4);
        assert_eq!(table.width(), 3);
        assert_eq!(table.cell(2, 1), &CellValue::from("2020"));
        assert_eq!(table.cell(3, 2), &CellValue::Number(8000.0));
        assert!(table.cell(0, 0).is_empty());
    }

    #[test]
    fn test_empty_range_gives_empty_table() {
        let range: Range<Data> = Range::empty();
        let table = range_to_table(&range);
        assert_eq!(table.height(), 0);
        assert_eq!(table.width(), 0);
    }

    #[test]
    fn test_open_rejects_oversized_input() {
        let data = vec![0u8; 64];
        match WorkbookParser::open(Cursor::new(data), 16) {
            Err(HoldingsError::InputTooLarge { size, max }) => {
                assert_eq!(size, 17);
                assert_eq!(max, 16);
            }
            _ => panic!("Expected InputTooLarge error"),
        }
    }

    #[test]
    fn test_open_rejects_non_spreadsheet() {
        let data = b"not a spreadsheet".to_vec();
        assert!(matches!(
            WorkbookParser::open(Cursor::new(data), 1024),
            Err(HoldingsError::Parse(_))
        ));
    }
}
