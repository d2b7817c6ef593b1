//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use crate::api::{ColumnLayout, ColumnMap, NumericPolicy, SheetSelector};
use crate::error::HoldingsError;
use crate::normalizer::{self, Conversion};
use crate::parser::WorkbookParser;
use crate::record::MonthlyRecord;
use crate::types::Table;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// 入力ファイルサイズの上限のデフォルト（256MiB）
const DEFAULT_MAX_INPUT_SIZE: u64 = 256 * 1024 * 1024;

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// 先頭で読み捨てるヘッダー行数
    pub header_rows: usize,

    /// 列レイアウト
    pub column_layout: ColumnLayout,

    /// 集計行を示すラベル（部分一致、大文字小文字を区別）
    pub summary_labels: Vec<String>,

    /// 数値セルの変換ポリシー
    pub numeric_policy: NumericPolicy,

    /// 入力ファイルサイズの上限（バイト）
    pub max_input_size: u64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            sheet_selector: SheetSelector::First,
            header_rows: 3,
            column_layout: ColumnLayout::Positional,
            summary_labels: vec!["Grand Total".to_string(), "Row Labels".to_string()],
            numeric_policy: NumericPolicy::Lenient,
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use holdings_json::{ConverterBuilder, NumericPolicy, SheetSelector};
///
/// # fn main() -> Result<(), holdings_json::HoldingsError> {
/// let converter = ConverterBuilder::new()
///     .with_sheet_selector(SheetSelector::Name("Pivot".to_string()))
///     .with_numeric_policy(NumericPolicy::Strict)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: 先頭シート
    /// - ヘッダー行: 3行
    /// - 列レイアウト: 位置ベース（10列以上で拡張指標を読む）
    /// - 集計行ラベル: "Grand Total", "Row Labels"
    /// - 数値ポリシー: 寛容（変換できない値は0）
    /// - 入力サイズ上限: 256MiB
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// 変換対象のシートを選択する
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 先頭で読み捨てるヘッダー行数を指定する
    pub fn with_header_rows(mut self, rows: usize) -> Self {
        self.config.header_rows = rows;
        self
    }

    /// 列レイアウトを指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use holdings_json::{ColumnLayout, ColumnMap, ConverterBuilder, ExtendedColumns};
    ///
    /// // 列数に関係なく、6〜10列目を拡張指標として読む
    /// let builder = ConverterBuilder::new().with_column_layout(ColumnLayout::Explicit(ColumnMap {
    ///     extended: Some(ExtendedColumns::positional()),
    ///     ..ColumnMap::positional(false)
    /// }));
    /// ```
    pub fn with_column_layout(mut self, layout: ColumnLayout) -> Self {
        self.config.column_layout = layout;
        self
    }

    /// 集計行ラベルを置き換える
    pub fn with_summary_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.summary_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// 数値セルの変換ポリシーを指定する
    pub fn with_numeric_policy(mut self, policy: NumericPolicy) -> Self {
        self.config.numeric_policy = policy;
        self
    }

    /// 入力ファイルサイズの上限（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.max_input_size = bytes;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `HoldingsError::Config(String)`:
    ///   * 入力サイズ上限が0
    ///   * 空文字列の集計行ラベル（すべての行に一致してしまう）
    ///   * 明示的な列マップで同じ列が重複している
    pub fn build(self) -> Result<Converter, HoldingsError> {
        if self.config.max_input_size == 0 {
            return Err(HoldingsError::Config(
                "Maximum input size must be greater than 0".to_string(),
            ));
        }

        if self.config.summary_labels.iter().any(String::is_empty) {
            return Err(HoldingsError::Config(
                "Summary labels must not be empty".to_string(),
            ));
        }

        if let ColumnLayout::Explicit(map) = &self.config.column_layout {
            validate_column_map(map)?;
        }

        Ok(Converter {
            config: self.config,
        })
    }
}

fn validate_column_map(map: &ColumnMap) -> Result<(), HoldingsError> {
    let mut indices = vec![map.period];
    indices.extend(map.required_indices());
    if let Some(ext) = map.extended {
        indices.extend(ext.indices());
    }

    let mut seen = std::collections::HashSet::new();
    for index in indices {
        if !seen.insert(index) {
            return Err(HoldingsError::Config(format!(
                "Column {} is mapped to more than one field",
                index + 1
            )));
        }
    }
    Ok(())
}

/// 変換処理のファサード
///
/// スプレッドシートを読み込み、正規化したレコードをJSONとして出力します。
///
/// # 使用例
///
/// ```rust,no_run
/// use holdings_json::ConverterBuilder;
///
/// # fn main() -> Result<(), holdings_json::HoldingsError> {
/// let converter = ConverterBuilder::new().build()?;
/// let conversion = converter.convert_file("export.xlsx", "data.json")?;
/// println!("{} records", conversion.records.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    config: ConversionConfig,
}

impl Converter {
    /// スプレッドシートを読み込み、レコード列に変換する
    ///
    /// # 処理フロー
    ///
    /// 1. ワークブックを開く（サイズ上限を確認）
    /// 2. シート選択
    /// 3. シートを`Table`として読み込む
    /// 4. 正規化・ソート
    pub fn convert<R: Read>(&self, input: R) -> Result<Conversion, HoldingsError> {
        let mut parser = WorkbookParser::open(input, self.config.max_input_size)?;
        let sheet = parser.select_sheet(&self.config.sheet_selector)?;
        let table = parser.read_table(&sheet)?;
        self.convert_table(&table)
    }

    /// 読み込み済みの`Table`を変換する
    pub fn convert_table(&self, table: &Table) -> Result<Conversion, HoldingsError> {
        normalizer::normalize(table, &self.config)
    }

    /// ファイルを変換し、結果をJSONファイルに書き出す
    ///
    /// 出力は同じディレクトリの一時ファイルに書いてからリネームするため、
    /// 失敗時に中途半端な出力ファイルが残ることはありません。
    /// 既存の出力ファイルは上書きされます。
    pub fn convert_file<P, Q>(&self, input: P, output: Q) -> Result<Conversion, HoldingsError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let input = File::open(input.as_ref())?;
        let conversion = self.convert(input)?;
        write_json_file(&conversion.records, output.as_ref())?;
        Ok(conversion)
    }
}

/// レコード列を整形済みJSON（インデント2）として書き出す
pub fn write_json<W: Write>(records: &[MonthlyRecord], writer: W) -> Result<(), HoldingsError> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// レコード列を整形済みJSON文字列に変換する
pub fn to_json_string(records: &[MonthlyRecord]) -> Result<String, HoldingsError> {
    let mut json = serde_json::to_string_pretty(records)?;
    json.push('\n');
    Ok(json)
}

/// 一時ファイル経由でJSONファイルを書き出す
fn write_json_file(records: &[MonthlyRecord], path: &Path) -> Result<(), HoldingsError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    write_json(records, temp.as_file_mut())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    log::info!("Wrote {} record(s) to {}", records.len(), path.display());
    Ok(())
}
