//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

/// セルの値を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 数値（f64）
    Number(f64),

    /// 文字列（日付セルもISO形式の文字列として保持）
    String(String),

    /// 論理値
    Bool(bool),

    /// エラー値（例: #N/A）
    Error(String),

    /// 空セル
    Empty,
}

static EMPTY: CellValue = CellValue::Empty;

impl CellValue {
    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Period列のラベルとして文字列化する
    ///
    /// 整数値の数値セルは小数部なしで表現します（例: 2020.0 -> "2020"）。
    /// 文字列は前後の空白を除去します。
    pub fn label(&self) -> String {
        match self {
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            CellValue::Number(n) => n.to_string(),
            CellValue::String(s) => s.trim().to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Error(e) => e.clone(),
            CellValue::Empty => String::new(),
        }
    }

    /// 数値として解釈する
    ///
    /// 数値として解釈できない場合（空セル、エラー値、非数値文字列、非有限値）は`None`。
    pub fn to_number(&self) -> Option<f64> {
        let value = match self {
            CellValue::Number(n) => *n,
            CellValue::String(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            CellValue::Error(_) | CellValue::Empty => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

/// シートから読み込んだ表データ
///
/// 行・列ともにシート上の絶対位置（0始まり）で保持します。
/// 範囲外の参照は空セルとして扱われます。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    rows: Vec<Vec<CellValue>>,
    width: usize,
}

impl Table {
    /// 行のリストから表を生成する
    ///
    /// 列数は最も長い行の長さになります。
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    /// 行数
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// 列数
    pub fn width(&self) -> usize {
        self.width
    }

    /// 指定位置のセルを取得する
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// 行のイテレータ
    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(Vec::as_slice)
    }
}
