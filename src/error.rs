//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// holdings_jsonクレート全体で使用するエラー型
///
/// スプレッドシートの読み込み、正規化、JSON出力のいずれかで発生した
/// エラーを統一的に扱います。CLIではどのバリアントも1行のエラーメッセージと
/// 終了コード1に変換されます。
///
/// # エラーの種類
///
/// - `Io`: ファイルの読み書きに失敗した
/// - `Parse`: ワークブックとして解析できない（calamine由来）
/// - `Json`: JSONへのシリアライズに失敗した
/// - `Config`: ビルダー設定が不正、またはシートが見つからない
/// - `MissingColumns`: 必須列が足りない
/// - `Coercion`: 厳格モードで数値に変換できないセルがあった
/// - `InputTooLarge`: 入力ファイルがサイズ上限を超えた
///
/// # 使用例
///
/// ```rust,no_run
/// use holdings_json::HoldingsError;
/// use std::fs::File;
///
/// fn open_export(path: &str) -> Result<File, HoldingsError> {
///     let file = File::open(path)?; // Ioエラーに自動変換される
///     Ok(file)
/// }
/// ```
#[derive(Error, Debug)]
pub enum HoldingsError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ワークブックの解析中に発生したエラー
    ///
    /// ファイル形式が不正、破損したファイルなどが原因となります。
    #[error("Failed to parse spreadsheet: {0}")]
    Parse(#[from] calamine::Error),

    /// JSONシリアライズエラー
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時の検証エラーや、指定したシートが
    /// ワークブックに存在しない場合に使用されます。
    #[error("Configuration error: {0}")]
    Config(String),

    /// 必須列が不足しているエラー
    ///
    /// Period列と4つの必須数値列が揃っていない場合に発生します。
    #[error("Missing columns: expected at least {required}, found {found}")]
    MissingColumns {
        /// 必要な列数
        required: usize,
        /// シートに存在する列数
        found: usize,
    },

    /// 数値への型変換エラー
    ///
    /// `NumericPolicy::Strict`のときに、必須数値セルに数値として解釈できない
    /// 値があった場合に発生します。行・列は1始まりで表示されます。
    #[error("Cannot convert cell at row {row}, column {column} to a number: '{value}'")]
    Coercion {
        /// 行番号（1始まり）
        row: usize,
        /// 列番号（1始まり）
        column: usize,
        /// 元のセル値
        value: String,
    },

    /// 入力ファイルがサイズ上限を超えたエラー
    #[error("Input file size exceeds maximum: {size} bytes (max: {max} bytes)")]
    InputTooLarge {
        /// 読み込んだバイト数
        size: u64,
        /// 上限
        max: u64,
    },
}
