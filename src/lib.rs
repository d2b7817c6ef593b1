//! holdings_json - Bitcoin holdings spreadsheet to website JSON converter
//!
//! 年グループ行と月行からなるピボット形式のスプレッドシート
//! （BTC保有量・価格、任意でmNAV計算用の指標）を読み込み、
//! Webサイト用の`data.json`（年月順のフラットなJSON配列）に変換します。
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use holdings_json::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     // 変換してdata.jsonに書き出す
//!     let conversion = converter.convert_file("holdings.xlsx", "data.json")?;
//!     println!("{} monthly records", conversion.records.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # In-memory
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use holdings_json::{to_json_string, ConverterBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = ConverterBuilder::new().build()?;
//! let excel_data: Vec<u8> = vec![]; // スプレッドシートのバイト列
//! let conversion = converter.convert(Cursor::new(excel_data))?;
//! let json = to_json_string(&conversion.records)?;
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
mod error;
mod metrics;
mod normalizer;
mod parser;
mod record;
mod summary;
mod types;

// 公開API
pub use api::{ColumnLayout, ColumnMap, ExtendedColumns, NumericPolicy, SheetSelector};
pub use builder::{to_json_string, write_json, Converter, ConverterBuilder};
pub use error::HoldingsError;
pub use metrics::{mnav, premium_discount};
pub use normalizer::Conversion;
pub use record::{ExtendedMetrics, MonthlyRecord};
pub use summary::{format_thousands, Summary, EXTENDED_COLUMNS_HINT};
pub use types::{CellValue, Table};
