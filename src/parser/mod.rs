//! Parser Module
//!
//! calamineを使用したスプレッドシート読み込み。
//! 選択したシートを`Table`に変換します。

mod workbook;

pub(crate) use workbook::WorkbookParser;
