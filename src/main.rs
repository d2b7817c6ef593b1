//! holdings-json CLI
//!
//! `holdings-json <EXCEL_FILE>` で、カレントディレクトリの`data.json`を生成します。

use clap::Parser;
use std::process;

use holdings_json::{ConverterBuilder, Summary};

/// 出力ファイル名（カレントディレクトリ）
const OUTPUT_FILE: &str = "data.json";

const USAGE: &str = "\
Usage: holdings-json /path/to/excel_file.xlsx

Expected Excel columns:
1-5: Period, Avg BTC Price, MSTR BTC Holdings, Holdings Value, BTC Closing Price
6-10 (optional): Market Cap, Share Price, Shares Outstanding, Total Debt, Other Assets";

/// Convert a Bitcoin holdings spreadsheet into the website's data.json
#[derive(Parser, Debug)]
#[clap(version, about)]
struct Args {
    /// Path to the source spreadsheet
    excel_file: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            eprintln!("{}", USAGE);
            process::exit(1);
        }
        // --help / --version
        Err(e) => e.exit(),
    };

    let result = ConverterBuilder::new()
        .build()
        .and_then(|converter| converter.convert_file(&args.excel_file, OUTPUT_FILE));

    match result {
        Ok(conversion) => print!("{}", Summary::new(&conversion, OUTPUT_FILE)),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
