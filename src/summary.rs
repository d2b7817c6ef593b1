//! Console Summary
//!
//! 変換成功時にコンソールへ表示するサマリーの整形。

use std::fmt;

use crate::metrics::{mnav, premium_discount};
use crate::normalizer::Conversion;

/// 変換結果のサマリー
///
/// `Display`で複数行のテキストとして整形されます。
pub struct Summary<'a> {
    conversion: &'a Conversion,
    output_name: &'a str,
}

impl<'a> Summary<'a> {
    pub fn new(conversion: &'a Conversion, output_name: &'a str) -> Self {
        Self {
            conversion,
            output_name,
        }
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Successfully updated {} with {} monthly data points",
            self.output_name,
            self.conversion.records.len()
        )?;

        let Some(latest) = self.conversion.latest() else {
            return Ok(());
        };

        writeln!(f)?;
        writeln!(f, "Latest data: {}/{:02}", latest.year, latest.month)?;
        writeln!(
            f,
            "   BTC Holdings: {} BTC",
            format_thousands(latest.mstr_btc_holdings, 0)
        )?;
        writeln!(
            f,
            "   Holdings Value: ${:.2}B",
            latest.mstr_holdings_value / 1e9
        )?;
        writeln!(
            f,
            "   BTC Price: ${}",
            format_thousands(latest.btc_closing_price, 0)
        )?;

        let ext = &latest.extended;
        if self.conversion.has_extended && ext.shares_outstanding > 0.0 {
            let per_share = mnav(
                latest.mstr_holdings_value,
                ext.other_assets,
                ext.total_debt,
                ext.shares_outstanding,
            );
            let premium = premium_discount(ext.mstr_share_price, per_share);

            writeln!(f)?;
            writeln!(f, "mNAV Metrics:")?;
            writeln!(
                f,
                "   MSTR Share Price: ${}",
                format_thousands(ext.mstr_share_price, 2)
            )?;
            writeln!(f, "   mNAV per Share: ${}", format_thousands(per_share, 2))?;
            writeln!(f, "   Premium/Discount: {:+.1}%", premium)?;
            writeln!(f, "   Market Cap: ${:.2}B", ext.mstr_market_cap / 1e9)?;
        } else if !self.conversion.has_extended {
            writeln!(f)?;
            f.write_str(EXTENDED_COLUMNS_HINT)?;
        }

        Ok(())
    }
}

/// 拡張列が無い場合の案内
pub const EXTENDED_COLUMNS_HINT: &str = "\
No mNAV data found. Add columns 6-10 to the spreadsheet for mNAV calculations:
   - Column 6: MSTR Market Cap
   - Column 7: MSTR Share Price
   - Column 8: Shares Outstanding
   - Column 9: Total Debt
   - Column 10: Other Assets
";

/// 桁区切り（カンマ）付きで数値を整形する
///
/// 例: `format_thousands(1234567.891, 2)` -> `"1,234,567.89"`
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    let negative = value < 0.0 && formatted.chars().any(|c| matches!(c, '1'..='9'));
    if negative {
        grouped.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ExtendedMetrics, MonthlyRecord};

    fn record(extended: ExtendedMetrics) -> MonthlyRecord {
        MonthlyRecord {
            year: 2024,
            month: 6,
            avg_btc_price: 65_000.0,
            mstr_btc_holdings: 226_331.0,
            mstr_holdings_value: 14_420_000_000.0,
            btc_closing_price: 62_678.0,
            extended,
        }
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0, 0), "0");
        assert_eq!(format_thousands(999.0, 0), "999");
        assert_eq!(format_thousands(1000.0, 0), "1,000");
        assert_eq!(format_thousands(226_331.0, 0), "226,331");
        assert_eq!(format_thousands(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(format_thousands(-1500.5, 1), "-1,500.5");
        assert_eq!(format_thousands(-0.001, 0), "0");
    }

    #[test]
    fn test_summary_without_extended_prints_hint() {
        let conversion = Conversion {
            records: vec![record(ExtendedMetrics::default())],
            has_extended: false,
        };
        let text = Summary::new(&conversion, "data.json").to_string();
        assert!(text.starts_with("Successfully updated data.json with 1 monthly data points"));
        assert!(text.contains("Latest data: 2024/06"));
        assert!(text.contains("BTC Holdings: 226,331 BTC"));
        assert!(text.contains("Holdings Value: $14.42B"));
        assert!(text.contains("BTC Price: $62,678"));
        assert!(text.contains("Column 10: Other Assets"));
        assert!(!text.contains("mNAV Metrics"));
    }

    #[test]
    fn test_summary_with_extended_prints_metrics() {
        let conversion = Conversion {
            records: vec![record(ExtendedMetrics {
                mstr_market_cap: 24_370_000_000.0,
                mstr_share_price: 1375.0,
                shares_outstanding: 17_000_000.0,
                total_debt: 3_620_000_000.0,
                other_assets: 400_000_000.0,
            })],
            has_extended: true,
        };
        let text = Summary::new(&conversion, "data.json").to_string();
        // (14.42B + 0.4B - 3.62B) / 17M = 658.82...
        assert!(text.contains("mNAV Metrics:"));
        assert!(text.contains("MSTR Share Price: $1,375.00"));
        assert!(text.contains("mNAV per Share: $658.82"));
        assert!(text.contains("Premium/Discount: +108.7%"));
        assert!(text.contains("Market Cap: $24.37B"));
        assert!(!text.contains("No mNAV data found"));
    }

    #[test]
    fn test_summary_extended_without_shares_prints_nothing_more() {
        let conversion = Conversion {
            records: vec![record(ExtendedMetrics::default())],
            has_extended: true,
        };
        let text = Summary::new(&conversion, "data.json").to_string();
        assert!(!text.contains("mNAV Metrics"));
        assert!(!text.contains("No mNAV data found"));
    }

    #[test]
    fn test_summary_empty() {
        let conversion = Conversion {
            records: Vec::new(),
            has_extended: false,
        };
        let text = Summary::new(&conversion, "data.json").to_string();
        assert_eq!(text, "Successfully updated data.json with 0 monthly data points\n");
    }
}
