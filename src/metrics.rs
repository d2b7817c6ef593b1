//! Derived Metrics
//!
//! コンソール表示用のmNAV関連の計算。JSONには出力しません。

/// 1株あたりmNAV
///
/// `(holdings_value + other_assets - total_debt) / shares_outstanding`。
/// 発行済株式数が0の場合は0を返します（財務上の0ではなく、ゼロ除算の回避）。
pub fn mnav(holdings_value: f64, other_assets: f64, total_debt: f64, shares_outstanding: f64) -> f64 {
    if shares_outstanding == 0.0 {
        return 0.0;
    }
    (holdings_value + other_assets - total_debt) / shares_outstanding
}

/// mNAVに対する株価のプレミアム/ディスカウント（%）
///
/// mNAVが0の場合は0を返します。
pub fn premium_discount(share_price: f64, mnav: f64) -> f64 {
    if mnav == 0.0 {
        return 0.0;
    }
    ((share_price - mnav) / mnav) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mnav() {
        // (50B + 1B - 6B) / 250M = 180
        let value = mnav(50e9, 1e9, 6e9, 250e6);
        assert!((value - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_premium_discount() {
        assert!((premium_discount(270.0, 180.0) - 50.0).abs() < 1e-9);
        assert!((premium_discount(90.0, 180.0) + 50.0).abs() < 1e-9);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_mnav_zero_shares_is_zero(
                x in -1e12f64..1e12,
                y in -1e12f64..1e12,
                z in -1e12f64..1e12,
            ) {
                prop_assert_eq!(mnav(x, y, z, 0.0), 0.0);
            }

            #[test]
            fn test_premium_zero_mnav_is_zero(x in -1e6f64..1e6) {
                prop_assert_eq!(premium_discount(x, 0.0), 0.0);
            }
        }
    }
}
