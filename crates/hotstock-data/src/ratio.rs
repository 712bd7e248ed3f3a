//! 거래량 비율 계산.
//!
//! 거래량은 부동소수점 정밀도를 넘을 수 있으므로 정수 연산으로 먼저 나눈 뒤
//! `Decimal`로 변환합니다.

use rust_decimal::{Decimal, RoundingStrategy};

/// `numerator / denominator` 비율 (소수점 1자리).
///
/// 1. `numerator * 100 / denominator` 정수 나눗셈 (버림)
/// 2. 100으로 나눠 소수 2자리 값으로 변환
/// 3. 소수점 1자리로 반올림 (0.05는 0에서 멀어지는 방향)
///
/// `denominator`가 0이면 `None`.
pub fn volume_ratio(numerator: u64, denominator: u64) -> Option<Decimal> {
    if denominator == 0 {
        return None;
    }

    let scaled = u128::from(numerator) * 100 / u128::from(denominator);
    let scaled = Decimal::from_i128_with_scale(i128::try_from(scaled).ok()?, 2);

    Some(scaled.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_basic_ratios() {
        assert_eq!(volume_ratio(150, 100), Some(dec!(1.5)));
        assert_eq!(volume_ratio(1, 3), Some(dec!(0.3)));
        assert_eq!(volume_ratio(100, 250), Some(dec!(0.4)));
        assert_eq!(volume_ratio(400, 250), Some(dec!(1.6)));
    }

    #[test]
    fn test_midpoint_rounds_up() {
        // 0.25 → 0.3, 1.05 → 1.1
        assert_eq!(volume_ratio(1, 4), Some(dec!(0.3)));
        assert_eq!(volume_ratio(105, 100), Some(dec!(1.1)));
    }

    #[test]
    fn test_truncates_before_rounding() {
        // 2/3 = 0.666.. → 66/100 = 0.66 → 0.7
        assert_eq!(volume_ratio(2, 3), Some(dec!(0.7)));
        // 0.0499.. → 4/100 = 0.04 → 0.0
        assert_eq!(volume_ratio(499, 10_000), Some(dec!(0.0)));
    }

    #[test]
    fn test_zero_denominator() {
        assert_eq!(volume_ratio(10, 0), None);
    }

    #[test]
    fn test_large_volumes_keep_precision() {
        // 2^53을 넘는 값에서도 정확해야 함
        let avg = 9_007_199_254_740_993u64;
        assert_eq!(volume_ratio(avg * 2, avg), Some(dec!(2.0)));
        assert_eq!(volume_ratio(u64::MAX, u64::MAX), Some(dec!(1.0)));
        assert_eq!(volume_ratio(u64::MAX, 1), Some(Decimal::from(u64::MAX)));
    }

    proptest! {
        #[test]
        fn prop_scale_invariant(a in 0u64..1_000_000_000, b in 1u64..1_000_000_000, k in 1u64..1_000_000) {
            prop_assert_eq!(volume_ratio(k * a, k * b), volume_ratio(a, b));
        }
    }
}
