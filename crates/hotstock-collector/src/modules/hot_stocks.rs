//! 급증 종목 조회 모듈.

use crate::{CollectorConfig, Result};
use hotstock_data::{HotStockService, HotStocksByDate};
use rust_decimal::Decimal;
use std::time::Instant;

/// 급증 종목 조회 후 최소 비율 필터 적용
pub async fn collect_hot_stocks(
    config: &CollectorConfig,
    days_back: u32,
    min_ratio: Option<Decimal>,
) -> Result<HotStocksByDate> {
    let start = Instant::now();

    tracing::info!(
        days_back = days_back,
        url = %config.history.base_url,
        "급증 종목 조회 시작"
    );

    let service = HotStockService::from_config(config.history.clone())?;
    let hot = service.get_hot_stocks(days_back).await?;
    let hot = apply_min_ratio(hot, min_ratio);

    tracing::info!(
        days = hot.len(),
        entries = hot.entry_count(),
        elapsed = format!("{:.1}s", start.elapsed().as_secs_f64()),
        "급증 종목 조회 완료"
    );

    Ok(hot)
}

/// 최소 비율이 주어지면 `ratio >= min` 항목만 남김
pub fn apply_min_ratio(hot: HotStocksByDate, min_ratio: Option<Decimal>) -> HotStocksByDate {
    match min_ratio {
        Some(min) => hot.filter_min_ratio(min),
        None => hot,
    }
}

/// JSON 문자열로 출력
pub fn render_json(hot: &HotStocksByDate, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(hot)?
    } else {
        serde_json::to_string(hot)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_apply_min_ratio_none_keeps_everything() {
        let hot = HotStocksByDate::default();
        assert_eq!(apply_min_ratio(hot.clone(), None), hot);
        assert_eq!(apply_min_ratio(hot, Some(dec!(2.0))).entry_count(), 0);
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_json(&HotStocksByDate::default(), false).unwrap(), "{}");
    }
}
