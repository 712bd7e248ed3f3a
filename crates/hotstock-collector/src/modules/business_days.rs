//! 조회 대상 영업일 확인 모듈.

use hotstock_data::{BusinessDaySequence, Clock};

/// 시계의 오늘 기준으로 조회될 영업일 목록 (최신 먼저).
pub fn list_business_days(days_back: u32, clock: &dyn Clock) -> Vec<String> {
    BusinessDaySequence::new(days_back, clock.today())
        .iter()
        .map(|d| d.to_string())
        .collect()
}
