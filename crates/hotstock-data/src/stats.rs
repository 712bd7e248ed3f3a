//! 로드 통계 구조체.

use std::time::Duration;

/// 윈도우 로드 작업 통계
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// 조회한 영업일 수
    pub days: usize,
    /// 요청한 페이지 수
    pub pages: usize,
    /// 수집한 (날짜, 종목) 레코드 수
    pub records: usize,
    /// 소요 시간
    pub elapsed: Duration,
}

impl LoadStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 페이지당 평균 레코드 수
    pub fn records_per_page(&self) -> f64 {
        if self.pages == 0 {
            0.0
        } else {
            self.records as f64 / self.pages as f64
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            days = self.days,
            pages = self.pages,
            records = self.records,
            records_per_page = format!("{:.1}", self.records_per_page()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "로드 완료"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_per_page() {
        let mut stats = LoadStats::new();
        assert_eq!(stats.records_per_page(), 0.0);

        stats.pages = 4;
        stats.records = 10;
        assert_eq!(stats.records_per_page(), 2.5);
    }
}
