//! 환경변수 기반 설정 모듈.

use crate::error::CollectorError;
use crate::Result;
use hotstock_data::config::env_var_parse;
use hotstock_data::HistoryClientConfig;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Collector 전체 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 이력 API 클라이언트 설정
    pub history: HistoryClientConfig,
    /// 기본 조회 영업일 수 (오늘 제외, 기준일 + N일)
    pub days_back: u32,
    /// 출력 시 최소 비율 (없으면 전체 출력)
    pub min_ratio: Option<Decimal>,
}

impl CollectorConfig {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let min_ratio = match std::env::var("HOTSTOCK_MIN_RATIO") {
            Ok(v) => Some(Decimal::from_str(v.trim()).map_err(|e| {
                CollectorError::Config(format!("HOTSTOCK_MIN_RATIO 파싱 실패: {} - {}", v, e))
            })?),
            Err(_) => None,
        };

        let history = HistoryClientConfig::from_env();
        if history.base_url.trim().is_empty() {
            return Err(CollectorError::Config(
                "HOTSTOCK_HISTORY_URL 환경변수가 비어 있습니다".to_string(),
            ));
        }

        Ok(Self {
            history,
            days_back: env_var_parse("HOTSTOCK_DAYS_BACK", 10),
            min_ratio,
        })
    }
}
