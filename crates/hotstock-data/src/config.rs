//! 환경변수 기반 설정 모듈.

use std::time::Duration;

/// MOEX ISS 주식(TQBR) 일별 시세 이력 엔드포인트.
pub const DEFAULT_HISTORY_URL: &str =
    "https://iss.moex.com/iss/history/engines/stock/markets/shares/boards/TQBR/securities.json";

/// 이력 API 클라이언트 설정.
#[derive(Debug, Clone)]
pub struct HistoryClientConfig {
    /// 페이지 조회 URL (`date`, `start` 쿼리 파라미터가 붙음)
    pub base_url: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// 전송 오류 시 재시도 횟수 (0이면 즉시 실패)
    pub max_retries: u32,
    /// 재시도 간 딜레이 (밀리초)
    pub retry_delay_ms: u64,
}

impl Default for HistoryClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_HISTORY_URL.to_string(),
            timeout_secs: 30,
            max_retries: 0,
            retry_delay_ms: 500,
        }
    }
}

impl HistoryClientConfig {
    /// 환경변수에서 설정 로드 (없으면 기본값).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            base_url: std::env::var("HOTSTOCK_HISTORY_URL").unwrap_or(defaults.base_url),
            timeout_secs: env_var_parse("HOTSTOCK_TIMEOUT_SECS", defaults.timeout_secs),
            max_retries: env_var_parse("HOTSTOCK_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: env_var_parse("HOTSTOCK_RETRY_DELAY_MS", defaults.retry_delay_ms),
        }
    }

    /// 요청 타임아웃을 Duration으로 반환
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// 재시도 딜레이를 Duration으로 반환
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// 환경변수에서 값을 파싱 (실패 시 기본값 사용)
pub fn env_var_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
