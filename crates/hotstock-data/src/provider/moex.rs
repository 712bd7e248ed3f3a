//! MOEX ISS 시세 이력 클라이언트.
//!
//! 날짜별 전종목 일별 시세를 페이지 단위로 조회합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use hotstock_data::provider::MoexHistoryClient;
//! use hotstock_data::HistoryClientConfig;
//!
//! let client = MoexHistoryClient::new(HistoryClientConfig::from_env())?;
//! let page = client.fetch_page(date, 0).await?;
//! ```

use super::history::{HistoryFetcher, HistoryPage};
use crate::calendar::BusinessDate;
use crate::config::HistoryClientConfig;
use crate::error::{DataError, Result};
use async_trait::async_trait;
use tracing::{debug, warn};

/// MOEX ISS 이력 API 클라이언트.
#[derive(Clone)]
pub struct MoexHistoryClient {
    client: reqwest::Client,
    config: HistoryClientConfig,
}

impl MoexHistoryClient {
    /// 새로운 클라이언트 생성.
    pub fn new(config: HistoryClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| DataError::Config(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { client, config })
    }

    /// 단일 요청 (재시도 없음).
    async fn request_page(&self, date: &str, start: u64) -> Result<HistoryPage> {
        debug!(url = %self.config.base_url, date = date, start = start, "이력 페이지 요청");

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[("date", date.to_string()), ("start", start.to_string())])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| DataError::Transport(format!("이력 API 호출 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::Transport(format!(
                "이력 API 오류 [{}]: {} - {}",
                date,
                status,
                truncate(&body)
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| DataError::Transport(format!("응답 읽기 실패: {}", e)))?;

        serde_json::from_str(&text).map_err(|e| {
            DataError::Transport(format!(
                "JSON 파싱 실패: {} - {}",
                e,
                truncate(&text)
            ))
        })
    }
}

/// 로그용 응답 본문 앞부분 (문자 경계 기준).
fn truncate(text: &str) -> String {
    text.chars().take(200).collect()
}

#[async_trait]
impl HistoryFetcher for MoexHistoryClient {
    async fn fetch_page(&self, date: BusinessDate, start: u64) -> Result<HistoryPage> {
        let date = date.to_string();
        let mut attempt = 0;

        loop {
            match self.request_page(&date, start).await {
                Ok(page) => return Ok(page),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(
                        date = %date,
                        start = start,
                        attempt = attempt,
                        max_retries = self.config.max_retries,
                        error = %e,
                        "이력 페이지 요청 실패, 재시도"
                    );
                    tokio::time::sleep(self.config.retry_delay()).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
