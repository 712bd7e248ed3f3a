//! 급증 종목 조회 서비스.
//!
//! # 동작 흐름
//!
//! ```text
//! get_hot_stocks(days_back)
//!         │
//!         ▼
//! ┌───────────────────────┐
//! │ 1. 캐시 Lock 획득      │ ← 동시 호출은 순서대로 처리
//! └──────────┬────────────┘
//!      ┌─────┴─────┐
//!      │ 캐시 히트? │── YES ──▶ 저장된 결과 반환
//!      └─────┬─────┘
//!            │ NO
//! ┌──────────▼────────────┐
//! │ 2. 캐시 비우기         │
//! │ 3. 윈도우 로드         │
//! │ 4. 평균 / 비율 계산    │
//! │ 5. 캐시 저장           │
//! └───────────────────────┘
//! ```

use crate::analysis::{compute_averages, detect_hot_stocks, HotStocksByDate};
use crate::cache::{CacheKey, HotStocksCache, ResultCache};
use crate::calendar::{BusinessDaySequence, Clock, LocalClock};
use crate::config::HistoryClientConfig;
use crate::error::Result;
use crate::loader::WindowLoader;
use crate::provider::{HistoryFetcher, MoexHistoryClient};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

/// 급증 종목 조회 서비스.
///
/// 조회자, 시계, 캐시를 소유하며 UI 계층에 `get_hot_stocks`를 제공합니다.
pub struct HotStockService {
    fetcher: Arc<dyn HistoryFetcher>,
    clock: Arc<dyn Clock>,
    /// 캐시 미스 처리 동안 Lock을 유지하여 동시 호출의 중복 로드를 막음
    cache: Mutex<Box<dyn HotStocksCache>>,
}

impl HotStockService {
    /// 새로운 서비스 생성 (로컬 시계, 단일 슬롯 캐시).
    pub fn new(fetcher: Arc<dyn HistoryFetcher>) -> Self {
        Self {
            fetcher,
            clock: Arc::new(LocalClock),
            cache: Mutex::new(Box::new(ResultCache::new())),
        }
    }

    /// MOEX 이력 클라이언트로 서비스 생성.
    pub fn from_config(config: HistoryClientConfig) -> Result<Self> {
        let client = MoexHistoryClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// 시계 교체.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// 캐시 교체.
    pub fn with_cache(mut self, cache: Box<dyn HotStocksCache>) -> Self {
        self.cache = Mutex::new(cache);
        self
    }

    /// 최근 `days_back + 1` 영업일의 날짜·종목별 평균 대비 거래량 비율.
    ///
    /// 같은 날 같은 `days_back`으로 다시 호출하면 캐시에서 반환합니다.
    /// 로드 중 오류가 나면 오류를 기록하고 그대로 반환합니다 (부분 결과 없음).
    #[instrument(skip(self))]
    pub async fn get_hot_stocks(&self, days_back: u32) -> Result<HotStocksByDate> {
        let today = self.clock.today();
        let key = CacheKey::new(days_back, today);

        let mut cache = self.cache.lock().await;
        if let Some(hit) = cache.get(&key) {
            debug!(days_back = days_back, day = %today, "캐시 히트");
            return Ok(hit.clone());
        }
        cache.clear();

        let sequence = BusinessDaySequence::new(days_back, today);
        let result = match self.compute(sequence).await {
            Ok(result) => result,
            Err(e) => {
                error!(days_back = days_back, error = %e, "급증 종목 로드 실패");
                return Err(e);
            }
        };

        cache.set(key, result.clone());
        Ok(result)
    }

    /// 윈도우 로드 → 평균 → 비율.
    async fn compute(&self, sequence: BusinessDaySequence) -> Result<HotStocksByDate> {
        let (dataset, stats) = WindowLoader::new(self.fetcher.as_ref())
            .load(sequence)
            .await?;
        stats.log_summary("윈도우 로드");

        let averages = compute_averages(&dataset);
        let hot = detect_hot_stocks(&dataset, &averages);

        info!(
            days = hot.len(),
            securities = averages.len(),
            entries = hot.entry_count(),
            "급증 종목 계산 완료"
        );
        Ok(hot)
    }
}
