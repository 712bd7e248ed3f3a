//! 거래량 급증 종목 데이터 파이프라인.
//!
//! 이 crate는 다음을 제공합니다:
//! - 영업일 윈도우 계산 (주말 제외)
//! - 날짜별 일별 시세 이력 페이지 조회 및 병합
//! - 종목별 평균 거래량 및 평균 대비 거래량 비율 (정수 기반 정밀 계산)
//! - 당일 단일 슬롯 결과 캐시

pub mod analysis;
pub mod cache;
pub mod calendar;
pub mod config;
pub mod error;
pub mod loader;
pub mod provider;
pub mod ratio;
pub mod service;
pub mod stats;

#[cfg(test)]
mod testing;

pub use error::{DataError, Result};

pub use analysis::{compute_averages, detect_hot_stocks, AverageEntry, HotStockEntry, HotStocksByDate};
pub use cache::{CacheKey, HotStocksCache, ResultCache};
pub use calendar::{BusinessDate, BusinessDaySequence, Clock, FixedClock, LocalClock};
pub use config::HistoryClientConfig;
pub use loader::{DayAggregator, DaySnapshot, SecurityRecord, WindowDataset, WindowLoader};
pub use provider::{HistoryFetcher, HistoryPage, MoexHistoryClient};
pub use ratio::volume_ratio;
pub use service::HotStockService;
pub use stats::LoadStats;
