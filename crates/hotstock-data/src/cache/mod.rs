//! 캐싱 레이어.
//!
//! - Result 캐시: 가장 최근 조회 결과 하나만 보관 (윈도우 크기 + 조회일 키)

pub mod result;

pub use result::{CacheKey, HotStocksCache, ResultCache};
