//! 단일 슬롯 결과 캐시.
//!
//! 같은 날 같은 윈도우 크기로 다시 조회하면 네트워크 요청 없이 저장된 결과를
//! 반환합니다. 당일 안에서는 만료되지 않으며, 미스가 날 때마다 이전 항목은
//! (윈도우 크기가 달라도) 버려집니다.

use crate::analysis::HotStocksByDate;
use chrono::NaiveDate;

/// 캐시 키: 윈도우 크기 + 조회 당일.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub days_back: u32,
    pub day: NaiveDate,
}

impl CacheKey {
    pub fn new(days_back: u32, day: NaiveDate) -> Self {
        Self { days_back, day }
    }
}

/// 결과 캐시 인터페이스.
///
/// TTL 기반 캐시 등으로 교체할 수 있도록 서비스는 이 trait만 사용합니다.
pub trait HotStocksCache: Send + Sync {
    /// 키가 일치하면 저장된 결과.
    fn get(&self, key: &CacheKey) -> Option<&HotStocksByDate>;

    /// 결과 저장.
    fn set(&mut self, key: CacheKey, value: HotStocksByDate);

    /// 모든 항목 삭제.
    fn clear(&mut self);
}

/// 항목을 최대 하나만 보관하는 캐시.
#[derive(Debug, Clone, Default)]
pub struct ResultCache {
    slot: Option<(CacheKey, HotStocksByDate)>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 현재 보관 중인 키.
    pub fn key(&self) -> Option<CacheKey> {
        self.slot.as_ref().map(|(key, _)| *key)
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

impl HotStocksCache for ResultCache {
    fn get(&self, key: &CacheKey) -> Option<&HotStocksByDate> {
        match &self.slot {
            Some((cached, value)) if cached == key => Some(value),
            _ => None,
        }
    }

    fn set(&mut self, key: CacheKey, value: HotStocksByDate) {
        self.slot = Some((key, value));
    }

    fn clear(&mut self) {
        self.slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_hit_requires_same_days_back_and_day() {
        let mut cache = ResultCache::new();
        assert!(cache.is_empty());

        cache.set(CacheKey::new(10, day(16)), HotStocksByDate::default());

        assert!(cache.get(&CacheKey::new(10, day(16))).is_some());
        assert!(cache.get(&CacheKey::new(5, day(16))).is_none());
        assert!(cache.get(&CacheKey::new(10, day(17))).is_none());
    }

    #[test]
    fn test_set_replaces_single_slot() {
        let mut cache = ResultCache::new();
        cache.set(CacheKey::new(10, day(16)), HotStocksByDate::default());
        cache.set(CacheKey::new(5, day(16)), HotStocksByDate::default());

        assert_eq!(cache.key(), Some(CacheKey::new(5, day(16))));
        assert!(cache.get(&CacheKey::new(10, day(16))).is_none());

        cache.clear();
        assert!(cache.is_empty());
    }
}
