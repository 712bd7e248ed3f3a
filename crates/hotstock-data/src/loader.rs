//! 영업일 윈도우 시세 로더.
//!
//! # 동작 흐름
//!
//! ```text
//! BusinessDaySequence (최신 → 과거)
//!         │
//!         ▼  날짜별 순차 실행
//! ┌────────────────────────┐
//! │ DayAggregator          │ ← start=0 부터 INDEX+PAGESIZE >= TOTAL 까지
//! │  fetch_page → merge    │
//! └──────────┬─────────────┘
//!            ▼
//!      WindowDataset (date → secid → record)
//! ```
//!
//! 요청은 한 번에 하나씩만 실행됩니다. 어떤 날짜에서든 오류가 나면 로드 전체가
//! 중단되며 부분 결과는 반환하지 않습니다.

use crate::calendar::{BusinessDate, BusinessDaySequence};
use crate::error::{DataError, Result};
use crate::provider::{HistoryFetcher, HistoryRow};
use crate::stats::LoadStats;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// 종목의 하루 거래 기록.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityRecord {
    /// 거래량
    pub volume: u64,
    /// 거래대금 (거래량 × 종가)
    pub turnover: Decimal,
}

impl SecurityRecord {
    /// 이력 행에서 레코드 생성.
    fn from_row(row: &HistoryRow) -> Result<Self> {
        let turnover = Decimal::from(row.volume)
            .checked_mul(row.close)
            .ok_or_else(|| {
                DataError::InvalidData(format!(
                    "turnover overflow for {}: {} x {}",
                    row.secid, row.volume, row.close
                ))
            })?;

        Ok(Self {
            volume: row.volume,
            turnover,
        })
    }
}

/// 하루치 종목별 기록 (처음 등장한 순서 유지).
#[derive(Debug, Clone, Default)]
pub struct DaySnapshot {
    records: Vec<(String, SecurityRecord)>,
    positions: HashMap<String, usize>,
}

impl DaySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// 레코드 추가. 같은 종목이 다시 오면 값만 덮어쓰고 위치는 유지합니다.
    pub fn insert(&mut self, secid: impl Into<String>, record: SecurityRecord) {
        let secid = secid.into();
        match self.positions.get(&secid) {
            Some(&pos) => self.records[pos].1 = record,
            None => {
                self.positions.insert(secid.clone(), self.records.len());
                self.records.push((secid, record));
            }
        }
    }

    pub fn get(&self, secid: &str) -> Option<&SecurityRecord> {
        self.positions.get(secid).map(|&pos| &self.records[pos].1)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SecurityRecord)> {
        self.records.iter().map(|(id, r)| (id.as_str(), r))
    }
}

/// 날짜별 스냅샷 (조회 순서 = 최신 영업일 먼저).
#[derive(Debug, Clone, Default)]
pub struct WindowDataset {
    days: Vec<(BusinessDate, DaySnapshot)>,
}

impl WindowDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, date: BusinessDate, snapshot: DaySnapshot) {
        self.days.push((date, snapshot));
    }

    pub fn get(&self, date: BusinessDate) -> Option<&DaySnapshot> {
        self.days.iter().find(|(d, _)| *d == date).map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BusinessDate, &DaySnapshot)> {
        self.days.iter().map(|(d, s)| (*d, s))
    }
}

/// 하루치 페이지 병합기.
pub struct DayAggregator<'a> {
    fetcher: &'a dyn HistoryFetcher,
}

impl<'a> DayAggregator<'a> {
    pub fn new(fetcher: &'a dyn HistoryFetcher) -> Self {
        Self { fetcher }
    }

    /// 한 날짜의 모든 페이지를 조회하여 병합.
    ///
    /// 종료 조건: `INDEX + PAGESIZE >= TOTAL`.
    /// 다음 요청 오프셋: 이전 오프셋 + `PAGESIZE`.
    #[instrument(skip_all, fields(date = %date))]
    pub async fn aggregate(
        &self,
        date: BusinessDate,
        stats: &mut LoadStats,
    ) -> Result<DaySnapshot> {
        let mut snapshot = DaySnapshot::new();
        let mut start = 0u64;

        loop {
            let page = self.fetcher.fetch_page(date, start).await?;
            stats.pages += 1;

            let rows = page.rows()?;
            let cursor = page.page_cursor()?;

            for row in &rows {
                snapshot.insert(row.secid.clone(), SecurityRecord::from_row(row)?);
            }

            debug!(
                start = start,
                rows = rows.len(),
                index = cursor.index,
                total = cursor.total,
                page_size = cursor.page_size,
                "이력 페이지 병합"
            );

            if cursor.is_last() {
                break;
            }
            if cursor.page_size == 0 {
                return Err(DataError::InvalidData(format!(
                    "PAGESIZE is 0 before reaching TOTAL {} on {}",
                    cursor.total, date
                )));
            }
            start += cursor.page_size;
        }

        stats.records += snapshot.len();
        Ok(snapshot)
    }
}

/// 영업일 윈도우 전체 로더.
pub struct WindowLoader<'a> {
    fetcher: &'a dyn HistoryFetcher,
}

impl<'a> WindowLoader<'a> {
    pub fn new(fetcher: &'a dyn HistoryFetcher) -> Self {
        Self { fetcher }
    }

    /// 영업일 순서대로 날짜별 스냅샷을 로드.
    pub async fn load(&self, sequence: BusinessDaySequence) -> Result<(WindowDataset, LoadStats)> {
        let started = Instant::now();
        let mut stats = LoadStats::new();
        let mut dataset = WindowDataset::new();
        let aggregator = DayAggregator::new(self.fetcher);

        for date in sequence.iter() {
            let snapshot = aggregator.aggregate(date, &mut stats).await?;
            info!(date = %date, securities = snapshot.len(), "일별 시세 로드 완료");

            dataset.push(date, snapshot);
            stats.days += 1;
        }

        stats.elapsed = started.elapsed();
        Ok((dataset, stats))
    }
}
