//! 거래량 평균 및 급증 종목 계산.

use crate::calendar::BusinessDate;
use crate::loader::WindowDataset;
use crate::ratio::volume_ratio;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// 거래대금 보고 단위 (백만).
const TURNOVER_UNIT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// 종목별 윈도우 평균 거래량.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AverageEntry {
    /// 등장한 날짜들의 거래량 합계
    pub total_volume: u128,
    /// 등장한 날짜 수
    pub count: u64,
    /// 평균 거래량 (정수 나눗셈)
    pub average: u64,
}

/// 종목별 평균 거래량 계산.
///
/// 종목이 없는 날은 합계와 횟수 모두에 포함하지 않습니다 (0 채움 없음).
pub fn compute_averages(dataset: &WindowDataset) -> HashMap<String, AverageEntry> {
    let mut averages: HashMap<String, AverageEntry> = HashMap::new();

    for (_, snapshot) in dataset.iter() {
        for (secid, record) in snapshot.iter() {
            let entry = averages.entry(secid.to_string()).or_default();
            entry.total_volume += u128::from(record.volume);
            entry.count += 1;
        }
    }

    for entry in averages.values_mut() {
        // 평균은 최대 일 거래량을 넘지 않으므로 u64 범위 안
        entry.average = (entry.total_volume / u128::from(entry.count)) as u64;
    }

    averages
}

/// 날짜별 종목 거래량 비율.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HotStockEntry {
    /// 종목 코드
    pub secid: String,
    /// 평균 대비 거래량 비율 (소수점 1자리)
    pub ratio: Decimal,
    /// 거래대금 (백만 단위, 버림)
    pub turnover: u128,
}

/// 날짜별 급증 종목 목록 (날짜 순서 = 조회 순서).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotStocksByDate {
    days: Vec<(BusinessDate, Vec<HotStockEntry>)>,
}

impl HotStocksByDate {
    pub fn get(&self, date: &str) -> Option<&[HotStockEntry]> {
        self.days
            .iter()
            .find(|(d, _)| d.to_string() == date)
            .map(|(_, entries)| entries.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (BusinessDate, &[HotStockEntry])> {
        self.days.iter().map(|(d, e)| (*d, e.as_slice()))
    }

    /// 날짜 수.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// 전체 항목 수.
    pub fn entry_count(&self) -> usize {
        self.days.iter().map(|(_, e)| e.len()).sum()
    }

    /// `ratio >= min_ratio`인 항목만 남긴 사본.
    pub fn filter_min_ratio(&self, min_ratio: Decimal) -> Self {
        Self {
            days: self
                .days
                .iter()
                .map(|(date, entries)| {
                    let kept = entries
                        .iter()
                        .filter(|e| e.ratio >= min_ratio)
                        .cloned()
                        .collect();
                    (*date, kept)
                })
                .collect(),
        }
    }
}

impl Serialize for HotStocksByDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (date, entries) in &self.days {
            map.serialize_entry(&date.to_string(), entries)?;
        }
        map.end()
    }
}

/// 날짜·종목별 평균 대비 거래량 비율 계산.
///
/// 평균이 0이거나 알 수 없는 종목은 제외합니다. 별도의 임계값 필터는 없으며
/// 모든 비율을 반환합니다. 데이터셋의 모든 날짜가 (빈 목록이더라도) 포함됩니다.
pub fn detect_hot_stocks(
    dataset: &WindowDataset,
    averages: &HashMap<String, AverageEntry>,
) -> HotStocksByDate {
    let days = dataset
        .iter()
        .map(|(date, snapshot)| {
            let entries = snapshot
                .iter()
                .filter_map(|(secid, record)| {
                    let average = averages.get(secid)?.average;
                    let ratio = volume_ratio(record.volume, average)?;
                    Some(HotStockEntry {
                        secid: secid.to_string(),
                        ratio,
                        turnover: turnover_millions(record.turnover),
                    })
                })
                .collect();
            (date, entries)
        })
        .collect();

    HotStocksByDate { days }
}

/// 거래대금을 백만 단위로 버림.
fn turnover_millions(turnover: Decimal) -> u128 {
    (turnover / TURNOVER_UNIT).trunc().to_u128().unwrap_or_default()
}
