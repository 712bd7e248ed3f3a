//! 영업일 계산.
//!
//! 조회 기준일 전날부터 과거 방향으로 주말(토/일)을 건너뛰며 영업일을 나열합니다.
//! 공휴일은 고려하지 않습니다 (휴장일 조회는 빈 페이지로 처리됨).

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use serde::{Serialize, Serializer};
use std::fmt;

/// 영업일 (토요일/일요일이 아닌 날짜).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BusinessDate(NaiveDate);

impl BusinessDate {
    /// 주말이면 `None`을 반환합니다.
    pub fn new(date: NaiveDate) -> Option<Self> {
        if is_weekend(date) {
            None
        } else {
            Some(Self(date))
        }
    }

    /// 내부 날짜.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for BusinessDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for BusinessDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 주말 여부.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// 기준일 바로 이전 영업일.
fn previous_business_day(date: NaiveDate) -> NaiveDate {
    let mut day = date - Duration::days(1);
    while is_weekend(day) {
        day -= Duration::days(1);
    }
    day
}

/// 조회 대상 영업일 목록.
///
/// `iter()`를 호출할 때마다 처음부터 새로 나열합니다.
#[derive(Debug, Clone, Copy)]
pub struct BusinessDaySequence {
    start: NaiveDate,
    days_back: u32,
}

impl BusinessDaySequence {
    /// `start` 전날부터 `days_back + 1`개의 영업일.
    pub fn new(days_back: u32, start: NaiveDate) -> Self {
        Self { start, days_back }
    }

    /// 생성될 날짜 수.
    pub fn len(&self) -> usize {
        self.days_back as usize + 1
    }

    /// 항상 최소 1개의 날짜를 생성합니다.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// 최신 영업일부터 내림차순 반복자.
    pub fn iter(&self) -> BusinessDays {
        BusinessDays {
            cursor: self.start,
            remaining: self.len(),
        }
    }
}

impl IntoIterator for BusinessDaySequence {
    type Item = BusinessDate;
    type IntoIter = BusinessDays;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// 영업일 반복자.
#[derive(Debug, Clone)]
pub struct BusinessDays {
    cursor: NaiveDate,
    remaining: usize,
}

impl Iterator for BusinessDays {
    type Item = BusinessDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.cursor = previous_business_day(self.cursor);
        Some(BusinessDate(self.cursor))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for BusinessDays {}

/// "오늘" 날짜 제공자.
///
/// 캐시 키의 날짜와 영업일 계산의 기준일로 사용됩니다.
pub trait Clock: Send + Sync {
    /// 현재 달력 날짜.
    fn today(&self) -> NaiveDate;
}

/// 시스템 로컬 시간대 기준 시계.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// 고정 날짜 시계.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
