//! 테스트용 페이지 스크립트 조회자.

use crate::calendar::{BusinessDate, Clock};
use crate::error::{DataError, Result};
use crate::provider::{HistoryFetcher, HistoryPage};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// (날짜, 오프셋)별로 미리 정한 응답을 돌려주고 호출을 기록합니다.
/// 스크립트에 없는 요청은 전송 오류.
#[derive(Default)]
pub struct ScriptedFetcher {
    pages: HashMap<(BusinessDate, u64), Value>,
    calls: Mutex<Vec<(BusinessDate, u64)>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, date: BusinessDate, start: u64, body: Value) -> Self {
        self.pages.insert((date, start), body);
        self
    }

    pub fn calls(&self) -> Vec<(BusinessDate, u64)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HistoryFetcher for ScriptedFetcher {
    async fn fetch_page(&self, date: BusinessDate, start: u64) -> Result<HistoryPage> {
        self.calls.lock().unwrap().push((date, start));
        // 실제 요청처럼 응답 전에 한 번 양보
        tokio::task::yield_now().await;
        let body = self
            .pages
            .get(&(date, start))
            .cloned()
            .ok_or_else(|| DataError::Transport(format!("no page for {} @ {}", date, start)))?;
        Ok(serde_json::from_value(body)?)
    }
}

/// 날짜를 바꿀 수 있는 시계.
pub struct ManualClock {
    today: Mutex<NaiveDate>,
}

impl ManualClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Mutex::new(today),
        }
    }

    pub fn set(&self, today: NaiveDate) {
        *self.today.lock().unwrap() = today;
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().unwrap()
    }
}

/// `(SECID, VOLUME, CLOSE)` 행과 커서로 응답 본문 생성.
pub fn history_page(rows: &[(&str, u64, Value)], index: u64, total: u64, page_size: u64) -> Value {
    let data: Vec<Value> = rows
        .iter()
        .map(|(secid, volume, close)| json!(["TQBR", secid, "2024-01-01", volume, close]))
        .collect();

    json!({
        "history": { "columns": ["BOARDID", "SECID", "TRADEDATE", "VOLUME", "CLOSE"], "data": data },
        "history.cursor": { "columns": ["INDEX", "TOTAL", "PAGESIZE"], "data": [[index, total, page_size]] }
    })
}
