//! 일별 시세 이력 페이지 구조.
//!
//! 응답은 컬럼 목록과 행 배열로 구성된 테이블 두 개를 포함합니다:
//!
//! ```text
//! {
//!   "history":        { "columns": ["SECID", "TRADEDATE", "VOLUME", "CLOSE", ...], "data": [[...], ...] },
//!   "history.cursor": { "columns": ["INDEX", "TOTAL", "PAGESIZE"], "data": [[0, 2410, 100]] }
//! }
//! ```
//!
//! 컬럼 순서는 고정되어 있지 않으므로 이름으로 위치를 찾습니다.

use crate::calendar::BusinessDate;
use crate::error::{DataError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

/// 이력 테이블 이름.
pub const HISTORY_TABLE: &str = "history";
/// 커서 테이블 이름.
pub const CURSOR_TABLE: &str = "history.cursor";

/// 컬럼 + 행 형태의 테이블.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataTable {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub data: Vec<Vec<Value>>,
}

impl DataTable {
    /// 컬럼 위치 조회. 없으면 스키마 오류.
    pub fn column_index(&self, table: &str, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| DataError::missing_column(table, column))
    }
}

/// 이력 API 한 페이지.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryPage {
    #[serde(default)]
    pub history: DataTable,
    #[serde(default, rename = "history.cursor")]
    pub cursor: DataTable,
}

/// 페이지 커서.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// 현재 페이지 첫 행의 오프셋
    pub index: u64,
    /// 전체 행 수
    pub total: u64,
    /// 페이지 크기
    pub page_size: u64,
}

impl PageCursor {
    /// 마지막 페이지 여부 (`INDEX + PAGESIZE >= TOTAL`).
    pub fn is_last(&self) -> bool {
        self.index.saturating_add(self.page_size) >= self.total
    }
}

/// 이력 테이블의 한 행.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    /// 종목 코드
    pub secid: String,
    /// 거래량
    pub volume: u64,
    /// 종가
    pub close: Decimal,
}

impl HistoryPage {
    /// 커서 테이블 해석.
    ///
    /// 커서 행은 정확히 하나여야 합니다.
    pub fn page_cursor(&self) -> Result<PageCursor> {
        let index_col = self.cursor.column_index(CURSOR_TABLE, "INDEX")?;
        let total_col = self.cursor.column_index(CURSOR_TABLE, "TOTAL")?;
        let size_col = self.cursor.column_index(CURSOR_TABLE, "PAGESIZE")?;

        let row = match self.cursor.data.as_slice() {
            [row] => row,
            rows => {
                return Err(DataError::InvalidData(format!(
                    "expected exactly one cursor row, got {}",
                    rows.len()
                )))
            }
        };

        Ok(PageCursor {
            index: parse_integer(cell(row, index_col), "INDEX")?,
            total: parse_integer(cell(row, total_col), "TOTAL")?,
            page_size: parse_integer(cell(row, size_col), "PAGESIZE")?,
        })
    }

    /// 이력 행 해석.
    ///
    /// 필수 컬럼(`SECID`, `VOLUME`, `TRADEDATE`, `CLOSE`) 중 하나라도 없으면
    /// 행이 비어 있어도 스키마 오류를 반환합니다.
    pub fn rows(&self) -> Result<Vec<HistoryRow>> {
        let secid_col = self.history.column_index(HISTORY_TABLE, "SECID")?;
        let volume_col = self.history.column_index(HISTORY_TABLE, "VOLUME")?;
        self.history.column_index(HISTORY_TABLE, "TRADEDATE")?;
        let close_col = self.history.column_index(HISTORY_TABLE, "CLOSE")?;

        self.history
            .data
            .iter()
            .map(|row| {
                let secid = match cell(row, secid_col) {
                    Value::String(s) => s.clone(),
                    other => {
                        return Err(DataError::InvalidData(format!(
                            "SECID is not a string: {}",
                            other
                        )))
                    }
                };
                let volume = parse_integer(cell(row, volume_col), "VOLUME")?;
                let close = parse_price(cell(row, close_col))?;

                Ok(HistoryRow {
                    secid,
                    volume,
                    close,
                })
            })
            .collect()
    }
}

static NULL: Value = Value::Null;

fn cell(row: &[Value], idx: usize) -> &Value {
    row.get(idx).unwrap_or(&NULL)
}

/// 음이 아닌 정수 셀 파싱 (`null`은 0).
fn parse_integer(value: &Value, column: &str) -> Result<u64> {
    match value {
        Value::Null => Ok(0),
        Value::Number(n) => n.as_u64().ok_or_else(|| {
            DataError::InvalidData(format!("{} is not a non-negative integer: {}", column, n))
        }),
        Value::String(s) => s.trim().parse().map_err(|_| {
            DataError::InvalidData(format!("{} is not a non-negative integer: {}", column, s))
        }),
        other => Err(DataError::InvalidData(format!(
            "{} has unexpected type: {}",
            column, other
        ))),
    }
}

/// 가격 셀 파싱 (`null`은 거래 없음으로 0).
fn parse_price(value: &Value) -> Result<Decimal> {
    let text = match value {
        Value::Null => return Ok(Decimal::ZERO),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => {
            return Err(DataError::InvalidData(format!(
                "CLOSE has unexpected type: {}",
                other
            )))
        }
    };

    let price = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| DataError::InvalidData(format!("CLOSE parse failed: {} - {}", text, e)))?;

    if price.is_sign_negative() && !price.is_zero() {
        return Err(DataError::InvalidData(format!("CLOSE is negative: {}", price)));
    }
    Ok(price)
}

/// 이력 API 페이지 조회자.
///
/// 한 번의 호출은 한 번의 원격 요청입니다.
#[async_trait]
pub trait HistoryFetcher: Send + Sync {
    /// `date`의 `start` 오프셋부터 한 페이지 조회.
    async fn fetch_page(&self, date: BusinessDate, start: u64) -> Result<HistoryPage>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn page(body: Value) -> HistoryPage {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_columns_in_any_order() {
        let page = page(json!({
            "history": {
                "columns": ["CLOSE", "TRADEDATE", "SECID", "VOLUME"],
                "data": [[250.5, "2024-01-16", "SBER", 1200], [null, "2024-01-16", "GAZP", null]]
            },
            "history.cursor": { "columns": ["TOTAL", "PAGESIZE", "INDEX"], "data": [[2, 100, 0]] }
        }));

        let rows = page.rows().unwrap();
        assert_eq!(
            rows,
            vec![
                HistoryRow { secid: "SBER".into(), volume: 1200, close: dec!(250.5) },
                HistoryRow { secid: "GAZP".into(), volume: 0, close: Decimal::ZERO },
            ]
        );

        let cursor = page.page_cursor().unwrap();
        assert_eq!(cursor, PageCursor { index: 0, total: 2, page_size: 100 });
        assert!(cursor.is_last());
    }

    #[test]
    fn test_missing_close_is_schema_error() {
        let page = page(json!({
            "history": { "columns": ["SECID", "TRADEDATE", "VOLUME"], "data": [] },
            "history.cursor": { "columns": ["INDEX", "TOTAL", "PAGESIZE"], "data": [[0, 0, 100]] }
        }));

        match page.rows() {
            Err(DataError::Schema { table, column }) => {
                assert_eq!(table, "history");
                assert_eq!(column, "CLOSE");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_missing_cursor_column_is_schema_error() {
        let page = page(json!({
            "history": { "columns": ["SECID", "TRADEDATE", "VOLUME", "CLOSE"], "data": [] },
            "history.cursor": { "columns": ["INDEX", "TOTAL"], "data": [[0, 0]] }
        }));

        assert!(matches!(
            page.page_cursor(),
            Err(DataError::Schema { ref column, .. }) if column == "PAGESIZE"
        ));
    }

    #[test]
    fn test_missing_tables_are_schema_errors() {
        let no_cursor = page(json!({
            "history": { "columns": ["SECID", "TRADEDATE", "VOLUME", "CLOSE"], "data": [] }
        }));
        assert!(no_cursor.rows().unwrap().is_empty());
        assert!(matches!(
            no_cursor.page_cursor(),
            Err(DataError::Schema { ref table, ref column }) if table == "history.cursor" && column == "INDEX"
        ));

        let no_columns = page(json!({
            "history": { "data": [] },
            "history.cursor": { "data": [[0, 0, 100]] }
        }));
        assert!(matches!(
            no_columns.rows(),
            Err(DataError::Schema { ref table, ref column }) if table == "history" && column == "SECID"
        ));
        assert!(matches!(no_columns.page_cursor(), Err(DataError::Schema { .. })));
    }

    #[test]
    fn test_cursor_requires_single_row() {
        let page = page(json!({
            "history": { "columns": ["SECID", "TRADEDATE", "VOLUME", "CLOSE"], "data": [] },
            "history.cursor": { "columns": ["INDEX", "TOTAL", "PAGESIZE"], "data": [] }
        }));

        assert!(matches!(page.page_cursor(), Err(DataError::InvalidData(_))));
    }

    #[test]
    fn test_cursor_is_last() {
        let cursor = |index, total, page_size| PageCursor { index, total, page_size };
        assert!(!cursor(0, 5, 2).is_last());
        assert!(!cursor(2, 5, 2).is_last());
        assert!(cursor(4, 5, 2).is_last());
        assert!(cursor(0, 0, 100).is_last());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price(&json!(0.0123)).unwrap(), dec!(0.0123));
        assert_eq!(parse_price(&json!("17.5")).unwrap(), dec!(17.5));
        assert_eq!(parse_price(&json!(300)).unwrap(), dec!(300));
        assert!(parse_price(&json!(-1.5)).is_err());
        assert!(parse_price(&json!(true)).is_err());
    }

    #[test]
    fn test_parse_integer_rejects_fractions() {
        assert_eq!(parse_integer(&json!(18446744073709551615u64), "VOLUME").unwrap(), u64::MAX);
        assert_eq!(parse_integer(&json!("42"), "VOLUME").unwrap(), 42);
        assert!(parse_integer(&json!(1.5), "VOLUME").is_err());
        assert!(parse_integer(&json!(-3), "VOLUME").is_err());
    }
}
