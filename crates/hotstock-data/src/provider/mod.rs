//! 데이터 Provider 모듈.
//!
//! ## 일별 시세 이력
//! - `HistoryFetcher`: 날짜+오프셋 단위 페이지 조회 trait
//! - `MoexHistoryClient`: MOEX ISS 이력 API 클라이언트 (reqwest)

pub mod history;
pub mod moex;

pub use history::{
    DataTable, HistoryFetcher, HistoryPage, HistoryRow, PageCursor, CURSOR_TABLE, HISTORY_TABLE,
};
pub use moex::MoexHistoryClient;
