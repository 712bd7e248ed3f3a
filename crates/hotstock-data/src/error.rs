//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 데이터 관련 오류.
///
/// 모든 오류는 진행 중인 로드 전체를 중단시킵니다 (부분 결과 없음).
#[derive(Debug, Error)]
pub enum DataError {
    /// 전송 오류 (HTTP 상태, 네트워크, 응답 본문 디코딩)
    #[error("Transport error: {0}")]
    Transport(String),

    /// 필수 컬럼 누락
    #[error("Schema error: column '{column}' missing from table '{table}'")]
    Schema {
        /// 테이블 이름 (`history`, `history.cursor`)
        table: String,
        /// 누락된 컬럼 이름
        column: String,
    },

    /// 잘못된 데이터 형식
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// 설정 오류
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DataError {
    /// 컬럼 누락 오류 생성.
    pub fn missing_column(table: &str, column: &str) -> Self {
        DataError::Schema {
            table: table.to_string(),
            column: column.to_string(),
        }
    }

    /// 재시도 가능 여부.
    ///
    /// 전송 오류만 재시도 대상입니다. 스키마 오류는 항상 치명적입니다.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DataError::Transport(_))
    }
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        DataError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Transport(format!("response body decode failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
