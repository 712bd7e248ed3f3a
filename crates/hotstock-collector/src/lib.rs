//! Command-line runner for the hot-stock volume pipeline.
//!
//! 이 crate는 데이터 파이프라인을 한 번 실행하는 바이너리를 제공합니다:
//! - 급증 종목 조회 (JSON 출력)
//! - 조회 대상 영업일 확인

pub mod config;
pub mod error;
pub mod modules;

pub use config::CollectorConfig;
pub use error::{CollectorError, Result};
