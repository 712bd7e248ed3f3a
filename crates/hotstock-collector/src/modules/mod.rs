//! 실행 모듈.

pub mod business_days;
pub mod hot_stocks;

pub use business_days::list_business_days;
pub use hot_stocks::{apply_min_ratio, collect_hot_stocks, render_json};
