//! Hot-stock collector CLI.

use clap::{Parser, Subcommand};
use hotstock_collector::{modules, CollectorConfig};
use hotstock_data::LocalClock;
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hotstock-collector")]
#[command(about = "Trailing-window trading volume spike report", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// 날짜·종목별 평균 대비 거래량 비율 조회 (JSON 출력)
    HotStocks {
        /// 조회 영업일 수 (기준일 + N일, 기본: HOTSTOCK_DAYS_BACK)
        #[arg(long)]
        days_back: Option<u32>,

        /// 이 비율 이상인 항목만 출력 (예: 2.0)
        #[arg(long)]
        min_ratio: Option<Decimal>,

        /// 보기 좋게 출력
        #[arg(long)]
        pretty: bool,
    },

    /// 조회 대상 영업일 목록 출력
    BusinessDays {
        /// 조회 영업일 수 (기준일 + N일)
        #[arg(long)]
        days_back: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 로깅 초기화 (출력 JSON과 섞이지 않도록 stderr)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "hotstock_collector={level},hotstock_data={level}",
                    level = cli.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // 설정 로드
    let config = CollectorConfig::from_env()?;
    tracing::debug!(
        url = %config.history.base_url,
        days_back = config.days_back,
        max_retries = config.history.max_retries,
        "설정 로드 완료"
    );

    match cli.command {
        Commands::HotStocks {
            days_back,
            min_ratio,
            pretty,
        } => {
            let days_back = days_back.unwrap_or(config.days_back);
            let min_ratio = min_ratio.or(config.min_ratio);

            match modules::collect_hot_stocks(&config, days_back, min_ratio).await {
                Ok(hot) => {
                    println!("{}", modules::render_json(&hot, pretty)?);
                }
                Err(e) => {
                    tracing::error!("급증 종목 조회 실패: {}", e);
                    return Err(e.into());
                }
            }
        }
        Commands::BusinessDays { days_back } => {
            let days_back = days_back.unwrap_or(config.days_back);
            for date in modules::list_business_days(days_back, &LocalClock) {
                println!("{}", date);
            }
        }
    }

    Ok(())
}
