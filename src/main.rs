//! Stock Dashboard - command line entry point.
//!
//! Loads settings, applies command line overrides and refreshes the
//! dashboard until Ctrl-C, writing every chart as plotly JSON into the
//! `charts` folder of the dashboard directory.

use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};

use stock_dashboard::chart::{format_price, format_volume};
use stock_dashboard::cli::Args;
use stock_dashboard::dashboard::{DashboardEngine, DashboardFrame, DashboardParams, RefreshScheduler};
use stock_dashboard::gateway::YahooDatafeed;
use stock_dashboard::trader::logger::level_to_string;
use stock_dashboard::trader::utility::sanitize_file_name;
use stock_dashboard::trader::{
    get_folder_path, init_logger, save_json, BaseDatafeed, EmptyDatafeed, Logger, Settings, INFO,
    SETTINGS,
};

/// Pick the datafeed named by `datafeed.name`
fn create_datafeed(settings: &Settings) -> Arc<dyn BaseDatafeed> {
    let name = settings.get_string("datafeed.name").unwrap_or_default();
    match name.as_str() {
        "yahoo" => match YahooDatafeed::from_settings(settings) {
            Ok(datafeed) => {
                info!("Using Yahoo datafeed at {}", datafeed.host());
                Arc::new(datafeed)
            }
            Err(e) => {
                error!("Failed to create HTTP client: {}", e);
                Arc::new(EmptyDatafeed::new())
            }
        },
        other => {
            warn!("Unknown datafeed {:?}, charts will be unavailable", other);
            Arc::new(EmptyDatafeed::new())
        }
    }
}

/// Log the last prices and write the figures of one frame
fn publish(logger: &Logger, frame: &DashboardFrame) {
    let folder = get_folder_path("charts");

    for chart in frame.charts() {
        logger.info(&format!(
            "{}: last {} vol {}",
            chart.symbol,
            format_price(chart.last_price),
            format_volume(chart.last_volume)
        ));

        let path = folder.join(format!("{}.json", sanitize_file_name(&chart.symbol)));
        if let Err(e) = save_json(&path, &chart.figure) {
            warn!("Failed to write {}: {}", path.display(), e);
        }
    }

    let path = folder.join("dashboard.json");
    if let Err(e) = save_json(&path, frame) {
        warn!("Failed to write {}: {}", path.display(), e);
    }
}

async fn wait_for_ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    args.apply(&SETTINGS);
    init_logger(&SETTINGS);

    let params = DashboardParams::from_settings(&SETTINGS)?;
    if params.watchlist.is_empty() {
        warn!("Watch list is empty, pass symbols such as `us`, `bond` or `AAPL,^TNX-^IRX`");
        return Ok(());
    }

    let level = SETTINGS.get_int("log.level").unwrap_or(INFO as i64) as i32;
    info!("Log level {}", level_to_string(level));

    let engine = DashboardEngine::new(create_datafeed(&SETTINGS));
    let logger = Logger::new("Metrics");
    info!(
        "Dashboard started: {} instruments, period {}, interval {}, via {}",
        params.watchlist.len(),
        params.period,
        params.interval,
        engine.datafeed_name()
    );

    let mut scheduler = RefreshScheduler::new(params.refresh);
    if args.once {
        scheduler = scheduler.with_max_cycles(1);
    }

    let engine = &engine;
    let params = &params;
    let logger = &logger;
    scheduler
        .run(
            move |cycle| async move {
                match engine.run_cycle(params).await {
                    Ok(frame) => publish(logger, &frame),
                    Err(e) => error!("Refresh cycle {} failed: {}", cycle, e),
                }
            },
            wait_for_ctrl_c(),
        )
        .await;

    info!("Dashboard stopped");
    Ok(())
}
