//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open the configured expense store and render its settled chart as SVG.
//! - Keep output deterministic so it can be diffed in local checks.
//!
//! Usage: `spendpie [config.json]`; `SPENDPIE_*` env vars override the file.

use spendpie_core::db::open_db;
use spendpie_core::{
    core_version, init_logging, ChangeFeed, ExpenseDashboard, ExpenseService, SpendPieConfig,
    SqliteExpenseRepository,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("spendpie: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = match std::env::args().nth(1) {
        Some(path) => SpendPieConfig::load(&path).map_err(|err| err.to_string())?,
        None => SpendPieConfig::default(),
    }
    .with_env_overrides();

    if let Some(dir) = &config.log.dir {
        init_logging(&config.log.level, dir).map_err(|err| err.to_string())?;
    }
    log::info!("event=cli_start module=cli status=ok version={}", core_version());

    let db_path = config.store.resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("open `{}`: {err}", db_path.display()))?;
    let repo = SqliteExpenseRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let feed = ChangeFeed::with_batch_limit(config.store.batch_limit);
    let mut dashboard =
        ExpenseDashboard::with_feed(ExpenseService::new(repo), feed, &config.chart);

    dashboard
        .sync(std::time::Duration::ZERO)
        .map_err(|err| format!("initial sync failed: {err}"))?;
    let frame = dashboard.frame(config.chart.transition());
    print!("{}", frame.to_svg(&config.chart));
    Ok(())
}
