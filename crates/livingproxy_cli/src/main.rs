//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `livingproxy_core` linkage with a deterministic probe.
//! - List the people visible through the proxy for a given database.
//!
//! Usage: `livingproxy_cli [DB_PATH [MODE [REFERENCE_YEAR]]]`
//! Set `LIVINGPROXY_LOG_DIR` to an absolute path to enable file logging.

use livingproxy_core::db::open_db;
use livingproxy_core::{
    GenealogyStore, LivingProxy, PrivacyConfig, ProxyOptions, RedactionMode,
    SqliteGenealogyStore,
};
use log::info;
use std::process::ExitCode;

const LOG_DIR_ENV: &str = "LIVINGPROXY_LOG_DIR";

fn main() -> ExitCode {
    println!("livingproxy_core ping={}", livingproxy_core::ping());
    println!(
        "livingproxy_core version={}",
        livingproxy_core::core_version()
    );

    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        if let Err(err) =
            livingproxy_core::init_logging(livingproxy_core::default_log_level(), &log_dir)
        {
            eprintln!("logging disabled: {err}");
        }
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(db_path) = args.first() else {
        return ExitCode::SUCCESS;
    };
    match list_visible_people(db_path, args.get(1), args.get(2)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn list_visible_people(
    db_path: &str,
    mode: Option<&String>,
    reference_year: Option<&String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mode = match mode {
        Some(value) => value.parse::<RedactionMode>()?,
        None => RedactionMode::ExcludeAll,
    };
    let mut options = ProxyOptions::new(mode);
    if let Some(value) = reference_year {
        options = options.with_reference_year(value.trim().parse::<i32>()?);
    }

    let conn = open_db(db_path)?;
    let store = SqliteGenealogyStore::try_new(&conn)?;
    let proxy = LivingProxy::try_new(&store, options, PrivacyConfig::default())?;

    let mut shown = 0usize;
    for person in proxy.iter_people()? {
        let person = person?;
        println!("{}\t{}", person.gramps_id, person.primary_name.display());
        shown += 1;
    }
    println!(
        "visible={shown} total={} mode={} reference_year={}",
        store.get_number_of_people()?,
        proxy.mode(),
        proxy.reference_year()
    );
    info!("event=cli_listing module=cli status=ok visible={shown} mode={mode}");
    Ok(())
}
