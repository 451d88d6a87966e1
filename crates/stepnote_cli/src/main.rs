//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `stepnote_core` linkage with deterministic output.
//! - Optionally open a SQLite slot database and print its pages.
//! - Optionally write core log events into an absolute log directory.
//!
//! Usage: `stepnote_cli [DB_PATH [LOG_DIR]]`

use std::process::ExitCode;
use stepnote_core::db::open_db;
use stepnote_core::{PageStore, SlotStorage, SqliteKvBackend, StorageConfig};

fn main() -> ExitCode {
    println!("stepnote_core ping={}", stepnote_core::ping());
    println!("stepnote_core version={}", stepnote_core::core_version());

    let mut args = std::env::args().skip(1);
    let Some(db_path) = args.next() else {
        return ExitCode::SUCCESS;
    };

    if let Some(log_dir) = args.next() {
        let level = stepnote_core::default_log_level();
        if let Err(err) = stepnote_core::init_logging(level, &log_dir) {
            eprintln!("stepnote_cli error: {err}");
            return ExitCode::FAILURE;
        }
        println!("logging level={level} dir={log_dir}");
    }

    match print_pages(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("stepnote_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_pages(db_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(db_path)?;
    let backend = SqliteKvBackend::try_new(&conn)?;
    let store = PageStore::load(SlotStorage::new(backend, &StorageConfig::default()))?;

    println!("pages={}", store.len());
    for (index, page) in store.list().iter().enumerate() {
        println!(
            "{}. {} (steps={}, keywords={})",
            index + 1,
            page.title,
            page.steps.len(),
            page.keywords.join(",")
        );
    }
    Ok(())
}
