pub mod activities;
pub mod client;
pub mod config;
pub mod init;
pub mod project;
pub mod slot;

use crate::cli::parser::PageArgs;
use crate::config::Config;
use crate::db::page::{Page, PageResult};
use crate::db::pool::Database;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub(crate) fn open_db(cfg: &Config) -> AppResult<Database> {
    Database::open(&cfg.database)
}

/// Page from the command line, falling back to the configured limit.
pub(crate) fn page_from(args: &PageArgs, cfg: &Config) -> Page {
    Page::new(args.limit.unwrap_or(cfg.page_limit), args.offset)
}

pub(crate) fn print_page_footer<T>(result: &PageResult<T>, label: &str) {
    info(format!(
        "Showing {} of {} {label}(s).",
        result.len(),
        result.total_count
    ));
}
