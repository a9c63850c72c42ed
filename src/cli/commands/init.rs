use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::migrate::latest_version;
use crate::db::pool::Database;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// Writes the config file (outside test mode), then creates the database
/// and applies every pending migration.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.as_deref(), cli.test)?;

    info(format!("Database: {}", db_path.display()));

    let db = Database::open(&db_path.to_string_lossy())?;
    success(format!(
        "Database initialized (schema version {} of {})",
        db.schema_version()?,
        latest_version()
    ));
    Ok(())
}
