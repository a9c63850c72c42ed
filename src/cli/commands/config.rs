use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config { print_config } = cmd {
        if !*print_config {
            warning("Nothing to do. Use --print to show the configuration.");
            return Ok(());
        }

        let path = Config::config_file();
        if path.exists() {
            info(format!("Config file: {}", path.display()));
        } else {
            info("No config file found, showing defaults.");
        }
        print!("{}", cfg.to_yaml()?);
    }
    Ok(())
}
