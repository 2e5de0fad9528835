pub use tickmat_core::config::*;

use crate::cli::Cli;

pub fn from_cli(cli: &Cli) -> AppConfig {
    let mut config = AppConfig::discover();
    if let Some(token) = &cli.access_token {
        config.set_access_token(token);
    }
    config
}
