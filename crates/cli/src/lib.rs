pub mod cli;
pub mod commands;
pub mod config;

use anyhow::Result;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

pub use tickmat_core as core;
pub use tickmat_core::matrix;
pub use tickmat_core::model;
pub use tickmat_core::transition;

pub use tickmat_core::AppConfig;

/// Initialize stderr logging. Warnings by default so the fail-open read
/// path stays visible without drowning command output.
pub fn init_tracing(filter: Option<String>) -> Result<()> {
    let filter = filter.unwrap_or_else(|| "warn".to_string());
    let directive: Directive = filter.parse()?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
    Ok(())
}
