use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = tickmat::cli::Cli::parse();
    tickmat::init_tracing(cli.log_filter.clone())?;

    let config = tickmat::config::from_cli(&cli);
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    tickmat::commands::execute(&config, cli.command.clone(), &mut handle)
}
