use clap::Parser;

mod platform;

fn main() -> anyhow::Result<()> {
    let cli = platform::Cli::parse();
    let config = platform::AppConfig::from_cli(&cli)?;
    platform::run_app(config)
}
