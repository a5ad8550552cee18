use clap::Parser;
use flexi_logger::Logger;
use miniircd::config::Cli;
use miniircd::server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    Logger::try_with_env_or_str("info")?.log_to_stderr().start()?;

    let config = cli.resolve()?;

    if let Err(err) = server::run(config).await {
        log::error!("{err}");
        std::process::exit(1);
    }

    Ok(())
}
