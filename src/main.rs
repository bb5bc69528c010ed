use anyhow::Context;
use clap::Parser;
use netpol::commands::Ui;
use netpol::config::LogFormat;
use netpol::utils::{logger, validation::Validate};
use netpol::{ApiTransport, CliConfig, HttpDirectory, HttpPolicyClient, NetpolConfig, PolicyResolver};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match NetpolConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config file '{}': {}", cli.config, e);
            std::process::exit(1);
        }
    };

    if cli.json_logs || config.log_format() == LogFormat::Json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI arguments: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let skip_ssl = config.skip_ssl_validation();
    if skip_ssl {
        tracing::warn!("TLS certificate validation is disabled");
    }
    let directory = HttpDirectory::new(
        ApiTransport::api(&config, skip_ssl).context("Failed to create API client")?,
    );
    let policies = HttpPolicyClient::new(
        ApiTransport::networking(&config, skip_ssl).context("Failed to create networking client")?,
    );
    let resolver = PolicyResolver::new(directory, policies);

    let target = config.target();
    let mut ui = Ui::stdio();

    if let Err(e) = cli.command.execute(&resolver, &target, &mut ui).await {
        tracing::error!("Command failed: {} (category: {:?})", e, e.category());
        ui.display_error(&e)?;
        std::process::exit(1);
    }

    Ok(())
}
