use clap::Parser;
use hearth_dns_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "hearth-dns")]
#[command(version)]
#[command(about = "Hearth DNS - local-zone DNS server with upstream forwarding")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Local zone suffix
    #[arg(short = 's', long)]
    suffix: Option<String>,

    /// Record store database path
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        suffix: cli.suffix.clone(),
        database_path: cli.database.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Hearth DNS v{}", env!("CARGO_PKG_VERSION"));
    info!(
        suffix = %config.zone.suffix,
        primary = %config.upstream.primary,
        secondary = %config.upstream.secondary,
        "Authoritative for local zone, forwarding the rest"
    );

    let database_url = format!("sqlite:{}", config.database.path);
    let pool = bootstrap::init_database(&database_url, &config.database).await?;

    let services = di::Services::new(&config, pool)?;

    let dns_addr = format!("{}:{}", config.server.bind_address, config.server.dns_port);
    server::start_dns_server(dns_addr, services.handler).await?;

    info!("Server shutdown complete");
    Ok(())
}
