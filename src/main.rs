//! ip-checker entry point.
//!
//! Initializes tracing, compiles the page template, builds the router and
//! serves it on all interfaces until SIGINT/SIGTERM.

use std::net::IpAddr;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ip_checker::config::{
    LogFormat, ServiceConfig, DEFAULT_HOST, DEFAULT_LOG_FILTER, DEFAULT_PORT,
};
use ip_checker::http::{setup_shutdown_handler, start_server};
use ip_checker::routes::create_router;
use ip_checker::state::AppState;
use ip_checker::templates::init_templates;

/// ip-checker: shows callers their originating IP address
#[derive(Parser, Debug)]
#[command(name = "ip-checker", version, about)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Address to bind to
    #[arg(long, env = "HOST", default_value_t = DEFAULT_HOST)]
    host: IpAddr,

    /// Log level filter (e.g., "ip_checker=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    match args.log_format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }

    let config = ServiceConfig::new(args.host, args.port);

    let tera = init_templates()?;
    let app = create_router(AppState::new(tera));

    let server = start_server(app, &config).await?;
    setup_shutdown_handler(server.handle());
    server.wait().await?;

    tracing::info!("Server stopped");
    Ok(())
}
