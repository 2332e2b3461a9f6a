use clap::Parser;
use embed_relay::{build_router, AppState, RelayConfig, SharedLogger, UpstreamClient};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "embed-relay",
    about = "OpenAI-compatible embeddings endpoint in front of the Jina embeddings API",
    version
)]
struct Cli {
    /// Path to config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config)
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Upstream embeddings URL (overrides config)
    #[arg(long, env = "UPSTREAM_URL")]
    upstream_url: Option<String>,

    /// Request log file path
    #[arg(long, default_value = "embed-relay.log")]
    log_file: PathBuf,

    /// Print config search paths and exit
    #[arg(long)]
    show_config_paths: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "embed_relay=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if cli.show_config_paths {
        println!("Config search paths:");
        for (i, path) in embed_relay::config::config_search_paths().iter().enumerate() {
            println!("  {}. {}", i + 1, path.display());
        }
        return Ok(());
    }

    let mut config = RelayConfig::find_and_load(cli.config.as_deref())?;

    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(url) = cli.upstream_url {
        config.upstream.url = url;
    }
    config.validate()?;

    // Fatal before binding: the relay never serves without a credential.
    let api_key = config.resolve_api_key()?;
    let upstream = UpstreamClient::from_config(&config, &api_key)?;

    let logger = SharedLogger::new(&cli.log_file)?;

    info!("embed-relay v{}", env!("CARGO_PKG_VERSION"));
    info!("  Upstream:  {}", config.upstream.url);
    info!("  API key:   ${} (set)", config.upstream.api_key_env);
    info!("  Timeout:   {}s", config.upstream.timeout_secs);
    info!("  Port:      {}", config.port);
    info!("  Log file:  {}", cli.log_file.display());

    logger.info(
        "startup",
        format!(
            "Starting embed-relay upstream={} port={}",
            config.upstream.url, config.port
        ),
    );

    let state = Arc::new(AppState {
        upstream,
        logger,
    });

    let app = build_router(state);
    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Listening on http://{}/v1/embeddings", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
