use clap::Parser;
use taleweaver_server::{create_router, AppState, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Taleweaver story pipeline server", long_about = None)]
struct Args {
    /// Address to bind the listener to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to run the server on
    #[arg(short, long, default_value = "8000")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = ServerConfig::from_env()?;
    info!(image_vendor = %config.image_vendor(), "Configuration loaded");

    let state = AppState::from_config(&config)?;
    let router = create_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Starting Taleweaver server");

    axum::serve(listener, router).await?;
    Ok(())
}
