//! Dashboard backend binary: load config, build the upstream client, serve.

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vms_client::VmsClientBuilder;
use vms_config::ConfigLoader;
use vms_server::routes;

#[derive(Debug, Parser)]
#[command(
    name = "vms-server",
    version,
    about = "Dashboard backend proxying the upstream VMS API"
)]
struct Args {
    /// Bind address, overriding VMS_LISTEN_ADDR.
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ConfigLoader::new()
        .load_dotenv()
        .from_env()
        .context("invalid environment configuration")?
        .build()
        .context("invalid configuration")?;

    let client = VmsClientBuilder::from_config(&config)
        .build()
        .context("failed to build upstream client")?;

    // Warm up the session so the first dashboard request does not pay for
    // session creation. Failure is not fatal: requests retry on their own.
    if let Err(err) = client.initialize_auth().await {
        warn!(error = %err, "could not establish an upstream session at startup");
    }

    let app = routes::router(routes::AppState { client });
    let listen_addr = args.listen.unwrap_or(config.listen_addr);
    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;
    info!(%listen_addr, upstream = %config.connection.base_url, "serving");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
