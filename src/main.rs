use anyhow::Result;
use clap::Parser;
use tracing::info;

use meshbroker::config::AppConfig;
use meshbroker::router::ActionRouter;
use meshbroker::server;
use meshbroker::transport::{HttpTransport, RpcLogTransport};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::parse();
    let targets = cfg.targets()?;

    let http = HttpTransport::new(cfg.http_timeout());
    let rpc = RpcLogTransport::new(cfg.rpc_timeout());
    let router = ActionRouter::new(targets, http, rpc);

    info!("Starting broker service on {}", cfg.listen_addr);
    server::serve(cfg.listen_addr, router).await
}
