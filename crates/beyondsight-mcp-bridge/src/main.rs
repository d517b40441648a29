use anyhow::Result;
use beyondsight_mcp_bridge::{logging, BridgeConfig, Cli, McpBridgeServer};
use clap::Parser;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = BridgeConfig::load(&cli)?;

    logging::initialize(&config.log_level);

    info!("MCP Bridge started");
    info!("Connecting to backend at {}", config.api.base_url);

    let server = McpBridgeServer::new(&config)?;

    tokio::select! {
        result = server.run() => {
            if let Err(e) = result {
                error!(error = %e, "Bridge terminated");
                return Err(e);
            }
        }
        signal = shutdown_signal() => {
            info!("Received {}, shutting down", signal);
            // The blocking stdin reader keeps the runtime from shutting down.
            std::process::exit(0);
        }
    }

    Ok(())
}

async fn shutdown_signal() -> &'static str {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => "SIGINT",
        _ = terminate => "SIGTERM",
    }
}
