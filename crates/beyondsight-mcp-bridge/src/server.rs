use crate::{
    config::BridgeConfig,
    logging,
    mcp::{LineTransport, McpProtocol, McpResponse},
    router::MethodRouter,
};
use anyhow::{Context, Result};
use beyondsight_api::ToolsClient;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::task::JoinSet;
use tracing::{error, info, Instrument};
use uuid::Uuid;

/// The stdio MCP bridge.
///
/// Each input line is handled on its own task so slow backend calls do not
/// hold up later lines. Responses are written in completion order.
pub struct McpBridgeServer {
    router: Arc<MethodRouter>,
    max_in_flight: Option<usize>,
}

impl McpBridgeServer {
    /// Creates a new `McpBridgeServer`.
    pub fn new(config: &BridgeConfig) -> Result<Self> {
        let client =
            ToolsClient::new(config.api.clone()).context("failed to build backend HTTP client")?;
        let router = Arc::new(MethodRouter::with_default_handlers(client));
        Ok(Self::with_router(router).with_max_in_flight(config.max_in_flight))
    }

    pub fn with_router(router: Arc<MethodRouter>) -> Self {
        Self {
            router,
            max_in_flight: None,
        }
    }

    pub fn with_max_in_flight(mut self, limit: Option<usize>) -> Self {
        self.max_in_flight = limit;
        self
    }

    /// Runs the bridge on the process's stdin and stdout.
    pub async fn run(&self) -> Result<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serves until `reader` is exhausted and every pending line is answered.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut transport = LineTransport::new(reader, writer);
        let mut in_flight: JoinSet<Option<McpResponse>> = JoinSet::new();
        let mut input_closed = false;
        let mut read_error = None;

        loop {
            let accepting = !input_closed
                && self
                    .max_in_flight
                    .map_or(true, |limit| in_flight.len() < limit);

            tokio::select! {
                line = transport.read_line(), if accepting => {
                    match line {
                        Ok(Some(line)) if line.is_empty() => {}
                        Ok(Some(line)) => self.spawn_line(&mut in_flight, line),
                        Ok(None) => {
                            info!(pending = in_flight.len(), "Input stream closed");
                            input_closed = true;
                        }
                        Err(e) => {
                            // Answer what is already pending before giving up.
                            error!(error = %e, pending = in_flight.len(), "failed to read from input");
                            input_closed = true;
                            read_error = Some(e);
                        }
                    }
                }
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    match joined {
                        Ok(Some(response)) => {
                            let json = McpProtocol::serialize(&response)
                                .context("failed to serialize response")?;
                            transport
                                .write_line(&json)
                                .await
                                .context("failed to write to output")?;
                        }
                        Ok(None) => {}
                        Err(e) => error!(error = %e, "request task failed"),
                    }
                }
                else => break,
            }
        }

        info!("MCP Bridge stopped");
        match read_error {
            Some(e) => Err(e).context("failed to read from input"),
            None => Ok(()),
        }
    }

    fn spawn_line(&self, in_flight: &mut JoinSet<Option<McpResponse>>, line: String) {
        let router = self.router.clone();
        let request_id = Uuid::new_v4().to_string();
        let span = logging::request_span(&request_id, "stdio");
        in_flight.spawn(async move { router.handle_line(&line).await }.instrument(span));
    }
}
