//! STDIO transport.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// Serve MCP over stdin/stdout until the host closes the stream.
pub async fn run(server: McpServer) -> TransportResult<()> {
    info!("Ready - serving {} over stdin/stdout", server.name());

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| TransportError::init(e.to_string()))?;

    let reason = service
        .waiting()
        .await
        .map_err(|e| TransportError::ServiceError(e.to_string()))?;

    info!("STDIO transport finished: {:?}", reason);
    Ok(())
}
