//! cdsmigrate MCP Server
//!
//! This binary exposes cdsmigrate's obsolete table remediation as MCP tools.

use anyhow::Result;
use cdsmigrate::analyzer::Migrator;
use cdsmigrate::config::Config;
use cdsmigrate_mcp::CdsMigrateServer;
use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};

/// Main entry point for the MCP server.
///
/// Starts the server using stdio transport, which is the standard way
/// for MCP clients like Claude Desktop to communicate with servers.
#[tokio::main]
async fn main() -> Result<()> {
    let migrator = Migrator::from_config(&Config::load())?;
    let server = CdsMigrateServer::with_migrator(migrator);

    let transport = (stdin(), stdout());
    let service = server.serve(transport).await?;
    service.waiting().await?;

    Ok(())
}
