//! Command-line interface entry point for cdsmigrate.

use anyhow::Result;
use cdsmigrate::analyzer::Migrator;
use cdsmigrate::config::Config;
use cdsmigrate::entry_point;
use cdsmigrate_mcp::CdsMigrateServer;
use rmcp::ServiceExt;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // The MCP server needs an async runtime, so it is started here rather
    // than in the library entry point.
    if args.first().is_some_and(|a| a == "mcp-server") {
        return run_mcp_server();
    }

    let code = entry_point::run_with_args(args)?;
    std::process::exit(code);
}

fn run_mcp_server() -> Result<()> {
    let migrator = Migrator::from_config(&Config::load())?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let server = CdsMigrateServer::with_migrator(migrator);
        let service = server
            .serve((tokio::io::stdin(), tokio::io::stdout()))
            .await?;
        service.waiting().await?;
        Ok::<(), anyhow::Error>(())
    })
}
