//! MCP server exposing cdsmigrate to LLM clients.

/// Tool definitions and the server handler.
pub mod tools;

pub use tools::CdsMigrateServer;
