//! MCP Tool implementations for cdsmigrate.
//!
//! This module defines the tools that are exposed via MCP, allowing LLMs
//! to find obsolete ABAP tables and get their CDS view replacements.

use cdsmigrate::analyzer::{CodeUnit, EmptyUnitPolicy, Migrator, UnitMeta};
use rmcp::{
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use std::sync::Arc;

/// One block of ABAP code with its origin.
#[derive(Debug, Clone, Default, serde::Deserialize, JsonSchema)]
pub struct UnitInput {
    /// Main program name.
    #[serde(default)]
    pub pgm_name: Option<String>,
    /// Include name.
    #[serde(default)]
    pub inc_name: Option<String>,
    /// Unit kind (METHOD, FORM, FUNCTION, ...).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Unit name.
    #[serde(default)]
    pub name: Option<String>,
    /// First line of the unit in its include.
    #[serde(default)]
    pub start_line: Option<usize>,
    /// Last line of the unit in its include.
    #[serde(default)]
    pub end_line: Option<usize>,
    /// ABAP source code.
    #[schemars(description = "ABAP source code of the unit")]
    #[serde(default)]
    pub code: Option<String>,
}

impl From<UnitInput> for CodeUnit {
    fn from(input: UnitInput) -> Self {
        CodeUnit::from_code(input.code.unwrap_or_default()).with_meta(UnitMeta {
            pgm_name: input.pgm_name.unwrap_or_default(),
            inc_name: input.inc_name.unwrap_or_default(),
            kind: input.kind.unwrap_or_default(),
            name: input.name.unwrap_or_default(),
            start_line: input.start_line.unwrap_or_default(),
            end_line: input.end_line.unwrap_or_default(),
        })
    }
}

/// Request parameters for `remediate_array` tool.
#[derive(Debug, serde::Deserialize, JsonSchema)]
pub struct RemediateArrayRequest {
    /// Units to scan.
    #[schemars(description = "Array of code units to scan")]
    pub units: Vec<UnitInput>,
    /// Keep units without findings in the result (default: false).
    #[schemars(description = "Whether units without findings are returned too")]
    #[serde(default)]
    pub include_empty: bool,
}

/// Request parameters for `remediate_code` tool.
#[derive(Debug, serde::Deserialize, JsonSchema)]
pub struct RemediateCodeRequest {
    /// The ABAP code to scan.
    #[schemars(description = "The ABAP code to scan")]
    pub code: String,
}

/// The main MCP server struct for cdsmigrate.
#[derive(Clone)]
pub struct CdsMigrateServer {
    migrator: Arc<Migrator>,
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
}

impl CdsMigrateServer {
    /// Creates a server using the built-in registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_migrator(Migrator::default())
    }

    /// Creates a server around a configured engine.
    #[must_use]
    pub fn with_migrator(migrator: Migrator) -> Self {
        Self {
            migrator: Arc::new(migrator),
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for CdsMigrateServer {
    fn default() -> Self {
        Self::new()
    }
}

fn json_result<T: serde::Serialize>(value: &T) -> CallToolResult {
    let json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!(r#"{{"error": "Serialization error: {e}"}}"#));
    CallToolResult::success(vec![Content::text(json)])
}

#[tool_router]
#[allow(clippy::unused_self, clippy::unnecessary_wraps)]
impl CdsMigrateServer {
    /// Scan a batch of code units for obsolete tables.
    ///
    /// # Errors
    ///
    /// Never fails; scan problems are reported in the result.
    #[tool(
        description = "Scan an array of ABAP code units for obsolete tables (e.g. J_1BBRANCH).\n\
        Each unit may carry pgm_name, inc_name, type, name, start_line, end_line and code.\n\
        Returns the units that have findings, each with a findings list holding the line, \
        message, suggested replacement code and a snippet."
    )]
    pub fn remediate_array(
        &self,
        params: Parameters<RemediateArrayRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        let units: Vec<CodeUnit> = req.units.into_iter().map(CodeUnit::from).collect();
        let policy = if req.include_empty {
            EmptyUnitPolicy::Include
        } else {
            self.migrator.empty_unit_policy
        };
        let results = self.migrator.scan_batch(&units, policy);
        Ok(json_result(&results))
    }

    /// Scan one ABAP snippet and return the findings and the rewritten code.
    ///
    /// # Errors
    ///
    /// Never fails; rewrite problems are reported as an error result.
    #[tool(
        description = "Scan an ABAP code snippet for obsolete tables and return the findings \
        together with the code rewritten to use the released CDS views."
    )]
    pub fn remediate_code(
        &self,
        params: Parameters<RemediateCodeRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        match self.migrator.fix_code(&req.code) {
            Ok((fixed_code, findings)) => Ok(json_result(&serde_json::json!({
                "findings": findings,
                "fixed_code": fixed_code,
            }))),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Rewrite error: {e}"
            ))])),
        }
    }

    /// Liveness check.
    ///
    /// # Errors
    ///
    /// Never fails.
    #[tool(description = "Health check. Returns {\"ok\": true}.")]
    pub fn health(&self) -> Result<CallToolResult, McpError> {
        Ok(json_result(&serde_json::json!({ "ok": true })))
    }
}

#[rmcp::tool_handler]
impl ServerHandler for CdsMigrateServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "cdsmigrate finds obsolete ABAP tables and suggests the released CDS views \
                 that replace them in S/4HANA.\n\n\
                 TOOLS AVAILABLE:\n\
                 • remediate_array - Scan many code units at once\n\
                 • remediate_code - Scan one snippet and get it rewritten\n\
                 • health - Check the server is up\n\n\
                 Suggestions are advisory: every rewrite carries a TODO comment asking \
                 for field mappings to be reviewed."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
