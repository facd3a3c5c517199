//! MCP server implementation for ayat.
//!
//! Exposes verse search and sura reading as MCP tools for AI editors.

use std::borrow::Cow;

use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, ErrorCode, ErrorData as McpError, ServerCapabilities, ServerInfo,
    },
    schemars, tool, tool_handler, tool_router,
    transport::stdio,
};
use serde::Deserialize;

use crate::cli::display::{render_search, render_sura, render_translators};
use crate::commands;
use crate::config::Config;

/// Parameters for `search_verses` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchParams {
    #[schemars(description = "Words that must all appear, or a /pattern/flags regular expression")]
    pub query: String,
    #[schemars(description = "Translator keys to search (default: all)")]
    pub translators: Option<Vec<String>>,
}

/// Parameters for `read_sura` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SuraParams {
    #[schemars(description = "Sura number (1-114)")]
    pub sura: u16,
    #[schemars(description = "Translator keys to show (default: all)")]
    pub translators: Option<Vec<String>>,
}

/// MCP server exposing ayat tools.
#[derive(Clone)]
pub struct AyatServer {
    tool_router: ToolRouter<Self>,
}

impl Default for AyatServer {
    fn default() -> Self {
        Self::new()
    }
}

fn internal_error(context: &str, e: &anyhow::Error) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(format!("{context}: {e}")),
        data: None,
    }
}

#[tool_router]
impl AyatServer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Search the Quran translations for verses matching a query")]
    async fn search_verses(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        let config = Config::load().map_err(|e| internal_error("Config failed", &e))?;
        let keys = params.translators.unwrap_or_default();

        match commands::search(&config, &params.query, &keys, |_| {}).await {
            Ok(result) => Ok(CallToolResult::success(vec![Content::text(render_search(
                &result,
            ))])),
            Err(e) => Err(internal_error("Search failed", &e)),
        }
    }

    #[tool(description = "Show every verse of one sura side by side across translations")]
    async fn read_sura(
        &self,
        Parameters(params): Parameters<SuraParams>,
    ) -> Result<CallToolResult, McpError> {
        let config = Config::load().map_err(|e| internal_error("Config failed", &e))?;
        let keys = params.translators.unwrap_or_default();

        match commands::read_sura(&config, params.sura, &keys) {
            Ok(view) => Ok(CallToolResult::success(vec![Content::text(render_sura(
                &view,
            ))])),
            Err(e) => Err(internal_error("Failed to read sura", &e)),
        }
    }

    #[tool(description = "List the available translators")]
    async fn list_translators(&self) -> Result<CallToolResult, McpError> {
        let config = Config::load().map_err(|e| internal_error("Config failed", &e))?;
        let output = render_translators(&commands::list_translators(&config));
        Ok(CallToolResult::success(vec![Content::text(output)]))
    }
}

#[tool_handler]
impl ServerHandler for AyatServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "ayat searches five Chinese translations of the Quran in parallel. \
                Use search_verses with words (all must appear) or /pattern/flags, \
                read_sura to compare a whole sura, and list_translators for translator keys."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Start the MCP server with stdio transport.
///
/// # Errors
///
/// Returns an error if the server fails to start or encounters a fatal error.
pub async fn serve() -> anyhow::Result<()> {
    let server = AyatServer::new();
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
