//! MCP tool server exposing the insured tools over stdio.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use nowcerts_common::{InsuredRecord, ListQuery};
use nowcerts_tools::{InsuredTools, insert_text};

/// Server name advertised during initialization.
pub const SERVER_NAME: &str = "NowCerts Server";

const INSTRUCTIONS: &str = "You can manage insured records for the NowCerts agency. \
Use get_insured_list to list existing insureds (newest changes first) and \
insert_insured to add a new insured. Confirm the details with the user \
before inserting.";

/// MCP handler for the insured tools.
#[derive(Clone)]
pub struct InsuredServer {
    tools: Arc<InsuredTools>,
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for InsuredServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsuredServer")
            .field("tools", &self.tools)
            .finish_non_exhaustive()
    }
}

#[tool_router]
impl InsuredServer {
    #[must_use]
    pub fn new(tools: Arc<InsuredTools>) -> Self {
        Self {
            tools,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "List insured records from NowCerts, newest changes first. \
Returns up to five records. Results may be cached for a few minutes."
    )]
    async fn get_insured_list(
        &self,
        Parameters(query): Parameters<ListQuery>,
    ) -> Result<CallToolResult, McpError> {
        let text = self.tools.list(query).await.into_text();
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(
        description = "Insert a new insured record into NowCerts. \
database_id, first_name and last_name are required."
    )]
    async fn insert_insured(
        &self,
        Parameters(record): Parameters<InsuredRecord>,
    ) -> Result<CallToolResult, McpError> {
        let text = insert_text(&self.tools.insert(&record).await);
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for InsuredServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}
