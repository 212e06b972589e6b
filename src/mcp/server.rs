//! MCP server implementation for the brutalist component registry.
//!
//! This module implements the MCP server lifecycle:
//!
//! 1. **Initialisation**: Capability negotiation and version agreement
//! 2. **Operation**: Handling tool calls and resource reads
//! 3. **Shutdown**: Graceful connection termination
//!
//! # Architecture
//!
//! Every tool is a single-hop translation: validate the argument shape, make
//! one (cached) registry fetch or one documentation read, reshape the JSON,
//! return it. The server holds no state beyond the lifecycle phase and the
//! registry client's response cache.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::docs::{self, DocsExtractor};
use crate::mcp::protocol::{
    ErrorCode, IncomingMessage, JsonRpcError, JsonRpcErrorData, JsonRpcNotification,
    JsonRpcRequest, JsonRpcResponse, RequestId, MCP_PROTOCOL_VERSION, SERVER_NAME,
};
use crate::mcp::transport::StdioTransport;
use crate::registry::{ComponentFile, RegistryClient, RegistryError, RegistryTransport};

/// Server state in the MCP lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Waiting for initialize request.
    AwaitingInit,
    /// Initialize received, waiting for initialized notification.
    Initialising,
    /// Ready for normal operation.
    Running,
    /// Shutdown in progress.
    ShuttingDown,
}

/// Server capabilities advertised during initialisation.
#[derive(Debug, Clone, Serialize)]
pub struct ServerCapabilities {
    /// Tool-related capabilities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolCapabilities>,
    /// Resource-related capabilities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceCapabilities>,
}

impl Default for ServerCapabilities {
    fn default() -> Self {
        Self {
            tools: Some(ToolCapabilities::default()),
            resources: Some(ResourceCapabilities::default()),
        }
    }
}

/// Tool-specific capabilities.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ToolCapabilities {
    /// Whether the tool list can change during the session.
    #[serde(rename = "listChanged", skip_serializing_if = "is_false")]
    pub list_changed: bool,
}

/// Resource-specific capabilities.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceCapabilities {
    /// Whether clients can subscribe to resource updates.
    #[serde(skip_serializing_if = "is_false")]
    pub subscribe: bool,
    /// Whether the resource list can change during the session.
    #[serde(rename = "listChanged", skip_serializing_if = "is_false")]
    pub list_changed: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde's skip_serializing_if requires a predicate fn(&T) -> bool, so we must take &bool here
const fn is_false(b: &bool) -> bool {
    !*b
}

/// Server information for initialisation response.
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Client information received during initialisation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    /// Client name.
    pub name: String,
    /// Client version.
    #[serde(default)]
    pub version: Option<String>,
}

/// Parameters for the initialize request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    /// Protocol version requested by client.
    pub protocol_version: String,
    /// Client capabilities.
    #[serde(default)]
    pub capabilities: Value,
    /// Client information.
    #[serde(default)]
    pub client_info: Option<ClientInfo>,
}

/// A tool definition for tools/list response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the tool's input parameters.
    pub input_schema: Value,
}

/// Parameters for tools/call request.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    /// Name of the tool to call.
    pub name: String,
    /// Arguments for the tool.
    #[serde(default)]
    pub arguments: Value,
}

/// A resource definition for resources/list response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDefinition {
    /// Resource URI.
    pub uri: String,
    /// Human-readable name.
    pub name: String,
    /// Description of the resource contents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// MIME type of the contents.
    pub mime_type: String,
}

/// Parameters for resources/read request.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceReadParams {
    /// URI of the resource to read.
    pub uri: String,
}

/// Content item in a tool call response.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
}

/// Result of a tool call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    /// Content returned by the tool.
    pub content: Vec<ToolContent>,
    /// Whether the tool call resulted in an error.
    #[serde(skip_serializing_if = "is_false")]
    pub is_error: bool,
}

impl ToolCallResult {
    /// Creates a successful text result.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Creates an error text result.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }

    /// Creates a successful result carrying pretty-printed JSON.
    #[must_use]
    pub fn json(value: &Value) -> Self {
        match serde_json::to_string_pretty(value) {
            Ok(text) => Self::text(text),
            Err(e) => Self::error(format!("Failed to serialise result: {e}")),
        }
    }
}

/// The MCP server for the brutalist component registry.
pub struct McpServer<T: RegistryTransport> {
    /// Current server state.
    state: ServerState,
    /// The transport layer.
    transport: StdioTransport,
    /// Negotiated protocol version (set after initialisation).
    protocol_version: Option<String>,
    /// Registry client (owns the response cache).
    registry: RegistryClient<T>,
    /// Documentation extractor.
    docs: DocsExtractor,
}

impl<T: RegistryTransport> McpServer<T> {
    /// Creates a new MCP server over the given registry client and extractor.
    #[must_use]
    pub fn new(registry: RegistryClient<T>, docs: DocsExtractor) -> Self {
        Self {
            state: ServerState::AwaitingInit,
            transport: StdioTransport::new(),
            protocol_version: None,
            registry,
            docs,
        }
    }

    /// Returns the current server state.
    #[must_use]
    pub const fn state(&self) -> ServerState {
        self.state
    }

    /// Runs the MCP server main loop with graceful shutdown handling.
    ///
    /// # Errors
    ///
    /// Returns an error if transport I/O fails.
    pub async fn run(&mut self) -> std::io::Result<()> {
        self.run_with_shutdown().await
    }

    /// Runs the main loop and handles shutdown.
    #[cfg(unix)]
    async fn run_with_shutdown(&mut self) -> std::io::Result<()> {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt()).map_err(std::io::Error::other)?;
        let mut sigterm = signal(SignalKind::terminate()).map_err(std::io::Error::other)?;

        loop {
            tokio::select! {
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT, initiating graceful shutdown");
                    self.state = ServerState::ShuttingDown;
                    return Ok(());
                }

                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, initiating graceful shutdown");
                    self.state = ServerState::ShuttingDown;
                    return Ok(());
                }

                line_result = self.transport.read_line() => {
                    if self.handle_transport_result(line_result).await? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Runs the main loop and handles shutdown.
    #[cfg(windows)]
    async fn run_with_shutdown(&mut self) -> std::io::Result<()> {
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = &mut ctrl_c => {
                    tracing::info!("Received Ctrl+C, initiating graceful shutdown");
                    self.state = ServerState::ShuttingDown;
                    return Ok(());
                }

                line_result = self.transport.read_line() => {
                    if self.handle_transport_result(line_result).await? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Handles the result from transport read.
    ///
    /// Returns `true` if the server should shut down.
    async fn handle_transport_result(
        &mut self,
        line_result: std::io::Result<Option<String>>,
    ) -> std::io::Result<bool> {
        let Some(line) = line_result? else {
            self.state = ServerState::ShuttingDown;
            return Ok(true);
        };

        if line.trim().is_empty() {
            return Ok(false);
        }

        self.handle_line(&line).await?;

        if self.state == ServerState::ShuttingDown {
            return Ok(true);
        }

        Ok(false)
    }

    /// Handles a single line of input.
    async fn handle_line(&mut self, line: &str) -> std::io::Result<()> {
        use crate::mcp::protocol::parse_message;

        match parse_message(line) {
            Ok(msg) => self.handle_message(msg).await,
            Err(error) => {
                self.transport.write_error(&error).await?;
                Ok(())
            }
        }
    }

    /// Handles a parsed incoming message.
    async fn handle_message(&mut self, msg: IncomingMessage) -> std::io::Result<()> {
        match msg {
            IncomingMessage::Request(req) => self.handle_request(req).await,
            IncomingMessage::Notification(ref notif) => {
                self.handle_notification(notif);
                Ok(())
            }
        }
    }

    /// Handles an incoming request.
    async fn handle_request(&mut self, req: JsonRpcRequest) -> std::io::Result<()> {
        let response = match req.method.as_str() {
            "initialize" => self.handle_initialize(&req),
            "tools/list" => self.handle_tools_list(&req),
            "tools/call" => self.handle_tools_call(&req).await,
            "resources/list" => self.handle_resources_list(&req),
            "resources/read" => self.handle_resources_read(&req).await,
            "ping" => Ok(Self::handle_ping(&req)),
            _ => Err(JsonRpcError::method_not_found(req.id.clone(), &req.method)),
        };

        match response {
            Ok(resp) => self.transport.write_response(&resp).await,
            Err(error) => self.transport.write_error(&error).await,
        }
    }

    /// Handles an incoming notification.
    fn handle_notification(&mut self, notif: &JsonRpcNotification) {
        if notif.method == "notifications/initialized" && self.state == ServerState::Initialising {
            self.state = ServerState::Running;
        }
    }

    /// Handles the initialize request.
    fn handle_initialize(&mut self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, JsonRpcError> {
        if self.state != ServerState::AwaitingInit {
            return Err(JsonRpcError::new(
                Some(req.id.clone()),
                JsonRpcErrorData::with_message(
                    ErrorCode::InvalidRequest,
                    "Server already initialised",
                ),
            ));
        }

        let _params: InitializeParams = req
            .params
            .as_ref()
            .map(|p| serde_json::from_value(p.clone()))
            .transpose()
            .map_err(|e| {
                JsonRpcError::invalid_params(
                    req.id.clone(),
                    format!("Invalid initialize params: {e}"),
                )
            })?
            .ok_or_else(|| {
                JsonRpcError::invalid_params(req.id.clone(), "Missing initialize params")
            })?;

        let negotiated_version = MCP_PROTOCOL_VERSION.to_string();

        self.protocol_version = Some(negotiated_version.clone());
        self.state = ServerState::Initialising;

        let result = json!({
            "protocolVersion": negotiated_version,
            "capabilities": ServerCapabilities::default(),
            "serverInfo": ServerInfo::default(),
        });

        Ok(JsonRpcResponse::success(req.id.clone(), result))
    }

    /// Handles the tools/list request.
    fn handle_tools_list(&self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, JsonRpcError> {
        self.require_running(&req.id)?;

        let result = json!({
            "tools": get_tool_definitions(),
        });

        Ok(JsonRpcResponse::success(req.id.clone(), result))
    }

    /// Handles the tools/call request.
    async fn handle_tools_call(
        &mut self,
        req: &JsonRpcRequest,
    ) -> Result<JsonRpcResponse, JsonRpcError> {
        self.require_running(&req.id)?;

        let params: ToolCallParams = req
            .params
            .as_ref()
            .map(|p| serde_json::from_value(p.clone()))
            .transpose()
            .map_err(|e| {
                JsonRpcError::invalid_params(
                    req.id.clone(),
                    format!("Invalid tool call params: {e}"),
                )
            })?
            .ok_or_else(|| {
                JsonRpcError::invalid_params(req.id.clone(), "Missing tool call params")
            })?;

        let result = match params.name.as_str() {
            // Registry query tools
            "list_components" => self.call_list_components().await,
            "get_component" => self.call_get_component(&params.arguments).await,
            "search_components" => self.call_search_components(&params.arguments).await,
            "get_component_examples" => self.call_get_component_examples(&params.arguments).await,
            "get_component_styles" => self.call_get_component_styles(&params.arguments).await,
            "get_categories" => self.call_get_categories().await,
            "get_components_by_category" => {
                self.call_get_components_by_category(&params.arguments).await
            }
            "get_featured_components" => self.call_get_featured_components().await,
            "get_registry_info" => self.call_get_registry_info().await,
            "get_install_command" => self.call_get_install_command(&params.arguments).await,
            // Documentation tools
            "get_component_documentation" => {
                self.call_get_component_documentation(&params.arguments).await
            }
            "search_documentation" => Self::call_search_documentation(&params.arguments),
            "get_documentation_sections" => Self::call_get_documentation_sections(),
            "get_accessibility_info" => self.call_get_accessibility_info(&params.arguments).await,
            // Unknown tool
            _ => ToolCallResult::error(format!("Unknown tool: {}", params.name)),
        };

        let result_value = serde_json::to_value(&result).map_err(|e| {
            tracing::error!(error = %e, "Failed to serialise tool call result");
            JsonRpcError::new(
                Some(req.id.clone()),
                JsonRpcErrorData::with_message(
                    ErrorCode::InternalError,
                    "Internal error: failed to serialise result",
                ),
            )
        })?;

        Ok(JsonRpcResponse::success(req.id.clone(), result_value))
    }

    /// Handles the resources/list request.
    fn handle_resources_list(&self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, JsonRpcError> {
        self.require_running(&req.id)?;

        let result = json!({
            "resources": get_resource_definitions(),
        });

        Ok(JsonRpcResponse::success(req.id.clone(), result))
    }

    /// Handles the resources/read request.
    ///
    /// Resource contents are regenerated per read; caching only happens
    /// inside the registry client.
    async fn handle_resources_read(
        &mut self,
        req: &JsonRpcRequest,
    ) -> Result<JsonRpcResponse, JsonRpcError> {
        self.require_running(&req.id)?;

        let params: ResourceReadParams = req
            .params
            .as_ref()
            .map(|p| serde_json::from_value(p.clone()))
            .transpose()
            .map_err(|e| {
                JsonRpcError::invalid_params(
                    req.id.clone(),
                    format!("Invalid resource read params: {e}"),
                )
            })?
            .ok_or_else(|| {
                JsonRpcError::invalid_params(req.id.clone(), "Missing resource read params")
            })?;

        let (mime_type, text) = match params.uri.as_str() {
            "registry://components" => {
                let index = self.fetch_index_for(&req.id).await?;
                let body = json!({
                    "total": index.components.len(),
                    "components": index.components,
                });
                ("application/json", pretty_or_internal(&req.id, &body)?)
            }
            "registry://categories" => {
                let index = self.fetch_index_for(&req.id).await?;
                let body = serde_json::to_value(crate::registry::query::categories(&index))
                    .map_err(|e| serialise_error(&req.id, &e))?;
                ("application/json", pretty_or_internal(&req.id, &body)?)
            }
            "registry://info" => {
                let index = self.fetch_index_for(&req.id).await?;
                let info = crate::registry::query::registry_info(&index);
                ("text/markdown", registry_info_markdown(&info))
            }
            "docs://sections" => {
                let body = json!({ "sections": docs::sections() });
                ("application/json", pretty_or_internal(&req.id, &body)?)
            }
            "docs://getting-started" => ("text/markdown", GETTING_STARTED.to_string()),
            other => {
                return Err(JsonRpcError::invalid_params(
                    req.id.clone(),
                    format!("Unknown resource URI: {other}"),
                ));
            }
        };

        let result = json!({
            "contents": [{
                "uri": params.uri,
                "mimeType": mime_type,
                "text": text,
            }],
        });

        Ok(JsonRpcResponse::success(req.id.clone(), result))
    }

    /// Handles the ping request.
    fn handle_ping(req: &JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(req.id.clone(), json!({}))
    }

    /// Ensures the server is in the Running state.
    fn require_running(&self, id: &RequestId) -> Result<(), JsonRpcError> {
        if self.state != ServerState::Running {
            return Err(JsonRpcError::new(
                Some(id.clone()),
                JsonRpcErrorData::with_message(ErrorCode::InvalidRequest, "Server not initialised"),
            ));
        }
        Ok(())
    }

    /// Fetches the index for a resource read, mapping registry failures to
    /// protocol-level internal errors.
    async fn fetch_index_for(
        &self,
        id: &RequestId,
    ) -> Result<crate::registry::RegistryIndex, JsonRpcError> {
        self.registry
            .fetch_index()
            .await
            .map_err(|e| JsonRpcError::internal_error(id.clone(), e.to_string()))
    }

    // =========================================================================
    // Tool handlers
    // =========================================================================

    /// Lists every component in the registry index.
    async fn call_list_components(&self) -> ToolCallResult {
        match self.registry.fetch_index().await {
            Ok(index) => ToolCallResult::json(&json!({
                "registry": index.name,
                "total": index.components.len(),
                "components": index.components,
            })),
            Err(e) => registry_error(&e),
        }
    }

    /// Fetches one component's full detail document.
    async fn call_get_component(&self, arguments: &Value) -> ToolCallResult {
        let Some(name) = arguments.get("componentName").and_then(Value::as_str) else {
            return ToolCallResult::error("Missing required parameter: componentName");
        };

        match self.registry.fetch_component(name).await {
            Ok(detail) => serialisable(&detail),
            Err(e) => registry_error(&e),
        }
    }

    /// Searches components by text, category, and featured flag.
    async fn call_search_components(&self, arguments: &Value) -> ToolCallResult {
        let Some(query) = arguments.get("query").and_then(Value::as_str) else {
            return ToolCallResult::error("Missing required parameter: query");
        };
        let category = arguments.get("category").and_then(Value::as_str);
        let featured = arguments.get("featured").and_then(Value::as_bool);

        match self.registry.search(query, category, featured).await {
            Ok(response) => serialisable(&response),
            Err(e) => registry_error(&e),
        }
    }

    /// Returns example code for a component.
    ///
    /// Example-flavoured files from the detail document win; when the detail
    /// carries none, the scraped documentation examples serve as fallback.
    async fn call_get_component_examples(&self, arguments: &Value) -> ToolCallResult {
        let Some(name) = arguments.get("componentName").and_then(Value::as_str) else {
            return ToolCallResult::error("Missing required parameter: componentName");
        };

        let detail = match self.registry.fetch_component(name).await {
            Ok(detail) => detail,
            Err(e) => return registry_error(&e),
        };

        let registry_examples: Vec<Value> = detail
            .files
            .iter()
            .filter(|f| is_example_file(f))
            .map(|f| {
                json!({
                    "source": "registry",
                    "file": f.identifier(),
                    "language": f.language,
                    "content": f.content,
                })
            })
            .collect();

        let examples = if registry_examples.is_empty() {
            self.docs
                .extract(name)
                .await
                .examples
                .into_iter()
                .map(|content| json!({ "source": "documentation", "content": content }))
                .collect()
        } else {
            registry_examples
        };

        ToolCallResult::json(&json!({
            "component": name,
            "total": examples.len(),
            "examples": examples,
        }))
    }

    /// Returns stylesheet files and brutalist styling flags for a component.
    async fn call_get_component_styles(&self, arguments: &Value) -> ToolCallResult {
        let Some(name) = arguments.get("componentName").and_then(Value::as_str) else {
            return ToolCallResult::error("Missing required parameter: componentName");
        };

        match self.registry.fetch_component(name).await {
            Ok(detail) => {
                let styles: Vec<Value> = detail
                    .files
                    .iter()
                    .filter(|f| is_style_file(f))
                    .map(|f| {
                        json!({
                            "file": f.identifier(),
                            "content": f.content,
                        })
                    })
                    .collect();

                ToolCallResult::json(&json!({
                    "component": name,
                    "brutalistFeatures": detail.brutalist_features,
                    "total": styles.len(),
                    "styles": styles,
                }))
            }
            Err(e) => registry_error(&e),
        }
    }

    /// Lists all categories with component counts.
    async fn call_get_categories(&self) -> ToolCallResult {
        match self.registry.categories().await {
            Ok(response) => serialisable(&response),
            Err(e) => registry_error(&e),
        }
    }

    /// Lists components in one category.
    async fn call_get_components_by_category(&self, arguments: &Value) -> ToolCallResult {
        let Some(category) = arguments.get("category").and_then(Value::as_str) else {
            return ToolCallResult::error("Missing required parameter: category");
        };

        match self.registry.components_by_category(category).await {
            Ok(response) => serialisable(&response),
            Err(e) => registry_error(&e),
        }
    }

    /// Lists the featured components.
    async fn call_get_featured_components(&self) -> ToolCallResult {
        match self.registry.featured_components().await {
            Ok(response) => serialisable(&response),
            Err(e) => registry_error(&e),
        }
    }

    /// Returns registry identity and aggregate statistics.
    async fn call_get_registry_info(&self) -> ToolCallResult {
        match self.registry.registry_info().await {
            Ok(response) => serialisable(&response),
            Err(e) => registry_error(&e),
        }
    }

    /// Shapes the install command and dependency list for a component.
    async fn call_get_install_command(&self, arguments: &Value) -> ToolCallResult {
        let Some(name) = arguments.get("componentName").and_then(Value::as_str) else {
            return ToolCallResult::error("Missing required parameter: componentName");
        };

        match self.registry.fetch_component(name).await {
            Ok(detail) => {
                let dependencies = detail
                    .dependencies
                    .as_ref()
                    .map(crate::registry::model::Dependencies::names)
                    .unwrap_or_default();
                let files: Vec<&str> =
                    detail.files.iter().map(ComponentFile::identifier).collect();

                ToolCallResult::json(&json!({
                    "component": name,
                    "command": format!(
                        "npx shadcn@latest add {}/{name}.json",
                        self.registry.base_url()
                    ),
                    "dependencies": dependencies,
                    "files": files,
                }))
            }
            Err(e) => registry_error(&e),
        }
    }

    /// Returns the scraped documentation record for a component.
    ///
    /// Missing documentation is not an error: a default record comes back.
    async fn call_get_component_documentation(&self, arguments: &Value) -> ToolCallResult {
        let Some(name) = arguments.get("componentName").and_then(Value::as_str) else {
            return ToolCallResult::error("Missing required parameter: componentName");
        };

        let record = self.docs.extract(name).await;
        serialisable(&record)
    }

    /// Searches the static documentation catalog.
    fn call_search_documentation(arguments: &Value) -> ToolCallResult {
        let Some(query) = arguments.get("query").and_then(Value::as_str) else {
            return ToolCallResult::error("Missing required parameter: query");
        };
        // The tool schema reuses "category" for the section filter.
        let section = arguments.get("category").and_then(Value::as_str);

        let results = docs::search_documentation(query, section);
        ToolCallResult::json(&json!({
            "query": query,
            "section": section,
            "total": results.len(),
            "results": results,
        }))
    }

    /// Returns the static documentation catalog.
    fn call_get_documentation_sections() -> ToolCallResult {
        let sections = docs::sections();
        ToolCallResult::json(&json!({
            "total": sections.len(),
            "sections": sections,
        }))
    }

    /// Returns the accessibility notes for a component.
    ///
    /// Components without scraped accessibility notes get empty lists, never
    /// an error.
    async fn call_get_accessibility_info(&self, arguments: &Value) -> ToolCallResult {
        let Some(name) = arguments.get("componentName").and_then(Value::as_str) else {
            return ToolCallResult::error("Missing required parameter: componentName");
        };

        let record = self.docs.extract(name).await;
        let accessibility = record.accessibility.unwrap_or_default();
        ToolCallResult::json(&json!({
            "component": name,
            "accessibility": accessibility,
        }))
    }
}

/// Serialises a typed response into a pretty-printed tool result.
fn serialisable<S: Serialize>(value: &S) -> ToolCallResult {
    match serde_json::to_value(value) {
        Ok(value) => ToolCallResult::json(&value),
        Err(e) => ToolCallResult::error(format!("Failed to serialise result: {e}")),
    }
}

/// Maps a registry failure to a tool error result.
fn registry_error(error: &RegistryError) -> ToolCallResult {
    ToolCallResult::error(error.to_string())
}

/// Pretty-prints a JSON value for a resource read, mapping serialisation
/// failures to an internal error.
fn pretty_or_internal(id: &RequestId, value: &Value) -> Result<String, JsonRpcError> {
    serde_json::to_string_pretty(value).map_err(|e| serialise_error(id, &e))
}

fn serialise_error(id: &RequestId, error: &serde_json::Error) -> JsonRpcError {
    tracing::error!(error = %error, "Failed to serialise resource contents");
    JsonRpcError::internal_error(id.clone(), "Internal error: failed to serialise result")
}

/// Registry file entries that carry example code.
fn is_example_file(file: &ComponentFile) -> bool {
    let id = file.identifier().to_lowercase();
    file.kind
        .as_deref()
        .is_some_and(|k| k.contains("example") || k.contains("demo"))
        || id.contains("example")
        || id.contains("demo")
}

/// Registry file entries that carry styling.
fn is_style_file(file: &ComponentFile) -> bool {
    file.language
        .as_deref()
        .is_some_and(|l| l.eq_ignore_ascii_case("css"))
        || file.identifier().to_lowercase().ends_with(".css")
}

/// Renders the registry overview resource as markdown.
fn registry_info_markdown(info: &crate::registry::query::RegistryInfoResponse) -> String {
    let last_updated = info.stats.last_updated.as_deref().unwrap_or("unknown");

    format!(
        "# {}\n\n{}\n\n\
         - Version: {}\n\
         - Framework: {}\n\
         - Components: {} ({} featured)\n\
         - Categories: {}\n\
         - Last updated: {}\n",
        info.registry.name,
        info.registry.description,
        info.registry.version,
        info.registry.framework,
        info.stats.total_components,
        info.stats.featured_components,
        info.stats.categories_count,
        last_updated,
    )
}

/// Static getting-started resource.
const GETTING_STARTED: &str = "\
# Getting Started

Brutalist components are distributed through a shadcn-compatible registry.

## Install a component

```sh
npx shadcn@latest add <registry-url>/button.json
```

## Browse

Use the `list_components`, `search_components`, and `get_categories` tools to
explore the registry, and `get_component` to inspect a single component's
files and dependencies before installing.

## Documentation

`get_component_documentation` returns scraped usage notes, code examples, and
accessibility guidance where a documentation page exists; components without
one return a minimal placeholder record.
";

/// Returns the list of available tools.
#[allow(clippy::too_many_lines)]
fn get_tool_definitions() -> Vec<ToolDefinition> {
    let component_name_schema = json!({
        "type": "object",
        "properties": {
            "componentName": {
                "type": "string",
                "description": "Component name (e.g. 'button')"
            }
        },
        "required": ["componentName"]
    });
    let no_args_schema = json!({
        "type": "object",
        "properties": {}
    });

    vec![
        // === Registry queries ===
        ToolDefinition {
            name: "list_components".to_string(),
            description: Some(
                "List every component in the registry with its title, description, \
                 categories, and featured flag."
                    .to_string(),
            ),
            input_schema: no_args_schema.clone(),
        },
        ToolDefinition {
            name: "get_component".to_string(),
            description: Some(
                "Get the full detail document for one component: files, dependencies, \
                 brutalist styling flags, categories, and tags."
                    .to_string(),
            ),
            input_schema: component_name_schema.clone(),
        },
        ToolDefinition {
            name: "search_components".to_string(),
            description: Some(
                "Search components by free text (matched case-insensitively against \
                 name, title, and description), optionally filtered by category and \
                 featured flag. A blank query matches everything."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search text; blank applies no text filter"
                    },
                    "category": {
                        "type": "string",
                        "description": "Optional: restrict to one category key"
                    },
                    "featured": {
                        "type": "boolean",
                        "description": "Optional: restrict by featured flag"
                    }
                },
                "required": ["query"]
            }),
        },
        ToolDefinition {
            name: "get_component_examples".to_string(),
            description: Some(
                "Get example code for a component, from its registry files or from the \
                 documentation pages."
                    .to_string(),
            ),
            input_schema: component_name_schema.clone(),
        },
        ToolDefinition {
            name: "get_component_styles".to_string(),
            description: Some(
                "Get a component's stylesheet files and brutalist styling flags \
                 (theme, shadows, borders)."
                    .to_string(),
            ),
            input_schema: component_name_schema.clone(),
        },
        ToolDefinition {
            name: "get_categories".to_string(),
            description: Some(
                "List all registry categories with per-category component counts."
                    .to_string(),
            ),
            input_schema: no_args_schema.clone(),
        },
        ToolDefinition {
            name: "get_components_by_category".to_string(),
            description: Some("List the components belonging to one category key.".to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "description": "Category key (e.g. 'forms')"
                    }
                },
                "required": ["category"]
            }),
        },
        ToolDefinition {
            name: "get_featured_components".to_string(),
            description: Some("List the curated (featured) components.".to_string()),
            input_schema: no_args_schema.clone(),
        },
        ToolDefinition {
            name: "get_registry_info".to_string(),
            description: Some(
                "Get registry identity and aggregate statistics (component, featured, \
                 and category counts, last update time)."
                    .to_string(),
            ),
            input_schema: no_args_schema.clone(),
        },
        ToolDefinition {
            name: "get_install_command".to_string(),
            description: Some(
                "Get the CLI command that installs a component, plus its dependencies \
                 and the files it would add."
                    .to_string(),
            ),
            input_schema: component_name_schema.clone(),
        },
        // === Documentation ===
        ToolDefinition {
            name: "get_component_documentation".to_string(),
            description: Some(
                "Get the documentation record for a component: title, description, \
                 prose content, code examples, and accessibility notes. Components \
                 without a documentation page return a minimal placeholder."
                    .to_string(),
            ),
            input_schema: component_name_schema.clone(),
        },
        ToolDefinition {
            name: "search_documentation".to_string(),
            description: Some(
                "Search the documentation catalog (guides, components, api) for a \
                 term. Returns 'section/item' paths."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search text"
                    },
                    "category": {
                        "type": "string",
                        "description": "Optional: restrict to one section (guides, components, api)"
                    }
                },
                "required": ["query"]
            }),
        },
        ToolDefinition {
            name: "get_documentation_sections".to_string(),
            description: Some(
                "List the documentation catalog: sections and their item slugs.".to_string(),
            ),
            input_schema: no_args_schema,
        },
        ToolDefinition {
            name: "get_accessibility_info".to_string(),
            description: Some(
                "Get a component's accessibility notes: keyboard support, ARIA \
                 attributes, and best practices. Empty lists when the documentation \
                 page carries none."
                    .to_string(),
            ),
            input_schema: component_name_schema,
        },
    ]
}

/// Returns the list of available resources.
fn get_resource_definitions() -> Vec<ResourceDefinition> {
    vec![
        ResourceDefinition {
            uri: "registry://components".to_string(),
            name: "Component list".to_string(),
            description: Some("Every component in the registry index".to_string()),
            mime_type: "application/json".to_string(),
        },
        ResourceDefinition {
            uri: "registry://categories".to_string(),
            name: "Categories".to_string(),
            description: Some("Registry categories with component counts".to_string()),
            mime_type: "application/json".to_string(),
        },
        ResourceDefinition {
            uri: "registry://info".to_string(),
            name: "Registry overview".to_string(),
            description: Some("Registry identity and statistics as markdown".to_string()),
            mime_type: "text/markdown".to_string(),
        },
        ResourceDefinition {
            uri: "docs://sections".to_string(),
            name: "Documentation sections".to_string(),
            description: Some("The static documentation catalog".to_string()),
            mime_type: "application/json".to_string(),
        },
        ResourceDefinition {
            uri: "docs://getting-started".to_string(),
            name: "Getting started".to_string(),
            description: Some("How to browse and install components".to_string()),
            mime_type: "text/markdown".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_definitions_cover_the_full_surface() {
        let tools = get_tool_definitions();
        let names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "list_components",
                "get_component",
                "search_components",
                "get_component_examples",
                "get_component_styles",
                "get_categories",
                "get_components_by_category",
                "get_featured_components",
                "get_registry_info",
                "get_install_command",
                "get_component_documentation",
                "search_documentation",
                "get_documentation_sections",
                "get_accessibility_info",
            ]
        );
    }

    #[test]
    fn tool_schemas_declare_required_params() {
        for tool in get_tool_definitions() {
            let schema = &tool.input_schema;
            assert_eq!(schema["type"], "object", "tool {}", tool.name);
            if let Some(required) = schema.get("required").and_then(Value::as_array) {
                for field in required {
                    let name = field.as_str().unwrap();
                    assert!(
                        schema["properties"].get(name).is_some(),
                        "tool {} requires undeclared field {name}",
                        tool.name
                    );
                }
            }
        }
    }

    #[test]
    fn resource_definitions_cover_five_uris() {
        let resources = get_resource_definitions();
        let uris: Vec<_> = resources.iter().map(|r| r.uri.as_str()).collect();
        assert_eq!(
            uris,
            vec![
                "registry://components",
                "registry://categories",
                "registry://info",
                "docs://sections",
                "docs://getting-started",
            ]
        );
    }

    #[test]
    fn capabilities_advertise_tools_and_resources() {
        let caps = serde_json::to_value(ServerCapabilities::default()).unwrap();
        assert!(caps.get("tools").is_some());
        assert!(caps.get("resources").is_some());
    }

    #[test]
    fn tool_result_error_flag_serialises_only_when_set() {
        let ok = serde_json::to_value(ToolCallResult::text("fine")).unwrap();
        assert!(ok.get("isError").is_none());

        let err = serde_json::to_value(ToolCallResult::error("broken")).unwrap();
        assert_eq!(err["isError"], true);
    }

    #[test]
    fn example_file_detection() {
        let mk = |path: &str, kind: Option<&str>| ComponentFile {
            path: Some(path.to_string()),
            name: None,
            kind: kind.map(str::to_string),
            target: None,
            language: None,
            content: String::new(),
        };
        assert!(is_example_file(&mk("x.tsx", Some("registry:example"))));
        assert!(is_example_file(&mk("demos/button-demo.tsx", None)));
        assert!(!is_example_file(&mk(
            "components/ui/button.tsx",
            Some("registry:ui")
        )));
    }

    #[test]
    fn style_file_detection() {
        let mk = |path: &str, language: Option<&str>| ComponentFile {
            path: Some(path.to_string()),
            name: None,
            kind: None,
            target: None,
            language: language.map(str::to_string),
            content: String::new(),
        };
        assert!(is_style_file(&mk("button.css", None)));
        assert!(is_style_file(&mk("button.styles", Some("css"))));
        assert!(!is_style_file(&mk("button.tsx", Some("tsx"))));
    }

    #[test]
    fn registry_info_markdown_handles_missing_timestamp() {
        let info = crate::registry::query::RegistryInfoResponse {
            registry: crate::registry::query::RegistrySummary {
                name: "r".to_string(),
                description: "d".to_string(),
                version: "1".to_string(),
                framework: "react".to_string(),
                base_url: String::new(),
            },
            stats: crate::registry::query::RegistryStats {
                total_components: 2,
                featured_components: 1,
                categories_count: 3,
                last_updated: None,
            },
        };
        let markdown = registry_info_markdown(&info);
        assert!(markdown.starts_with("# r"));
        assert!(markdown.contains("Last updated: unknown"));
    }
}
