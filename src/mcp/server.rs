/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin
/// 2. Processes tool calls against the journal
/// 3. Sends JSON-RPC responses to stdout

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::mcp::protocol::*;
use crate::tools::{self, ToolError};
use crate::{JournalServer, ServerError};

/// MCP server that handles communication with Claude
pub struct McpServer {
    journal: JournalServer,
    initialized: bool,
}

impl McpServer {
    pub fn new(journal: JournalServer) -> Self {
        Self {
            journal,
            initialized: false,
        }
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.handle_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Whether the client has completed the initialize handshake
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Returns None for blank lines and notifications.
    pub async fn handle_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        self.handle_request(request).await
    }

    async fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = match request.id {
            Some(id) => id,
            None => {
                self.handle_notification(&request.method);
                return None;
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                id,
                error_codes::INVALID_REQUEST,
                format!("Unsupported JSON-RPC version '{}'", request.jsonrpc),
                None,
            ));
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id, request.params),
            "initialized" => {
                self.initialized = true;
                JsonRpcResponse::success(id, Value::Null)
            }
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, json!({ "tools": tool_definitions() })),
            "tools/call" => self.handle_tools_call(id, request.params).await,
            _ => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        };

        Some(response)
    }

    fn handle_notification(&mut self, method: &str) {
        match method {
            "notifications/initialized" | "initialized" => {
                self.initialized = true;
                debug!("Client finished initialization");
            }
            other => debug!("Ignoring notification '{}'", other),
        }
    }

    fn handle_initialize(&mut self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: InitializeParams = params
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();

        match &params.client_info {
            Some(client) => info!(
                "MCP client connected: {} {} (protocol {})",
                client.name,
                client.version.as_deref().unwrap_or("?"),
                params.protocol_version.as_deref().unwrap_or("?")
            ),
            None => info!("MCP client connected"),
        }

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: false }),
            },
            server_info: ServerInfo {
                name: "Mood Journal MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        to_response(id, &result)
    }

    async fn handle_tools_call(&mut self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match params.map(serde_json::from_value) {
            Some(Ok(p)) => p,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid parameters: {}", e),
                    None,
                );
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        info!("Tool call: {}", tool_params.name);
        let result = self.call_tool(&tool_params.name, tool_params.arguments).await;
        to_response(id, &result)
    }

    /// Dispatch a tool by name
    async fn call_tool(&self, name: &str, args: Map<String, Value>) -> ToolCallResult {
        let outcome = match name {
            "journal_create" => self.call_journal_create(args).await,
            "journal_get" => self.call_journal_get(args),
            "journal_list" => self.call_journal_list(args),
            "journal_update" => self.call_journal_update(args).await,
            "journal_delete" => self.call_journal_delete(args),
            "journal_stats" => self.call_journal_stats(args),
            "journal_export" => self.call_journal_export(),
            "profile_get" => self.call_profile_get(),
            "profile_update" => self.call_profile_update(args),
            _ => return ToolCallResult::error(format!("Unknown tool: {}", name)),
        };

        match outcome {
            Ok(text) => ToolCallResult::success(text),
            Err(e) => {
                debug!("Tool {} failed: {}", name, e);
                ToolCallResult::error(e.to_string())
            }
        }
    }

    async fn call_journal_create(&self, args: Map<String, Value>) -> Result<String, ToolError> {
        let j = &self.journal;
        let response = tools::create_entry(j.storage(), j.analyzer(), j.clock(), j.user_id(), parse_args(args)?).await?;

        let mut text = format!(
            "📝 {}\nEntry ID: {}\n🔥 Streak: {} days (best {}) | 📚 Total entries: {}",
            response.message,
            response.entry.id,
            response.current_streak,
            response.longest_streak,
            response.total_entries
        );
        if !response.entry.summary.is_empty() {
            text.push_str(&format!("\n\n{}", response.entry.summary));
        }
        if !response.entry.suggestions.is_empty() {
            text.push_str("\n\n💡 Suggestions:");
            for suggestion in &response.entry.suggestions {
                text.push_str(&format!("\n- {}", suggestion));
            }
        }
        Ok(text)
    }

    fn call_journal_get(&self, args: Map<String, Value>) -> Result<String, ToolError> {
        let j = &self.journal;
        let entry = tools::get_entry(j.storage(), j.user_id(), parse_args(args)?)?;
        pretty(&entry)
    }

    fn call_journal_list(&self, args: Map<String, Value>) -> Result<String, ToolError> {
        let j = &self.journal;
        let response = tools::list_entries(j.storage(), j.user_id(), parse_args(args)?)?;

        if response.entries.is_empty() {
            return Ok("No journal entries found. Write your first entry to get started!".to_string());
        }

        let header = format!(
            "📋 **Journal Entries** (page {} of {}, {} total)\n\n",
            response.pagination.current_page, response.pagination.total_pages, response.pagination.total
        );
        let lines = response
            .entries
            .iter()
            .map(|e| {
                format!(
                    "🗓️ **{}** · {} ({})\n   {}\n   ID: {}",
                    e.date.format("%Y-%m-%d"),
                    e.mood,
                    e.sentiment,
                    preview(&e.text),
                    e.id
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(format!("{}{}", header, lines))
    }

    async fn call_journal_update(&self, args: Map<String, Value>) -> Result<String, ToolError> {
        let j = &self.journal;
        let response = tools::update_entry(j.storage(), j.analyzer(), j.clock(), j.user_id(), parse_args(args)?).await?;
        Ok(format!("✏️ {}\nEntry ID: {}", response.message, response.entry.id))
    }

    fn call_journal_delete(&self, args: Map<String, Value>) -> Result<String, ToolError> {
        let j = &self.journal;
        let response = tools::delete_entry(j.storage(), j.clock(), j.user_id(), parse_args(args)?)?;
        Ok(format!(
            "🗑️ {}\n📚 Total entries: {} | 🔥 Streak: {} days",
            response.message, response.total_entries, response.current_streak
        ))
    }

    fn call_journal_stats(&self, args: Map<String, Value>) -> Result<String, ToolError> {
        let j = &self.journal;
        let stats = tools::journal_stats(j.storage(), j.analytics(), j.clock(), j.user_id(), parse_args(args)?)?;
        Ok(format!("{}\n\n{}", stats.weekly_reflection, pretty(&stats)?))
    }

    fn call_journal_export(&self) -> Result<String, ToolError> {
        let j = &self.journal;
        let export = tools::export_entries(j.storage(), j.clock(), j.user_id())?;
        pretty(&export)
    }

    fn call_profile_get(&self) -> Result<String, ToolError> {
        let j = &self.journal;
        let profile = tools::get_profile(j.storage(), j.clock(), j.user_id())?;
        pretty(&profile)
    }

    fn call_profile_update(&self, args: Map<String, Value>) -> Result<String, ToolError> {
        let j = &self.journal;
        let profile = tools::update_profile(j.storage(), j.clock(), j.user_id(), parse_args(args)?)?;
        Ok(format!("✅ Preferences saved\n\n{}", pretty(&profile)?))
    }
}

/// Definitions for every tool this server exposes
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "journal_create".to_string(),
            description: "Write a journal entry. The text is analyzed for mood, sentiment, emotions and keywords, and streaks are updated".to_string(),
            input_schema: input_schema::<tools::CreateEntryParams>(),
        },
        ToolDefinition {
            name: "journal_get".to_string(),
            description: "Read a single journal entry with its analysis".to_string(),
            input_schema: input_schema::<tools::GetEntryParams>(),
        },
        ToolDefinition {
            name: "journal_list".to_string(),
            description: "List journal entries newest first, with optional mood and date filters and pagination".to_string(),
            input_schema: input_schema::<tools::ListEntriesParams>(),
        },
        ToolDefinition {
            name: "journal_update".to_string(),
            description: "Edit an entry's text or date. Changed text is analyzed again".to_string(),
            input_schema: input_schema::<tools::UpdateEntryParams>(),
        },
        ToolDefinition {
            name: "journal_delete".to_string(),
            description: "Delete a journal entry".to_string(),
            input_schema: input_schema::<tools::DeleteEntryParams>(),
        },
        ToolDefinition {
            name: "journal_stats".to_string(),
            description: "Mood distribution, 7-day mood trend, streaks, word counts and a reflection for the past week, month or year".to_string(),
            input_schema: input_schema::<tools::StatsParams>(),
        },
        ToolDefinition {
            name: "journal_export".to_string(),
            description: "Export every journal entry with its analysis as JSON".to_string(),
            input_schema: empty_schema(),
        },
        ToolDefinition {
            name: "profile_get".to_string(),
            description: "Show notification preferences and streak totals".to_string(),
            input_schema: empty_schema(),
        },
        ToolDefinition {
            name: "profile_update".to_string(),
            description: "Set name, e-mail, notification switch and daily reminder time".to_string(),
            input_schema: input_schema::<tools::ProfileUpdateParams>(),
        },
    ]
}

fn input_schema<T: JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(T)).unwrap_or_else(|_| empty_schema())
}

fn empty_schema() -> Value {
    json!({ "type": "object", "properties": {} })
}

fn parse_args<T: DeserializeOwned>(args: Map<String, Value>) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(args)).map_err(|e| ToolError::InvalidParams(e.to_string()))
}

fn pretty<T: Serialize>(value: &T) -> Result<String, ToolError> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn to_response<T: Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Could not encode result: {}", e),
            None,
        ),
    }
}

/// First line of an entry, cut to 80 characters
fn preview(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or("");
    if first_line.chars().count() > 80 {
        format!("{}…", first_line.chars().take(80).collect::<String>())
    } else {
        first_line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_definitions_have_object_schemas() {
        let tools = tool_definitions();
        assert_eq!(tools.len(), 9);
        for tool in &tools {
            assert_eq!(tool.input_schema["type"], json!("object"), "{}", tool.name);
        }

        let create = tools.iter().find(|t| t.name == "journal_create").unwrap();
        assert_eq!(create.input_schema["required"], json!(["text"]));
    }

    #[test]
    fn test_preview_truncates() {
        let long = "a".repeat(100);
        assert_eq!(preview(&long).chars().count(), 81);
        assert_eq!(preview("short\nsecond line"), "short");
    }
}
