//! MCP server adapter.
//!
//! Exposes a single `get_weather` tool. Lookup failures come back as ordinary
//! text results; only malformed calls become protocol errors.

use std::sync::Arc;

use rmcp::ErrorData as McpError;
use rmcp::ServerHandler;
use rmcp::model::*;
use rmcp::service::{RequestContext, RoleServer};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use tracing::info;
use weather_core::WeatherLookup;

pub const SERVER_NAME: &str = "WeatherStation";
pub const GET_WEATHER: &str = "get_weather";

const GET_WEATHER_DESCRIPTION: &str = "查询指定城市的天气状况，数据来自 OpenWeatherMap 实时 API。";

/// Arguments of the `get_weather` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetWeatherArgs {
    /// City name, e.g. "Beijing" or "London,GB".
    pub city: String,
}

#[derive(Debug, Clone)]
pub struct WeatherStation {
    lookup: WeatherLookup,
}

impl WeatherStation {
    pub fn new(lookup: WeatherLookup) -> Self {
        Self { lookup }
    }

    pub fn tools() -> Result<Vec<Tool>, McpError> {
        Ok(vec![Tool {
            name: GET_WEATHER.into(),
            title: None,
            description: Some(GET_WEATHER_DESCRIPTION.into()),
            input_schema: input_schema::<GetWeatherArgs>()?,
            output_schema: None,
            annotations: Some(
                ToolAnnotations::new()
                    .read_only(true)
                    .destructive(false)
                    .open_world(true),
            ),
            icons: None,
        }])
    }

    pub async fn get_weather(&self, GetWeatherArgs { city }: GetWeatherArgs) -> CallToolResult {
        info!(%city, "get_weather called");
        let text = self.lookup.lookup(&city).await;
        CallToolResult::success(vec![Content::text(text)])
    }

    /// Route a tool call by name.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> Result<CallToolResult, McpError> {
        match name {
            GET_WEATHER => {
                let args: GetWeatherArgs = serde_json::from_value(arguments.into())
                    .map_err(|e| McpError::invalid_params(format!("Invalid arguments: {}", e), None))?;
                Ok(self.get_weather(args).await)
            }
            _ => Err(McpError::method_not_found::<CallToolRequestMethod>()),
        }
    }
}

fn input_schema<T: JsonSchema>() -> Result<Arc<serde_json::Map<String, serde_json::Value>>, McpError> {
    let schema = schema_for!(T);
    let json_value = serde_json::to_value(schema).map_err(|e| {
        McpError::internal_error(format!("Failed to serialize schema: {}", e), None)
    })?;
    let object = json_value
        .as_object()
        .ok_or_else(|| McpError::internal_error("Schema is not a JSON object", None))?
        .clone();
    Ok(Arc::new(object))
}

impl ServerHandler for WeatherStation {
    fn get_info(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: ProtocolVersion::V_2025_03_26,
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: Some("Weather Station".into()),
                icons: None,
                website_url: None,
            },
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Use get_weather with a city name to fetch the current conditions and \
                 temperature in Celsius from OpenWeatherMap."
                    .into(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: Self::tools()?,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = request.arguments.unwrap_or_default();
        self.dispatch(&request.name, arguments).await
    }
}
