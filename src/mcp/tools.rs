//! The Garoon tool catalog and dispatch.
//!
//! Each tool is a static descriptor (name, description, parameter specs);
//! `dispatch` validates arguments against the specs and routes to the
//! matching client operation. Tools hold no state of their own, so any
//! number of calls can run concurrently against the shared client.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::garoon::{GaroonClient, GaroonError};
use crate::mcp::schema::{ParamKind, ParamSpec, input_schema, validate};
use crate::mcp::types::Tool;

pub struct ToolDef {
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
}

pub const TOOLS: &[ToolDef] = &[
    ToolDef {
        name: "get_schedule",
        description: "Get schedule events from Garoon for yourself or another user",
        params: &[
            ParamSpec {
                name: "start_date",
                kind: ParamKind::String,
                required: true,
                default: None,
                description: "Start date (YYYY-MM-DD format)",
            },
            ParamSpec {
                name: "end_date",
                kind: ParamKind::String,
                required: true,
                default: None,
                description: "End date (YYYY-MM-DD format)",
            },
            ParamSpec {
                name: "user_id",
                kind: ParamKind::String,
                required: false,
                default: None,
                description: "User ID to get the schedule for. Omit for your own schedule; use search_users to find IDs.",
            },
        ],
    },
    ToolDef {
        name: "create_schedule",
        description: "Create a new schedule event in Garoon",
        params: &[
            ParamSpec {
                name: "subject",
                kind: ParamKind::String,
                required: true,
                default: None,
                description: "Event subject/title",
            },
            ParamSpec {
                name: "start_datetime",
                kind: ParamKind::String,
                required: true,
                default: None,
                description: "Start datetime (ISO 8601)",
            },
            ParamSpec {
                name: "end_datetime",
                kind: ParamKind::String,
                required: true,
                default: None,
                description: "End datetime (ISO 8601)",
            },
            ParamSpec {
                name: "description",
                kind: ParamKind::String,
                required: false,
                default: None,
                description: "Event description (optional)",
            },
        ],
    },
    ToolDef {
        name: "get_messages",
        description: "List Garoon messages in a folder",
        params: &[
            ParamSpec {
                name: "folder",
                kind: ParamKind::String,
                required: true,
                default: None,
                description: "Folder identifier, e.g. 'inbox' or 'sent'",
            },
            ParamSpec {
                name: "limit",
                kind: ParamKind::Integer,
                required: false,
                default: Some(20),
                description: "Maximum number of messages to return",
            },
        ],
    },
    ToolDef {
        name: "send_message",
        description: "Send a Garoon message to one or more users",
        params: &[
            ParamSpec {
                name: "to",
                kind: ParamKind::StringArray,
                required: true,
                default: None,
                description: "Recipient user IDs (must not be empty)",
            },
            ParamSpec {
                name: "subject",
                kind: ParamKind::String,
                required: true,
                default: None,
                description: "Message subject",
            },
            ParamSpec {
                name: "body",
                kind: ParamKind::String,
                required: true,
                default: None,
                description: "Message body",
            },
        ],
    },
    ToolDef {
        name: "search_users",
        description: "Search for Garoon users by name",
        params: &[
            ParamSpec {
                name: "query",
                kind: ParamKind::String,
                required: true,
                default: None,
                description: "Search query (user name)",
            },
            ParamSpec {
                name: "limit",
                kind: ParamKind::Integer,
                required: false,
                default: Some(20),
                description: "Maximum number of results to return",
            },
        ],
    },
];

pub fn find(name: &str) -> Option<&'static ToolDef> {
    TOOLS.iter().find(|tool| tool.name == name)
}

/// Render the catalog for `tools/list`.
pub fn catalog() -> Vec<Tool> {
    TOOLS
        .iter()
        .map(|tool| Tool {
            name: tool.name,
            description: tool.description,
            input_schema: input_schema(tool.params),
        })
        .collect()
}

#[derive(Deserialize)]
struct GetScheduleArgs {
    start_date: String,
    end_date: String,
    user_id: Option<String>,
}

#[derive(Deserialize)]
struct CreateScheduleArgs {
    subject: String,
    start_datetime: String,
    end_datetime: String,
    description: Option<String>,
}

#[derive(Deserialize)]
struct GetMessagesArgs {
    folder: String,
    limit: u32,
}

#[derive(Deserialize)]
struct SendMessageArgs {
    to: Vec<String>,
    subject: String,
    body: String,
}

#[derive(Deserialize)]
struct SearchUsersArgs {
    query: String,
    limit: u32,
}

fn parse_args<T: DeserializeOwned>(args: Map<String, Value>) -> Result<T, GaroonError> {
    serde_json::from_value(Value::Object(args))
        .map_err(|err| GaroonError::Validation(err.to_string()))
}

fn render<T: serde::Serialize>(value: &T) -> Result<String, GaroonError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Validate arguments against the tool's spec table and call the matching
/// client operation, returning the result as pretty-printed JSON text.
pub async fn dispatch(
    client: &GaroonClient,
    def: &ToolDef,
    arguments: &Value,
) -> Result<String, GaroonError> {
    let args = validate(def.params, arguments)?;

    match def.name {
        "get_schedule" => {
            let args: GetScheduleArgs = parse_args(args)?;
            let events = client
                .get_schedule(&args.start_date, &args.end_date, args.user_id.as_deref())
                .await?;
            render(&events)
        }
        "create_schedule" => {
            let args: CreateScheduleArgs = parse_args(args)?;
            let event = client
                .create_schedule(
                    &args.subject,
                    &args.start_datetime,
                    &args.end_datetime,
                    args.description.as_deref(),
                )
                .await?;
            render(&event)
        }
        "get_messages" => {
            let args: GetMessagesArgs = parse_args(args)?;
            let messages = client.get_messages(&args.folder, args.limit).await?;
            render(&messages)
        }
        "send_message" => {
            let args: SendMessageArgs = parse_args(args)?;
            let confirmation = client
                .send_message(&args.to, &args.subject, &args.body)
                .await?;
            render(&confirmation)
        }
        "search_users" => {
            let args: SearchUsersArgs = parse_args(args)?;
            let users = client.search_users(&args.query, args.limit).await?;
            render(&users)
        }
        other => Err(GaroonError::Validation(format!("unknown tool '{other}'"))),
    }
}
