//! MCP (Model Context Protocol) module
//!
//! Exposes the Garoon client operations as schema-validated tools over a
//! stdio JSON-RPC server.

pub mod schema;
pub mod server;
pub mod tools;
pub mod types;

pub use server::McpServer;
