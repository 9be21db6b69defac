pub mod cli;
pub mod core;
pub mod garoon;
pub mod mcp;
