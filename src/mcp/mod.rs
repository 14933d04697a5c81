//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes scanning and locale editing to AI coding agents over stdio.
//!
//! ## Module Structure
//!
//! - `helpers`: Validation and locale writing for tool calls
//! - `server`: Tool definitions and the stdio entry point
//! - `types`: Tool parameters and results

mod helpers;
mod server;
pub mod types;

pub use server::{LemmascanMcpServer, run_server};
