//! Lemmascan - translation key checker for Laravel projects
//!
//! Lemmascan scans PHP and Blade sources for translation calls such as
//! `trans('key')` or `__('key')`, extracts the literal keys and reconciles
//! them against the JSON locale files under the project's `lang` folder.
//! Keys used in code but absent from a locale file are missing; keys defined
//! in a locale file but never used are obsolete.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands and actions)
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction and reconciliation engine
//! - `issues`: Issue type definitions and reporting
//! - `mcp`: Model Context Protocol server implementation
//! - `rules`: Turn a reconciliation report into issues
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod mcp;
pub mod rules;
pub mod utils;
