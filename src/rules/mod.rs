//! Rule implementations for lemmascan.
//!
//! Each rule turns one part of the reconciliation report into issues.
//! The `*_issues` entry points take a [`ScanContext`](crate::core::ScanContext);
//! the pure functions underneath take only the inputs they need.
//!
//! ## Module Structure
//!
//! - `missing`: Keys used in code but absent from a locale file
//! - `obsolete`: Keys in a locale file that no code references

pub mod missing;
pub mod obsolete;
