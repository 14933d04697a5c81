//! Core scanning engine.
//!
//! The pipeline runs in four steps:
//!
//! 1. **Walk**: enumerate source files under the configured folders
//! 2. **Extract**: apply the translation patterns and keep literal keys
//! 3. **Load**: read every locale file under the lang root
//! 4. **Reconcile**: compute missing and obsolete keys per locale file
//!
//! ## Module Structure
//!
//! - `context`: [`ScanContext`] wiring the steps together for one command
//! - `extract`: Key extraction from source text
//! - `lang_root`: Locale root resolution
//! - `locale`: Locale file model, reader and writer
//! - `patterns`: Compiled `transMethods` patterns
//! - `reconcile`: Set reconciliation
//! - `walker`: Source file enumeration

pub mod context;
pub mod extract;
pub mod lang_root;
pub mod locale;
pub mod patterns;
pub mod reconcile;
pub mod walker;

pub use context::ScanContext;
pub use extract::{KeyExtractor, ScanResult};
pub use lang_root::{LangRootError, resolve_lang_root};
pub use locale::{LocaleFile, LocaleSet, LocaleStore};
pub use patterns::TransPatterns;
pub use reconcile::{FileReport, ReconciliationReport};
