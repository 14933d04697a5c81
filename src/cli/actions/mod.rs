//! Actions for fixing reconciliation issues.
//!
//! Actions convert Issues into Operations and execute them.
//!
//! ## Architecture
//!
//! ```text
//! Issue (problem detected)
//!     ↓
//! Action (Issue → Operation conversion)
//!     ↓
//! Operation (one key added to or removed from one locale file)
//!     ↓
//! execute (one write per touched file)
//! ```
//!
//! ## Actions
//!
//! - [`AddKey`]: Add missing keys with a placeholder value
//! - [`DeleteKey`]: Delete obsolete keys

mod add_key;
mod delete_key;
mod operation;
mod traits;

pub use add_key::AddKey;
pub use delete_key::DeleteKey;
pub use operation::Operation;
pub(crate) use traits::execute_operations;
pub use traits::{Action, ActionStats, WriteTarget};
