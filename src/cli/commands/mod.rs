pub mod check;
mod command_result;
pub mod find;
pub mod helper;
pub mod init;
pub mod sync;

pub use command_result::*;
