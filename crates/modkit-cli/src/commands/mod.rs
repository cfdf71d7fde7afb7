//! Command implementations for the modkit CLI.
//!
//! Each command:
//! - Takes its parsed arguments plus the global root and profile
//! - Returns `Result<()>` for error propagation
//! - Prints results to stdout and status to stderr

pub mod check;
pub mod resolve;

pub use check::execute as check_execute;
pub use resolve::execute as resolve_execute;
