//! Command implementations and file plumbing for the `reibun` binary.

pub mod commands;
pub mod source;
pub mod sql;
pub mod trace_init;
