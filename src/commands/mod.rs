//! Command handlers for the `rnlint` binary.

pub mod check;
pub mod init;
pub mod rule;
