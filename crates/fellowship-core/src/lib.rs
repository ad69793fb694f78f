//! Shared settings, constants and errors for the fellowship workspace.

pub mod config;
pub mod constants;
pub mod error;
