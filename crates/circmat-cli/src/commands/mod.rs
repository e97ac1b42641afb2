//! CLI command implementations.

pub mod check;
pub mod common;
pub mod compact;
pub mod gates;
pub mod insert;
pub mod show;
pub mod version;
