//! netdto-lint library: endpoint payload resolution and DTO field checks.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod server;
