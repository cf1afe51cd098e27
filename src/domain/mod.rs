pub mod types;
pub mod store;
pub mod config;
pub mod resolver;
pub mod collector;
pub mod mutability;
pub mod coverage;
pub mod endpoint;
pub mod analysis;
pub mod finding;
pub mod graph;
pub mod ports;
