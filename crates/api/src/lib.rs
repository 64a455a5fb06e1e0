//! HTTP API: server, routing, and per-route access enforcement.

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod middleware;
