//! HTTP API: routing, request extraction, and the cat service.

pub mod app;
pub mod middleware;
