//! # inua-server
//!
//! Axum HTTP transport for the breathing coach: the chat endpoint, the
//! filtered technique listing, and health. Transport concerns only;
//! the pipeline behind it never sees HTTP.

#![deny(unsafe_code)]

pub mod config;
pub mod health;
pub mod routes;
pub mod server;

pub use config::ServerConfig;
pub use server::{AppState, InuaServer};
