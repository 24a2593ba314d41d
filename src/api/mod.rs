//! HTTP surface wiring the media layer into an axum service

pub mod error;
pub mod models;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;
