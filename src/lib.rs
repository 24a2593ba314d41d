pub mod api;
pub mod config;
pub mod humanize;
pub mod media;
pub mod observability;
pub mod resource;
