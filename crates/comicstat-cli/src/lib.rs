//! comicstat CLI — catalog client, configuration, and terminal rendering.

pub mod client;
pub mod config;
pub mod render;

pub use client::{CatalogClient, Page, ProbeAttempt};
pub use config::ClientConfig;
