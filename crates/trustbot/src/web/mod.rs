//! HTTP surface: webhook ingestion and liveness endpoints

mod server;

pub use server::{router, WebState};
