//! # Archive API
//!
//! Everything that talks to the remote backend.
//!
//! ```text
//! ContentService ──▶ QueryCache ──▶ dyn Fetcher ──▶ HTTP
//!   (typed)            (dedupe)       (raw JSON)
//! ```

pub mod cache;
pub mod client;
pub mod fetcher;
pub mod service;

pub use cache::QueryCache;
pub use client::HttpFetcher;
pub use fetcher::{ApiError, Fetcher};
pub use service::ContentService;
