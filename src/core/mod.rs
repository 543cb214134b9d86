//! # Core Application Logic
//!
//! This module contains Umurage's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Records (content)    │
//!                    │  • Filter engine        │
//!                    │  • State + Action       │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │    API     │
//!     │  Adapter   │                          │  (reqwest) │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`content`]: Records fetched from the archive
//! - [`filter`]: Search/region filtering, related and featured selection
//! - [`icons`]: Category name → icon lookup
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update` reducer
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod content;
pub mod filter;
pub mod icons;
pub mod state;
