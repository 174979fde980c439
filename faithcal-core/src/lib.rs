//! Core types for the faithcal ecosystem.
//!
//! This crate provides everything behind the faithcal CLI:
//! - `event` and `catalog` for the static observance data
//! - `query` for pure date-range and tradition filtering
//! - `store` for personal events with soft-delete/undo
//! - `audit` for the append-only deletion trail
//! - `storage` for the JSON key-value persistence both of them use

pub mod audit;
pub mod catalog;
pub mod config;
pub mod date_range;
pub mod error;
pub mod event;
pub mod query;
pub mod storage;
pub mod store;

// Re-export the event types at crate root for convenience
pub use event::*;
