//! Sleeper Client - league data from the Sleeper fantasy platform
//!
//! [`SleeperClient`] implements the trade engine's data source trait over the
//! public Sleeper HTTP API. Wrap it in a [`SnapshotCache`] to keep one JSON
//! snapshot per data kind per day on disk.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use cache::SnapshotCache;
pub use client::SleeperClient;
pub use config::{CacheConfig, SleeperConfig};
pub use error::{Result, SleeperError};
