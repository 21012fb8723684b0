//! Core library for the `wprompt` status-bar weather tool.
//!
//! This crate defines:
//! - The emoji vocabulary and free-text classifier
//! - The persisted snapshot cache and its freshness policy
//! - HTTP clients for the weather provider and IP geolocation
//! - The pipeline that ties them together into one output line
//!
//! It is used by `wprompt-cli`, but can also be reused by other binaries.

pub mod cache;
pub mod client;
pub mod emoji;
pub mod pipeline;

pub use cache::{CacheStore, Snapshot, is_stale};
pub use client::{Astronomy, ClockTime, Observation, Section, WundergroundClient};
pub use pipeline::{Options, Pipeline};
