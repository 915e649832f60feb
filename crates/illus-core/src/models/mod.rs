//! Data models for illustrations and configuration.

pub mod config;
pub mod illustration;
