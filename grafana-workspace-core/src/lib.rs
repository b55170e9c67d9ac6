//! Grafana workspace core: configuration schema and validation rules
//!
//! This crate provides the configuration types, error types and the pure
//! validation engine shared by the `grafana-workspace` resource mapper and
//! its command-line front end.

pub mod config;
pub mod error;
