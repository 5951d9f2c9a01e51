//! # Burn Sentiment
#![forbid(unsafe_code)]

/// Models
pub mod models;

/// Pipelines
pub mod pipelines;

/// Datasets
pub mod datasets;

/// Utilities
pub mod utils;

/// Backend selection
pub mod backend;

/// Error macros
#[macro_use]
extern crate anyhow;
