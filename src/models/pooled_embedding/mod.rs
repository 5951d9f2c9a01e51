//! An embedding table averaged over the review, followed by two dense layers

/// Model Configuration
pub mod config;

/// Model definition
pub mod model;

/// Training and validation steps
pub mod train;

pub use config::Config;
pub use model::{Model, ModelRecord};
