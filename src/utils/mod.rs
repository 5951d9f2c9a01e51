/// File utilities
pub mod files;

/// Tensor Utilities
pub mod tensors;

/// Renderer Utilities
pub mod renderer;

/// Map utilities
pub mod maps;
