/// Averaged embedding classifier
pub mod pooled_embedding;
