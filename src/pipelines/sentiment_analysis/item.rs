use std::fmt::Debug;

/// A trait for items that can be used for sentiment analysis
pub trait Item: Send + Sync + Clone + Debug {
    /// Returns the encoded review
    fn tokens(&self) -> &[usize];

    /// Returns the binary label, 1 for positive
    fn label(&self) -> usize;
}
