use std::fmt::Debug;

/// Normalizes text before it is compared against indexed values.
pub trait TransformationProcessor: Debug + Send + Sync {
    /// Applies the lowercase transformation group.
    fn lowercase(&self, text: &str) -> String;
}

/// Unicode lowercase folding.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowercaseTransformation;

impl TransformationProcessor for LowercaseTransformation {
    fn lowercase(&self, text: &str) -> String {
        text.to_lowercase()
    }
}
