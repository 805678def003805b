//! Language masks and language handlers.

pub mod cache;
pub mod mask;
pub mod memory;

pub use cache::CachingLanguageHandler;
pub use mask::{ALWAYS_AVAILABLE_BIT, MaskGenerator};
pub use memory::InMemoryLanguageHandler;
