pub mod batch;
pub mod markers;
pub mod store;
pub mod stripping;
pub mod trigger;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use batch::*;
pub use markers::*;
pub use store::*;
pub use stripping::*;
pub use trigger::*;
