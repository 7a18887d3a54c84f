pub mod company;
pub mod invoice;

// Re-export models for easier access
pub use company::*;
pub use invoice::*;
