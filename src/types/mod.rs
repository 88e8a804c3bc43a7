//! Core types used throughout the library.

pub mod input;
pub mod message;
pub mod options;
pub mod output;

// Re-export commonly used types
pub use input::*;
pub use message::*;
pub use options::*;
pub use output::*;
