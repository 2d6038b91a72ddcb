pub mod instance;
pub mod traits;

// Re-export key types for convenient access
pub use instance::{RenderBuffer, RenderInstance};
pub use traits::{Color, DrawContext};
