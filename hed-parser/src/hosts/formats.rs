//! Output formats
//!
//! Serializers from the line model back to text.

pub mod render;

pub use render::render;
