//! Engine-level types shared across the rendering layer.
//!
//! These are the symbolic names mesh code works with. The translator in
//! [`crate::translate`] turns them into context constants.

mod clear;
mod labels;
mod vertex;

pub use clear::{ClearColor, ClearFlags};
pub use labels::{AttributeType, BufferTarget, BufferUsage, DrawMode, Translation, TranslationMode};
pub use vertex::VertexAttribute;
