//! # glrender
//!
//! Thin rendering layer between an engine's mesh representation and an
//! immediate-mode, stateful graphics context (OpenGL ES, WebGL, desktop GL).
//!
//! ## Overview
//!
//! This crate provides:
//! - [`Renderer`] - Facade owning the context, the state mirrors and the camera
//! - [`BindingStateCache`] - Per-target record of bound buffers, used to skip
//!   redundant bind calls
//! - [`BufferManager`] - Lazy creation, dirty re-upload and release of buffer
//!   objects described by [`BufferData`]
//! - [`DrawDispatcher`] - One draw call per submesh with sticky draw modes
//! - [`EnumTranslator`] - Engine enums and labels to context constants
//! - [`GlContext`] - The outbound context interface, with a recording
//!   [`DummyContext`] and an optional `glow` backend
//!
//! ## Example
//!
//! ```ignore
//! use glrender::{BufferData, DrawMode, DummyContext, Renderer, RendererParameters};
//!
//! let mut renderer = Renderer::offscreen(RendererParameters::default(), DummyContext::new())?;
//! let mut indices = BufferData::indices(vec![0u16, 1, 2, 0, 2, 3]);
//! renderer.draw_indexed_buffer(&mut indices, &[DrawMode::Triangles], &[3, 3])?;
//! ```

pub mod backend;
pub mod buffer;
pub mod camera;
pub mod draw;
pub mod error;
pub mod renderer;
pub mod state;
pub mod surface;
pub mod translate;
pub mod types;

// Re-export main types for convenience
pub use backend::dummy::{DummyContext, GlCall};
#[cfg(feature = "glow-backend")]
pub use backend::glow_backend::GlowContext;
pub use backend::{BufferHandle, ContextAttributes, ContextCapabilities, GlContext, GlEnum};
pub use buffer::{BufferData, BufferManager, BufferPayload};
pub use camera::Camera;
pub use draw::DrawDispatcher;
pub use error::{GraphicsError, GraphicsResult};
pub use renderer::{Renderer, RendererParameters};
pub use state::{AttributeBindingRecord, BindingRecord, BindingStateCache};
pub use surface::{OffscreenSurface, Surface};
pub use translate::{EnumTranslator, GlConstants, IndexElementType};
pub use types::{
    AttributeType, BufferTarget, BufferUsage, ClearColor, ClearFlags, DrawMode, Translation,
    TranslationMode, VertexAttribute,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the rendering layer.
///
/// Only logs the version; call it once logging is set up.
pub fn init() {
    log::info!("glrender v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_dummy_context() {
        let context = DummyContext::new();
        assert_eq!(context.name(), "Dummy");
    }
}
