//! Graphics context abstraction layer.
//!
//! This module defines the outbound interface of the renderer: the small set
//! of immediate-mode calls it issues against a stateful graphics context.
//!
//! # Available Backends
//!
//! - `dummy` (always built): records every call, used by tests and benches
//! - `glow-backend`: OpenGL / WebGL through `glow`
//!
//! Constants passed through this trait are raw API enums produced by
//! [`crate::translate::EnumTranslator`].

pub mod dummy;

#[cfg(feature = "glow-backend")]
pub mod glow_backend;

use crate::error::GraphicsResult;

/// Raw API enum value.
pub type GlEnum = u32;

/// Handle to a buffer object owned by a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferHandle(pub(crate) u64);

impl BufferHandle {
    /// Wrap a raw handle value issued by a context.
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Raw handle value.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Optional features a context reports once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextCapabilities {
    /// Whether 32-bit unsigned indices may be used in indexed draws.
    pub element_index_uint: bool,
}

impl Default for ContextCapabilities {
    fn default() -> Self {
        Self {
            element_index_uint: true,
        }
    }
}

/// Attributes requested when a context is acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextAttributes {
    /// Drawing buffer has an alpha channel.
    pub alpha: bool,
    /// Colors in the drawing buffer are premultiplied by alpha.
    pub premultiplied_alpha: bool,
    /// Request multisampling.
    pub antialias: bool,
    /// Drawing buffer has a stencil plane.
    pub stencil: bool,
    /// Keep the drawing buffer contents after presentation.
    pub preserve_drawing_buffer: bool,
}

impl Default for ContextAttributes {
    fn default() -> Self {
        Self {
            alpha: false,
            premultiplied_alpha: true,
            antialias: false,
            stencil: false,
            preserve_drawing_buffer: false,
        }
    }
}

/// Immediate-mode graphics context.
///
/// Every call is synchronous and acts on whatever the context currently has
/// bound. The only fallible call is buffer creation; a context that is lost
/// mid-frame is outside what this layer handles.
pub trait GlContext {
    /// Backend name for diagnostics.
    fn name(&self) -> &'static str;

    /// Optional features of this context.
    fn capabilities(&self) -> ContextCapabilities;

    /// Allocate a new buffer object.
    fn create_buffer(&mut self) -> GraphicsResult<BufferHandle>;

    /// Release a buffer object.
    fn delete_buffer(&mut self, buffer: BufferHandle);

    /// Bind `buffer` (or nothing) at `target`.
    fn bind_buffer(&mut self, target: GlEnum, buffer: Option<BufferHandle>);

    /// (Re)specify the store of the buffer bound at `target`.
    fn buffer_data(&mut self, target: GlEnum, data: &[u8], usage: GlEnum);

    /// Overwrite part of the store of the buffer bound at `target`.
    fn buffer_sub_data(&mut self, target: GlEnum, offset: u64, data: &[u8]);

    /// Describe the layout of one vertex attribute in the bound array buffer.
    fn vertex_attrib_pointer(
        &mut self,
        index: u32,
        size: u32,
        data_type: GlEnum,
        normalized: bool,
        stride: u32,
        offset: u64,
    );

    /// Enable a vertex attribute slot.
    fn enable_vertex_attrib_array(&mut self, index: u32);

    /// Disable a vertex attribute slot.
    fn disable_vertex_attrib_array(&mut self, index: u32);

    /// Draw `count` indices from the bound element buffer starting at byte `offset`.
    fn draw_elements(&mut self, mode: GlEnum, count: u32, element_type: GlEnum, offset: u64);

    /// Draw `count` vertices starting at `first`.
    fn draw_arrays(&mut self, mode: GlEnum, first: u32, count: u32);

    /// Set the color used by color clears.
    fn clear_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32);

    /// Set the value used by depth clears.
    fn clear_depth(&mut self, depth: f32);

    /// Set the value used by stencil clears.
    fn clear_stencil(&mut self, stencil: i32);

    /// Enable a server-side capability.
    fn enable(&mut self, capability: GlEnum);

    /// Set the depth comparison function.
    fn depth_func(&mut self, func: GlEnum);

    /// Clear the planes selected by `mask`.
    fn clear(&mut self, mask: GlEnum);

    /// Set the viewport rectangle.
    fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32);

    /// Flush queued commands to the device.
    fn flush(&mut self);
}

static_assertions::assert_impl_all!(BufferHandle: Send, Sync, Copy);
