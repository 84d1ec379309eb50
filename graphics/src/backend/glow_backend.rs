//! OpenGL / WebGL context backed by `glow`.
//!
//! Buffer handles given to the renderer are crate-level [`BufferHandle`]s;
//! this backend keeps the mapping to the underlying `glow::Buffer`s.

use std::collections::HashMap;

use glow::HasContext;

use crate::error::{GraphicsError, GraphicsResult};

use super::{BufferHandle, ContextCapabilities, GlContext, GlEnum};

/// Graphics context forwarding to a `glow::Context`.
pub struct GlowContext {
    gl: glow::Context,
    buffers: HashMap<BufferHandle, glow::Buffer>,
    next_buffer: u64,
    capabilities: ContextCapabilities,
}

impl GlowContext {
    /// Wrap an already current `glow` context.
    pub fn new(gl: glow::Context) -> Self {
        let version = gl.version();
        let element_index_uint = !version.is_embedded
            || version.major >= 3
            || gl.supported_extensions().contains("OES_element_index_uint")
            || gl.supported_extensions().contains("GL_OES_element_index_uint");
        log::info!(
            "GlowContext: {}.{} (embedded: {}), 32-bit indices: {}",
            version.major,
            version.minor,
            version.is_embedded,
            element_index_uint
        );

        Self {
            gl,
            buffers: HashMap::new(),
            next_buffer: 1,
            capabilities: ContextCapabilities { element_index_uint },
        }
    }

    /// The wrapped `glow` context.
    ///
    /// Binding buffers through this reference bypasses the renderer's binding
    /// cache; invalidate the affected targets afterwards.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    fn raw(&self, buffer: Option<BufferHandle>) -> Option<glow::Buffer> {
        buffer.and_then(|handle| self.buffers.get(&handle).copied())
    }
}

/// Narrow an unsigned value to the `GLint`/`GLsizei` the API takes.
///
/// Values past `i32::MAX` are clamped, with a warning naming `what`.
fn gl_int(value: impl Into<u64>, what: &'static str) -> i32 {
    let value = value.into();
    i32::try_from(value).unwrap_or_else(|_| {
        log::warn!("{} {} exceeds i32::MAX, clamping", what, value);
        i32::MAX
    })
}

impl std::fmt::Debug for GlowContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlowContext")
            .field("buffers", &self.buffers.len())
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

impl GlContext for GlowContext {
    fn name(&self) -> &'static str {
        "glow"
    }

    fn capabilities(&self) -> ContextCapabilities {
        self.capabilities
    }

    fn create_buffer(&mut self) -> GraphicsResult<BufferHandle> {
        let raw = unsafe { self.gl.create_buffer() }.map_err(GraphicsError::ResourceCreationFailed)?;
        let handle = BufferHandle(self.next_buffer);
        self.next_buffer += 1;
        self.buffers.insert(handle, raw);
        Ok(handle)
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) {
        if let Some(raw) = self.buffers.remove(&buffer) {
            unsafe { self.gl.delete_buffer(raw) };
        }
    }

    fn bind_buffer(&mut self, target: GlEnum, buffer: Option<BufferHandle>) {
        let raw = self.raw(buffer);
        unsafe { self.gl.bind_buffer(target, raw) };
    }

    fn buffer_data(&mut self, target: GlEnum, data: &[u8], usage: GlEnum) {
        unsafe { self.gl.buffer_data_u8_slice(target, data, usage) };
    }

    fn buffer_sub_data(&mut self, target: GlEnum, offset: u64, data: &[u8]) {
        unsafe { self.gl.buffer_sub_data_u8_slice(target, gl_int(offset, "sub-upload offset"), data) };
    }

    fn vertex_attrib_pointer(
        &mut self,
        index: u32,
        size: u32,
        data_type: GlEnum,
        normalized: bool,
        stride: u32,
        offset: u64,
    ) {
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                index,
                gl_int(size, "attribute size"),
                data_type,
                normalized,
                gl_int(stride, "attribute stride"),
                gl_int(offset, "attribute offset"),
            )
        };
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) };
    }

    fn disable_vertex_attrib_array(&mut self, index: u32) {
        unsafe { self.gl.disable_vertex_attrib_array(index) };
    }

    fn draw_elements(&mut self, mode: GlEnum, count: u32, element_type: GlEnum, offset: u64) {
        unsafe {
            self.gl.draw_elements(
                mode,
                gl_int(count, "index count"),
                element_type,
                gl_int(offset, "index offset"),
            )
        };
    }

    fn draw_arrays(&mut self, mode: GlEnum, first: u32, count: u32) {
        unsafe { self.gl.draw_arrays(
                mode,
                gl_int(first, "first vertex"),
                gl_int(count, "vertex count"),
            ) };
    }

    fn clear_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        unsafe { self.gl.clear_color(red, green, blue, alpha) };
    }

    fn clear_depth(&mut self, depth: f32) {
        unsafe { self.gl.clear_depth_f32(depth) };
    }

    fn clear_stencil(&mut self, stencil: i32) {
        unsafe { self.gl.clear_stencil(stencil) };
    }

    fn enable(&mut self, capability: GlEnum) {
        unsafe { self.gl.enable(capability) };
    }

    fn depth_func(&mut self, func: GlEnum) {
        unsafe { self.gl.depth_func(func) };
    }

    fn clear(&mut self, mask: GlEnum) {
        unsafe { self.gl.clear(mask) };
    }

    fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        unsafe { self.gl.viewport(
                x,
                y,
                gl_int(width, "viewport width"),
                gl_int(height, "viewport height"),
            ) };
    }

    fn flush(&mut self) {
        unsafe { self.gl.flush() };
    }
}

impl Drop for GlowContext {
    fn drop(&mut self) {
        for (_, raw) in self.buffers.drain() {
            unsafe { self.gl.delete_buffer(raw) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gl_int_passes_small_values() {
        assert_eq!(gl_int(0u32, "count"), 0);
        assert_eq!(gl_int(4096u64, "offset"), 4096);
        assert_eq!(gl_int(i32::MAX as u32, "count"), i32::MAX);
    }

    #[test]
    fn test_gl_int_clamps_instead_of_wrapping() {
        assert_eq!(gl_int(u32::MAX, "count"), i32::MAX);
        assert_eq!(gl_int(1u64 << 32, "offset"), i32::MAX);
    }
}
