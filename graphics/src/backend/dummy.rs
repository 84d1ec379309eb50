//! Dummy graphics context for testing and development.
//!
//! This context doesn't talk to a GPU. It hands out sequential buffer handles
//! and records every call it receives, so tests can assert exactly which
//! binds, uploads and draws the renderer issued.

use crate::error::{GraphicsError, GraphicsResult};

use super::{BufferHandle, ContextCapabilities, GlContext, GlEnum};

/// A call received by [`DummyContext`].
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CreateBuffer(BufferHandle),
    DeleteBuffer(BufferHandle),
    BindBuffer {
        target: GlEnum,
        buffer: Option<BufferHandle>,
    },
    BufferData {
        target: GlEnum,
        len: usize,
        usage: GlEnum,
    },
    BufferSubData {
        target: GlEnum,
        offset: u64,
        len: usize,
    },
    VertexAttribPointer {
        index: u32,
        size: u32,
        data_type: GlEnum,
        normalized: bool,
        stride: u32,
        offset: u64,
    },
    EnableVertexAttribArray(u32),
    DisableVertexAttribArray(u32),
    DrawElements {
        mode: GlEnum,
        count: u32,
        element_type: GlEnum,
        offset: u64,
    },
    DrawArrays {
        mode: GlEnum,
        first: u32,
        count: u32,
    },
    ClearColor([f32; 4]),
    ClearDepth(f32),
    ClearStencil(i32),
    Enable(GlEnum),
    DepthFunc(GlEnum),
    Clear(GlEnum),
    Viewport {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    Flush,
}

/// Recording graphics context.
#[derive(Debug)]
pub struct DummyContext {
    capabilities: ContextCapabilities,
    calls: Vec<GlCall>,
    next_buffer: u64,
    fail_buffer_creation: bool,
}

impl DummyContext {
    /// Create a new dummy context with every capability available.
    pub fn new() -> Self {
        Self::with_capabilities(ContextCapabilities::default())
    }

    /// Create a dummy context reporting the given capabilities.
    pub fn with_capabilities(capabilities: ContextCapabilities) -> Self {
        Self {
            capabilities,
            calls: Vec::new(),
            next_buffer: 1,
            fail_buffer_creation: false,
        }
    }

    /// Make subsequent buffer creation fail (or succeed again).
    pub fn set_fail_buffer_creation(&mut self, fail: bool) {
        self.fail_buffer_creation = fail;
    }

    /// All calls received so far, oldest first.
    pub fn calls(&self) -> &[GlCall] {
        &self.calls
    }

    /// Take the recorded calls, leaving the log empty.
    pub fn take_calls(&mut self) -> Vec<GlCall> {
        std::mem::take(&mut self.calls)
    }

    /// Forget the recorded calls.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of recorded calls matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&GlCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    /// Number of recorded bind calls.
    pub fn bind_count(&self) -> usize {
        self.count(|call| matches!(call, GlCall::BindBuffer { .. }))
    }

    /// Number of recorded full uploads.
    pub fn upload_count(&self) -> usize {
        self.count(|call| matches!(call, GlCall::BufferData { .. }))
    }

    /// Number of recorded partial uploads.
    pub fn sub_upload_count(&self) -> usize {
        self.count(|call| matches!(call, GlCall::BufferSubData { .. }))
    }

    fn record(&mut self, call: GlCall) {
        log::trace!("DummyContext: {:?}", call);
        self.calls.push(call);
    }
}

impl Default for DummyContext {
    fn default() -> Self {
        Self::new()
    }
}

impl GlContext for DummyContext {
    fn name(&self) -> &'static str {
        "Dummy"
    }

    fn capabilities(&self) -> ContextCapabilities {
        self.capabilities
    }

    fn create_buffer(&mut self) -> GraphicsResult<BufferHandle> {
        if self.fail_buffer_creation {
            return Err(GraphicsError::ResourceCreationFailed(
                "dummy context configured to fail buffer creation".to_string(),
            ));
        }
        let handle = BufferHandle(self.next_buffer);
        self.next_buffer += 1;
        self.record(GlCall::CreateBuffer(handle));
        Ok(handle)
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) {
        self.record(GlCall::DeleteBuffer(buffer));
    }

    fn bind_buffer(&mut self, target: GlEnum, buffer: Option<BufferHandle>) {
        self.record(GlCall::BindBuffer { target, buffer });
    }

    fn buffer_data(&mut self, target: GlEnum, data: &[u8], usage: GlEnum) {
        self.record(GlCall::BufferData {
            target,
            len: data.len(),
            usage,
        });
    }

    fn buffer_sub_data(&mut self, target: GlEnum, offset: u64, data: &[u8]) {
        self.record(GlCall::BufferSubData {
            target,
            offset,
            len: data.len(),
        });
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
        self.record(GlCall::VertexAttribPointer {
            index,
            size,
            data_type,
            normalized,
            stride,
            offset,
        });
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        self.record(GlCall::EnableVertexAttribArray(index));
    }

    fn disable_vertex_attrib_array(&mut self, index: u32) {
        self.record(GlCall::DisableVertexAttribArray(index));
    }

    fn draw_elements(&mut self, mode: GlEnum, count: u32, element_type: GlEnum, offset: u64) {
        self.record(GlCall::DrawElements {
            mode,
            count,
            element_type,
            offset,
        });
    }

    fn draw_arrays(&mut self, mode: GlEnum, first: u32, count: u32) {
        self.record(GlCall::DrawArrays { mode, first, count });
    }

    fn clear_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.record(GlCall::ClearColor([red, green, blue, alpha]));
    }

    fn clear_depth(&mut self, depth: f32) {
        self.record(GlCall::ClearDepth(depth));
    }

    fn clear_stencil(&mut self, stencil: i32) {
        self.record(GlCall::ClearStencil(stencil));
    }

    fn enable(&mut self, capability: GlEnum) {
        self.record(GlCall::Enable(capability));
    }

    fn depth_func(&mut self, func: GlEnum) {
        self.record(GlCall::DepthFunc(func));
    }

    fn clear(&mut self, mask: GlEnum) {
        self.record(GlCall::Clear(mask));
    }

    fn viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.record(GlCall::Viewport {
            x,
            y,
            width,
            height,
        });
    }

    fn flush(&mut self) {
        self.record(GlCall::Flush);
    }
}
