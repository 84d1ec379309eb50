//! Renderer facade.
//!
//! The [`Renderer`] owns the graphics context and everything that mirrors its
//! state: the binding cache, the buffer manager, the translator built for the
//! context, and the camera. Mesh code talks only to the renderer.
//!
//! # Example
//!
//! ```ignore
//! use glrender::{BufferData, DrawMode, Renderer, RendererParameters};
//!
//! let mut renderer = Renderer::offscreen(RendererParameters::default(), context)?;
//! let mut indices = BufferData::indices(vec![0u16, 1, 2, 2, 3, 0]);
//!
//! renderer.check_resize();
//! renderer.clear_all();
//! renderer.draw_indexed_buffer(&mut indices, &[DrawMode::Triangles], &[6])?;
//! renderer.flush();
//! ```

use crate::backend::{BufferHandle, ContextAttributes, GlContext};
use crate::buffer::{BufferData, BufferManager, BufferPayload};
use crate::camera::Camera;
use crate::draw::DrawDispatcher;
use crate::error::{GraphicsError, GraphicsResult};
use crate::state::{AttributeBindingRecord, BindingStateCache};
use crate::surface::{OffscreenSurface, Surface};
use crate::translate::{EnumTranslator, GlConstants};
use crate::types::{
    BufferTarget, ClearColor, ClearFlags, DrawMode, TranslationMode, VertexAttribute,
};

/// Parameters for creating a [`Renderer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererParameters {
    /// Drawing buffer has an alpha channel.
    pub alpha: bool,
    /// Drawing buffer colors are premultiplied by alpha.
    pub premultiplied_alpha: bool,
    /// Request multisampling.
    pub antialias: bool,
    /// Drawing buffer has a stencil plane.
    pub stencil: bool,
    /// Keep the drawing buffer contents after presentation.
    pub preserve_drawing_buffer: bool,
    /// How unknown labels are handled.
    pub translation_mode: TranslationMode,
    /// Refuse draws that read past the end of their data.
    pub checked_draws: bool,
    /// Clear color set at construction.
    pub clear_color: ClearColor,
}

impl Default for RendererParameters {
    fn default() -> Self {
        let attributes = ContextAttributes::default();
        Self {
            alpha: attributes.alpha,
            premultiplied_alpha: attributes.premultiplied_alpha,
            antialias: attributes.antialias,
            stencil: attributes.stencil,
            preserve_drawing_buffer: attributes.preserve_drawing_buffer,
            translation_mode: TranslationMode::Lenient,
            checked_draws: false,
            clear_color: ClearColor::DEFAULT,
        }
    }
}

impl RendererParameters {
    /// Create parameters with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request an alpha channel in the drawing buffer.
    pub fn with_alpha(mut self, alpha: bool) -> Self {
        self.alpha = alpha;
        self
    }

    /// Treat drawing buffer colors as premultiplied by alpha.
    pub fn with_premultiplied_alpha(mut self, premultiplied_alpha: bool) -> Self {
        self.premultiplied_alpha = premultiplied_alpha;
        self
    }

    /// Request multisampling.
    pub fn with_antialias(mut self, antialias: bool) -> Self {
        self.antialias = antialias;
        self
    }

    /// Request a stencil plane.
    pub fn with_stencil(mut self, stencil: bool) -> Self {
        self.stencil = stencil;
        self
    }

    /// Keep the drawing buffer contents after presentation.
    pub fn with_preserve_drawing_buffer(mut self, preserve: bool) -> Self {
        self.preserve_drawing_buffer = preserve;
        self
    }

    /// Set how unknown labels are handled.
    pub fn with_translation_mode(mut self, mode: TranslationMode) -> Self {
        self.translation_mode = mode;
        self
    }

    /// Shorthand for [`TranslationMode::Strict`], meant for tests.
    pub fn strict(self) -> Self {
        self.with_translation_mode(TranslationMode::Strict)
    }

    /// Enable or disable draw range checks.
    pub fn with_checked_draws(mut self, checked: bool) -> Self {
        self.checked_draws = checked;
        self
    }

    /// Set the clear color applied at construction.
    pub fn with_clear_color(mut self, color: ClearColor) -> Self {
        self.clear_color = color;
        self
    }

    /// Attributes requested from the context.
    pub fn context_attributes(&self) -> ContextAttributes {
        ContextAttributes {
            alpha: self.alpha,
            premultiplied_alpha: self.premultiplied_alpha,
            antialias: self.antialias,
            stencil: self.stencil,
            preserve_drawing_buffer: self.preserve_drawing_buffer,
        }
    }
}

/// Draws engine meshes through an immediate-mode graphics context.
///
/// A renderer only exists once its context has been acquired, so every method
/// can assume a usable context. It is single-threaded and assumes it is the
/// only code changing the context's buffer bindings. Code that binds buffers
/// through [`context_mut`](Self::context_mut) gets the cache invalidated for
/// it; anything else that touches the context must call
/// [`invalidate_binding`](Self::invalidate_binding).
pub struct Renderer<C: GlContext, S: Surface = OffscreenSurface> {
    context: C,
    surface: S,
    translator: EnumTranslator,
    bindings: BindingStateCache,
    buffers: BufferManager,
    dispatcher: DrawDispatcher,
    camera: Camera,
    clear_color: ClearColor,
}

impl<C: GlContext> Renderer<C, OffscreenSurface> {
    /// Create a renderer over an already acquired context, drawing into a
    /// default-sized offscreen surface.
    pub fn offscreen(parameters: RendererParameters, context: C) -> GraphicsResult<Self> {
        Self::new(parameters, OffscreenSurface::default(), |_, _| Ok(context))
    }
}

impl<C: GlContext, S: Surface> Renderer<C, S> {
    /// Acquire a context for `surface` and set up the default render state.
    ///
    /// `acquire` receives the surface and the requested context attributes.
    ///
    /// # Errors
    ///
    /// Returns the error from `acquire` if no context can be created. No
    /// renderer exists in that case.
    pub fn new<F>(parameters: RendererParameters, surface: S, acquire: F) -> GraphicsResult<Self>
    where
        F: FnOnce(&S, &ContextAttributes) -> GraphicsResult<C>,
    {
        let attributes = parameters.context_attributes();
        log::info!("Creating Renderer ({:?})", attributes);

        let context = acquire(&surface, &attributes).map_err(|e| {
            log::error!("Error creating graphics context: {}", e);
            e
        })?;

        let capabilities = context.capabilities();
        log::info!(
            "Using graphics context: {} ({:?})",
            context.name(),
            capabilities
        );

        let translator =
            EnumTranslator::new(GlConstants::GL, capabilities, parameters.translation_mode);
        let dispatcher = if parameters.checked_draws {
            DrawDispatcher::checked()
        } else {
            DrawDispatcher::new()
        };

        let mut renderer = Self {
            context,
            surface,
            translator,
            bindings: BindingStateCache::new(),
            buffers: BufferManager::new(),
            dispatcher,
            camera: Camera::default(),
            clear_color: parameters.clear_color,
        };

        renderer.set_clear_color(parameters.clear_color);
        renderer.context.clear_depth(1.0);
        renderer.context.clear_stencil(0);

        let constants = *renderer.translator.constants();
        renderer.context.enable(constants.depth_test);
        renderer.context.depth_func(constants.lequal);

        Ok(renderer)
    }

    // ========================================================================
    // Surface and frame state
    // ========================================================================

    /// Bring the backing store in line with the surface's displayed size.
    ///
    /// On a mismatch, resizes the backing store, updates the camera aspect,
    /// sets the viewport and rebuilds the projection. Returns whether
    /// anything changed.
    pub fn check_resize(&mut self) -> bool {
        let (width, height) = self.surface.logical_size();
        if (width, height) == self.surface.backing_size() {
            return false;
        }

        log::debug!("Resizing backing store to {}x{}", width, height);
        self.surface.set_backing_size(width, height);
        if height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
        self.context.viewport(0, 0, width, height);
        self.camera.update_projection();
        true
    }

    /// Set the color used by color clears.
    pub fn set_clear_color(&mut self, color: ClearColor) {
        self.clear_color = color;
        self.context
            .clear_color(color.red, color.green, color.blue, color.alpha);
    }

    /// Color used by color clears.
    pub fn clear_color(&self) -> ClearColor {
        self.clear_color
    }

    /// Clear the selected planes. An omitted plane is cleared.
    pub fn clear(&mut self, color: Option<bool>, depth: Option<bool>, stencil: Option<bool>) {
        self.clear_planes(ClearFlags::from_options(color, depth, stencil));
    }

    /// Clear color, depth and stencil.
    pub fn clear_all(&mut self) {
        self.clear_planes(ClearFlags::all());
    }

    /// Clear the planes in `flags` with a single call.
    pub fn clear_planes(&mut self, flags: ClearFlags) {
        let mask = self.translator.clear_mask(flags);
        self.context.clear(mask);
    }

    /// Flush queued commands.
    pub fn flush(&mut self) {
        self.context.flush();
    }

    // ========================================================================
    // Buffers
    // ========================================================================

    /// Upload `data` if needed and bind it at its target.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::ResourceCreationFailed`] if a new buffer could
    /// not be created.
    pub fn bind_data(&mut self, data: &mut BufferData) -> GraphicsResult<BufferHandle> {
        self.buffers
            .resolve(&mut self.context, &self.translator, &mut self.bindings, data)
    }

    /// Bind nothing at `target`.
    pub fn unbind_buffer(&mut self, target: BufferTarget) {
        self.buffers
            .unbind(&mut self.context, &self.translator, &mut self.bindings, target);
    }

    /// Delete the buffer behind `data`. Returns whether one existed.
    pub fn release_data(&mut self, data: &mut BufferData) -> bool {
        self.buffers
            .release(&mut self.context, &mut self.bindings, data)
    }

    /// Delete the buffers of descriptors that were dropped without being
    /// released. Returns how many were deleted.
    ///
    /// Binding a descriptor that needs a new buffer does this as well.
    pub fn collect_garbage(&mut self) -> usize {
        self.buffers
            .collect_garbage(&mut self.context, &mut self.bindings)
    }

    // ========================================================================
    // Vertex attributes
    // ========================================================================

    /// Point `attribute` at the bound array buffer and enable its slot.
    ///
    /// The pointer is always set. The slot is enabled only if `record` has
    /// not enabled it yet.
    pub fn bind_vertex_attribute(
        &mut self,
        attribute: &VertexAttribute,
        record: &mut AttributeBindingRecord,
    ) {
        self.context.vertex_attrib_pointer(
            attribute.slot,
            attribute.tuple_size,
            self.translator.attribute_type(attribute.attribute_type),
            attribute.normalized,
            attribute.stride,
            attribute.offset,
        );
        record.enable(&mut self.context, attribute.slot);
    }

    /// Disable every slot `record` enabled.
    pub fn disable_vertex_attributes(&mut self, record: &mut AttributeBindingRecord) {
        record.disable_all(&mut self.context);
    }

    // ========================================================================
    // Drawing
    // ========================================================================

    /// Draw submeshes from the bound element buffer, whose contents are
    /// `indices`.
    ///
    /// # Errors
    ///
    /// Fails if `indices` is not an index payload, if 32-bit indices are not
    /// supported, or if draws are checked and `counts` overruns `indices`.
    pub fn draw_elements(
        &mut self,
        indices: &BufferPayload,
        modes: &[DrawMode],
        counts: &[u32],
    ) -> GraphicsResult<usize> {
        self.dispatcher
            .draw_indexed(&mut self.context, &self.translator, indices, modes, counts)
    }

    /// Bind `indices` and draw submeshes from it.
    ///
    /// # Errors
    ///
    /// As [`draw_elements`](Self::draw_elements), plus
    /// [`GraphicsError::InvalidIndexPayload`] if `indices` does not target the
    /// element array buffer and any error from [`bind_data`](Self::bind_data).
    pub fn draw_indexed_buffer(
        &mut self,
        indices: &mut BufferData,
        modes: &[DrawMode],
        counts: &[u32],
    ) -> GraphicsResult<usize> {
        if indices.target() != BufferTarget::ElementArrayBuffer {
            return Err(GraphicsError::InvalidIndexPayload(format!(
                "index data targets {}",
                indices.target().label()
            )));
        }
        self.bind_data(indices)?;
        self.draw_elements(indices.payload(), modes, counts)
    }

    /// Draw submeshes from the bound vertex buffers.
    ///
    /// `vertex_count` is only consulted when draws are checked.
    pub fn draw_arrays(
        &mut self,
        modes: &[DrawMode],
        counts: &[u32],
        vertex_count: Option<u64>,
    ) -> GraphicsResult<usize> {
        self.dispatcher.draw_arrays(
            &mut self.context,
            &self.translator,
            modes,
            counts,
            vertex_count,
        )
    }

    /// [`draw_elements`](Self::draw_elements) with draw modes given as labels.
    pub fn draw_elements_labels<L: AsRef<str>>(
        &mut self,
        indices: &BufferPayload,
        mode_labels: &[L],
        counts: &[u32],
    ) -> GraphicsResult<usize> {
        let modes = self.translator.draw_mode_labels(mode_labels)?;
        self.draw_elements(indices, &modes, counts)
    }

    /// [`draw_arrays`](Self::draw_arrays) with draw modes given as labels.
    pub fn draw_arrays_labels<L: AsRef<str>>(
        &mut self,
        mode_labels: &[L],
        counts: &[u32],
        vertex_count: Option<u64>,
    ) -> GraphicsResult<usize> {
        let modes = self.translator.draw_mode_labels(mode_labels)?;
        self.draw_arrays(&modes, counts, vertex_count)
    }

    // ========================================================================
    // Out-of-band access
    // ========================================================================

    /// Force the next bind at `target` to reach the context.
    pub fn invalidate_binding(&mut self, target: BufferTarget) {
        self.bindings.invalidate(target);
    }

    /// Force the next bind at every target to reach the context.
    pub fn invalidate_all_bindings(&mut self) {
        self.bindings.invalidate_all();
    }

    /// The underlying context.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Mutable access to the context.
    ///
    /// All binding records are invalidated, since the caller may rebind.
    pub fn context_mut(&mut self) -> &mut C {
        self.bindings.invalidate_all();
        &mut self.context
    }

    /// The surface drawn into.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, e.g. to change its displayed size.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The camera whose projection follows the surface.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera, e.g. to change the field of view.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Translator built for this context.
    pub fn translator(&self) -> &EnumTranslator {
        &self.translator
    }

    /// Binding records, for inspecting what is known to be bound.
    pub fn bindings(&self) -> &BindingStateCache {
        &self.bindings
    }

    /// Buffer objects owned by this renderer.
    pub fn buffers(&self) -> &BufferManager {
        &self.buffers
    }
}

impl<C: GlContext, S: Surface> Drop for Renderer<C, S> {
    fn drop(&mut self) {
        let leaked = self.buffers.live_count();
        if leaked > 0 {
            log::warn!("Renderer dropped with {} live buffers, releasing", leaked);
            self.buffers
                .release_all(&mut self.context, &mut self.bindings);
        }
        log::debug!("Renderer dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::dummy::{DummyContext, GlCall};
    use crate::translate::gl;

    #[test]
    fn test_default_parameters() {
        let parameters = RendererParameters::default();
        assert_eq!(parameters.context_attributes(), ContextAttributes::default());
        assert_eq!(parameters.translation_mode, TranslationMode::Lenient);
        assert!(!parameters.checked_draws);
        assert_eq!(parameters.clear_color, ClearColor::DEFAULT);
    }

    #[test]
    fn test_builder() {
        let parameters = RendererParameters::new()
            .with_alpha(true)
            .with_stencil(true)
            .with_checked_draws(true)
            .strict();
        let attributes = parameters.context_attributes();
        assert!(attributes.alpha);
        assert!(attributes.stencil);
        assert!(attributes.premultiplied_alpha);
        assert_eq!(parameters.translation_mode, TranslationMode::Strict);
    }

    #[test]
    fn test_construction_sets_render_state() {
        let renderer =
            Renderer::offscreen(RendererParameters::default(), DummyContext::new()).unwrap();

        assert_eq!(
            renderer.context().calls(),
            &[
                GlCall::ClearColor([0.8, 0.8, 0.8, 1.0]),
                GlCall::ClearDepth(1.0),
                GlCall::ClearStencil(0),
                GlCall::Enable(gl::DEPTH_TEST),
                GlCall::DepthFunc(gl::LEQUAL),
            ]
        );
        assert_eq!(renderer.camera(), &Camera::default());
    }

    #[test]
    fn test_set_clear_color_stores_requested_color() {
        let mut renderer =
            Renderer::offscreen(RendererParameters::default(), DummyContext::new()).unwrap();
        let color = ClearColor::new(0.1, 0.2, 0.3, 0.4);

        renderer.set_clear_color(color);

        assert_eq!(renderer.clear_color(), color);
        assert_eq!(
            renderer.context().calls().last(),
            Some(&GlCall::ClearColor([0.1, 0.2, 0.3, 0.4]))
        );
    }

    #[test]
    fn test_context_mut_invalidates_bindings() {
        let mut renderer =
            Renderer::offscreen(RendererParameters::default(), DummyContext::new()).unwrap();
        let mut data = BufferData::new(vec![0u8; 4]);
        renderer.bind_data(&mut data).unwrap();
        assert!(renderer.bindings().record(BufferTarget::ArrayBuffer).valid);

        renderer.context_mut().clear_calls();

        assert!(!renderer.bindings().record(BufferTarget::ArrayBuffer).valid);
        renderer.bind_data(&mut data).unwrap();
        assert_eq!(renderer.context().bind_count(), 1);
    }

    #[test]
    fn test_draw_indexed_buffer_rejects_vertex_data() {
        let mut renderer =
            Renderer::offscreen(RendererParameters::default(), DummyContext::new()).unwrap();
        let mut data = BufferData::new(vec![0u16; 3]);

        let result = renderer.draw_indexed_buffer(&mut data, &[], &[3]);

        assert!(matches!(result, Err(GraphicsError::InvalidIndexPayload(_))));
        assert!(data.handle().is_none());
    }
}
