//! Common utilities for renderer integration tests.
//!
//! Every test runs against the recording [`DummyContext`], so assertions are
//! made on the exact calls the renderer issued.

use glrender::{
    DummyContext, GlCall, GraphicsResult, OffscreenSurface, Renderer, RendererParameters,
};

/// Route `log` output through `env_logger` once per test binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Renderer over a fresh dummy context, with construction calls discarded.
pub fn renderer(parameters: RendererParameters) -> Renderer<DummyContext> {
    renderer_with_surface(parameters, OffscreenSurface::default())
}

/// Same as [`renderer`] with a chosen surface.
pub fn renderer_with_surface(
    parameters: RendererParameters,
    surface: OffscreenSurface,
) -> Renderer<DummyContext> {
    init_logging();
    let mut renderer = try_renderer(parameters, surface, || Ok(DummyContext::new()))
        .expect("dummy context is always available");
    renderer.context_mut().clear_calls();
    renderer
}

/// Build a renderer with a custom acquisition result.
pub fn try_renderer(
    parameters: RendererParameters,
    surface: OffscreenSurface,
    acquire: impl FnOnce() -> GraphicsResult<DummyContext>,
) -> GraphicsResult<Renderer<DummyContext>> {
    Renderer::new(parameters, surface, |_, _| acquire())
}

/// Draw calls issued so far, as `(mode, count, offset)`.
#[allow(dead_code)]
pub fn element_draws(renderer: &Renderer<DummyContext>) -> Vec<(u32, u32, u64)> {
    renderer
        .context()
        .calls()
        .iter()
        .filter_map(|call| match call {
            GlCall::DrawElements {
                mode,
                count,
                offset,
                ..
            } => Some((*mode, *count, *offset)),
            _ => None,
        })
        .collect()
}

/// Array draw calls issued so far, as `(mode, first, count)`.
#[allow(dead_code)]
pub fn array_draws(renderer: &Renderer<DummyContext>) -> Vec<(u32, u32, u32)> {
    renderer
        .context()
        .calls()
        .iter()
        .filter_map(|call| match call {
            GlCall::DrawArrays { mode, first, count } => Some((*mode, *first, *count)),
            _ => None,
        })
        .collect()
}
