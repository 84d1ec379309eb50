//! Submesh draw dispatch.
//!
//! A mesh is drawn as a run of submeshes laid out back to back in its vertex
//! or index stream. `counts[i]` is the element count of submesh `i` and
//! `modes[i]` its topology. The mode list may be shorter than the count list:
//! once it runs out, its last mode is reused for every remaining submesh. An
//! empty mode list draws everything as triangles.

use crate::backend::GlContext;
use crate::buffer::BufferPayload;
use crate::error::{GraphicsError, GraphicsResult};
use crate::translate::{EnumTranslator, IndexElementType};
use crate::types::DrawMode;

/// Mode used for submesh `index`.
pub fn mode_for_submesh(modes: &[DrawMode], index: usize) -> DrawMode {
    modes
        .get(index)
        .or_else(|| modes.last())
        .copied()
        .unwrap_or_default()
}

fn total_count(counts: &[u32]) -> u64 {
    counts.iter().map(|&count| u64::from(count)).sum()
}

/// Issues one draw call per submesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawDispatcher {
    checked: bool,
}

impl DrawDispatcher {
    /// Dispatcher that trusts the counts it is given.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher that refuses draws reading past the end of the data.
    pub fn checked() -> Self {
        Self { checked: true }
    }

    /// Whether draw ranges are checked.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Draw submeshes from the bound element buffer.
    ///
    /// The index element type and width come from `indices`, which must be
    /// the payload of the bound element buffer. Submesh `i` starts at byte
    /// `sum(counts[..i]) * width`.
    ///
    /// Returns the number of draw calls issued.
    pub fn draw_indexed<C: GlContext + ?Sized>(
        &self,
        context: &mut C,
        translator: &EnumTranslator,
        indices: &BufferPayload,
        modes: &[DrawMode],
        counts: &[u32],
    ) -> GraphicsResult<usize> {
        let index_type = IndexElementType::from_payload(indices)?;
        let element_type = translator.index_type(index_type)?;
        let byte_width = index_type.byte_width();
        self.check_range(counts, indices.len() as u64)?;

        let mut offset: u64 = 0;
        for (i, &count) in counts.iter().enumerate() {
            let mode = translator.draw_mode(mode_for_submesh(modes, i));
            context.draw_elements(mode, count, element_type, offset * byte_width);
            offset += u64::from(count);
        }
        log::trace!(
            "draw_indexed: {} submeshes, {} indices",
            counts.len(),
            offset
        );
        Ok(counts.len())
    }

    /// Draw submeshes from the bound vertex buffers.
    ///
    /// Submesh `i` starts at vertex `sum(counts[..i])`. `vertex_count` is the
    /// number of vertices available and is only consulted by a checked
    /// dispatcher.
    ///
    /// Returns the number of draw calls issued.
    pub fn draw_arrays<C: GlContext + ?Sized>(
        &self,
        context: &mut C,
        translator: &EnumTranslator,
        modes: &[DrawMode],
        counts: &[u32],
        vertex_count: Option<u64>,
    ) -> GraphicsResult<usize> {
        if let Some(available) = vertex_count {
            self.check_range(counts, available)?;
        }
        // First vertices are 32-bit; a run past that range is never drawable.
        let total = total_count(counts);
        if total > u64::from(u32::MAX) {
            return Err(GraphicsError::DrawRangeOverflow {
                requested: total,
                available: u64::from(u32::MAX),
            });
        }

        let mut first: u32 = 0;
        for (i, &count) in counts.iter().enumerate() {
            let mode = translator.draw_mode(mode_for_submesh(modes, i));
            context.draw_arrays(mode, first, count);
            first += count;
        }
        log::trace!("draw_arrays: {} submeshes", counts.len());
        Ok(counts.len())
    }

    fn check_range(&self, counts: &[u32], available: u64) -> GraphicsResult<()> {
        if !self.checked {
            return Ok(());
        }
        let requested = total_count(counts);
        if requested > available {
            return Err(GraphicsError::DrawRangeOverflow {
                requested,
                available,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::dummy::{DummyContext, GlCall};
    use crate::translate::gl;

    fn drawn_modes(context: &DummyContext) -> Vec<u32> {
        context
            .calls()
            .iter()
            .filter_map(|call| match call {
                GlCall::DrawElements { mode, .. } | GlCall::DrawArrays { mode, .. } => Some(*mode),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_single_mode_is_reused() {
        let mut context = DummyContext::new();
        let translator = EnumTranslator::default();

        DrawDispatcher::new()
            .draw_arrays(&mut context, &translator, &[DrawMode::Triangles], &[3, 3, 3], None)
            .unwrap();

        assert_eq!(drawn_modes(&context), vec![gl::TRIANGLES; 3]);
    }

    #[test]
    fn test_last_mode_is_sticky() {
        let mut context = DummyContext::new();
        let translator = EnumTranslator::default();

        DrawDispatcher::new()
            .draw_arrays(
                &mut context,
                &translator,
                &[DrawMode::Triangles, DrawMode::Lines],
                &[3, 3, 3],
                None,
            )
            .unwrap();

        assert_eq!(
            drawn_modes(&context),
            vec![gl::TRIANGLES, gl::LINES, gl::LINES]
        );
    }

    #[test]
    fn test_empty_modes_draw_triangles() {
        assert_eq!(mode_for_submesh(&[], 4), DrawMode::Triangles);
    }

    #[test]
    fn test_indexed_byte_offsets() {
        let mut context = DummyContext::new();
        let translator = EnumTranslator::default();
        let indices = BufferPayload::U16(vec![0; 9]);

        let draws = DrawDispatcher::new()
            .draw_indexed(&mut context, &translator, &indices, &[DrawMode::Triangles], &[3, 6])
            .unwrap();

        assert_eq!(draws, 2);
        assert_eq!(
            context.calls(),
            &[
                GlCall::DrawElements {
                    mode: gl::TRIANGLES,
                    count: 3,
                    element_type: gl::UNSIGNED_SHORT,
                    offset: 0,
                },
                GlCall::DrawElements {
                    mode: gl::TRIANGLES,
                    count: 6,
                    element_type: gl::UNSIGNED_SHORT,
                    offset: 6,
                },
            ]
        );
    }

    #[test]
    fn test_array_first_vertex_accumulates() {
        let mut context = DummyContext::new();
        let translator = EnumTranslator::default();

        DrawDispatcher::new()
            .draw_arrays(&mut context, &translator, &[DrawMode::Points], &[2, 5, 1], None)
            .unwrap();

        let firsts: Vec<u32> = context
            .calls()
            .iter()
            .filter_map(|call| match call {
                GlCall::DrawArrays { first, .. } => Some(*first),
                _ => None,
            })
            .collect();
        assert_eq!(firsts, vec![0, 2, 7]);
    }

    #[test]
    fn test_unchecked_draw_ignores_overflow() {
        let mut context = DummyContext::new();
        let translator = EnumTranslator::default();
        let indices = BufferPayload::U8(vec![0; 3]);

        let result =
            DrawDispatcher::new().draw_indexed(&mut context, &translator, &indices, &[], &[3, 3]);

        assert_eq!(result, Ok(2));
    }

    #[test]
    fn test_checked_draw_fails_fast() {
        let mut context = DummyContext::new();
        let translator = EnumTranslator::default();
        let indices = BufferPayload::U32(vec![0; 5]);

        let result =
            DrawDispatcher::checked().draw_indexed(&mut context, &translator, &indices, &[], &[3, 3]);

        assert_eq!(
            result,
            Err(GraphicsError::DrawRangeOverflow {
                requested: 6,
                available: 5,
            })
        );
        assert!(context.calls().is_empty());
    }

    #[test]
    fn test_array_run_past_u32_range_is_refused() {
        let mut context = DummyContext::new();
        let translator = EnumTranslator::default();

        let result = DrawDispatcher::new().draw_arrays(
            &mut context,
            &translator,
            &[],
            &[u32::MAX, 1],
            None,
        );

        assert_eq!(
            result,
            Err(GraphicsError::DrawRangeOverflow {
                requested: u64::from(u32::MAX) + 1,
                available: u64::from(u32::MAX),
            })
        );
        assert!(context.calls().is_empty());
    }

    #[test]
    fn test_checked_arrays_need_vertex_count() {
        let mut context = DummyContext::new();
        let translator = EnumTranslator::default();
        let dispatcher = DrawDispatcher::checked();

        assert!(dispatcher
            .draw_arrays(&mut context, &translator, &[], &[4, 4], Some(8))
            .is_ok());
        assert!(dispatcher
            .draw_arrays(&mut context, &translator, &[], &[4, 4], Some(7))
            .is_err());
    }
}
