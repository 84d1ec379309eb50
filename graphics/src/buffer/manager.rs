//! GPU buffer lifecycle.

use std::collections::HashMap;
use std::rc::Weak;

use crate::backend::{BufferHandle, GlContext};
use crate::error::GraphicsResult;
use crate::state::BindingStateCache;
use crate::translate::EnumTranslator;
use crate::types::BufferTarget;

use super::data::BufferData;

/// Bookkeeping for one buffer object owned by the manager.
#[derive(Debug, Clone)]
struct LiveBuffer {
    target: BufferTarget,
    /// Size in bytes of the store last specified with a full upload.
    capacity: u64,
    /// Dead once the descriptor that owns the buffer is dropped.
    owner: Weak<()>,
}

/// Owns the buffer objects created for [`BufferData`] descriptors.
///
/// A handle is created lazily the first time a descriptor is resolved and is
/// recorded on the descriptor. The manager remains the owner and deletes
/// buffer objects on [`release`](Self::release),
/// [`release_all`](Self::release_all), and, for descriptors that were
/// dropped, [`collect_garbage`](Self::collect_garbage).
#[derive(Debug, Default)]
pub struct BufferManager {
    live: HashMap<BufferHandle, LiveBuffer>,
}

impl BufferManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `data` current at its target, creating or refreshing its buffer.
    ///
    /// - First use: creates a buffer object, binds it and uploads the whole
    ///   payload with the descriptor's usage hint.
    /// - Dirty: binds and overwrites the store from offset 0. A payload that
    ///   outgrew the store is uploaded in full instead.
    /// - Otherwise: only binds, and the bind is elided if already current.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::ResourceCreationFailed`] if the context cannot
    /// allocate a buffer. The descriptor is left without a handle.
    ///
    /// [`GraphicsError::ResourceCreationFailed`]: crate::GraphicsError::ResourceCreationFailed
    pub fn resolve<C: GlContext + ?Sized>(
        &mut self,
        context: &mut C,
        translator: &EnumTranslator,
        cache: &mut BindingStateCache,
        data: &mut BufferData,
    ) -> GraphicsResult<BufferHandle> {
        let target = data.target();

        if let Some(handle) = data.handle() {
            if let Some(live) = self
                .live
                .get_mut(&handle)
                .filter(|live| data.owns_liveness(&live.owner))
            {
                cache.bind(context, translator, Some(handle), target);
                if data.is_dirty() {
                    let bytes = data.payload().as_bytes();
                    let gl_target = translator.buffer_target(target);
                    if bytes.len() as u64 > live.capacity {
                        log::debug!(
                            "buffer {:?} grew from {} to {} bytes, respecifying store",
                            handle,
                            live.capacity,
                            bytes.len()
                        );
                        context.buffer_data(gl_target, bytes, translator.buffer_usage(data.usage()));
                        live.capacity = bytes.len() as u64;
                    } else {
                        context.buffer_sub_data(gl_target, 0, bytes);
                    }
                    data.clear_dirty();
                }
                return Ok(handle);
            }
            log::warn!(
                "buffer {:?} is not owned by this descriptor, creating a new one",
                handle
            );
            data.set_handle(None);
        }

        self.create(context, translator, cache, data)
    }

    fn create<C: GlContext + ?Sized>(
        &mut self,
        context: &mut C,
        translator: &EnumTranslator,
        cache: &mut BindingStateCache,
        data: &mut BufferData,
    ) -> GraphicsResult<BufferHandle> {
        self.collect_garbage(context, cache);

        let target = data.target();
        let handle = context.create_buffer()?;
        data.set_handle(Some(handle));

        // Creation may leave the context's binding out of step with the cache.
        cache.invalidate(target);
        cache.bind(context, translator, Some(handle), target);

        let bytes = data.payload().as_bytes();
        let capacity = bytes.len() as u64;
        context.buffer_data(
            translator.buffer_target(target),
            bytes,
            translator.buffer_usage(data.usage()),
        );
        data.clear_dirty();

        self.live.insert(
            handle,
            LiveBuffer {
                target,
                capacity,
                owner: data.liveness(),
            },
        );
        log::debug!(
            "created buffer {:?} at {:?} ({} bytes, {:?})",
            handle,
            target,
            capacity,
            data.usage()
        );
        Ok(handle)
    }

    /// Bind nothing at `target`.
    pub fn unbind<C: GlContext + ?Sized>(
        &self,
        context: &mut C,
        translator: &EnumTranslator,
        cache: &mut BindingStateCache,
        target: BufferTarget,
    ) {
        cache.bind(context, translator, None, target);
    }

    /// Delete the buffer object behind `data` and clear its handle.
    ///
    /// Returns whether a buffer was deleted. Resolving the descriptor again
    /// creates a fresh buffer.
    pub fn release<C: GlContext + ?Sized>(
        &mut self,
        context: &mut C,
        cache: &mut BindingStateCache,
        data: &mut BufferData,
    ) -> bool {
        let Some(handle) = data.handle() else {
            return false;
        };
        data.set_handle(None);
        self.delete(context, cache, handle)
    }

    /// Delete every buffer object still owned. Returns how many were deleted.
    pub fn release_all<C: GlContext + ?Sized>(
        &mut self,
        context: &mut C,
        cache: &mut BindingStateCache,
    ) -> usize {
        let handles: Vec<BufferHandle> = self.live.keys().copied().collect();
        handles
            .into_iter()
            .filter(|handle| self.delete(context, cache, *handle))
            .count()
    }

    /// Delete the buffer objects of descriptors that have been dropped.
    ///
    /// Returns how many were deleted.
    pub fn collect_garbage<C: GlContext + ?Sized>(
        &mut self,
        context: &mut C,
        cache: &mut BindingStateCache,
    ) -> usize {
        let dead: Vec<BufferHandle> = self
            .live
            .iter()
            .filter(|(_, live)| live.owner.strong_count() == 0)
            .map(|(handle, _)| *handle)
            .collect();
        if dead.is_empty() {
            return 0;
        }
        log::debug!("collecting {} buffers of dropped descriptors", dead.len());
        dead.into_iter()
            .filter(|handle| self.delete(context, cache, *handle))
            .count()
    }

    fn delete<C: GlContext + ?Sized>(
        &mut self,
        context: &mut C,
        cache: &mut BindingStateCache,
        handle: BufferHandle,
    ) -> bool {
        let Some(live) = self.live.remove(&handle) else {
            return false;
        };
        context.delete_buffer(handle);
        cache.forget_buffer(handle);
        log::debug!("released buffer {:?} at {:?}", handle, live.target);
        true
    }

    /// Whether `handle` is owned by this manager.
    pub fn owns(&self, handle: BufferHandle) -> bool {
        self.live.contains_key(&handle)
    }

    /// Number of buffer objects owned.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Size in bytes of the store behind `handle`.
    pub fn capacity(&self, handle: BufferHandle) -> Option<u64> {
        self.live.get(&handle).map(|live| live.capacity)
    }
}
