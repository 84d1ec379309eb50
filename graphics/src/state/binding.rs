//! Per-target buffer binding cache.

use crate::backend::{BufferHandle, GlContext};
use crate::translate::EnumTranslator;
use crate::types::BufferTarget;

/// What this layer last bound at one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BindingRecord {
    /// Buffer last bound, `None` when the target was explicitly unbound.
    pub buffer: Option<BufferHandle>,
    /// Whether `buffer` is known to match the context.
    pub valid: bool,
}

/// Cache of the buffer bound at each target.
///
/// Records start invalid, so the first bind at every target always reaches
/// the context.
#[derive(Debug, Clone, Default)]
pub struct BindingStateCache {
    records: [BindingRecord; 2],
    issued: u64,
    elided: u64,
}

impl BindingStateCache {
    /// Create a cache with every target invalid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `buffer` at `target` unless it is already known to be bound there.
    ///
    /// Returns whether a bind call was issued.
    pub fn bind<C: GlContext + ?Sized>(
        &mut self,
        context: &mut C,
        translator: &EnumTranslator,
        buffer: Option<BufferHandle>,
        target: BufferTarget,
    ) -> bool {
        let record = &mut self.records[target.slot()];
        if record.valid && record.buffer == buffer {
            self.elided += 1;
            log::trace!("bind elided: {:?} already bound at {:?}", buffer, target);
            return false;
        }

        context.bind_buffer(translator.buffer_target(target), buffer);
        *record = BindingRecord {
            buffer,
            valid: true,
        };
        self.issued += 1;
        true
    }

    /// Force the next bind at `target` to reach the context.
    pub fn invalidate(&mut self, target: BufferTarget) {
        self.records[target.slot()].valid = false;
    }

    /// Force the next bind at every target to reach the context.
    pub fn invalidate_all(&mut self) {
        for record in &mut self.records {
            record.valid = false;
        }
    }

    /// Drop any record that refers to a buffer that no longer exists.
    ///
    /// Deleting a bound buffer unbinds it in the context, so the record no
    /// longer describes the context.
    pub fn forget_buffer(&mut self, buffer: BufferHandle) {
        for record in &mut self.records {
            if record.buffer == Some(buffer) {
                record.buffer = None;
                record.valid = false;
            }
        }
    }

    /// Record for `target`.
    pub fn record(&self, target: BufferTarget) -> BindingRecord {
        self.records[target.slot()]
    }

    /// Buffer known to be bound at `target`, if the record is valid.
    pub fn bound(&self, target: BufferTarget) -> Option<BufferHandle> {
        let record = self.record(target);
        if record.valid {
            record.buffer
        } else {
            None
        }
    }

    /// Number of bind calls issued to the context.
    pub fn issued_binds(&self) -> u64 {
        self.issued
    }

    /// Number of bind requests answered from the cache.
    pub fn elided_binds(&self) -> u64 {
        self.elided
    }
}
