//! Enabled vertex attribute slots.

use crate::backend::GlContext;

/// Vertex attribute slots enabled for one vertex array configuration.
///
/// Enabling is idempotent: a slot is enabled in the context only the first
/// time it is requested. Slots stay enabled until [`disable_all`] is called.
///
/// [`disable_all`]: AttributeBindingRecord::disable_all
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeBindingRecord {
    enabled: Vec<u32>,
}

impl AttributeBindingRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable `slot` unless this record already did.
    ///
    /// Returns whether an enable call was issued.
    pub fn enable<C: GlContext + ?Sized>(&mut self, context: &mut C, slot: u32) -> bool {
        if self.enabled.contains(&slot) {
            return false;
        }
        context.enable_vertex_attrib_array(slot);
        self.enabled.push(slot);
        true
    }

    /// Disable every slot this record enabled, and empty it.
    pub fn disable_all<C: GlContext + ?Sized>(&mut self, context: &mut C) {
        for slot in self.enabled.drain(..) {
            context.disable_vertex_attrib_array(slot);
        }
    }

    /// Whether `slot` is enabled.
    pub fn is_enabled(&self, slot: u32) -> bool {
        self.enabled.contains(&slot)
    }

    /// Enabled slots, in the order they were enabled.
    pub fn enabled(&self) -> &[u32] {
        &self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::dummy::{DummyContext, GlCall};

    #[test]
    fn test_enable_once_per_slot() {
        let mut context = DummyContext::new();
        let mut record = AttributeBindingRecord::new();

        assert!(record.enable(&mut context, 0));
        assert!(record.enable(&mut context, 2));
        assert!(!record.enable(&mut context, 0));

        assert_eq!(
            context.calls(),
            &[
                GlCall::EnableVertexAttribArray(0),
                GlCall::EnableVertexAttribArray(2)
            ]
        );
        assert_eq!(record.enabled(), &[0, 2]);
    }

    #[test]
    fn test_disable_all_empties_record() {
        let mut context = DummyContext::new();
        let mut record = AttributeBindingRecord::new();
        record.enable(&mut context, 1);
        record.enable(&mut context, 3);
        context.clear_calls();

        record.disable_all(&mut context);

        assert_eq!(
            context.calls(),
            &[
                GlCall::DisableVertexAttribArray(1),
                GlCall::DisableVertexAttribArray(3)
            ]
        );
        assert!(!record.is_enabled(1));
        assert!(record.enable(&mut context, 1));
    }
}
