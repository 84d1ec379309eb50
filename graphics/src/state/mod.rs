//! Binding-state tracking.
//!
//! The context keeps one bound buffer per target and one enabled flag per
//! vertex attribute slot. Changing either is a round trip into the driver, so
//! the renderer mirrors that state here and skips calls that would not change
//! anything.
//!
//! The mirror is only as good as the assumption that every change goes
//! through it. Code that touches the context directly must invalidate the
//! targets it disturbed.

mod attributes;
mod binding;

pub use attributes::AttributeBindingRecord;
pub use binding::{BindingRecord, BindingStateCache};
