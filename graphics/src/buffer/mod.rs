//! Buffer descriptors and the manager that owns their GPU objects.

mod data;
mod manager;

pub use data::{BufferData, BufferPayload};
pub use manager::BufferManager;
