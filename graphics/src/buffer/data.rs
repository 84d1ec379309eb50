//! CPU-side buffer descriptors.

use std::rc::{Rc, Weak};

use half::f16;

use crate::backend::BufferHandle;
use crate::types::{AttributeType, BufferTarget, BufferUsage};

/// Typed, fixed-width buffer contents.
#[derive(Debug, Clone, PartialEq)]
pub enum BufferPayload {
    U8(Vec<u8>),
    I8(Vec<i8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
    U32(Vec<u32>),
    I32(Vec<i32>),
    F16(Vec<f16>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl BufferPayload {
    /// Raw bytes in native endianness.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::U8(data) => data.as_slice(),
            Self::I8(data) => bytemuck::cast_slice(data),
            Self::U16(data) => bytemuck::cast_slice(data),
            Self::I16(data) => bytemuck::cast_slice(data),
            Self::U32(data) => bytemuck::cast_slice(data),
            Self::I32(data) => bytemuck::cast_slice(data),
            Self::F16(data) => bytemuck::cast_slice(data),
            Self::F32(data) => bytemuck::cast_slice(data),
            Self::F64(data) => bytemuck::cast_slice(data),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::U8(data) => data.len(),
            Self::I8(data) => data.len(),
            Self::U16(data) => data.len(),
            Self::I16(data) => data.len(),
            Self::U32(data) => data.len(),
            Self::I32(data) => data.len(),
            Self::F16(data) => data.len(),
            Self::F32(data) => data.len(),
            Self::F64(data) => data.len(),
        }
    }

    /// Whether the payload has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type of the payload.
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            Self::U8(_) => AttributeType::UnsignedByte,
            Self::I8(_) => AttributeType::Byte,
            Self::U16(_) => AttributeType::UnsignedShort,
            Self::I16(_) => AttributeType::Short,
            Self::U32(_) => AttributeType::UnsignedInt,
            Self::I32(_) => AttributeType::Int,
            Self::F16(_) => AttributeType::HalfFloat,
            Self::F32(_) => AttributeType::Float,
            Self::F64(_) => AttributeType::Double,
        }
    }

    /// Size in bytes of one element.
    pub fn element_size(&self) -> usize {
        self.attribute_type().size()
    }

    /// Total size in bytes.
    pub fn byte_len(&self) -> usize {
        self.len() * self.element_size()
    }
}

macro_rules! impl_payload_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$ty>> for BufferPayload {
                fn from(data: Vec<$ty>) -> Self {
                    Self::$variant(data)
                }
            }
        )*
    };
}

impl_payload_from!(
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    u32 => U32,
    i32 => I32,
    f16 => F16,
    f32 => F32,
    f64 => F64,
);

/// Buffer contents together with how and where they are uploaded.
///
/// Mesh code owns the descriptor and edits its payload. The GPU handle is
/// filled in by [`BufferManager`](super::BufferManager) the first time the
/// descriptor is bound, and the dirty flag tells the manager to re-upload.
///
/// Each descriptor carries a liveness token the manager holds weakly. Once the
/// descriptor is dropped its buffer is deleted by the manager's next
/// [`collect_garbage`](super::BufferManager::collect_garbage), which also runs
/// before every buffer creation.
///
/// Cloning copies the contents, target and usage only. The clone has no
/// buffer yet and is uploaded on its first bind.
///
/// # Example
///
/// ```ignore
/// let mut positions = BufferData::new(vec![0.0f32, 0.5, 0.0, -0.5, -0.5, 0.0])
///     .with_usage(BufferUsage::DynamicDraw);
/// renderer.bind_data(&mut positions)?;
///
/// positions.set_payload(vec![0.0f32, 0.6, 0.0, -0.6, -0.6, 0.0]);
/// renderer.bind_data(&mut positions)?; // partial upload of the new contents
/// ```
#[derive(Debug, PartialEq)]
pub struct BufferData {
    payload: BufferPayload,
    target: BufferTarget,
    usage: BufferUsage,
    dirty: bool,
    handle: Option<BufferHandle>,
    token: Rc<()>,
}

impl Clone for BufferData {
    fn clone(&self) -> Self {
        Self {
            payload: self.payload.clone(),
            target: self.target,
            usage: self.usage,
            dirty: true,
            handle: None,
            token: Rc::new(()),
        }
    }
}

impl BufferData {
    /// Create a vertex buffer descriptor with static usage.
    pub fn new(payload: impl Into<BufferPayload>) -> Self {
        Self {
            payload: payload.into(),
            target: BufferTarget::ArrayBuffer,
            usage: BufferUsage::StaticDraw,
            dirty: false,
            handle: None,
            token: Rc::new(()),
        }
    }

    /// Create an index buffer descriptor with static usage.
    pub fn indices(payload: impl Into<BufferPayload>) -> Self {
        Self::new(payload).with_target(BufferTarget::ElementArrayBuffer)
    }

    /// Set the binding target.
    pub fn with_target(mut self, target: BufferTarget) -> Self {
        self.target = target;
        self
    }

    /// Set the usage hint.
    pub fn with_usage(mut self, usage: BufferUsage) -> Self {
        self.usage = usage;
        self
    }

    /// Current contents.
    pub fn payload(&self) -> &BufferPayload {
        &self.payload
    }

    /// Replace the contents and mark them for re-upload.
    pub fn set_payload(&mut self, payload: impl Into<BufferPayload>) {
        self.payload = payload.into();
        self.dirty = true;
    }

    /// Edit the contents in place and mark them for re-upload.
    pub fn update(&mut self, edit: impl FnOnce(&mut BufferPayload)) {
        edit(&mut self.payload);
        self.dirty = true;
    }

    /// Mark the contents for re-upload without changing them.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether the contents changed since the last upload.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Binding target.
    pub fn target(&self) -> BufferTarget {
        self.target
    }

    /// Usage hint.
    pub fn usage(&self) -> BufferUsage {
        self.usage
    }

    /// GPU handle, once uploaded.
    pub fn handle(&self) -> Option<BufferHandle> {
        self.handle
    }

    pub(crate) fn set_handle(&mut self, handle: Option<BufferHandle>) {
        self.handle = handle;
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Weak reference that dies with this descriptor.
    pub(crate) fn liveness(&self) -> Weak<()> {
        Rc::downgrade(&self.token)
    }

    /// Whether `liveness` was taken from this descriptor.
    pub(crate) fn owns_liveness(&self, liveness: &Weak<()>) -> bool {
        std::ptr::eq(liveness.as_ptr(), Rc::as_ptr(&self.token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_bytes() {
        let payload = BufferPayload::from(vec![1u16, 2, 3]);
        assert_eq!(payload.len(), 3);
        assert_eq!(payload.element_size(), 2);
        assert_eq!(payload.byte_len(), 6);
        assert_eq!(payload.as_bytes().len(), 6);
    }

    #[test]
    fn test_half_payload() {
        let payload = BufferPayload::from(vec![f16::from_f32(1.0), f16::from_f32(0.5)]);
        assert_eq!(payload.attribute_type(), AttributeType::HalfFloat);
        assert_eq!(payload.as_bytes().len(), 4);
    }

    #[test]
    fn test_new_descriptor_is_clean() {
        let data = BufferData::new(vec![0.0f32; 9]);
        assert_eq!(data.target(), BufferTarget::ArrayBuffer);
        assert_eq!(data.usage(), BufferUsage::StaticDraw);
        assert!(!data.is_dirty());
        assert!(data.handle().is_none());
    }

    #[test]
    fn test_edits_mark_dirty() {
        let mut data = BufferData::indices(vec![0u16, 1, 2]);
        assert_eq!(data.target(), BufferTarget::ElementArrayBuffer);

        data.update(|payload| {
            if let BufferPayload::U16(indices) = payload {
                indices.push(3);
            }
        });
        assert!(data.is_dirty());
        assert_eq!(data.payload().len(), 4);

        data.clear_dirty();
        data.set_payload(vec![5u16]);
        assert!(data.is_dirty());
    }

    #[test]
    fn test_clone_starts_without_buffer() {
        let mut data = BufferData::new(vec![1.0f32, 2.0]).with_usage(BufferUsage::DynamicDraw);
        data.set_handle(Some(BufferHandle(3)));
        data.clear_dirty();

        let copy = data.clone();

        assert_eq!(copy.payload(), data.payload());
        assert_eq!(copy.usage(), BufferUsage::DynamicDraw);
        assert!(copy.handle().is_none());
        assert!(copy.is_dirty());
        assert!(!copy.owns_liveness(&data.liveness()));
    }

    #[test]
    fn test_liveness_dies_with_descriptor() {
        let data = BufferData::new(vec![0u8; 2]);
        let liveness = data.liveness();
        assert!(data.owns_liveness(&liveness));
        assert_eq!(liveness.strong_count(), 1);

        drop(data);

        assert_eq!(liveness.strong_count(), 0);
    }
}
