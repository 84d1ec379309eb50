//! Vertex attribute layout requests.

use crate::error::GraphicsResult;

use super::labels::AttributeType;

/// Layout of one vertex attribute inside the bound array buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    /// Attribute slot in the vertex shader.
    pub slot: u32,
    /// Components per vertex, 1 to 4.
    pub tuple_size: u32,
    /// Component type.
    pub attribute_type: AttributeType,
    /// Map integer components to `[0, 1]` or `[-1, 1]`.
    pub normalized: bool,
    /// Bytes between consecutive vertices, 0 for tightly packed.
    pub stride: u32,
    /// Byte offset of the first component.
    pub offset: u64,
}

impl VertexAttribute {
    /// Tightly packed, unnormalized attribute starting at offset 0.
    pub fn new(slot: u32, tuple_size: u32, attribute_type: AttributeType) -> Self {
        Self {
            slot,
            tuple_size,
            attribute_type,
            normalized: false,
            stride: 0,
            offset: 0,
        }
    }

    /// Same as [`new`](Self::new) with the type given as a label.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::InvalidAttributeType`] for an unknown label.
    ///
    /// [`GraphicsError::InvalidAttributeType`]: crate::GraphicsError::InvalidAttributeType
    pub fn from_label(slot: u32, tuple_size: u32, type_label: &str) -> GraphicsResult<Self> {
        Ok(Self::new(slot, tuple_size, AttributeType::from_label(type_label)?))
    }

    /// Three floats, the usual position or normal layout.
    pub fn float3(slot: u32) -> Self {
        Self::new(slot, 3, AttributeType::Float)
    }

    /// Map integer components to the unit range.
    pub fn with_normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }

    /// Set the byte distance between consecutive vertices.
    pub fn with_stride(mut self, stride: u32) -> Self {
        self.stride = stride;
        self
    }

    /// Set the byte offset of the first component.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Bytes one vertex of this attribute occupies in the buffer.
    pub fn element_size(&self) -> usize {
        self.tuple_size as usize * self.attribute_type.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphicsError;

    #[test]
    fn test_builder() {
        let attribute = VertexAttribute::new(2, 4, AttributeType::UnsignedByte)
            .with_normalized(true)
            .with_stride(16)
            .with_offset(12);
        assert_eq!(attribute.slot, 2);
        assert!(attribute.normalized);
        assert_eq!(attribute.stride, 16);
        assert_eq!(attribute.offset, 12);
        assert_eq!(attribute.element_size(), 4);
    }

    #[test]
    fn test_from_label() {
        let attribute = VertexAttribute::from_label(0, 3, "Float").unwrap();
        assert_eq!(attribute, VertexAttribute::float3(0));
        assert_eq!(attribute.element_size(), 12);

        assert!(matches!(
            VertexAttribute::from_label(0, 3, "Quad"),
            Err(GraphicsError::InvalidAttributeType(_))
        ));
    }
}
