//! Engine-level vocabulary for buffers, topologies and attribute types.
//!
//! Mesh code upstream describes its data with symbolic labels such as
//! `"ElementArrayBuffer"` or `"TriangleStrip"`. Parsing a label never panics:
//! it returns a [`Translation`] that records whether the label was recognized
//! or whether the documented default was substituted. The caller decides
//! whether a fallback is acceptable (see [`TranslationMode`]).

use crate::error::{GraphicsError, GraphicsResult};

// ============================================================================
// Translation result
// ============================================================================

/// Outcome of parsing an engine label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Translation<T> {
    /// The label named a known value.
    Recognized(T),
    /// The label was unknown and the documented default was substituted.
    Fallback(T),
}

impl<T> Translation<T> {
    /// The resolved value, whether recognized or substituted.
    pub fn value(self) -> T {
        match self {
            Self::Recognized(value) | Self::Fallback(value) => value,
        }
    }

    /// Whether the default was substituted.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    /// Resolve according to `mode`.
    ///
    /// Lenient mode returns the substituted default and logs a warning; strict
    /// mode turns the fallback into [`GraphicsError::UnknownLabel`].
    pub fn resolve(self, mode: TranslationMode, kind: &'static str, label: &str) -> GraphicsResult<T> {
        match self {
            Self::Recognized(value) => Ok(value),
            Self::Fallback(value) => match mode {
                TranslationMode::Lenient => {
                    log::warn!("unknown {kind} label {label:?}, using default");
                    Ok(value)
                }
                TranslationMode::Strict => Err(GraphicsError::UnknownLabel {
                    kind,
                    label: label.to_string(),
                }),
            },
        }
    }
}

/// How unknown labels are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TranslationMode {
    /// Substitute the documented default.
    #[default]
    Lenient,
    /// Reject unknown labels.
    Strict,
}

// ============================================================================
// Buffer target
// ============================================================================

/// Logical binding target of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BufferTarget {
    /// Vertex attribute data.
    #[default]
    ArrayBuffer,
    /// Index data.
    ElementArrayBuffer,
}

impl BufferTarget {
    /// All targets, in binding record order.
    pub const ALL: [BufferTarget; 2] = [Self::ArrayBuffer, Self::ElementArrayBuffer];

    /// Parse a target label. Unknown labels fall back to [`BufferTarget::ArrayBuffer`].
    pub fn from_label(label: &str) -> Translation<Self> {
        match label {
            "ArrayBuffer" => Translation::Recognized(Self::ArrayBuffer),
            "ElementArrayBuffer" => Translation::Recognized(Self::ElementArrayBuffer),
            _ => Translation::Fallback(Self::ArrayBuffer),
        }
    }

    /// The label for this target.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ArrayBuffer => "ArrayBuffer",
            Self::ElementArrayBuffer => "ElementArrayBuffer",
        }
    }

    /// Position of this target in per-target tables.
    pub(crate) fn slot(&self) -> usize {
        match self {
            Self::ArrayBuffer => 0,
            Self::ElementArrayBuffer => 1,
        }
    }
}

// ============================================================================
// Buffer usage
// ============================================================================

/// Driver hint describing how often a buffer's contents change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BufferUsage {
    /// Written once, drawn many times.
    #[default]
    StaticDraw,
    /// Rewritten repeatedly, drawn many times.
    DynamicDraw,
    /// Written once, drawn a few times.
    StreamDraw,
}

impl BufferUsage {
    /// Parse a usage label. Unknown labels fall back to [`BufferUsage::StaticDraw`].
    pub fn from_label(label: &str) -> Translation<Self> {
        match label {
            "StaticDraw" => Translation::Recognized(Self::StaticDraw),
            "DynamicDraw" => Translation::Recognized(Self::DynamicDraw),
            "StreamDraw" => Translation::Recognized(Self::StreamDraw),
            _ => Translation::Fallback(Self::StaticDraw),
        }
    }

    /// The label for this usage.
    pub fn label(&self) -> &'static str {
        match self {
            Self::StaticDraw => "StaticDraw",
            Self::DynamicDraw => "DynamicDraw",
            Self::StreamDraw => "StreamDraw",
        }
    }
}

// ============================================================================
// Draw mode
// ============================================================================

/// Topology used to assemble a submesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawMode {
    /// Independent triangles.
    #[default]
    Triangles,
    /// Connected strip of triangles.
    TriangleStrip,
    /// Triangles sharing the first vertex.
    TriangleFan,
    /// Independent line segments.
    Lines,
    /// Connected line segments.
    LineStrip,
    /// Connected line segments closed back to the first vertex.
    LineLoop,
    /// Independent points.
    Points,
}

impl DrawMode {
    /// Parse a draw mode label. Unknown labels fall back to [`DrawMode::Triangles`].
    pub fn from_label(label: &str) -> Translation<Self> {
        match label {
            "Triangles" => Translation::Recognized(Self::Triangles),
            "TriangleStrip" => Translation::Recognized(Self::TriangleStrip),
            "TriangleFan" => Translation::Recognized(Self::TriangleFan),
            "Lines" => Translation::Recognized(Self::Lines),
            "LineStrip" => Translation::Recognized(Self::LineStrip),
            "LineLoop" => Translation::Recognized(Self::LineLoop),
            "Points" => Translation::Recognized(Self::Points),
            _ => Translation::Fallback(Self::Triangles),
        }
    }

    /// The label for this mode.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Triangles => "Triangles",
            Self::TriangleStrip => "TriangleStrip",
            Self::TriangleFan => "TriangleFan",
            Self::Lines => "Lines",
            Self::LineStrip => "LineStrip",
            Self::LineLoop => "LineLoop",
            Self::Points => "Points",
        }
    }
}

// ============================================================================
// Attribute type
// ============================================================================

/// Element type of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    /// 32-bit float.
    Float,
    /// 16-bit float.
    HalfFloat,
    /// 64-bit float.
    Double,
    /// Signed 8-bit integer.
    Byte,
    /// Unsigned 8-bit integer.
    UnsignedByte,
    /// Signed 16-bit integer.
    Short,
    /// Unsigned 16-bit integer.
    UnsignedShort,
    /// Signed 32-bit integer.
    Int,
    /// Unsigned 32-bit integer.
    UnsignedInt,
}

impl AttributeType {
    /// Parse an attribute type label.
    ///
    /// Unlike the other vocabularies there is no sensible default here, so an
    /// unknown label is always an error.
    pub fn from_label(label: &str) -> GraphicsResult<Self> {
        match label {
            "Float" => Ok(Self::Float),
            "HalfFloat" => Ok(Self::HalfFloat),
            "Double" => Ok(Self::Double),
            "Byte" => Ok(Self::Byte),
            "UnsignedByte" => Ok(Self::UnsignedByte),
            "Short" => Ok(Self::Short),
            "UnsignedShort" => Ok(Self::UnsignedShort),
            "Int" => Ok(Self::Int),
            "UnsignedInt" => Ok(Self::UnsignedInt),
            _ => Err(GraphicsError::InvalidAttributeType(label.to_string())),
        }
    }

    /// Size in bytes of one element.
    pub fn size(&self) -> usize {
        match self {
            Self::Byte | Self::UnsignedByte => 1,
            Self::HalfFloat | Self::Short | Self::UnsignedShort => 2,
            Self::Float | Self::Int | Self::UnsignedInt => 4,
            Self::Double => 8,
        }
    }

    /// Whether this is one of the floating point types.
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float | Self::HalfFloat | Self::Double)
    }
}
