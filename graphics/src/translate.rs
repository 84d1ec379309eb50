//! Engine enums to context constants.
//!
//! [`GlConstants`] is the table of API enum values the renderer needs. An
//! [`EnumTranslator`] is built from it once, when the renderer acquires its
//! context, and is passed explicitly to everything that issues calls. No code
//! reads constants from a global.
//!
//! Translating from engine enums is total. Parsing labels into engine enums
//! is where fallbacks happen; see [`crate::types::Translation`].

use crate::backend::{ContextCapabilities, GlEnum};
use crate::buffer::BufferPayload;
use crate::error::{GraphicsError, GraphicsResult};
use crate::types::{
    AttributeType, BufferTarget, BufferUsage, ClearFlags, DrawMode, TranslationMode,
};

/// API enum values shared by OpenGL ES 2.0, WebGL 1/2 and desktop GL.
pub mod gl {
    use crate::backend::GlEnum;

    pub const POINTS: GlEnum = 0x0000;
    pub const LINES: GlEnum = 0x0001;
    pub const LINE_LOOP: GlEnum = 0x0002;
    pub const LINE_STRIP: GlEnum = 0x0003;
    pub const TRIANGLES: GlEnum = 0x0004;
    pub const TRIANGLE_STRIP: GlEnum = 0x0005;
    pub const TRIANGLE_FAN: GlEnum = 0x0006;

    pub const DEPTH_BUFFER_BIT: GlEnum = 0x0000_0100;
    pub const STENCIL_BUFFER_BIT: GlEnum = 0x0000_0400;
    pub const COLOR_BUFFER_BIT: GlEnum = 0x0000_4000;

    pub const LEQUAL: GlEnum = 0x0203;
    pub const DEPTH_TEST: GlEnum = 0x0B71;

    pub const BYTE: GlEnum = 0x1400;
    pub const UNSIGNED_BYTE: GlEnum = 0x1401;
    pub const SHORT: GlEnum = 0x1402;
    pub const UNSIGNED_SHORT: GlEnum = 0x1403;
    pub const INT: GlEnum = 0x1404;
    pub const UNSIGNED_INT: GlEnum = 0x1405;
    pub const FLOAT: GlEnum = 0x1406;

    pub const ARRAY_BUFFER: GlEnum = 0x8892;
    pub const ELEMENT_ARRAY_BUFFER: GlEnum = 0x8893;
    pub const STREAM_DRAW: GlEnum = 0x88E0;
    pub const STATIC_DRAW: GlEnum = 0x88E4;
    pub const DYNAMIC_DRAW: GlEnum = 0x88E8;
}

/// Table of the context constants used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlConstants {
    pub array_buffer: GlEnum,
    pub element_array_buffer: GlEnum,

    pub static_draw: GlEnum,
    pub dynamic_draw: GlEnum,
    pub stream_draw: GlEnum,

    pub triangles: GlEnum,
    pub triangle_strip: GlEnum,
    pub triangle_fan: GlEnum,
    pub lines: GlEnum,
    pub line_strip: GlEnum,
    pub line_loop: GlEnum,
    pub points: GlEnum,

    pub float: GlEnum,
    pub byte: GlEnum,
    pub unsigned_byte: GlEnum,
    pub short: GlEnum,
    pub unsigned_short: GlEnum,
    pub int: GlEnum,
    pub unsigned_int: GlEnum,

    pub color_buffer_bit: GlEnum,
    pub depth_buffer_bit: GlEnum,
    pub stencil_buffer_bit: GlEnum,

    pub depth_test: GlEnum,
    pub lequal: GlEnum,
}

impl GlConstants {
    /// Values defined by the GL family of APIs.
    pub const GL: Self = Self {
        array_buffer: gl::ARRAY_BUFFER,
        element_array_buffer: gl::ELEMENT_ARRAY_BUFFER,
        static_draw: gl::STATIC_DRAW,
        dynamic_draw: gl::DYNAMIC_DRAW,
        stream_draw: gl::STREAM_DRAW,
        triangles: gl::TRIANGLES,
        triangle_strip: gl::TRIANGLE_STRIP,
        triangle_fan: gl::TRIANGLE_FAN,
        lines: gl::LINES,
        line_strip: gl::LINE_STRIP,
        line_loop: gl::LINE_LOOP,
        points: gl::POINTS,
        float: gl::FLOAT,
        byte: gl::BYTE,
        unsigned_byte: gl::UNSIGNED_BYTE,
        short: gl::SHORT,
        unsigned_short: gl::UNSIGNED_SHORT,
        int: gl::INT,
        unsigned_int: gl::UNSIGNED_INT,
        color_buffer_bit: gl::COLOR_BUFFER_BIT,
        depth_buffer_bit: gl::DEPTH_BUFFER_BIT,
        stencil_buffer_bit: gl::STENCIL_BUFFER_BIT,
        depth_test: gl::DEPTH_TEST,
        lequal: gl::LEQUAL,
    };
}

impl Default for GlConstants {
    fn default() -> Self {
        Self::GL
    }
}

// ============================================================================
// Index element type
// ============================================================================

/// Element type of an index stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexElementType {
    /// 8-bit unsigned indices.
    U8,
    /// 16-bit unsigned indices.
    U16,
    /// 32-bit unsigned indices.
    U32,
}

impl IndexElementType {
    /// Derive the index type from the payload's element width.
    ///
    /// Signed payloads are read as their unsigned counterparts. Floating point
    /// payloads cannot be used as indices.
    pub fn from_payload(payload: &BufferPayload) -> GraphicsResult<Self> {
        if payload.attribute_type().is_float() {
            return Err(GraphicsError::InvalidIndexPayload(format!(
                "{:?} elements are not integers",
                payload.attribute_type()
            )));
        }
        match payload.element_size() {
            1 => Ok(Self::U8),
            2 => Ok(Self::U16),
            4 => Ok(Self::U32),
            size => Err(GraphicsError::InvalidIndexPayload(format!(
                "unsupported element width {size}"
            ))),
        }
    }

    /// Size in bytes of one index.
    pub fn byte_width(&self) -> u64 {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
        }
    }
}

// ============================================================================
// Translator
// ============================================================================

/// Translates engine enums and labels into context constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumTranslator {
    constants: GlConstants,
    capabilities: ContextCapabilities,
    mode: TranslationMode,
}

impl EnumTranslator {
    /// Build a translator for a context with the given capabilities.
    pub fn new(constants: GlConstants, capabilities: ContextCapabilities, mode: TranslationMode) -> Self {
        Self {
            constants,
            capabilities,
            mode,
        }
    }

    /// The constant table in use.
    pub fn constants(&self) -> &GlConstants {
        &self.constants
    }

    /// Capabilities of the context this translator was built for.
    pub fn capabilities(&self) -> ContextCapabilities {
        self.capabilities
    }

    /// How unknown labels are handled.
    pub fn mode(&self) -> TranslationMode {
        self.mode
    }

    /// Binding point constant for a buffer target.
    pub fn buffer_target(&self, target: BufferTarget) -> GlEnum {
        match target {
            BufferTarget::ArrayBuffer => self.constants.array_buffer,
            BufferTarget::ElementArrayBuffer => self.constants.element_array_buffer,
        }
    }

    /// Usage hint constant.
    pub fn buffer_usage(&self, usage: BufferUsage) -> GlEnum {
        match usage {
            BufferUsage::StaticDraw => self.constants.static_draw,
            BufferUsage::DynamicDraw => self.constants.dynamic_draw,
            BufferUsage::StreamDraw => self.constants.stream_draw,
        }
    }

    /// Primitive mode constant.
    pub fn draw_mode(&self, mode: DrawMode) -> GlEnum {
        match mode {
            DrawMode::Triangles => self.constants.triangles,
            DrawMode::TriangleStrip => self.constants.triangle_strip,
            DrawMode::TriangleFan => self.constants.triangle_fan,
            DrawMode::Lines => self.constants.lines,
            DrawMode::LineStrip => self.constants.line_strip,
            DrawMode::LineLoop => self.constants.line_loop,
            DrawMode::Points => self.constants.points,
        }
    }

    /// Attribute pointer type constant.
    ///
    /// Half and double precision both map to the single float type: the
    /// attribute pointer API has no distinct constants for them.
    pub fn attribute_type(&self, ty: AttributeType) -> GlEnum {
        match ty {
            AttributeType::Float | AttributeType::HalfFloat | AttributeType::Double => {
                self.constants.float
            }
            AttributeType::Byte => self.constants.byte,
            AttributeType::UnsignedByte => self.constants.unsigned_byte,
            AttributeType::Short => self.constants.short,
            AttributeType::UnsignedShort => self.constants.unsigned_short,
            AttributeType::Int => self.constants.int,
            AttributeType::UnsignedInt => self.constants.unsigned_int,
        }
    }

    /// Element type constant for indexed draws.
    pub fn index_type(&self, ty: IndexElementType) -> GraphicsResult<GlEnum> {
        match ty {
            IndexElementType::U8 => Ok(self.constants.unsigned_byte),
            IndexElementType::U16 => Ok(self.constants.unsigned_short),
            IndexElementType::U32 if self.capabilities.element_index_uint => {
                Ok(self.constants.unsigned_int)
            }
            IndexElementType::U32 => Err(GraphicsError::UnsupportedIndexType(ty.name())),
        }
    }

    /// Bitmask for a clear of the selected planes.
    pub fn clear_mask(&self, flags: ClearFlags) -> GlEnum {
        let mut bits = 0;
        if flags.contains(ClearFlags::COLOR) {
            bits |= self.constants.color_buffer_bit;
        }
        if flags.contains(ClearFlags::DEPTH) {
            bits |= self.constants.depth_buffer_bit;
        }
        if flags.contains(ClearFlags::STENCIL) {
            bits |= self.constants.stencil_buffer_bit;
        }
        bits
    }

    /// Parse a target label under this translator's mode.
    pub fn target_label(&self, label: &str) -> GraphicsResult<BufferTarget> {
        BufferTarget::from_label(label).resolve(self.mode, "buffer target", label)
    }

    /// Parse a usage label under this translator's mode.
    pub fn usage_label(&self, label: &str) -> GraphicsResult<BufferUsage> {
        BufferUsage::from_label(label).resolve(self.mode, "buffer usage", label)
    }

    /// Parse a draw mode label under this translator's mode.
    pub fn draw_mode_label(&self, label: &str) -> GraphicsResult<DrawMode> {
        DrawMode::from_label(label).resolve(self.mode, "draw mode", label)
    }

    /// Parse a sequence of draw mode labels under this translator's mode.
    pub fn draw_mode_labels<S: AsRef<str>>(&self, labels: &[S]) -> GraphicsResult<Vec<DrawMode>> {
        labels
            .iter()
            .map(|label| self.draw_mode_label(label.as_ref()))
            .collect()
    }

    /// Parse an attribute type label. Unknown labels are always rejected.
    pub fn attribute_type_label(&self, label: &str) -> GraphicsResult<AttributeType> {
        AttributeType::from_label(label)
    }
}

impl Default for EnumTranslator {
    fn default() -> Self {
        Self::new(
            GlConstants::GL,
            ContextCapabilities::default(),
            TranslationMode::Lenient,
        )
    }
}
