//! Clear state types.

use bitflags::bitflags;

bitflags! {
    /// Framebuffer planes selected by a clear.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        /// Clear the color plane.
        const COLOR = 1 << 0;
        /// Clear the depth plane.
        const DEPTH = 1 << 1;
        /// Clear the stencil plane.
        const STENCIL = 1 << 2;
    }
}

impl ClearFlags {
    /// Build flags from optional per-plane requests. An omitted plane is cleared.
    pub fn from_options(color: Option<bool>, depth: Option<bool>, stencil: Option<bool>) -> Self {
        let mut flags = Self::empty();
        flags.set(Self::COLOR, color.unwrap_or(true));
        flags.set(Self::DEPTH, depth.unwrap_or(true));
        flags.set(Self::STENCIL, stencil.unwrap_or(true));
        flags
    }
}

impl Default for ClearFlags {
    fn default() -> Self {
        Self::all()
    }
}

/// Color written to the color plane by a clear, as normalized channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearColor {
    /// Red channel.
    pub red: f32,
    /// Green channel.
    pub green: f32,
    /// Blue channel.
    pub blue: f32,
    /// Alpha channel.
    pub alpha: f32,
}

impl ClearColor {
    /// Light grey used until a color is requested.
    pub const DEFAULT: Self = Self::new(0.8, 0.8, 0.8, 1.0);

    /// Create a clear color.
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Channels as an array.
    pub fn to_array(self) -> [f32; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

impl Default for ClearColor {
    fn default() -> Self {
        Self::DEFAULT
    }
}
