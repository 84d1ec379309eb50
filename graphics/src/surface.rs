//! Display surfaces the renderer draws into.
//!
//! A surface has two sizes: the logical size it is displayed at, which the
//! platform layer changes, and the size of its backing store, which only the
//! renderer changes. [`Renderer::check_resize`](crate::Renderer::check_resize)
//! brings the second in line with the first.

/// A display surface with a resizable backing store.
pub trait Surface {
    /// Size the surface is displayed at, in pixels.
    fn logical_size(&self) -> (u32, u32);

    /// Size of the backing store, in pixels.
    fn backing_size(&self) -> (u32, u32);

    /// Resize the backing store.
    fn set_backing_size(&mut self, width: u32, height: u32);
}

/// Surface not attached to any display.
///
/// Used when no surface is supplied, and by tests to simulate the platform
/// resizing the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffscreenSurface {
    logical: (u32, u32),
    backing: (u32, u32),
}

impl OffscreenSurface {
    /// Size used when no surface size is given.
    pub const DEFAULT_SIZE: (u32, u32) = (500, 500);

    /// Create a surface whose logical and backing sizes match.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            logical: (width, height),
            backing: (width, height),
        }
    }

    /// Change the displayed size, as a platform layout pass would.
    pub fn set_logical_size(&mut self, width: u32, height: u32) {
        self.logical = (width, height);
    }
}

impl Default for OffscreenSurface {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE.0, Self::DEFAULT_SIZE.1)
    }
}

impl Surface for OffscreenSurface {
    fn logical_size(&self) -> (u32, u32) {
        self.logical
    }

    fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
    }
}
