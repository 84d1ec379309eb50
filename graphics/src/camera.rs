//! Perspective camera owned by the renderer.

use glam::Mat4;

/// Perspective projection parameters and the matrix derived from them.
///
/// The projection matrix is only rebuilt by [`update_projection`], so several
/// parameters can be changed before paying for one rebuild.
///
/// [`update_projection`]: Camera::update_projection
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Width over height.
    pub aspect: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    projection: Mat4,
    projection_updates: u64,
}

impl Camera {
    /// Create a camera and build its projection.
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov_y_degrees,
            aspect,
            near,
            far,
            projection: Mat4::IDENTITY,
            projection_updates: 0,
        };
        camera.update_projection();
        camera
    }

    /// Rebuild the projection matrix from the current parameters.
    ///
    /// Uses the GL clip convention (depth in `[-1, 1]`).
    pub fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh_gl(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
        self.projection_updates += 1;
    }

    /// Current projection matrix.
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// How many times the projection has been rebuilt.
    pub fn projection_updates(&self) -> u64 {
        self.projection_updates
    }
}

impl Default for Camera {
    /// 45 degree field of view, square aspect, clip range 1 to 1000.
    fn default() -> Self {
        Self::new(45.0, 1.0, 1.0, 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_default_parameters() {
        let camera = Camera::default();
        assert_eq!(camera.fov_y_degrees, 45.0);
        assert_eq!(camera.aspect, 1.0);
        assert_eq!(camera.near, 1.0);
        assert_eq!(camera.far, 1000.0);
        assert_eq!(camera.projection_updates(), 1);
    }

    #[test]
    fn test_near_and_far_map_to_clip_range() {
        let camera = Camera::default();
        let near = camera.projection() * Vec4::new(0.0, 0.0, -1.0, 1.0);
        let far = camera.projection() * Vec4::new(0.0, 0.0, -1000.0, 1.0);
        assert!((near.z / near.w + 1.0).abs() < 1e-5);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_aspect_changes_projection_after_update() {
        let mut camera = Camera::default();
        let before = camera.projection();
        camera.aspect = 2.0;
        assert_eq!(camera.projection(), before);
        camera.update_projection();
        assert_ne!(camera.projection(), before);
        assert_eq!(camera.projection_updates(), 2);
    }
}
