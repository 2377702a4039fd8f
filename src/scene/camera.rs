//! Perspective cameras

use glam::{Mat4, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera of the cube and pyramid demos: 45 degrees, looking at the origin
    /// from z = -5
    pub fn spinning() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, -5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_deg: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Wide camera above and to the side of the orbit scene
    pub fn orbit() -> Self {
        Self {
            eye: Vec3::new(2.0, 2.0, 3.0),
            fov_y_deg: 75.0,
            ..Self::spinning()
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), aspect.max(1e-3), self.near, self.far)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn test_target_projects_to_centre() {
        for camera in [Camera::spinning(), Camera::orbit()] {
            let clip = camera.view_proj(16.0 / 9.0) * Vec4::new(0.0, 0.0, 0.0, 1.0);
            let ndc = clip / clip.w;
            assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
            assert!((0.0..=1.0).contains(&ndc.z));
        }
    }

    #[test]
    fn test_orbit_camera() {
        let camera = Camera::orbit();
        assert_eq!(camera.eye, Vec3::new(2.0, 2.0, 3.0));
        assert_eq!(camera.fov_y_deg, 75.0);
        assert_eq!(camera.far, 1000.0);
    }

    #[test]
    fn test_up_stays_up() {
        let camera = Camera::spinning();
        let clip = camera.view_proj(1.0) * Vec4::new(0.0, 0.5, 0.0, 1.0);
        assert!(clip.y / clip.w > 0.0);
    }
}
