//! Per-frame model transforms of the 3D demos
//!
//! All functions take wall-clock time in seconds.

use glam::{Mat4, Vec3};
use std::f32::consts::TAU;

/// Seconds per full turn of the spinning demos
pub const SPIN_PERIOD_SECS: f32 = 6.0;
pub const ORBIT_RADIUS: f32 = 2.0;
/// Orbit angular speed (rad/s)
pub const ORBIT_SPEED: f32 = 1.5;
/// Self-rotation speed of the orbiting cube (rad/s, about x and y)
pub const ORB_SPIN_SPEED: f32 = 2.0;
pub const GROUND_Y: f32 = -1.0;

pub fn spin_angle(t: f32) -> f32 {
    t / SPIN_PERIOD_SECS * TAU
}

pub fn cube_model(t: f32) -> Mat4 {
    Mat4::from_rotation_y(spin_angle(t))
}

/// Turns about y while tumbling about x at a quarter of the rate
pub fn pyramid_model(t: f32) -> Mat4 {
    let angle = spin_angle(t);
    Mat4::from_rotation_y(angle) * Mat4::from_rotation_x(angle / 4.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitTransforms {
    pub main: Mat4,
    pub orb: Mat4,
    pub ground: Mat4,
}

/// Main cube at rest, small cube circling it, ground plane below
pub fn orbit_scene(t: f32) -> OrbitTransforms {
    let orbit = Mat4::from_rotation_y(ORBIT_SPEED * t);
    let offset = Mat4::from_translation(Vec3::new(ORBIT_RADIUS, 0.0, 0.0));
    let spin = Mat4::from_rotation_x(ORB_SPIN_SPEED * t) * Mat4::from_rotation_y(ORB_SPIN_SPEED * t);

    OrbitTransforms {
        main: Mat4::IDENTITY,
        orb: orbit * offset * spin,
        ground: Mat4::from_translation(Vec3::new(0.0, GROUND_Y, 0.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_turn_every_period() {
        assert!((spin_angle(SPIN_PERIOD_SECS) - TAU).abs() < 1e-5);
        let m = cube_model(SPIN_PERIOD_SECS);
        assert!(m.abs_diff_eq(Mat4::IDENTITY, 1e-5));
    }

    #[test]
    fn test_quarter_turn() {
        let m = cube_model(SPIN_PERIOD_SECS / 4.0);
        let x = m.transform_vector3(Vec3::X);
        // rotY(90 deg) maps +x to -z
        assert!(x.abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn test_pyramid_tilts_slower() {
        assert_eq!(pyramid_model(0.0), Mat4::IDENTITY);
        // After one full y-turn the x tilt is a quarter turn
        let m = pyramid_model(SPIN_PERIOD_SECS);
        let up = m.transform_vector3(Vec3::Y);
        assert!(up.abs_diff_eq(Vec3::Z, 1e-4));
    }

    #[test]
    fn test_orb_stays_on_circle() {
        for i in 0..50 {
            let t = i as f32 * 0.37;
            let scene = orbit_scene(t);
            let centre = scene.orb.transform_point3(Vec3::ZERO);
            assert!(centre.y.abs() < 1e-5);
            assert!((centre.length() - ORBIT_RADIUS).abs() < 1e-4);
            assert_eq!(scene.main, Mat4::IDENTITY);
        }
    }

    #[test]
    fn test_ground_below() {
        let scene = orbit_scene(3.0);
        assert_eq!(scene.ground.transform_point3(Vec3::ZERO), Vec3::new(0.0, -1.0, 0.0));
    }
}
