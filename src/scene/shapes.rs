//! Shape generation for the 2D colour pipeline (NDC)

use glam::Vec2;
use std::f32::consts::PI;

use crate::renderer::Vertex;

/// Generate vertices for a filled circle.
/// `radius` is per axis so a circle stays round on a non-square canvas.
pub fn circle(center: Vec2, radius: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius.x * theta1.cos(),
            center.y + radius.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius.x * theta2.cos(),
            center.y + radius.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Axis-aligned rectangle between two corners
pub fn quad(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

/// Pixel radius expressed in NDC for a viewport of `size` pixels
pub fn px_to_ndc_radius(radius_px: f32, size: Vec2) -> Vec2 {
    Vec2::new(
        radius_px * 2.0 / size.x.max(1.0),
        radius_px * 2.0 / size.y.max(1.0),
    )
}

/// Layout size in CSS pixels of a surface whose backing store is `backing`
/// device pixels. Gameplay constants are tuned in CSS pixels, so the demos
/// size their worlds with this rather than the backing store.
pub fn css_size(backing: (u32, u32), device_pixel_ratio: f64) -> Vec2 {
    let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    Vec2::new(
        (backing.0 as f64 / dpr) as f32,
        (backing.1 as f64 / dpr) as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_rim_distance() {
        let center = Vec2::new(0.25, -0.25);
        let verts = circle(center, Vec2::splat(0.1), [1.0; 4], 24);
        assert_eq!(verts.len(), 24 * 3);
        for tri in verts.chunks(3) {
            assert_eq!(Vec2::from(tri[0].position), center);
            for rim in &tri[1..] {
                let d = Vec2::from(rim.position).distance(center);
                assert!((d - 0.1).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_circle_minimum_segments() {
        assert_eq!(circle(Vec2::ZERO, Vec2::ONE, [1.0; 4], 0).len(), 9);
    }

    #[test]
    fn test_quad() {
        let verts = quad(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 0.0), [0.5; 4]);
        assert_eq!(verts.len(), 6);
        assert!(verts.iter().all(|v| v.position[1] <= 0.0));
    }

    #[test]
    fn test_px_to_ndc_radius() {
        let r = px_to_ndc_radius(20.0, Vec2::new(800.0, 400.0));
        assert_eq!(r, Vec2::new(0.05, 0.1));
    }

    #[test]
    fn test_css_size_undoes_pixel_ratio() {
        assert_eq!(css_size((1600, 1200), 2.0), Vec2::new(800.0, 600.0));
        assert_eq!(css_size((800, 600), 1.0), Vec2::new(800.0, 600.0));
        assert_eq!(css_size((1200, 900), 1.5), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_css_size_ignores_bad_ratio() {
        assert_eq!(css_size((800, 600), 0.0), Vec2::new(800.0, 600.0));
        assert_eq!(css_size((800, 600), f64::NAN), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_ball_radius_is_independent_of_pixel_ratio() {
        let at_1x = px_to_ndc_radius(20.0, css_size((800, 600), 1.0));
        let at_2x = px_to_ndc_radius(20.0, css_size((1600, 1200), 2.0));
        assert_eq!(at_1x, at_2x);
    }
}
