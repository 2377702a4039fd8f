//! The hello-triangle and the form-driven triangle builder

use glam::Vec2;

use crate::error::DemoError;
use crate::renderer::Vertex;

/// Form field ids read by the triangle builder, in parse order
pub const FIELD_IDS: [&str; 9] = ["x1", "y1", "x2", "y2", "x3", "y3", "r", "g", "b"];

/// Red, green and blue corners in NDC
pub fn hello_triangle() -> [Vertex; 3] {
    [
        Vertex::new(0.0, 0.5, [1.0, 0.0, 0.0, 1.0]),
        Vertex::new(-0.5, -0.5, [0.0, 1.0, 0.0, 1.0]),
        Vertex::new(0.5, -0.5, [0.0, 0.0, 1.0, 1.0]),
    ]
}

/// A user-specified flat triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleSpec {
    /// Corners in NDC
    pub points: [Vec2; 3],
    /// RGBA in `[0, 1]`
    pub color: [f32; 4],
}

impl TriangleSpec {
    /// Parse the nine form fields. `field` returns the raw text of a field
    /// by id (`None` if the element is missing, treated as empty).
    ///
    /// Colour channels are given in 0..=255 and clamped into range.
    pub fn parse<F>(mut field: F) -> Result<Self, DemoError>
    where
        F: FnMut(&'static str) -> Option<String>,
    {
        let mut values = [0.0f32; 9];
        for (value, id) in values.iter_mut().zip(FIELD_IDS) {
            *value = parse_number(id, field(id).unwrap_or_default())?;
        }

        let [x1, y1, x2, y2, x3, y3, r, g, b] = values;
        let channel = |v: f32| v.clamp(0.0, 255.0) / 255.0;

        Ok(Self {
            points: [Vec2::new(x1, y1), Vec2::new(x2, y2), Vec2::new(x3, y3)],
            color: [channel(r), channel(g), channel(b), 1.0],
        })
    }

    pub fn vertices(&self) -> [Vertex; 3] {
        self.points.map(|p| Vertex::new(p.x, p.y, self.color))
    }
}

fn parse_number(field: &'static str, raw: String) -> Result<f32, DemoError> {
    match raw.trim().parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(DemoError::InvalidInput { field, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn form(pairs: &[(&'static str, &str)]) -> HashMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    fn full_form() -> HashMap<&'static str, String> {
        form(&[
            ("x1", "0"),
            ("y1", "0.5"),
            ("x2", "-0.5"),
            ("y2", "-0.5"),
            ("x3", " 0.5 "),
            ("y3", "-0.5"),
            ("r", "255"),
            ("g", "127.5"),
            ("b", "0"),
        ])
    }

    #[test]
    fn test_hello_triangle_colours() {
        let v = hello_triangle();
        assert_eq!(v[0].position, [0.0, 0.5]);
        assert_eq!(v[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(v[1].color, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(v[2].color, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_parse_valid_form() {
        let fields = full_form();
        let spec = TriangleSpec::parse(|id| fields.get(id).cloned()).unwrap();

        assert_eq!(spec.points[0], Vec2::new(0.0, 0.5));
        assert_eq!(spec.points[2], Vec2::new(0.5, -0.5));
        assert_eq!(spec.color, [1.0, 0.5, 0.0, 1.0]);
        assert!(spec.vertices().iter().all(|v| v.color == spec.color));
    }

    #[test]
    fn test_non_numeric_field_is_rejected() {
        let mut fields = full_form();
        fields.insert("y2", "abc".to_string());

        let err = TriangleSpec::parse(|id| fields.get(id).cloned()).unwrap_err();
        match err {
            DemoError::InvalidInput { field, value } => {
                assert_eq!(field, "y2");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let mut fields = full_form();
        fields.remove("b");
        let err = TriangleSpec::parse(|id| fields.get(id).cloned()).unwrap_err();
        assert!(matches!(err, DemoError::InvalidInput { field: "b", .. }));
    }

    #[test]
    fn test_infinite_is_rejected() {
        let mut fields = full_form();
        fields.insert("x1", "inf".to_string());
        assert!(TriangleSpec::parse(|id| fields.get(id).cloned()).is_err());
    }

    #[test]
    fn test_colour_is_clamped() {
        let mut fields = full_form();
        fields.insert("r", "300".to_string());
        fields.insert("g", "-20".to_string());
        let spec = TriangleSpec::parse(|id| fields.get(id).cloned()).unwrap();
        assert_eq!(spec.color[0], 1.0);
        assert_eq!(spec.color[1], 0.0);
    }
}
