//! The demos this crate ships and how a page picks one

use crate::error::DemoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoKind {
    Cube,
    Orbit,
    Pyramid,
    Triangle,
    TriangleBuilder,
    SplitQuad,
    Bounce,
    Shooter,
}

impl DemoKind {
    pub const ALL: [DemoKind; 8] = [
        DemoKind::Cube,
        DemoKind::Orbit,
        DemoKind::Pyramid,
        DemoKind::Triangle,
        DemoKind::TriangleBuilder,
        DemoKind::SplitQuad,
        DemoKind::Bounce,
        DemoKind::Shooter,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            DemoKind::Cube => "cube",
            DemoKind::Orbit => "orbit",
            DemoKind::Pyramid => "pyramid",
            DemoKind::Triangle => "triangle",
            DemoKind::TriangleBuilder => "triangle-builder",
            DemoKind::SplitQuad => "split-quad",
            DemoKind::Bounce => "bounce",
            DemoKind::Shooter => "shooter",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DemoKind::Cube => "Spinning Cube",
            DemoKind::Orbit => "Orbiting Cubes",
            DemoKind::Pyramid => "Pyramid",
            DemoKind::Triangle => "Hello Triangle",
            DemoKind::TriangleBuilder => "Triangle Builder",
            DemoKind::SplitQuad => "Textured Split Quad",
            DemoKind::Bounce => "Ball Bounce",
            DemoKind::Shooter => "Shoot the Falling Blocks",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }

    /// Pick the demo from the `?demo=` query value, else the canvas
    /// `data-demo` attribute, else the shooter. A present but unknown slug
    /// is an error.
    pub fn select(query: Option<&str>, data_attr: Option<&str>) -> Result<Self, DemoError> {
        match query.or(data_attr).map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(DemoKind::Shooter),
            Some(slug) => {
                Self::from_slug(slug).ok_or_else(|| DemoError::UnknownDemo(slug.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_roundtrip() {
        for kind in DemoKind::ALL {
            assert_eq!(DemoKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(DemoKind::from_slug(" Split-Quad "), Some(DemoKind::SplitQuad));
        assert_eq!(DemoKind::from_slug("tetris"), None);
    }

    #[test]
    fn test_query_beats_attribute() {
        assert_eq!(
            DemoKind::select(Some("cube"), Some("pyramid")).unwrap(),
            DemoKind::Cube
        );
        assert_eq!(DemoKind::select(None, Some("bounce")).unwrap(), DemoKind::Bounce);
    }

    #[test]
    fn test_default_is_shooter() {
        assert_eq!(DemoKind::select(None, None).unwrap(), DemoKind::Shooter);
        assert_eq!(DemoKind::select(Some("  "), None).unwrap(), DemoKind::Shooter);
    }

    #[test]
    fn test_unknown_slug_is_an_error() {
        let err = DemoKind::select(Some("tetris"), None).unwrap_err();
        assert!(matches!(err, DemoError::UnknownDemo(ref s) if s == "tetris"));
    }
}
